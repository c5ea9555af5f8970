use rand::Rng;
use serde_json::json;
use unmeshed_common::{JsonMap, ProcessRequestData};

pub const OPERATIONS: [&str; 4] = ["add", "subtract", "multiply", "divide"];

/// Process every load-test iteration starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTemplate {
    pub namespace: String,
    pub process_name: String,
}

impl RequestTemplate {
    pub fn new(namespace: impl Into<String>, process_name: impl Into<String>) -> Self {
        Self { namespace: namespace.into(), process_name: process_name.into() }
    }

    /// Request for iteration `iteration`, with random arithmetic input.
    /// The iteration number doubles as the correlation id.
    pub fn build(&self, iteration: usize, rng: &mut impl Rng) -> ProcessRequestData {
        ProcessRequestData::new(self.namespace.clone(), self.process_name.clone())
            .with_correlation_id(format!("load-{iteration}"))
            .with_input(generate_input(rng))
    }
}

/// `{"operation", "num1", "num2"}` with operands in `1..=1000`, so division never hits zero.
pub fn generate_input(rng: &mut impl Rng) -> JsonMap {
    let operation = OPERATIONS[rng.gen_range(0..OPERATIONS.len())];
    let mut input = JsonMap::new();
    input.insert("operation".to_string(), json!(operation));
    input.insert("num1".to_string(), json!(rng.gen_range(1..=1000)));
    input.insert("num2".to_string(), json!(rng.gen_range(1..=1000)));
    input
}
