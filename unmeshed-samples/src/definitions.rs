use serde_json::json;
use unmeshed_common::{JsonMap, ProcessDefinition, ProcessType, StepDefinition, StepType};

pub const TEST_PROCESS: &str = "test_process";

/// Version 1: a single no-op step.
pub fn test_process_definition() -> ProcessDefinition {
    ProcessDefinition {
        namespace: "default".to_string(),
        name: TEST_PROCESS.to_string(),
        version: 1,
        process_type: ProcessType::ApiOrchestration,
        description: Some("test unmeshed process created by the Rust samples".to_string()),
        steps: vec![noop_step("test_noop", "test_noop_ref", "key1", "val1")],
    }
}

/// Version 2: the original step plus a second no-op.
pub fn updated_test_process_definition() -> ProcessDefinition {
    ProcessDefinition {
        version: 2,
        description: Some("test updated unmeshed process created by the Rust samples".to_string()),
        steps: vec![
            noop_step("test_noop", "test_noop_ref", "key1", "val1"),
            noop_step("test_noop_2", "test_noop_ref_2", "key2", "val2"),
        ],
        ..test_process_definition()
    }
}

fn noop_step(name: &str, ref_name: &str, key: &str, value: &str) -> StepDefinition {
    let mut input = JsonMap::new();
    input.insert(key.to_string(), json!(value));
    StepDefinition {
        name: name.to_string(),
        ref_name: ref_name.to_string(),
        step_type: StepType::Noop,
        namespace: "default".to_string(),
        description: None,
        input,
    }
}
