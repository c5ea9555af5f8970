use serde_json::{json, Value};
use tracing::info;
use unmeshed_client::WorkerRegistry;
use unmeshed_common::{Result, UnmeshedError, WorkRequest};

pub const NAMESPACE: &str = "default";

pub const ARITHMETIC_OPERATION: &str = "arithmetic_operation";
pub const HELLO_WORLD: &str = "hello_world";
pub const TRANSFER_CASH: &str = "transfer_cash";

/// Registry holding every sample worker in the `default` namespace.
pub fn sample_registry() -> WorkerRegistry {
    let mut registry = WorkerRegistry::new();
    registry.register(NAMESPACE, ARITHMETIC_OPERATION, arithmetic_operation);
    registry.register(NAMESPACE, HELLO_WORLD, hello_world);
    registry.register(NAMESPACE, TRANSFER_CASH, transfer_cash);
    registry
}

/// Applies `operation` (add, subtract, multiply, divide) to the integers `num1` and `num2`.
///
/// Division always yields a float. Division by zero, overflow and unknown
/// operations fail the step.
pub fn arithmetic_operation(request: &WorkRequest) -> Result<Value> {
    let input = &request.input_param;
    let operation = input
        .get("operation")
        .and_then(Value::as_str)
        .ok_or_else(|| failed("Missing operation"))?;
    let num1 = integer_param(request, "num1")?;
    let num2 = integer_param(request, "num2")?;

    info!("Performing {} operation on {} and {}", operation, num1, num2);

    let result = match operation.to_lowercase().as_str() {
        "add" => json!(num1.checked_add(num2).ok_or_else(overflow)?),
        "subtract" => json!(num1.checked_sub(num2).ok_or_else(overflow)?),
        "multiply" => json!(num1.checked_mul(num2).ok_or_else(overflow)?),
        "divide" => {
            if num2 == 0 {
                return Err(failed("Division by zero is not allowed"));
            }
            json!(num1 as f64 / num2 as f64)
        }
        _ => return Err(failed("Invalid operation")),
    };

    Ok(json!({ "result": result }))
}

pub fn hello_world(request: &WorkRequest) -> Result<Value> {
    Ok(greeting(
        request,
        "Hello World! This is Unmeshed, ready to run your workloads :)",
    ))
}

pub fn transfer_cash(request: &WorkRequest) -> Result<Value> {
    Ok(greeting(request, "Transfer is successful"))
}

fn greeting(request: &WorkRequest, message: &str) -> Value {
    info!("Input is : {:?}", request.input_param);
    json!({
        "message": message,
        "input": request.input_param,
        "stepName": request.step_name,
        "stepRef": request.step_ref,
        "stepId": request.step_id,
    })
}

fn integer_param(request: &WorkRequest, name: &str) -> Result<i64> {
    request
        .input_param
        .get(name)
        .and_then(Value::as_i64)
        .ok_or_else(|| failed(&format!("{name} must be an integer")))
}

fn failed(msg: &str) -> UnmeshedError {
    UnmeshedError::WorkerFailed(msg.to_string())
}

fn overflow() -> UnmeshedError {
    failed("Integer overflow")
}
