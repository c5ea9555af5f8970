use serde_json::json;
use unmeshed_common::{
    ApiCallType, ProcessData, ProcessDefinition, ProcessRequestData, ProcessSearchRequest, ProcessStatus,
    ProcessType, StepType, WorkRequest,
};

#[test]
fn test_process_request_serializes_camel_case_and_skips_unset() {
    let request = ProcessRequestData::new("default", "testing")
        .with_correlation_id("abcd")
        .with_input(json!({"abc": "pqr"}).as_object().cloned().unwrap());

    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(
        value,
        json!({"name": "testing", "namespace": "default", "correlationId": "abcd", "input": {"abc": "pqr"}})
    );
}

#[test]
fn test_process_data_tolerates_missing_optional_fields() {
    let json = r#"{"processId": 7, "status": "RUNNING"}"#;
    let data: ProcessData = serde_json::from_str(json).unwrap();
    assert_eq!(data.process_id, 7);
    assert_eq!(data.status, ProcessStatus::Running);
    assert!(data.output.is_empty());
    assert!(data.step_records.is_empty());
}

#[test]
fn test_status_terminality() {
    assert!(!ProcessStatus::Running.is_terminal());
    assert!(ProcessStatus::Completed.is_terminal());
    assert!(ProcessStatus::TimedOut.is_terminal());
    assert_eq!(serde_json::to_value(ProcessStatus::TimedOut).unwrap(), json!("TIMED_OUT"));
}

#[test]
fn test_process_definition_uses_type_and_ref_keys() {
    let json = json!({
        "namespace": "default",
        "name": "test_process",
        "version": 1,
        "type": "API_ORCHESTRATION",
        "steps": [{"name": "test_noop", "ref": "test_noop_ref", "type": "NOOP", "namespace": "default"}]
    });
    let def: ProcessDefinition = serde_json::from_value(json).unwrap();
    assert_eq!(def.process_type, ProcessType::ApiOrchestration);
    assert_eq!(def.steps[0].ref_name, "test_noop_ref");
    assert_eq!(def.steps[0].step_type, StepType::Noop);
}

#[test]
fn test_empty_search_request_is_empty_object() {
    let value = serde_json::to_value(ProcessSearchRequest::default()).unwrap();
    assert_eq!(value, json!({}));
}

#[test]
fn test_api_call_type_names() {
    assert_eq!(ApiCallType::Sync.as_name(), "SYNC");
    assert_eq!(ApiCallType::Async.as_name(), "ASYNC");
    assert_eq!(serde_json::to_value(ApiCallType::Stream).unwrap(), json!("STREAM"));
}

#[test]
fn test_work_request_worker_key() {
    let req = WorkRequest {
        step_namespace: "default".to_string(),
        step_name: "hello_world".to_string(),
        ..Default::default()
    };
    assert_eq!(req.worker_key(), "default/hello_world");
}
