use unmeshed_common::{ProcessType, StepType};
use unmeshed_samples::definitions::{test_process_definition, updated_test_process_definition};

#[test]
fn test_initial_definition() {
    let def = test_process_definition();
    assert_eq!(def.name, "test_process");
    assert_eq!(def.namespace, "default");
    assert_eq!(def.version, 1);
    assert_eq!(def.process_type, ProcessType::ApiOrchestration);
    assert_eq!(def.steps.len(), 1);
    assert_eq!(def.steps[0].step_type, StepType::Noop);
}

#[test]
fn test_updated_definition_keeps_identity_and_adds_step() {
    let original = test_process_definition();
    let updated = updated_test_process_definition();
    assert_eq!(updated.name, original.name);
    assert_eq!(updated.version, 2);
    assert_eq!(updated.steps[0], original.steps[0]);
    assert_eq!(updated.steps[1].ref_name, "test_noop_ref_2");
    assert_ne!(updated.description, original.description);
}
