use qconnect_resources::core::models::{StepResult, StepStatus};
use qconnect_resources::errors::{ApiError, ResourceError};
use std::error::Error;

#[test]
fn test_resource_error_implements_error_trait() {
    fn assert_error<T: Error + Send + Sync + 'static>(_: &T) {}

    let error = ResourceError::InvalidRequest("missing field `ResponseURL`".to_string());
    assert_error(&error);
    assert_error(&ApiError::Exception {
        operation: "SearchQueues",
        message: "timeout".to_string(),
    });
}

#[test]
fn test_resource_error_display() {
    let error = ResourceError::UnsupportedRequestType("Rollback".to_string());
    assert_eq!(format!("{error}"), "Unsupported RequestType: Rollback");

    let error = ResourceError::InvalidProperties("INSTANCE_ARN must not be empty".to_string());
    assert_eq!(
        format!("{error}"),
        "Invalid resource properties: INSTANCE_ARN must not be empty"
    );

    let error = ResourceError::Callback("connection reset".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to deliver CloudFormation response: connection reset"
    );
}

#[test]
fn test_api_error_maps_to_step_status() {
    let client = ApiError::Client {
        operation: "CreateIntegrationAssociation",
        code: "DuplicateResourceException".to_string(),
        message: "already associated".to_string(),
    };
    assert_eq!(client.status(), StepStatus::ClientError);
    assert_eq!(
        client.to_string(),
        "CreateIntegrationAssociation rejected by Amazon Connect (DuplicateResourceException): already associated"
    );

    let exception = ApiError::Exception {
        operation: "DeleteIntegrationAssociation",
        message: "dispatch failure".to_string(),
    };
    let step = StepResult::from(&exception);
    assert_eq!(step.status, StepStatus::Exception);
    assert!(!step.is_success());
    assert_eq!(step.message, "DeleteIntegrationAssociation failed: dispatch failure");
}

#[test]
fn test_serde_error_conversion() {
    let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let resource_err: ResourceError = err.into();
    assert!(matches!(resource_err, ResourceError::Serialization(_)));
}
