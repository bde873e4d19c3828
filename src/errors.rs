use thiserror::Error;

use crate::core::models::StepStatus;

/// Errors that abort a custom resource invocation.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("Unsupported RequestType: {0}")]
    UnsupportedRequestType(String),

    #[error("Invalid custom resource event: {0}")]
    InvalidRequest(String),

    #[error("Invalid resource properties: {0}")]
    InvalidProperties(String),

    #[error("Failed to deliver CloudFormation response: {0}")]
    Callback(String),

    #[error("Failed to serialize response data: {0}")]
    Serialization(String),
}

impl From<reqwest::Error> for ResourceError {
    fn from(error: reqwest::Error) -> Self {
        ResourceError::Callback(error.to_string())
    }
}

impl From<serde_json::Error> for ResourceError {
    fn from(error: serde_json::Error) -> Self {
        ResourceError::Serialization(error.to_string())
    }
}

/// Failure of a single Amazon Connect call.
///
/// `Client` means the service received the request and rejected it;
/// `Exception` covers everything else (dispatch, timeouts, unreadable
/// responses).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("{operation} rejected by Amazon Connect ({code}): {message}")]
    Client {
        operation: &'static str,
        code: String,
        message: String,
    },

    #[error("{operation} failed: {message}")]
    Exception {
        operation: &'static str,
        message: String,
    },
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StepStatus {
        match self {
            ApiError::Client { .. } => StepStatus::ClientError,
            ApiError::Exception { .. } => StepStatus::Exception,
        }
    }
}

// Generic classification for every Connect operation's SdkError
impl<E, R> From<(&'static str, aws_sdk_connect::error::SdkError<E, R>)> for ApiError
where
    E: aws_sdk_connect::error::ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    fn from((operation, error): (&'static str, aws_sdk_connect::error::SdkError<E, R>)) -> Self {
        use aws_sdk_connect::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};

        match &error {
            SdkError::ServiceError(service_err) => {
                let err = service_err.err();
                ApiError::Client {
                    operation,
                    code: err.code().unwrap_or("Unknown").to_string(),
                    message: err
                        .message()
                        .map_or_else(|| err.to_string(), ToString::to_string),
                }
            }
            _ => ApiError::Exception {
                operation,
                message: DisplayErrorContext(&error).to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_connect::error::{ErrorMetadata, SdkError};
    use aws_sdk_connect::operation::list_integration_associations::ListIntegrationAssociationsError;

    #[test]
    fn service_errors_are_client_errors() {
        let err = ListIntegrationAssociationsError::generic(
            ErrorMetadata::builder()
                .code("AccessDeniedException")
                .message("not authorized")
                .build(),
        );
        let api_err = ApiError::from(("ListIntegrationAssociations", SdkError::service_error(err, ())));

        assert_eq!(
            api_err,
            ApiError::Client {
                operation: "ListIntegrationAssociations",
                code: "AccessDeniedException".to_string(),
                message: "not authorized".to_string(),
            }
        );
        assert_eq!(api_err.status(), StepStatus::ClientError);
    }

    #[test]
    fn transport_errors_are_exceptions() {
        let sdk_err: SdkError<ListIntegrationAssociationsError, ()> =
            SdkError::timeout_error("operation timed out");
        let api_err = ApiError::from(("ListIntegrationAssociations", sdk_err));

        assert_eq!(api_err.status(), StepStatus::Exception);
        assert!(api_err.to_string().starts_with("ListIntegrationAssociations failed"));
    }
}
