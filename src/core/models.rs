use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use url::Url;

use crate::errors::ResourceError;

// ============================================================================
// Lifecycle request
// ============================================================================

/// Why CloudFormation invoked the custom resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestType {
    Create,
    Update,
    Delete,
}

impl FromStr for RequestType {
    type Err = ResourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Create" => Ok(Self::Create),
            "Update" => Ok(Self::Update),
            "Delete" => Ok(Self::Delete),
            other => Err(ResourceError::UnsupportedRequestType(other.to_string())),
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "Create",
            Self::Update => "Update",
            Self::Delete => "Delete",
        })
    }
}

/// CloudFormation custom resource event.
///
/// `RequestType` is kept as a raw string so that an unsupported signal is
/// reported as such instead of as a malformed event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LifecycleRequest {
    pub request_type: String,
    #[serde(rename = "ResponseURL")]
    pub response_url: Url,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
    #[serde(default)]
    pub physical_resource_id: Option<String>,
    #[serde(default)]
    pub resource_properties: Value,
}

impl LifecycleRequest {
    /// # Errors
    ///
    /// Returns `InvalidRequest` when the event lacks the fields needed to
    /// address a response.
    pub fn from_value(payload: Value) -> Result<Self, ResourceError> {
        serde_json::from_value(payload).map_err(|e| ResourceError::InvalidRequest(e.to_string()))
    }

    /// # Errors
    ///
    /// Returns `UnsupportedRequestType` for anything but Create, Update or Delete.
    pub fn request_type(&self) -> Result<RequestType, ResourceError> {
        self.request_type.parse()
    }

    /// Deserializes `ResourceProperties` into a typed view.
    ///
    /// # Errors
    ///
    /// Returns `InvalidProperties` when a required key is missing or empty.
    pub fn properties<P: ResourceProperties>(&self) -> Result<P, ResourceError> {
        let props: P = serde_json::from_value(self.resource_properties.clone())
            .map_err(|e| ResourceError::InvalidProperties(e.to_string()))?;
        props.validate()?;
        Ok(props)
    }
}

/// Typed `ResourceProperties` with a post-deserialization check.
pub trait ResourceProperties: for<'de> Deserialize<'de> {
    fn validate(&self) -> Result<(), ResourceError>;
}

fn require_non_empty(key: &str, value: &str) -> Result<(), ResourceError> {
    if value.trim().is_empty() {
        return Err(ResourceError::InvalidProperties(format!("{key} must not be empty")));
    }
    Ok(())
}

// CloudFormation passes unset optional parameters as empty strings
fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Properties of the Amazon Q in Connect integration resource.
#[derive(Debug, Clone, Deserialize)]
pub struct IntegrationProperties {
    #[serde(rename = "INSTANCE_ARN")]
    pub instance_arn: String,
    #[serde(rename = "QCONNECT_ASSISTANT_ARN", default, deserialize_with = "non_empty")]
    pub assistant_arn: Option<String>,
    #[serde(
        rename = "QCONNECT_KNOWLEDGE_BASE_ARN",
        default,
        deserialize_with = "non_empty"
    )]
    pub knowledge_base_arn: Option<String>,
    #[serde(rename = "ServiceToken", default, deserialize_with = "non_empty")]
    pub service_token: Option<String>,
}

impl IntegrationProperties {
    /// Desired target ARN for an integration kind, if one was supplied.
    #[must_use]
    pub fn target(&self, kind: IntegrationKind) -> Option<&str> {
        match kind {
            IntegrationKind::Assistant => self.assistant_arn.as_deref(),
            IntegrationKind::KnowledgeBase => self.knowledge_base_arn.as_deref(),
        }
    }
}

impl ResourceProperties for IntegrationProperties {
    fn validate(&self) -> Result<(), ResourceError> {
        require_non_empty("INSTANCE_ARN", &self.instance_arn)
    }
}

/// Properties of the queue lookup resource.
#[derive(Debug, Clone, Deserialize)]
pub struct QueueProperties {
    #[serde(rename = "AmazonConnectInstanceARN")]
    pub instance_arn: String,
    #[serde(rename = "QueueName")]
    pub queue_name: String,
}

impl QueueProperties {
    #[must_use]
    pub fn instance_id(&self) -> &str {
        instance_id_from_arn(&self.instance_arn)
    }
}

impl ResourceProperties for QueueProperties {
    fn validate(&self) -> Result<(), ResourceError> {
        require_non_empty("AmazonConnectInstanceARN", &self.instance_arn)?;
        require_non_empty("QueueName", &self.queue_name)
    }
}

/// Last path segment of a Connect instance ARN (`arn:...:instance/<id>`).
/// A bare instance id is returned unchanged.
#[must_use]
pub fn instance_id_from_arn(arn: &str) -> &str {
    arn.rsplit('/').next().unwrap_or(arn)
}

// ============================================================================
// Lifecycle response
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseStatus {
    Success,
    Failed,
}

/// Document PUT to the pre-signed `ResponseURL`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LifecycleResponse {
    pub status: ResponseStatus,
    pub reason: String,
    pub physical_resource_id: String,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
    pub no_echo: bool,
    pub data: Value,
}

// ============================================================================
// Amazon Connect records
// ============================================================================

/// Kinds of Amazon Q in Connect integration managed by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntegrationKind {
    Assistant,
    KnowledgeBase,
}

impl IntegrationKind {
    pub const ALL: [IntegrationKind; 2] = [IntegrationKind::Assistant, IntegrationKind::KnowledgeBase];

    /// Amazon Connect `IntegrationType` value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Assistant => "WISDOM_ASSISTANT",
            Self::KnowledgeBase => "WISDOM_KNOWLEDGE_BASE",
        }
    }
}

impl fmt::Display for IntegrationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrationAssociation {
    pub instance_id: String,
    pub integration_arn: String,
    pub kind: IntegrationKind,
    pub association_id: String,
}

/// Identifiers minted by `CreateIntegrationAssociation`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedAssociation {
    pub association_id: String,
    pub association_arn: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueRecord {
    pub name: Option<String>,
    pub arn: Option<String>,
    pub id: Option<String>,
}

// ============================================================================
// Step results
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepStatus {
    Success,
    ClientError,
    Exception,
}

/// Outcome of one remote call, recorded instead of aborting the invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepResult {
    pub status: StepStatus,
    pub message: String,
}

impl StepResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: StepStatus::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == StepStatus::Success
    }
}

impl From<&crate::errors::ApiError> for StepResult {
    fn from(error: &crate::errors::ApiError) -> Self {
        Self {
            status: error.status(),
            message: error.to_string(),
        }
    }
}
