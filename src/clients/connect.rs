//! Amazon Connect API client module
//!
//! Wraps the integration-association and queue-search operations behind the
//! [`ConnectApi`] trait so handlers can be driven by the real SDK or a fake.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_connect::Client;
use aws_sdk_connect::types::{
    IntegrationType, QueueSearchCriteria, StringComparisonType, StringCondition,
};
use tracing::{debug, warn};

use crate::core::models::{CreatedAssociation, IntegrationAssociation, IntegrationKind, QueueRecord};
use crate::errors::ApiError;

/// Operations of the Amazon Connect API used by the custom resources.
#[async_trait]
pub trait ConnectApi: Send + Sync {
    /// All associations of `kind` on the instance (every page).
    async fn list_integration_associations(
        &self,
        instance_id: &str,
        kind: IntegrationKind,
    ) -> Result<Vec<IntegrationAssociation>, ApiError>;

    async fn create_integration_association(
        &self,
        instance_id: &str,
        kind: IntegrationKind,
        integration_arn: &str,
    ) -> Result<CreatedAssociation, ApiError>;

    async fn delete_integration_association(
        &self,
        instance_id: &str,
        association_id: &str,
    ) -> Result<(), ApiError>;

    /// Queues whose name equals `queue_name` exactly.
    async fn search_queues_by_name(
        &self,
        instance_id: &str,
        queue_name: &str,
    ) -> Result<Vec<QueueRecord>, ApiError>;
}

fn integration_type(kind: IntegrationKind) -> IntegrationType {
    match kind {
        IntegrationKind::Assistant => IntegrationType::WisdomAssistant,
        IntegrationKind::KnowledgeBase => IntegrationType::WisdomKnowledgeBase,
    }
}

/// [`ConnectApi`] backed by `aws-sdk-connect`.
#[derive(Debug, Clone)]
pub struct SdkConnectClient {
    client: Client,
}

impl SdkConnectClient {
    #[must_use]
    pub fn new(shared_config: &SdkConfig) -> Self {
        Self {
            client: Client::new(shared_config),
        }
    }

    /// Wraps an already configured SDK client.
    #[must_use]
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ConnectApi for SdkConnectClient {
    async fn list_integration_associations(
        &self,
        instance_id: &str,
        kind: IntegrationKind,
    ) -> Result<Vec<IntegrationAssociation>, ApiError> {
        let mut associations = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let sent_token = next_token.take();
            let resp = self
                .client
                .list_integration_associations()
                .instance_id(instance_id)
                .integration_type(integration_type(kind))
                .set_next_token(sent_token.clone())
                .send()
                .await
                .map_err(|e| ApiError::from(("ListIntegrationAssociations", e)))?;

            for summary in resp.integration_association_summary_list() {
                let Some(association_id) = summary.integration_association_id() else {
                    debug!("Skipping integration association summary without an id");
                    continue;
                };
                associations.push(IntegrationAssociation {
                    instance_id: summary.instance_id().unwrap_or(instance_id).to_string(),
                    integration_arn: summary.integration_arn().unwrap_or_default().to_string(),
                    kind,
                    association_id: association_id.to_string(),
                });
            }

            match resp.next_token() {
                Some(token) if Some(token) == sent_token.as_deref() => {
                    warn!("ListIntegrationAssociations returned the token it was sent; stopping");
                    break;
                }
                Some(token) if !token.is_empty() => next_token = Some(token.to_string()),
                _ => break,
            }
        }

        Ok(associations)
    }

    async fn create_integration_association(
        &self,
        instance_id: &str,
        kind: IntegrationKind,
        integration_arn: &str,
    ) -> Result<CreatedAssociation, ApiError> {
        let resp = self
            .client
            .create_integration_association()
            .instance_id(instance_id)
            .integration_type(integration_type(kind))
            .integration_arn(integration_arn)
            .send()
            .await
            .map_err(|e| ApiError::from(("CreateIntegrationAssociation", e)))?;

        Ok(CreatedAssociation {
            association_id: resp.integration_association_id().unwrap_or_default().to_string(),
            association_arn: resp.integration_association_arn().unwrap_or_default().to_string(),
        })
    }

    async fn delete_integration_association(
        &self,
        instance_id: &str,
        association_id: &str,
    ) -> Result<(), ApiError> {
        self.client
            .delete_integration_association()
            .instance_id(instance_id)
            .integration_association_id(association_id)
            .send()
            .await
            .map_err(|e| ApiError::from(("DeleteIntegrationAssociation", e)))?;
        Ok(())
    }

    async fn search_queues_by_name(
        &self,
        instance_id: &str,
        queue_name: &str,
    ) -> Result<Vec<QueueRecord>, ApiError> {
        let criteria = QueueSearchCriteria::builder()
            .string_condition(
                StringCondition::builder()
                    .field_name("name")
                    .value(queue_name)
                    .comparison_type(StringComparisonType::Exact)
                    .build(),
            )
            .build();

        let resp = self
            .client
            .search_queues()
            .instance_id(instance_id)
            .search_criteria(criteria)
            .send()
            .await
            .map_err(|e| ApiError::from(("SearchQueues", e)))?;

        Ok(resp
            .queues()
            .iter()
            .map(|queue| QueueRecord {
                name: queue.name().map(ToString::to_string),
                arn: queue.queue_arn().map(ToString::to_string),
                id: queue.queue_id().map(ToString::to_string),
            })
            .collect())
    }
}
