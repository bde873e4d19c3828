//! Reconciliation of Amazon Q in Connect integration associations.
//!
//! Create/Update replaces whatever association of each kind exists with one
//! pointing at the desired target; Delete removes only associations that
//! point at the ARNs this resource was given.

use serde::Serialize;
use tracing::{error, info};

use crate::clients::ConnectApi;
use crate::core::models::{
    IntegrationAssociation, IntegrationKind, IntegrationProperties, RequestType, StepResult,
};

/// `Data` returned to CloudFormation. Every key is always present; unset
/// values are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntegrationData {
    #[serde(rename = "QConnect_Assistant_ARN")]
    pub assistant_arn: String,
    #[serde(rename = "QConnect_Assistant_IntegrationAssociationARN")]
    pub assistant_association_arn: String,
    #[serde(rename = "QConnect_KnowledgeBase_ARN")]
    pub knowledge_base_arn: String,
    #[serde(rename = "QConnect_KnowledgeBase_IntegrationAssociationARN")]
    pub knowledge_base_association_arn: String,
}

impl IntegrationData {
    fn record(&mut self, kind: IntegrationKind, target_arn: &str, association_arn: &str) {
        let (target, association) = match kind {
            IntegrationKind::Assistant => {
                (&mut self.assistant_arn, &mut self.assistant_association_arn)
            }
            IntegrationKind::KnowledgeBase => (
                &mut self.knowledge_base_arn,
                &mut self.knowledge_base_association_arn,
            ),
        };
        *target = target_arn.to_string();
        *association = association_arn.to_string();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Delete,
    Create,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Action::List => "list",
            Action::Delete => "delete",
            Action::Create => "create",
        })
    }
}

/// One remote call made during reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub kind: IntegrationKind,
    pub action: Action,
    pub result: StepResult,
}

#[derive(Debug, Clone, Default)]
pub struct Reconciliation {
    pub data: IntegrationData,
    pub steps: Vec<Step>,
}

impl Reconciliation {
    pub fn results(&self) -> impl Iterator<Item = &StepResult> {
        self.steps.iter().map(|step| &step.result)
    }

    /// Step results with each message prefixed by the kind and action that
    /// produced it, e.g. `WISDOM_ASSISTANT create: ...`.
    #[must_use]
    pub fn labeled_results(&self) -> Vec<StepResult> {
        self.steps
            .iter()
            .map(|step| StepResult {
                status: step.result.status,
                message: format!("{} {}: {}", step.kind, step.action, step.result.message),
            })
            .collect()
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.results().any(|result| !result.is_success())
    }

    fn push(&mut self, kind: IntegrationKind, action: Action, result: StepResult) {
        self.steps.push(Step {
            kind,
            action,
            result,
        });
    }
}

/// Drives both integration kinds to the state requested by `request_type`.
///
/// Never fails: every remote error is logged and recorded as a [`Step`],
/// and one kind failing does not stop the other from being processed.
pub async fn reconcile<C>(
    client: &C,
    request_type: RequestType,
    props: &IntegrationProperties,
) -> Reconciliation
where
    C: ConnectApi + ?Sized,
{
    let mut report = Reconciliation::default();
    let instance = props.instance_arn.as_str();

    for kind in IntegrationKind::ALL {
        let desired = props.target(kind);

        match request_type {
            RequestType::Create | RequestType::Update => {
                let existing = list_existing(client, instance, kind, &mut report).await;
                if !existing.is_empty() {
                    info!(
                        "Connect Instance: {} has {} existing {} integration(s)",
                        instance,
                        existing.len(),
                        kind
                    );
                }
                for association in &existing {
                    delete(client, instance, association, &mut report).await;
                }

                match desired {
                    Some(target) => create(client, instance, kind, target, &mut report).await,
                    None => info!("{} ARN not provided. Skipping Create Integration Association.", kind),
                }
            }
            RequestType::Delete => {
                // Only the association this resource created is ours to remove
                let Some(target) = desired else {
                    continue;
                };
                let existing = list_existing(client, instance, kind, &mut report).await;
                for association in existing.iter().filter(|a| a.integration_arn == target) {
                    delete(client, instance, association, &mut report).await;
                }
            }
        }
    }

    report
}

async fn list_existing<C>(
    client: &C,
    instance: &str,
    kind: IntegrationKind,
    report: &mut Reconciliation,
) -> Vec<IntegrationAssociation>
where
    C: ConnectApi + ?Sized,
{
    match client.list_integration_associations(instance, kind).await {
        Ok(associations) => {
            report.push(
                kind,
                Action::List,
                StepResult::success(format!("Found {} {} integration(s)", associations.len(), kind)),
            );
            associations
        }
        Err(e) => {
            error!("Failed to list {} integrations: {}", kind, e);
            report.push(kind, Action::List, StepResult::from(&e));
            Vec::new()
        }
    }
}

async fn delete<C>(
    client: &C,
    instance: &str,
    association: &IntegrationAssociation,
    report: &mut Reconciliation,
) where
    C: ConnectApi + ?Sized,
{
    info!(
        "Deleting Integration Association between Connect Instance: {} and the QConnect Integration: {}",
        instance, association.association_id
    );
    let result = match client
        .delete_integration_association(instance, &association.association_id)
        .await
    {
        Ok(()) => StepResult::success(format!(
            "Integration Association {} deleted successfully",
            association.association_id
        )),
        Err(e) => {
            error!("Failed to delete {} integration: {}", association.kind, e);
            StepResult::from(&e)
        }
    };
    report.push(association.kind, Action::Delete, result);
}

async fn create<C>(
    client: &C,
    instance: &str,
    kind: IntegrationKind,
    target: &str,
    report: &mut Reconciliation,
) where
    C: ConnectApi + ?Sized,
{
    info!(
        "Creating Integration Association between Connect Instance: {} and the QConnect Resource: {} with Integration Type: {}",
        instance, target, kind
    );
    let result = match client
        .create_integration_association(instance, kind, target)
        .await
    {
        Ok(created) => {
            info!(
                association_id = %created.association_id,
                association_arn = %created.association_arn,
                "Created {} integration", kind
            );
            report
                .data
                .record(kind, target, &created.association_arn);
            StepResult::success(format!(
                "Integration Association {} created",
                created.association_arn
            ))
        }
        Err(e) => {
            error!("Failed to create {} integration: {}", kind, e);
            StepResult::from(&e)
        }
    };
    report.push(kind, Action::Create, result);
}
