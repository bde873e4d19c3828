//! In-memory fakes for the Amazon Connect API and the CloudFormation
//! response endpoint.
#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use qconnect_resources::clients::{CallbackSender, ConnectApi};
use qconnect_resources::core::models::{
    CreatedAssociation, IntegrationAssociation, IntegrationKind, LifecycleRequest, QueueRecord,
};
use qconnect_resources::errors::{ApiError, ResourceError};
use serde_json::{Value, json};
use url::Url;

pub const INSTANCE_ARN: &str = "arn:aws:connect:us-east-1:123456789012:instance/abc";
pub const ASSISTANT_ARN: &str = "arn:aws:wisdom:us-east-1:123456789012:assistant/x";
pub const KNOWLEDGE_BASE_ARN: &str = "arn:aws:wisdom:us-east-1:123456789012:knowledge-base/kb";
pub const LOG_STREAM: &str = "2024/03/21/[$LATEST]0123456789abcdef";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List(IntegrationKind),
    Create(IntegrationKind, String),
    Delete(String),
    SearchQueues(String, String),
}

#[derive(Default)]
pub struct FakeConnect {
    associations: Mutex<Vec<IntegrationAssociation>>,
    queues: Mutex<Vec<(String, QueueRecord)>>,
    calls: Mutex<Vec<Call>>,
    failing: Mutex<HashSet<&'static str>>,
    next_id: Mutex<u32>,
}

impl FakeConnect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_association(self, kind: IntegrationKind, integration_arn: &str, id: &str) -> Self {
        self.associations.lock().unwrap().push(IntegrationAssociation {
            instance_id: INSTANCE_ARN.to_string(),
            integration_arn: integration_arn.to_string(),
            kind,
            association_id: id.to_string(),
        });
        self
    }

    pub fn with_queue(self, instance_id: &str, name: &str, arn: &str, id: &str) -> Self {
        self.queues.lock().unwrap().push((
            instance_id.to_string(),
            QueueRecord {
                name: Some(name.to_string()),
                arn: Some(arn.to_string()),
                id: Some(id.to_string()),
            },
        ));
        self
    }

    /// Makes every call to `operation` fail with a service error.
    pub fn failing(self, operation: &'static str) -> Self {
        self.failing.lock().unwrap().insert(operation);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn associations(&self) -> Vec<IntegrationAssociation> {
        self.associations.lock().unwrap().clone()
    }

    pub fn associations_of(&self, kind: IntegrationKind) -> Vec<IntegrationAssociation> {
        self.associations()
            .into_iter()
            .filter(|a| a.kind == kind)
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, operation: &'static str) -> Result<(), ApiError> {
        if self.failing.lock().unwrap().contains(operation) {
            return Err(ApiError::Client {
                operation,
                code: "AccessDeniedException".to_string(),
                message: "not authorized".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ConnectApi for FakeConnect {
    async fn list_integration_associations(
        &self,
        _instance_id: &str,
        kind: IntegrationKind,
    ) -> Result<Vec<IntegrationAssociation>, ApiError> {
        self.record(Call::List(kind));
        self.check("ListIntegrationAssociations")?;
        Ok(self.associations_of(kind))
    }

    async fn create_integration_association(
        &self,
        instance_id: &str,
        kind: IntegrationKind,
        integration_arn: &str,
    ) -> Result<CreatedAssociation, ApiError> {
        self.record(Call::Create(kind, integration_arn.to_string()));
        self.check("CreateIntegrationAssociation")?;

        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            format!("assoc-{}", *next)
        };
        self.associations.lock().unwrap().push(IntegrationAssociation {
            instance_id: instance_id.to_string(),
            integration_arn: integration_arn.to_string(),
            kind,
            association_id: id.clone(),
        });
        Ok(CreatedAssociation {
            association_arn: format!("{INSTANCE_ARN}/integration-association/{id}"),
            association_id: id,
        })
    }

    async fn delete_integration_association(
        &self,
        _instance_id: &str,
        association_id: &str,
    ) -> Result<(), ApiError> {
        self.record(Call::Delete(association_id.to_string()));
        self.check("DeleteIntegrationAssociation")?;
        self.associations
            .lock()
            .unwrap()
            .retain(|a| a.association_id != association_id);
        Ok(())
    }

    async fn search_queues_by_name(
        &self,
        instance_id: &str,
        queue_name: &str,
    ) -> Result<Vec<QueueRecord>, ApiError> {
        self.record(Call::SearchQueues(
            instance_id.to_string(),
            queue_name.to_string(),
        ));
        self.check("SearchQueues")?;
        Ok(self
            .queues
            .lock()
            .unwrap()
            .iter()
            .filter(|(instance, q)| instance == instance_id && q.name.as_deref() == Some(queue_name))
            .map(|(_, q)| q.clone())
            .collect())
    }
}

/// Records every response body instead of sending it.
#[derive(Default)]
pub struct RecordingSender {
    sent: Mutex<Vec<(Url, Value)>>,
    fail: bool,
}

impl RecordingSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unreachable() -> Self {
        Self {
            sent: Mutex::default(),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<(Url, Value)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn only_response(&self) -> Value {
        let sent = self.sent();
        assert_eq!(sent.len(), 1, "expected exactly one response, got {sent:?}");
        sent[0].1.clone()
    }
}

#[async_trait]
impl CallbackSender for RecordingSender {
    async fn put_response(&self, url: &Url, body: String) -> Result<u16, ResourceError> {
        self.sent
            .lock()
            .unwrap()
            .push((url.clone(), serde_json::from_str(&body).unwrap()));
        if self.fail {
            return Err(ResourceError::Callback("connection refused".to_string()));
        }
        Ok(200)
    }
}

pub fn lifecycle_event(request_type: &str, properties: Value) -> Value {
    json!({
        "RequestType": request_type,
        "ServiceToken": "arn:aws:lambda:us-east-1:123456789012:function:qic-integration",
        "ResponseURL": "https://cloudformation-custom-resource-response-useast1.s3.amazonaws.com/signed",
        "StackId": "arn:aws:cloudformation:us-east-1:123456789012:stack/contact-center/guid",
        "RequestId": "b9c2f7a4-1111-2222-3333-444455556666",
        "LogicalResourceId": "Resource",
        "ResourceType": "Custom::Resource",
        "ResourceProperties": properties,
    })
}

pub fn lifecycle_request(request_type: &str, properties: Value) -> LifecycleRequest {
    LifecycleRequest::from_value(lifecycle_event(request_type, properties)).unwrap()
}
