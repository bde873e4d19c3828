use lambda_runtime::{Error, LambdaEvent};
use serde_json::{Value, json};
use tracing::{error, info, warn};

use super::reconcile::reconcile;
use crate::cfn::{ResponseBuilder, send_response};
use crate::clients::{CallbackSender, ConnectApi};
use crate::core::config::AppConfig;
use crate::core::models::{IntegrationProperties, LifecycleRequest, RequestType, ResponseStatus};
use crate::errors::ResourceError;

/// Custom resource wiring an Amazon Q in Connect assistant and knowledge
/// base into a Connect instance.
pub struct IntegrationHandler<C, S> {
    connect: C,
    callback: S,
    config: AppConfig,
}

impl<C, S> IntegrationHandler<C, S>
where
    C: ConnectApi,
    S: CallbackSender,
{
    pub fn new(connect: C, callback: S, config: AppConfig) -> Self {
        Self {
            connect,
            callback,
            config,
        }
    }

    pub fn connect(&self) -> &C {
        &self.connect
    }

    pub fn callback(&self) -> &S {
        &self.callback
    }

    /// Reconciles the integrations and reports to CloudFormation.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedRequestType` before any remote call is made, and
    /// `InvalidProperties` after reporting the rejection to CloudFormation.
    pub async fn handle(
        &self,
        request: &LifecycleRequest,
        log_stream: &str,
    ) -> Result<Value, ResourceError> {
        let request_type = request.request_type()?;
        info!("Request Type: {}", request_type);
        info!("Resource Properties: {}", request.resource_properties);

        let props = match request.properties::<IntegrationProperties>() {
            Ok(props) => props,
            Err(e) => {
                error!("Rejecting resource properties: {}", e);
                self.reject(request, request_type, log_stream, &e).await;
                return Err(e);
            }
        };

        let report = reconcile(&self.connect, request_type, &props).await;
        let data = serde_json::to_value(&report.data)?;
        info!(
            "{} - QConnect Integration Handler Response: {}",
            request_type, data
        );

        let (status, reason) = self
            .config
            .failure_policy
            .resolve(&report.labeled_results());
        if report.has_failures() && status == ResponseStatus::Success {
            warn!("Reporting SUCCESS despite failed Amazon Connect calls");
        }

        let physical_id = props
            .service_token
            .as_deref()
            .or(request.physical_resource_id.as_deref());
        let response = ResponseBuilder::new(request, log_stream)
            .physical_resource_id(physical_id)
            .reason(reason)
            .build(status, data.clone());
        send_response(&self.callback, request, &response).await;

        Ok(data)
    }

    // A Delete that can't name its integrations has nothing to clean up;
    // failing it would leave the stack stuck in DELETE_FAILED.
    async fn reject(
        &self,
        request: &LifecycleRequest,
        request_type: RequestType,
        log_stream: &str,
        e: &ResourceError,
    ) {
        let builder = ResponseBuilder::new(request, log_stream)
            .physical_resource_id(request.physical_resource_id.as_deref());
        let response = if request_type == RequestType::Delete {
            builder.build(ResponseStatus::Success, json!({}))
        } else {
            builder
                .reason(Some(e.to_string()))
                .build(ResponseStatus::Failed, json!({}))
        };
        send_response(&self.callback, request, &response).await;
    }
}

/// Lambda entry point for the integration custom resource.
pub async fn function_handler<C, S>(
    handler: &IntegrationHandler<C, S>,
    event: LambdaEvent<Value>,
) -> Result<Value, Error>
where
    C: ConnectApi,
    S: CallbackSender,
{
    info!("Event Received: {}", event.payload);

    let request = LifecycleRequest::from_value(event.payload).map_err(|e| {
        error!("{}", e);
        Error::from(e)
    })?;

    handler
        .handle(&request, &event.context.env_config.log_stream)
        .await
        .map_err(Error::from)
}
