use lambda_runtime::{Error, LambdaEvent};
use serde_json::{Value, json};
use tracing::{error, info};

use super::resolve::resolve_queue;
use crate::cfn::{ResponseBuilder, send_response};
use crate::clients::{CallbackSender, ConnectApi};
use crate::core::config::AppConfig;
use crate::core::models::{LifecycleRequest, QueueProperties, RequestType, ResponseStatus, StepResult};
use crate::errors::ResourceError;

/// Custom resource returning the attributes of an Amazon Connect queue.
pub struct QueueHandler<C, S> {
    connect: C,
    callback: S,
    config: AppConfig,
}

impl<C, S> QueueHandler<C, S>
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
        let builder = ResponseBuilder::new(request, log_stream)
            .physical_resource_id(request.physical_resource_id.as_deref());

        if request_type == RequestType::Delete {
            let data = json!({});
            let response = builder.build(ResponseStatus::Success, data.clone());
            send_response(&self.callback, request, &response).await;
            return Ok(data);
        }

        let props = match request.properties::<QueueProperties>() {
            Ok(props) => props,
            Err(e) => {
                error!("Rejecting resource properties: {}", e);
                let response = builder
                    .reason(Some(e.to_string()))
                    .build(ResponseStatus::Failed, json!({}));
                send_response(&self.callback, request, &response).await;
                return Err(e);
            }
        };

        let (data, step) = match resolve_queue(&self.connect, &props).await {
            Ok(Some(queue)) => (
                serde_json::to_value(&queue)?,
                StepResult::success(format!("Queue {} found", props.queue_name)),
            ),
            Ok(None) => (
                json!({}),
                StepResult::success(format!("Queue {} not found", props.queue_name)),
            ),
            Err(e) => {
                error!("Failed to search queues: {}", e);
                (json!({}), StepResult::from(&e))
            }
        };
        info!("{} - Queue Info Response: {}", request_type, data);

        let (status, reason) = self.config.failure_policy.resolve([&step]);
        let response = builder.reason(reason).build(status, data.clone());
        send_response(&self.callback, request, &response).await;

        Ok(data)
    }
}

/// Lambda entry point for the queue lookup custom resource.
pub async fn function_handler<C, S>(
    handler: &QueueHandler<C, S>,
    event: LambdaEvent<Value>,
) -> Result<Value, Error>
where
    C: ConnectApi,
    S: CallbackSender,
{
    info!("Received event: {}", event.payload);

    let request = LifecycleRequest::from_value(event.payload).map_err(|e| {
        error!("{}", e);
        Error::from(e)
    })?;

    handler
        .handle(&request, &event.context.env_config.log_stream)
        .await
        .map_err(Error::from)
}
