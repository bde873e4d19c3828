use serde_json::Value;
use tracing::{error, info, warn};

use crate::clients::CallbackSender;
use crate::core::models::{LifecycleRequest, LifecycleResponse, ResponseStatus};

/// Builds the [`LifecycleResponse`] for one request.
#[derive(Debug, Clone)]
pub struct ResponseBuilder<'a> {
    request: &'a LifecycleRequest,
    log_stream: &'a str,
    physical_resource_id: Option<String>,
    reason: Option<String>,
}

impl<'a> ResponseBuilder<'a> {
    #[must_use]
    pub fn new(request: &'a LifecycleRequest, log_stream: &'a str) -> Self {
        Self {
            request,
            log_stream,
            physical_resource_id: None,
            reason: None,
        }
    }

    #[must_use]
    pub fn physical_resource_id(mut self, id: Option<&str>) -> Self {
        self.physical_resource_id = id.map(ToString::to_string);
        self
    }

    #[must_use]
    pub fn reason(mut self, reason: Option<String>) -> Self {
        self.reason = reason;
        self
    }

    /// Falls back to the log stream name for both the reason and the
    /// physical resource id.
    #[must_use]
    pub fn build(self, status: ResponseStatus, data: Value) -> LifecycleResponse {
        LifecycleResponse {
            status,
            reason: self.reason.unwrap_or_else(|| {
                format!(
                    "See the details in CloudWatch Log Stream: {}",
                    self.log_stream
                )
            }),
            physical_resource_id: self
                .physical_resource_id
                .unwrap_or_else(|| self.log_stream.to_string()),
            stack_id: self.request.stack_id.clone(),
            request_id: self.request.request_id.clone(),
            logical_resource_id: self.request.logical_resource_id.clone(),
            no_echo: false,
            data,
        }
    }
}

/// Sends `response` to the request's `ResponseURL`.
///
/// Delivery problems are logged and dropped; CloudFormation times the
/// resource out if nothing arrives.
pub async fn send_response<S>(sender: &S, request: &LifecycleRequest, response: &LifecycleResponse)
where
    S: CallbackSender + ?Sized,
{
    info!("Response URL: {}", request.response_url);

    let body = match serde_json::to_string(response) {
        Ok(body) => body,
        Err(e) => {
            error!("Failed to serialize CloudFormation response: {}", e);
            return;
        }
    };
    info!("Response body: {}", body);

    match sender.put_response(&request.response_url, body).await {
        Ok(status) if (200..300).contains(&status) => info!("Status code: {}", status),
        Ok(status) => warn!("CloudFormation response rejected: status={}", status),
        Err(e) => error!("send_response failed executing PUT: {}", e),
    }
}
