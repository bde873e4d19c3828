// Lambda bootstrap for the queue lookup custom resource

use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use qconnect_resources::clients::{HttpCallbackSender, SdkConnectClient};
use qconnect_resources::core::config::AppConfig;
use qconnect_resources::queue::{self, QueueHandler};
use serde_json::Value;
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    qconnect_resources::setup_logging();

    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;
    let shared = aws_config::from_env().load().await;
    let handler = QueueHandler::new(
        SdkConnectClient::new(&shared),
        HttpCallbackSender::new(),
        config,
    );

    let handler = &handler;
    run(service_fn(move |event: LambdaEvent<Value>| async move {
        queue::function_handler(handler, event).await
    }))
    .await
}
