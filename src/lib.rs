//! CloudFormation custom resources for Amazon Connect and Amazon Q in Connect.
//!
//! This crate backs two Lambda functions:
//! 1. `qic-integration` associates an Amazon Q in Connect assistant and
//!    knowledge base with a Connect instance, replacing any existing
//!    association of the same kind
//! 2. `queue-info` resolves a queue name to its ARN and id
//!
//! Both receive a CloudFormation lifecycle event, call the Amazon Connect
//! API and PUT the outcome to the pre-signed `ResponseURL`.
//!
//! # Example
//!
//! ```no_run
//! use qconnect_resources::clients::{HttpCallbackSender, SdkConnectClient};
//! use qconnect_resources::core::config::AppConfig;
//! use qconnect_resources::queue::QueueHandler;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), lambda_runtime::Error> {
//!     qconnect_resources::setup_logging();
//!
//!     let shared = aws_config::from_env().load().await;
//!     let handler = QueueHandler::new(
//!         SdkConnectClient::new(&shared),
//!         HttpCallbackSender::new(),
//!         AppConfig::from_env()?,
//!     );
//!
//!     let request = qconnect_resources::core::models::LifecycleRequest::from_value(
//!         serde_json::json!({
//!             "RequestType": "Create",
//!             "ResponseURL": "https://example.com/response",
//!             "StackId": "stack",
//!             "RequestId": "req",
//!             "LogicalResourceId": "BasicQueue",
//!             "ResourceProperties": {
//!                 "AmazonConnectInstanceARN": "arn:aws:connect:us-east-1:123456789012:instance/abc",
//!                 "QueueName": "BasicQueue"
//!             }
//!         }),
//!     )?;
//!     let data = handler.handle(&request, "local").await?;
//!     println!("{data}");
//!     Ok(())
//! }
//! ```

pub mod cfn;
pub mod clients;
pub mod core;
pub mod errors;
pub mod integration;
pub mod queue;

pub use errors::{ApiError, ResourceError};

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// Emits `INFO` and above, or `DEBUG` when built with the `debug-logs`
/// feature. Calling it more than once is harmless.
///
/// # Example
///
/// ```
/// qconnect_resources::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::prelude::*;

    let level = if cfg!(feature = "debug-logs") {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let fmt_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_target(true)
        .with_filter(level);

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}
