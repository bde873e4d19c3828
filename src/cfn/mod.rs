//! CloudFormation custom resource response handling

pub mod response;

pub use response::{ResponseBuilder, send_response};
