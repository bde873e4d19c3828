//! Clients for the remote services the custom resources talk to.

pub mod callback;
pub mod connect;

pub use callback::{CallbackSender, HttpCallbackSender};
pub use connect::{ConnectApi, SdkConnectClient};
