//! Amazon Q in Connect integration custom resource

pub mod handler;
pub mod reconcile;

pub use handler::{IntegrationHandler, function_handler};
pub use reconcile::{IntegrationData, Reconciliation, reconcile};
