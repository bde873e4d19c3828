//! Amazon Connect queue lookup custom resource

pub mod handler;
pub mod resolve;

pub use handler::{QueueHandler, function_handler};
pub use resolve::{QueueData, resolve_queue};
