//! Application layer - Use cases and orchestration
//!
//! Defines the storage port implemented by the infrastructure adapters and the
//! catalog service that picks a backend for every call.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
