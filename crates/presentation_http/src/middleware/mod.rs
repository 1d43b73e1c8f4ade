//! HTTP middleware components
//!
//! This module contains middleware for authentication, request logging and
//! payload validation.

pub mod auth;
pub mod request_id;
pub mod validation;

pub use auth::{ALT_API_KEY_HEADER, API_KEY_HEADER, ApiKeyAuth, ApiKeyAuthLayer};
pub use request_id::{REQUEST_ID_HEADER, RequestId, RequestIdLayer, RequestIdService};
pub use validation::{FirstValueQuery, ResourcePayload, parse_payload};
