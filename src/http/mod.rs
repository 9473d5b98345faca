//! HTTP transport for the appeal service.
//!
//! A thin axum layer over the validator and the record store: routing,
//! status-code mapping and response shaping live here, domain rules do
//! not.

pub mod config;
pub mod errors;
pub mod response;
pub mod server;

pub use config::HttpConfig;
pub use errors::{ApiError, ApiResult};
pub use response::{ListResponse, SubmitResponse};
pub use server::ApiServer;
