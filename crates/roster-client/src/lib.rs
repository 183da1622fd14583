//! Roster HTTP access layer
//!
//! Every request the console sends to the backend goes through the
//! [`HttpGateway`] in this crate: one place that attaches credentials,
//! decodes response envelopes, and normalizes every way a call can fail
//! into a single [`ApiFailure`] value. Operation facades
//! ([`AuthApi`], [`MemberApi`], [`AgentApi`]) sit on top of the gateway,
//! one method per backend endpoint.

pub mod agents;
pub mod auth;
pub mod config;
pub mod constants;
pub mod credentials;
pub mod error;
pub mod http;
pub mod members;

pub use agents::AgentApi;
pub use auth::AuthApi;
pub use config::ClientConfig;
pub use credentials::CredentialStore;
pub use error::{ApiFailure, FailureKind};
pub use http::HttpGateway;
pub use members::MemberApi;
