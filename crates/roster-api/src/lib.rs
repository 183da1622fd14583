//! Roster API contract - Shared wire types and query state
//!
//! This crate defines everything both sides of the admin console agree on:
//! - Response envelopes and the paginated list result
//! - Member, agent, and session models
//! - The filter/sort/pagination state and its canonical query encoding
//! - Domain error codes surfaced by the backend
//! - Local validation rules for member submissions

pub mod envelope;
pub mod error_code;
pub mod filter;
pub mod list;
pub mod model;
pub mod validation;

// Re-exports for convenience
pub use envelope::{Code, Envelope, ListEnvelope};
pub use error_code::ErrorCode;
pub use filter::{MemberFilter, SearchField, SortDirection, SortField};
pub use list::ListResult;
pub use model::{
    Agent, Gender, LoginRequest, Member, MemberDraft, MemberRef, MemberStatus, Session,
    SessionUser,
};
