// Model types shared across the console

pub mod agent;
pub mod auth;
pub mod member;

pub use agent::Agent;
pub use auth::{LoginRequest, Session, SessionUser};
pub use member::{Gender, Member, MemberDraft, MemberRef, MemberStatus};
