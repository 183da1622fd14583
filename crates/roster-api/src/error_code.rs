// Domain error codes surfaced by the backend

use serde::{Deserialize, Serialize};

/// Structured error code as carried in response envelopes
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ErrorCode<'a> {
    pub code: &'a str,
    pub message: &'a str,
}

// Conflicts on unique member fields
pub const EMAIL_CONFLICT: ErrorCode<'static> = ErrorCode {
    code: "RESOURCE_CONFLICT",
    message: "email is already registered",
};

pub const LOGIN_ID_CONFLICT: ErrorCode<'static> = ErrorCode {
    code: "RESOURCE_CONFLICT",
    message: "login id is already registered",
};

// Missing entities referenced by a draft or lookup
pub const MEMBER_NOT_FOUND: ErrorCode<'static> = ErrorCode {
    code: "NOT_FOUND",
    message: "Member does not exist",
};

pub const REFERRER_NOT_FOUND: ErrorCode<'static> = ErrorCode {
    code: "NOT_FOUND",
    message: "Referrer does not exist",
};

pub const AGENT_NOT_FOUND: ErrorCode<'static> = ErrorCode {
    code: "NOT_FOUND",
    message: "Agent does not exist",
};

// Authentication
pub const BAD_CREDENTIALS: ErrorCode<'static> = ErrorCode {
    code: "BAD_CREDENTIALS",
    message: "login id or password is incorrect",
};
