//! User-facing text for failed operations

use roster_api::error_code::{
    AGENT_NOT_FOUND, BAD_CREDENTIALS, EMAIL_CONFLICT, LOGIN_ID_CONFLICT, MEMBER_NOT_FOUND,
    REFERRER_NOT_FOUND,
};
use roster_client::{ApiFailure, FailureKind};

/// Shown when nothing more specific applies.
pub const GENERIC_ERROR: &str = "Something went wrong. Please try again.";

/// Shown when the backend could not be reached at all.
pub const NETWORK_ERROR: &str = "Could not reach the server. Check your connection and try again.";

/// Shown when a request came back unauthorized outside the login screen.
pub const SESSION_EXPIRED: &str = "Your session has expired. Please log in again.";

/// Map a failure to the line a person should read.
///
/// Recognized backend code and message fragments get field-specific text,
/// everything else collapses to one generic line. Validation text is
/// already written for people and passes through unchanged.
pub fn user_message(failure: &ApiFailure) -> String {
    match failure.kind() {
        FailureKind::Validation => failure.message().to_string(),
        FailureKind::Transport => NETWORK_ERROR.to_string(),
        FailureKind::Domain | FailureKind::Protocol => domain_message(failure),
    }
}

fn domain_message(failure: &ApiFailure) -> String {
    let message = failure.message();
    if let Some(code) = failure.code() {
        if code.matches(EMAIL_CONFLICT.code) && message.contains("email") {
            return "This email address is already registered.".to_string();
        }
        if code.matches(LOGIN_ID_CONFLICT.code) && message.contains("login id") {
            return "This login id is already registered.".to_string();
        }
        if code.matches(REFERRER_NOT_FOUND.code) && message.contains("Referrer") {
            return "The selected referrer does not exist.".to_string();
        }
        if code.matches(AGENT_NOT_FOUND.code) && message.contains("Agent") {
            return "The selected agent does not exist.".to_string();
        }
        if code.matches(MEMBER_NOT_FOUND.code) && message.contains("Member") {
            return "This member no longer exists.".to_string();
        }
        if code.matches(BAD_CREDENTIALS.code) {
            return "Login id or password is incorrect.".to_string();
        }
    }
    if failure.is_unauthorized() {
        return SESSION_EXPIRED.to_string();
    }
    GENERIC_ERROR.to_string()
}
