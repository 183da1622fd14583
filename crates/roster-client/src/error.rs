// Normalized failure value for all backend operations

use reqwest::StatusCode;
use roster_api::envelope::Code;

/// Broad classes a failed operation falls into
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// The request never produced an HTTP response
    Transport,
    /// The backend answered and rejected the operation
    Domain,
    /// The backend answered with something this client cannot interpret
    Protocol,
    /// Local validation rejected the payload before any request was sent
    Validation,
}

/// The one failure value every operation returns.
///
/// Built exactly once at the access-layer boundary and immutable after
/// that. `message` is always present and human-readable; `code` and
/// `status` are absent only when the failure never reached the backend.
#[derive(Clone, Debug, thiserror::Error)]
#[error("{message}")]
pub struct ApiFailure {
    message: String,
    code: Option<Code>,
    status: Option<u16>,
    payload: Option<serde_json::Value>,
    kind: FailureKind,
}

impl ApiFailure {
    /// The request failed before the backend could answer.
    pub fn transport(err: reqwest::Error) -> Self {
        Self {
            message: err.to_string(),
            code: None,
            status: None,
            payload: None,
            kind: FailureKind::Transport,
        }
    }

    /// The backend rejected the operation with a structured envelope.
    pub fn domain(
        status: StatusCode,
        code: Option<Code>,
        message: String,
        payload: Option<serde_json::Value>,
    ) -> Self {
        let message = if message.trim().is_empty() {
            format!("Request failed with status {}", status.as_u16())
        } else {
            message
        };
        Self {
            message,
            code,
            status: Some(status.as_u16()),
            payload,
            kind: FailureKind::Domain,
        }
    }

    /// A successful status whose envelope carried no data for a
    /// data-expecting call. Surfaced with the operation's fallback text.
    pub fn missing_data(status: StatusCode, code: Option<Code>, fallback: &str) -> Self {
        Self {
            message: fallback.to_string(),
            code,
            status: Some(status.as_u16()),
            payload: None,
            kind: FailureKind::Domain,
        }
    }

    /// The response body could not be interpreted at all.
    pub fn protocol(status: StatusCode, fallback: &str) -> Self {
        let message = if fallback.trim().is_empty() {
            format!("Request failed with status {}", status.as_u16())
        } else {
            fallback.to_string()
        };
        Self {
            message,
            code: None,
            status: Some(status.as_u16()),
            payload: None,
            kind: FailureKind::Protocol,
        }
    }

    /// The payload never left this process.
    pub fn validation(error: validator::ValidationError) -> Self {
        let message = match &error.message {
            Some(message) => message.to_string(),
            None => format!("submitted data failed validation ({})", error.code),
        };
        Self {
            message,
            code: None,
            status: None,
            payload: None,
            kind: FailureKind::Validation,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> Option<&Code> {
        self.code.as_ref()
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// The structured envelope the backend sent with the rejection
    pub fn payload(&self) -> Option<&serde_json::Value> {
        self.payload.as_ref()
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }
}
