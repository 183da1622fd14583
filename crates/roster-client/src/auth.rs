// Authentication operations

use std::sync::Arc;

use roster_api::model::{LoginRequest, Session};
use tracing::info;

use crate::{constants::api_path, credentials::CredentialStore, error::ApiFailure, http::HttpGateway};

/// Login and logout against the backend.
///
/// This is the only place besides session restore that writes to the
/// credential store.
pub struct AuthApi {
    gateway: Arc<HttpGateway>,
    credentials: Arc<CredentialStore>,
}

impl AuthApi {
    pub fn new(gateway: Arc<HttpGateway>, credentials: Arc<CredentialStore>) -> Self {
        Self {
            gateway,
            credentials,
        }
    }

    /// Exchange credentials for a session and store it for subsequent
    /// requests.
    pub async fn login(&self, login_id: &str, password: &str) -> Result<Session, ApiFailure> {
        let request = LoginRequest {
            login_id: login_id.to_string(),
            password: password.to_string(),
        };
        let session: Session = self
            .gateway
            .post_json(api_path::AUTH_LOGIN, &request, "Failed to log in")
            .await?;

        self.credentials.set(session.clone());
        info!("logged in as {}", session.user.login_id);
        Ok(session)
    }

    /// Drop the stored session. Purely local, the backend keeps no
    /// session state to tear down.
    pub fn logout(&self) {
        self.credentials.clear();
        info!("logged out");
    }
}
