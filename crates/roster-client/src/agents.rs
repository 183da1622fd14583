// Agent operations

use std::sync::Arc;

use roster_api::model::Agent;

use crate::{constants::api_path, error::ApiFailure, http::HttpGateway};

/// Read-only agent listing, used to populate the agent filter
pub struct AgentApi {
    gateway: Arc<HttpGateway>,
}

impl AgentApi {
    pub fn new(gateway: Arc<HttpGateway>) -> Self {
        Self { gateway }
    }

    /// Fetch all agents
    pub async fn list(&self) -> Result<Vec<Agent>, ApiFailure> {
        self.gateway.get(api_path::AGENTS, "Failed to fetch agents").await
    }
}
