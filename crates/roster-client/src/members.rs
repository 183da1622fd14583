// Member operations

use std::sync::Arc;

use roster_api::{
    filter::MemberFilter,
    list::ListResult,
    model::{Member, MemberDraft, MemberStatus},
    validation::validate_draft,
};
use serde::Serialize;

use crate::{constants::api_path, error::ApiFailure, http::HttpGateway};

/// Body for the switch-status endpoint
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SwitchStatusForm {
    status: MemberStatus,
}

/// Member CRUD and export operations
pub struct MemberApi {
    gateway: Arc<HttpGateway>,
}

impl MemberApi {
    pub fn new(gateway: Arc<HttpGateway>) -> Self {
        Self { gateway }
    }

    /// Fetch one page of members matching the filter
    pub async fn filter(&self, filter: &MemberFilter) -> Result<ListResult<Member>, ApiFailure> {
        self.gateway
            .get_list(
                api_path::MEMBERS,
                &filter.to_canonical_query(),
                filter.current_page,
                filter.limit,
                "Failed to filter members",
            )
            .await
    }

    /// Register a new member
    pub async fn register(&self, draft: &MemberDraft) -> Result<Member, ApiFailure> {
        validate_draft(draft).map_err(ApiFailure::validation)?;
        self.gateway
            .post_json(api_path::MEMBER_REGISTER, draft, "Failed to register member")
            .await
    }

    /// Fetch a single member by login id
    pub async fn get(&self, login_id: &str) -> Result<Member, ApiFailure> {
        self.gateway
            .get(&api_path::member(login_id), "Failed to fetch member")
            .await
    }

    /// Overwrite a member's editable fields
    pub async fn edit(&self, login_id: &str, draft: &MemberDraft) -> Result<(), ApiFailure> {
        validate_draft(draft).map_err(ApiFailure::validation)?;
        self.gateway
            .put_json(
                &api_path::member(login_id),
                draft,
                "Failed to update member",
            )
            .await
    }

    /// Set a member's business standing to valid or invalid
    pub async fn switch_status(&self, id: &str, status: MemberStatus) -> Result<(), ApiFailure> {
        self.gateway
            .put_json(
                &api_path::member_switch_status(id),
                &SwitchStatusForm { status },
                "Failed to update member status",
            )
            .await
    }

    /// Flip a member between the active and archived lists
    pub async fn toggle_archive(&self, id: &str) -> Result<(), ApiFailure> {
        self.gateway
            .put_empty(
                &api_path::member_toggle_archive(id),
                "Failed to archive member",
            )
            .await
    }

    /// Download the CSV export of everything matching the filter.
    /// Sends exactly the query `filter` would send, only the response
    /// handling differs.
    pub async fn export_csv(&self, filter: &MemberFilter) -> Result<Vec<u8>, ApiFailure> {
        self.gateway
            .get_bytes(
                api_path::MEMBER_EXPORT,
                &filter.to_canonical_query(),
                "Failed to export members",
            )
            .await
    }
}
