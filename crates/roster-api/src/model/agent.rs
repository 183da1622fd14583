// Agent (staff) model types

use serde::{Deserialize, Serialize};

/// Staff member who manages a portfolio of members. Used to populate the
/// agent filter on the member list.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub is_active: bool,
}
