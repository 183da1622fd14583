// Backend API path constants

pub mod api_path {
    // Auth
    pub const AUTH_LOGIN: &str = "/auth/login";

    // Members
    pub const MEMBERS: &str = "/members";
    pub const MEMBER_REGISTER: &str = "/members/register";
    pub const MEMBER_EXPORT: &str = "/members/export";

    // Agents
    pub const AGENTS: &str = "/agents";

    pub fn member(login_id: &str) -> String {
        format!("{}/{}", MEMBERS, login_id)
    }

    pub fn member_switch_status(id: &str) -> String {
        format!("{}/{}/switch-status", MEMBERS, id)
    }

    pub fn member_toggle_archive(id: &str) -> String {
        format!("{}/{}/toggle-archive", MEMBERS, id)
    }
}
