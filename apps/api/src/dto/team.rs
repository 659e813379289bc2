use nexus_application::TeamMember;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Team listing row.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/team-member-response.ts"
)]
pub struct TeamMemberResponse {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub role: Option<String>,
    pub status: String,
    pub has_pending_password: bool,
    pub created_at: String,
}

impl From<TeamMember> for TeamMemberResponse {
    fn from(member: TeamMember) -> Self {
        Self {
            id: member.principal.id().to_string(),
            name: member.principal.name().to_owned(),
            email: member.principal.email().map(ToOwned::to_owned),
            role: member.principal.role().map(|role| role.as_str().to_owned()),
            status: member.principal.status().as_str().to_owned(),
            has_pending_password: member.has_pending_password,
            created_at: member.created_at.to_rfc3339(),
        }
    }
}

/// Incoming payload for a role assignment.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/change-role-request.ts"
)]
pub struct ChangeRoleRequest {
    pub role: String,
}
