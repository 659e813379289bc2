use nexus_domain::{CapabilitySet, Principal, Surface};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Incoming payload for email/password registration.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/auth-register-request.ts"
)]
pub struct AuthRegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Incoming payload for email/password login.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/auth-login-request.ts"
)]
pub struct AuthLoginRequest {
    pub email: String,
    pub password: String,
}

/// Incoming payload for a password change request awaiting approval.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/auth-reset-password-request.ts"
)]
pub struct AuthResetPasswordRequest {
    pub email: String,
    pub new_password: String,
}

/// API representation of a principal.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/principal-response.ts"
)]
pub struct PrincipalResponse {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub role: Option<String>,
    pub status: String,
}

impl From<&Principal> for PrincipalResponse {
    fn from(principal: &Principal) -> Self {
        Self {
            id: principal.id().to_string(),
            name: principal.name().to_owned(),
            email: principal.email().map(ToOwned::to_owned),
            role: principal.role().map(|role| role.as_str().to_owned()),
            status: principal.status().as_str().to_owned(),
        }
    }
}

/// Capability flags in the shape the UI consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/capability-set-response.ts"
)]
pub struct CapabilitySetResponse {
    pub can_edit: bool,
    pub can_delete: bool,
    pub is_admin: bool,
    pub can_access_projects: bool,
    pub can_access_dashboard: bool,
    pub can_access_timeline: bool,
    pub can_access_clients: bool,
    pub can_access_team: bool,
    pub can_access_infra: bool,
}

impl From<CapabilitySet> for CapabilitySetResponse {
    fn from(capabilities: CapabilitySet) -> Self {
        Self {
            can_edit: capabilities.can_edit(),
            can_delete: capabilities.can_delete(),
            is_admin: capabilities.is_admin(),
            can_access_projects: capabilities.can_access_projects(),
            can_access_dashboard: capabilities.can_access_dashboard(),
            can_access_timeline: capabilities.can_access_timeline(),
            can_access_clients: capabilities.can_access_clients(),
            can_access_team: capabilities.can_access_team(),
            can_access_infra: capabilities.can_access_infra(),
        }
    }
}

/// One sidebar entry the caller may open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/navigation-entry-response.ts"
)]
pub struct NavigationEntryResponse {
    pub surface: String,
    pub path: String,
}

impl From<Surface> for NavigationEntryResponse {
    fn from(surface: Surface) -> Self {
        Self {
            surface: surface.as_str().to_owned(),
            path: surface.path().to_owned(),
        }
    }
}

/// Authenticated session view: who the caller is and what they may do.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/session-response.ts"
)]
pub struct SessionResponse {
    pub user: PrincipalResponse,
    pub capabilities: CapabilitySetResponse,
    pub navigation: Vec<NavigationEntryResponse>,
}

impl SessionResponse {
    /// Builds the view from a trusted principal and its resolved capabilities.
    pub fn new(principal: &Principal, capabilities: CapabilitySet) -> Self {
        Self {
            user: PrincipalResponse::from(principal),
            navigation: capabilities
                .navigation()
                .into_iter()
                .map(NavigationEntryResponse::from)
                .collect(),
            capabilities: CapabilitySetResponse::from(capabilities),
        }
    }
}
