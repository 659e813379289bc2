mod auth;
mod common;
mod records;
mod team;

pub use auth::{
    AuthLoginRequest, AuthRegisterRequest, AuthResetPasswordRequest, CapabilitySetResponse,
    NavigationEntryResponse, PrincipalResponse, SessionResponse,
};
pub use common::{GenericMessageResponse, HealthResponse};
pub use records::{
    CreateRecordRequest, RecordListQuery, RecordResponse, RevealSecretQuery,
    RevealedSecretResponse, SecretFieldResponse, UpdateRecordRequest,
};
pub use team::{ChangeRoleRequest, TeamMemberResponse};
