//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod action;
mod audit;
mod capability;
mod principal;
mod record;
mod role;
mod secret;
mod surface;

pub use action::ProtectedAction;
pub use audit::AuditAction;
pub use capability::{Capability, CapabilitySet};
pub use principal::{
    EmailAddress, PASSWORD_MAX_LENGTH, PASSWORD_MIN_LENGTH, Principal, UserId, UserStatus,
    validate_password,
};
pub use record::{Record, RecordId, RecordKind};
pub use role::Role;
pub use secret::{MASKED_PLACEHOLDER, SecretAffordance, SecretPresentation};
pub use surface::Surface;
