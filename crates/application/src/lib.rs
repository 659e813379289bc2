//! Application services and ports.

#![forbid(unsafe_code)]

mod audit_ports;
mod authorization_service;
mod record_ports;
mod record_service;
mod session_service;
#[cfg(test)]
mod test_support;
mod user_ports;
mod user_service;

pub use audit_ports::{AuditEvent, AuditRepository};
pub use authorization_service::{AuthorizationService, missing_capability};
pub use record_ports::RecordRepository;
pub use record_service::{CreateRecordInput, RecordService, RecordView, SecretFieldView};
pub use session_service::{SessionService, SessionStore, StoredPrincipal};
pub use user_ports::{PasswordHasher, PrincipalRepository, UserAccount};
pub use user_service::{RegisterParams, TeamMember, UserService};
