//! Account lifecycle and team administration.
//!
//! Registration creates pending accounts; an administrator activates them,
//! approves requested password changes and assigns roles. Every team
//! operation goes through [`AuthorizationService`] first.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use nexus_core::{AppError, AppResult};
use nexus_domain::{AuditAction, Principal, Role, UserId, UserStatus};

use crate::{
    AuditEvent, AuditRepository, AuthorizationService, PasswordHasher, PrincipalRepository,
    UserAccount,
};

mod login;
mod password;
mod registration;
mod team;


/// Parameters for user registration.
pub struct RegisterParams {
    /// Display name.
    pub name: String,
    /// Email address for the new account.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Team listing row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMember {
    /// Member identity, role and status.
    pub principal: Principal,
    /// Whether a password change awaits approval.
    pub has_pending_password: bool,
    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<UserAccount> for TeamMember {
    fn from(account: UserAccount) -> Self {
        Self {
            principal: account.principal,
            has_pending_password: account.pending_password_hash.is_some(),
            created_at: account.created_at,
        }
    }
}

/// Application service for authentication and team management.
#[derive(Clone)]
pub struct UserService {
    principal_repository: Arc<dyn PrincipalRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    authorization_service: AuthorizationService,
    audit_repository: Arc<dyn AuditRepository>,
}

impl UserService {
    /// Creates a new user service.
    #[must_use]
    pub fn new(
        principal_repository: Arc<dyn PrincipalRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        authorization_service: AuthorizationService,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            principal_repository,
            password_hasher,
            authorization_service,
            audit_repository,
        }
    }

    /// Returns the persisted principal for a user, if it still exists.
    pub async fn find_principal(&self, user_id: UserId) -> AppResult<Option<Principal>> {
        self.authorization_service.trusted_principal(user_id).await
    }

    async fn require_account(&self, user_id: UserId) -> AppResult<UserAccount> {
        self.principal_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' not found")))
    }

    async fn audit_team_event(
        &self,
        actor: UserId,
        action: AuditAction,
        target: UserId,
        detail: Option<String>,
    ) -> AppResult<()> {
        self.audit_repository
            .append_event(AuditEvent {
                subject: actor.to_string(),
                action,
                resource_type: "user".to_owned(),
                resource_id: target.to_string(),
                detail,
            })
            .await
    }
}

fn new_account(
    name: &str,
    email: &str,
    password_hash: String,
    role: Role,
    status: UserStatus,
) -> UserAccount {
    UserAccount {
        principal: Principal::new(
            UserId::new(),
            name.trim(),
            Some(email.to_owned()),
            Some(role),
            status,
        ),
        password_hash,
        pending_password_hash: None,
        created_at: Utc::now(),
    }
}
