//! PostgreSQL-backed principal repository.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::warn;

use nexus_application::{PrincipalRepository, UserAccount};
use nexus_core::{AppError, AppResult};
use nexus_domain::{Principal, Role, UserId, UserStatus};

mod account;
mod lookup;

#[cfg(test)]
mod tests;

/// PostgreSQL implementation of the principal repository port.
#[derive(Clone)]
pub struct PostgresPrincipalRepository {
    pool: PgPool,
}

impl PostgresPrincipalRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: uuid::Uuid,
    name: String,
    email: String,
    role: Option<String>,
    status: String,
    password_hash: String,
    pending_password_hash: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for UserAccount {
    fn from(row: UserRow) -> Self {
        let user_id = UserId::from_uuid(row.id);

        let role = Role::from_claim(row.role.as_deref());
        if role.is_none() && row.role.is_some() {
            warn!(subject = %user_id, "stored role is not recognised; treating as no role");
        }

        let status = UserStatus::from_str(&row.status).unwrap_or_else(|_| {
            warn!(subject = %user_id, "stored status is not recognised; treating as blocked");
            UserStatus::Blocked
        });

        Self {
            principal: Principal::new(user_id, row.name, Some(row.email), role, status),
            password_hash: row.password_hash,
            pending_password_hash: row.pending_password_hash,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl PrincipalRepository for PostgresPrincipalRepository {
    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<UserAccount>> {
        self.find_by_id_impl(user_id).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserAccount>> {
        self.find_by_email_impl(email).await
    }

    async fn list_accounts(&self) -> AppResult<Vec<UserAccount>> {
        self.list_accounts_impl().await
    }

    async fn create_account(&self, account: UserAccount) -> AppResult<()> {
        self.create_account_impl(account).await
    }

    async fn update_status(&self, user_id: UserId, status: UserStatus) -> AppResult<()> {
        self.update_status_impl(user_id, status).await
    }

    async fn update_role(&self, user_id: UserId, role: Role) -> AppResult<()> {
        self.update_role_impl(user_id, role).await
    }

    async fn set_pending_password(&self, user_id: UserId, password_hash: &str) -> AppResult<()> {
        self.set_pending_password_impl(user_id, password_hash).await
    }

    async fn apply_pending_password(&self, user_id: UserId) -> AppResult<bool> {
        self.apply_pending_password_impl(user_id).await
    }

    async fn delete_account(&self, user_id: UserId) -> AppResult<()> {
        self.delete_account_impl(user_id).await
    }
}

fn email_conflict_or_internal(error: sqlx::Error, operation: &str) -> AppError {
    if let sqlx::Error::Database(ref database_error) = error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::Conflict("an account with this email already exists".to_owned());
    }

    AppError::Internal(format!("failed to {operation}: {error}"))
}

fn ensure_updated(rows_affected: u64, user_id: UserId) -> AppResult<()> {
    if rows_affected == 0 {
        return Err(AppError::NotFound(format!("user '{user_id}' not found")));
    }

    Ok(())
}
