use async_trait::async_trait;
use chrono::{DateTime, Utc};
use nexus_core::AppResult;
use nexus_domain::{Principal, Role, UserId, UserStatus};

/// Persisted account: the trusted principal plus credential state.
#[derive(Debug, Clone)]
pub struct UserAccount {
    /// Server-verified identity, role and status.
    pub principal: Principal,
    /// Argon2id hash of the current password.
    pub password_hash: String,
    /// Hash of a requested new password awaiting administrator approval.
    pub pending_password_hash: Option<String>,
    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Repository port for accounts and their trusted role claims.
#[async_trait]
pub trait PrincipalRepository: Send + Sync {
    /// Finds an account by identifier.
    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<UserAccount>>;

    /// Finds an account by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserAccount>>;

    /// Lists every account ordered by name.
    async fn list_accounts(&self) -> AppResult<Vec<UserAccount>>;

    /// Creates an account. Fails with `Conflict` when the email is taken.
    async fn create_account(&self, account: UserAccount) -> AppResult<()>;

    /// Updates the account status.
    async fn update_status(&self, user_id: UserId, status: UserStatus) -> AppResult<()>;

    /// Updates the role claim.
    async fn update_role(&self, user_id: UserId, role: Role) -> AppResult<()>;

    /// Stores a requested password hash pending approval.
    async fn set_pending_password(&self, user_id: UserId, password_hash: &str) -> AppResult<()>;

    /// Promotes the pending password hash. Returns `false` when none was pending.
    async fn apply_pending_password(&self, user_id: UserId) -> AppResult<bool>;

    /// Deletes an account.
    async fn delete_account(&self, user_id: UserId) -> AppResult<()>;
}

/// Port for password hashing operations.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password.
    fn hash_password(&self, password: &str) -> AppResult<String>;

    /// Verifies a plaintext password against a stored hash.
    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool>;
}
