use nexus_domain::validate_password;
use tracing::info;

use super::*;

impl UserService {
    /// Records a requested new password; it only takes effect once an
    /// administrator approves it.
    pub async fn request_password_reset(&self, email: &str, new_password: &str) -> AppResult<()> {
        validate_password(new_password)?;

        let normalized = email.trim().to_lowercase();
        let account = self
            .principal_repository
            .find_by_email(&normalized)
            .await?
            .ok_or_else(|| AppError::NotFound("no account is registered with this email".to_owned()))?;

        let password_hash = self.password_hasher.hash_password(new_password)?;
        self.principal_repository
            .set_pending_password(account.principal.id(), &password_hash)
            .await?;

        info!(subject = %account.principal.id(), "password change requested");
        Ok(())
    }
}
