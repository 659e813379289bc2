use tracing::warn;

use super::*;

impl UserService {
    /// Authenticates a user with email and password.
    ///
    /// Unknown emails and wrong passwords share one generic error. Pending
    /// and blocked accounts are refused with `Forbidden`.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<Principal> {
        let normalized = email.trim().to_lowercase();
        let account = self.principal_repository.find_by_email(&normalized).await?;

        let Some(account) = account else {
            // Hash anyway so unknown emails cost the same as wrong passwords.
            let _ = self.password_hasher.hash_password(password);
            return Err(invalid_credentials());
        };

        let password_valid = self
            .password_hasher
            .verify_password(password, &account.password_hash)?;
        if !password_valid {
            warn!(subject = %account.principal.id(), "login rejected: invalid password");
            return Err(invalid_credentials());
        }

        match account.principal.status() {
            UserStatus::Active => Ok(account.principal),
            UserStatus::Pending => Err(AppError::Forbidden(
                "account is awaiting administrator approval".to_owned(),
            )),
            UserStatus::Blocked => Err(AppError::Forbidden("account is blocked".to_owned())),
        }
    }
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("invalid email or password".to_owned())
}
