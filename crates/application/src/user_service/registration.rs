use nexus_domain::{EmailAddress, validate_password};
use tracing::info;

use super::*;

impl UserService {
    /// Registers a pending account with the `USER` role.
    ///
    /// The account grants nothing until an administrator activates it.
    pub async fn register(&self, params: RegisterParams) -> AppResult<UserId> {
        if params.name.trim().is_empty() {
            return Err(AppError::Validation("name must not be empty".to_owned()));
        }

        let email_address = EmailAddress::new(&params.email)?;
        validate_password(&params.password)?;

        let existing = self
            .principal_repository
            .find_by_email(email_address.as_str())
            .await?;
        if existing.is_some() {
            return Err(AppError::Conflict(
                "an account with this email already exists".to_owned(),
            ));
        }

        let password_hash = self.password_hasher.hash_password(&params.password)?;
        let account = new_account(
            &params.name,
            email_address.as_str(),
            password_hash,
            Role::User,
            UserStatus::Pending,
        );
        let user_id = account.principal.id();
        self.principal_repository.create_account(account).await?;

        info!(subject = %user_id, "registered pending account");
        Ok(user_id)
    }

    /// Seeds an active `DIRETOR` account unless the email is already taken.
    ///
    /// Returns `true` when a new account was created.
    pub async fn bootstrap_director(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> AppResult<bool> {
        let email_address = EmailAddress::new(email)?;
        validate_password(password)?;

        let existing = self
            .principal_repository
            .find_by_email(email_address.as_str())
            .await?;
        if existing.is_some() {
            return Ok(false);
        }

        let password_hash = self.password_hasher.hash_password(password)?;
        let display_name = if name.trim().is_empty() {
            "Diretor"
        } else {
            name
        };
        let account = new_account(
            display_name,
            email_address.as_str(),
            password_hash,
            Role::Diretor,
            UserStatus::Active,
        );
        let user_id = account.principal.id();
        self.principal_repository.create_account(account).await?;

        info!(subject = %user_id, "bootstrapped director account");
        Ok(true)
    }
}
