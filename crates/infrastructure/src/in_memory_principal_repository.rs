use std::collections::HashMap;

use async_trait::async_trait;
use nexus_application::{PrincipalRepository, UserAccount};
use nexus_core::{AppError, AppResult};
use nexus_domain::{Principal, Role, UserId, UserStatus};
use tokio::sync::RwLock;

/// In-memory principal repository implementation.
#[derive(Debug, Default)]
pub struct InMemoryPrincipalRepository {
    accounts: RwLock<HashMap<UserId, UserAccount>>,
}

impl InMemoryPrincipalRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    async fn modify<F>(&self, user_id: UserId, change: F) -> AppResult<()>
    where
        F: FnOnce(&mut UserAccount) + Send,
    {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .get_mut(&user_id)
            .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' not found")))?;
        change(account);
        Ok(())
    }
}

fn with_role_and_status(principal: &Principal, role: Option<Role>, status: UserStatus) -> Principal {
    Principal::new(
        principal.id(),
        principal.name(),
        principal.email().map(ToOwned::to_owned),
        role,
        status,
    )
}

#[async_trait]
impl PrincipalRepository for InMemoryPrincipalRepository {
    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<UserAccount>> {
        Ok(self.accounts.read().await.get(&user_id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserAccount>> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|account| {
                account
                    .principal
                    .email()
                    .is_some_and(|stored| stored.eq_ignore_ascii_case(email))
            })
            .cloned())
    }

    async fn list_accounts(&self) -> AppResult<Vec<UserAccount>> {
        let mut accounts: Vec<UserAccount> =
            self.accounts.read().await.values().cloned().collect();
        accounts.sort_by(|left, right| {
            left.principal
                .name()
                .cmp(right.principal.name())
                .then(left.created_at.cmp(&right.created_at))
        });
        Ok(accounts)
    }

    async fn create_account(&self, account: UserAccount) -> AppResult<()> {
        let mut accounts = self.accounts.write().await;

        let email = account.principal.email().unwrap_or_default();
        let taken = accounts.values().any(|existing| {
            existing
                .principal
                .email()
                .is_some_and(|stored| stored.eq_ignore_ascii_case(email))
        });
        if taken {
            return Err(AppError::Conflict(
                "an account with this email already exists".to_owned(),
            ));
        }

        accounts.insert(account.principal.id(), account);
        Ok(())
    }

    async fn update_status(&self, user_id: UserId, status: UserStatus) -> AppResult<()> {
        self.modify(user_id, |account| {
            account.principal =
                with_role_and_status(&account.principal, account.principal.role(), status);
        })
        .await
    }

    async fn update_role(&self, user_id: UserId, role: Role) -> AppResult<()> {
        self.modify(user_id, |account| {
            account.principal =
                with_role_and_status(&account.principal, Some(role), account.principal.status());
        })
        .await
    }

    async fn set_pending_password(&self, user_id: UserId, password_hash: &str) -> AppResult<()> {
        let password_hash = password_hash.to_owned();
        self.modify(user_id, |account| {
            account.pending_password_hash = Some(password_hash);
        })
        .await
    }

    async fn apply_pending_password(&self, user_id: UserId) -> AppResult<bool> {
        let mut accounts = self.accounts.write().await;
        let Some(account) = accounts.get_mut(&user_id) else {
            return Ok(false);
        };

        Ok(match account.pending_password_hash.take() {
            Some(password_hash) => {
                account.password_hash = password_hash;
                true
            }
            None => false,
        })
    }

    async fn delete_account(&self, user_id: UserId) -> AppResult<()> {
        self.accounts
            .write()
            .await
            .remove(&user_id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' not found")))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use nexus_application::{PrincipalRepository, UserAccount};
    use nexus_core::AppError;
    use nexus_domain::{Principal, Role, UserId, UserStatus};

    use super::InMemoryPrincipalRepository;

    fn account(name: &str, email: &str) -> UserAccount {
        UserAccount {
            principal: Principal::new(
                UserId::new(),
                name,
                Some(email.to_owned()),
                Some(Role::User),
                UserStatus::Pending,
            ),
            password_hash: "hash".to_owned(),
            pending_password_hash: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn email_lookup_is_case_insensitive_and_unique() {
        let repository = InMemoryPrincipalRepository::new();
        assert!(
            repository
                .create_account(account("Ana", "ana@nexus.com"))
                .await
                .is_ok()
        );

        let found = repository.find_by_email("ANA@nexus.com").await.ok().flatten();
        assert!(found.is_some());

        let duplicate = repository
            .create_account(account("Ana 2", "Ana@Nexus.com"))
            .await;
        assert!(matches!(duplicate, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn role_and_status_updates_are_visible_on_next_read() {
        let repository = InMemoryPrincipalRepository::new();
        let created = account("Bia", "bia@nexus.com");
        let user_id = created.principal.id();
        assert!(repository.create_account(created).await.is_ok());

        assert!(repository.update_role(user_id, Role::Admin).await.is_ok());
        assert!(
            repository
                .update_status(user_id, UserStatus::Active)
                .await
                .is_ok()
        );

        let principal = repository
            .find_by_id(user_id)
            .await
            .ok()
            .flatten()
            .map(|account| account.principal);
        assert_eq!(principal.as_ref().and_then(Principal::role), Some(Role::Admin));
        assert_eq!(
            principal.as_ref().map(Principal::status),
            Some(UserStatus::Active)
        );
    }

    #[tokio::test]
    async fn list_is_ordered_by_name() {
        let repository = InMemoryPrincipalRepository::new();
        for (name, email) in [("Caio", "caio@nexus.com"), ("Ana", "ana@nexus.com")] {
            assert!(repository.create_account(account(name, email)).await.is_ok());
        }

        let names: Vec<String> = repository
            .list_accounts()
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|account| account.principal.name().to_owned())
            .collect();
        assert_eq!(names, vec!["Ana".to_owned(), "Caio".to_owned()]);
    }

    #[tokio::test]
    async fn deleting_unknown_user_is_not_found() {
        let repository = InMemoryPrincipalRepository::new();
        let result = repository.delete_account(UserId::new()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
