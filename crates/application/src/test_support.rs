use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use nexus_core::{AppError, AppResult};
use nexus_domain::{Principal, Record, RecordId, RecordKind, Role, UserId, UserStatus};
use tokio::sync::Mutex;

use crate::{
    AuditEvent, AuditRepository, PasswordHasher, PrincipalRepository, RecordRepository,
    SessionStore, StoredPrincipal, UserAccount,
};

#[derive(Default)]
pub(crate) struct FakeAuditRepository {
    pub(crate) events: Mutex<Vec<AuditEvent>>,
}

#[async_trait]
impl AuditRepository for FakeAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        self.events.lock().await.push(event);
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakePrincipalRepository {
    pub(crate) accounts: Mutex<HashMap<UserId, UserAccount>>,
}

impl FakePrincipalRepository {
    pub(crate) async fn seed(&self, name: &str, role: Option<Role>, status: UserStatus) -> UserId {
        let user_id = UserId::new();
        let email = format!("{}@nexus.com", name.to_lowercase());
        self.accounts.lock().await.insert(
            user_id,
            UserAccount {
                principal: Principal::new(user_id, name, Some(email), role, status),
                password_hash: "hashed:correct-horse".to_owned(),
                pending_password_hash: None,
                created_at: Utc::now(),
            },
        );
        user_id
    }

    pub(crate) async fn set_role(&self, user_id: UserId, role: Role) {
        let _ = self.update_role(user_id, role).await;
    }
}

fn rebuild(principal: &Principal, role: Option<Role>, status: UserStatus) -> Principal {
    Principal::new(
        principal.id(),
        principal.name(),
        principal.email().map(ToOwned::to_owned),
        role,
        status,
    )
}

#[async_trait]
impl PrincipalRepository for FakePrincipalRepository {
    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<UserAccount>> {
        Ok(self.accounts.lock().await.get(&user_id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserAccount>> {
        Ok(self
            .accounts
            .lock()
            .await
            .values()
            .find(|account| {
                account
                    .principal
                    .email()
                    .is_some_and(|value| value.eq_ignore_ascii_case(email))
            })
            .cloned())
    }

    async fn list_accounts(&self) -> AppResult<Vec<UserAccount>> {
        let mut accounts: Vec<UserAccount> =
            self.accounts.lock().await.values().cloned().collect();
        accounts.sort_by(|left, right| left.principal.name().cmp(right.principal.name()));
        Ok(accounts)
    }

    async fn create_account(&self, account: UserAccount) -> AppResult<()> {
        let mut accounts = self.accounts.lock().await;
        let taken = accounts
            .values()
            .any(|existing| existing.principal.email() == account.principal.email());
        if taken {
            return Err(AppError::Conflict("email is already registered".to_owned()));
        }
        accounts.insert(account.principal.id(), account);
        Ok(())
    }

    async fn update_status(&self, user_id: UserId, status: UserStatus) -> AppResult<()> {
        let mut accounts = self.accounts.lock().await;
        let account = accounts
            .get_mut(&user_id)
            .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' not found")))?;
        account.principal = rebuild(&account.principal, account.principal.role(), status);
        Ok(())
    }

    async fn update_role(&self, user_id: UserId, role: Role) -> AppResult<()> {
        let mut accounts = self.accounts.lock().await;
        let account = accounts
            .get_mut(&user_id)
            .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' not found")))?;
        account.principal = rebuild(&account.principal, Some(role), account.principal.status());
        Ok(())
    }

    async fn set_pending_password(&self, user_id: UserId, password_hash: &str) -> AppResult<()> {
        let mut accounts = self.accounts.lock().await;
        let account = accounts
            .get_mut(&user_id)
            .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' not found")))?;
        account.pending_password_hash = Some(password_hash.to_owned());
        Ok(())
    }

    async fn apply_pending_password(&self, user_id: UserId) -> AppResult<bool> {
        let mut accounts = self.accounts.lock().await;
        let Some(account) = accounts.get_mut(&user_id) else {
            return Ok(false);
        };
        match account.pending_password_hash.take() {
            Some(hash) => {
                account.password_hash = hash;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_account(&self, user_id: UserId) -> AppResult<()> {
        self.accounts.lock().await.remove(&user_id);
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeRecordRepository {
    pub(crate) records: Mutex<Vec<Record>>,
}

#[async_trait]
impl RecordRepository for FakeRecordRepository {
    async fn list_records(
        &self,
        kind: RecordKind,
        parent_id: Option<RecordId>,
    ) -> AppResult<Vec<Record>> {
        Ok(self
            .records
            .lock()
            .await
            .iter()
            .filter(|record| record.kind() == kind)
            .filter(|record| parent_id.is_none() || record.parent_id() == parent_id)
            .cloned()
            .collect())
    }

    async fn find_record(
        &self,
        kind: RecordKind,
        record_id: RecordId,
    ) -> AppResult<Option<Record>> {
        Ok(self
            .records
            .lock()
            .await
            .iter()
            .find(|record| record.kind() == kind && record.id() == record_id)
            .cloned())
    }

    async fn insert_record(&self, record: Record) -> AppResult<()> {
        self.records.lock().await.push(record);
        Ok(())
    }

    async fn update_record(&self, record: Record) -> AppResult<()> {
        let mut records = self.records.lock().await;
        if let Some(existing) = records.iter_mut().find(|item| item.id() == record.id()) {
            *existing = record;
        }
        Ok(())
    }

    async fn delete_record(&self, kind: RecordKind, record_id: RecordId) -> AppResult<bool> {
        let mut records = self.records.lock().await;
        let exists = records
            .iter()
            .any(|record| record.kind() == kind && record.id() == record_id);
        if !exists {
            return Ok(false);
        }

        let mut doomed = vec![record_id];
        let mut index = 0;
        while index < doomed.len() {
            let parent = doomed[index];
            doomed.extend(
                records
                    .iter()
                    .filter(|record| record.parent_id() == Some(parent))
                    .map(Record::id),
            );
            index += 1;
        }
        records.retain(|record| !doomed.contains(&record.id()));
        Ok(true)
    }
}

pub(crate) struct FakePasswordHasher;

impl PasswordHasher for FakePasswordHasher {
    fn hash_password(&self, password: &str) -> AppResult<String> {
        Ok(format!("hashed:{password}"))
    }

    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        Ok(hash == format!("hashed:{password}"))
    }
}

#[derive(Default)]
pub(crate) struct FakeSessionStore {
    pub(crate) value: Mutex<Option<StoredPrincipal>>,
}

#[async_trait]
impl SessionStore for FakeSessionStore {
    async fn load(&self) -> AppResult<Option<StoredPrincipal>> {
        Ok(self.value.lock().await.clone())
    }

    async fn store(&self, principal: StoredPrincipal) -> AppResult<()> {
        *self.value.lock().await = Some(principal);
        Ok(())
    }

    async fn clear(&self) -> AppResult<()> {
        *self.value.lock().await = None;
        Ok(())
    }
}
