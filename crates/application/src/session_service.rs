//! Typed access to the principal persisted in the caller's session.
//!
//! This is the only place where a stored session value is parsed. Read sites
//! receive either a validated [`Principal`] or `None`; they never re-check
//! whether the stored role "looks right".

use std::str::FromStr;

use async_trait::async_trait;
use nexus_core::AppResult;
use nexus_domain::{Principal, Role, UserId, UserStatus};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Raw principal shape persisted in a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPrincipal {
    /// User identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email, if known.
    #[serde(default)]
    pub email: Option<String>,
    /// Role claim as stored; may be absent or unrecognised.
    #[serde(default)]
    pub role: Option<String>,
    /// Account status as stored.
    #[serde(default)]
    pub status: Option<String>,
}

impl From<&Principal> for StoredPrincipal {
    fn from(principal: &Principal) -> Self {
        Self {
            id: principal.id().to_string(),
            name: principal.name().to_owned(),
            email: principal.email().map(ToOwned::to_owned),
            role: principal.role().map(|role| role.as_str().to_owned()),
            status: Some(principal.status().as_str().to_owned()),
        }
    }
}

impl StoredPrincipal {
    /// Decodes a raw session value without failing on mistyped fields.
    ///
    /// A value that is not an object or lacks a string `id` yields `None`.
    /// Optional fields of the wrong type are dropped.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let id = object.get("id").and_then(Value::as_str)?.to_owned();
        let text = |key: &str| match object.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) => Some(text.clone()),
            Some(other) => {
                warn!(field = key, value = %other, "ignoring mistyped session field");
                None
            }
        };

        Some(Self {
            name: text("name").unwrap_or_default(),
            email: text("email"),
            role: text("role"),
            status: text("status"),
            id,
        })
    }
}

/// Session getter/setter port.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Loads the stored principal, if a session exists.
    async fn load(&self) -> AppResult<Option<StoredPrincipal>>;

    /// Persists the principal for subsequent requests.
    async fn store(&self, principal: StoredPrincipal) -> AppResult<()>;

    /// Removes the stored principal.
    async fn clear(&self) -> AppResult<()>;
}

/// Session access scoped to one request.
pub struct SessionService<S> {
    store: S,
}

impl<S: SessionStore> SessionService<S> {
    /// Wraps a session store.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the current principal.
    ///
    /// An unrecognised role claim yields a principal without a role
    /// (least-privileged); an unreadable identifier yields `None`.
    pub async fn current_principal(&self) -> AppResult<Option<Principal>> {
        let Some(stored) = self.store.load().await? else {
            return Ok(None);
        };

        let user_id = match UserId::parse(&stored.id) {
            Ok(user_id) => user_id,
            Err(error) => {
                warn!(error = %error, "discarding session with malformed principal id");
                return Ok(None);
            }
        };

        let role = Role::from_claim(stored.role.as_deref());
        if role.is_none() {
            warn!(
                subject = %user_id,
                role_claim = stored.role.as_deref().unwrap_or("<absent>"),
                "session principal has no recognised role; degrading to least privilege"
            );
        }

        let status = match stored.status.as_deref().map(UserStatus::from_str) {
            Some(Ok(status)) => status,
            Some(Err(_)) | None => {
                warn!(subject = %user_id, "session principal has no recognised status");
                UserStatus::Blocked
            }
        };

        Ok(Some(Principal::new(
            user_id,
            stored.name,
            stored.email,
            role,
            status,
        )))
    }

    /// Persists the principal after a successful login.
    pub async fn establish(&self, principal: &Principal) -> AppResult<()> {
        self.store.store(StoredPrincipal::from(principal)).await
    }

    /// Clears the session on logout.
    pub async fn clear_session(&self) -> AppResult<()> {
        self.store.clear().await
    }
}

#[cfg(test)]
mod tests {
    use nexus_domain::{CapabilitySet, Principal, Role, UserId, UserStatus};
    use serde_json::json;

    use super::{SessionService, StoredPrincipal};
    use crate::test_support::FakeSessionStore;

    fn stored(role: Option<&str>) -> StoredPrincipal {
        StoredPrincipal {
            id: UserId::new().to_string(),
            name: "Ana".to_owned(),
            email: Some("ana@nexus.com".to_owned()),
            role: role.map(ToOwned::to_owned),
            status: Some("ACTIVE".to_owned()),
        }
    }

    #[tokio::test]
    async fn no_session_yields_no_principal() {
        let service = SessionService::new(FakeSessionStore::default());
        let principal = service.current_principal().await;
        assert!(matches!(principal, Ok(None)));
    }

    #[tokio::test]
    async fn unrecognised_role_degrades_without_error() {
        let store = FakeSessionStore::default();
        *store.value.lock().await = Some(stored(Some("ROOT")));
        let service = SessionService::new(store);

        let principal = service.current_principal().await.ok().flatten();
        assert!(principal.is_some());
        let principal = principal.unwrap_or_else(|| panic!("principal expected"));
        assert_eq!(principal.role(), None);
        assert_eq!(principal.capabilities(), CapabilitySet::least_privileged());
    }

    #[tokio::test]
    async fn missing_role_degrades_without_error() {
        let store = FakeSessionStore::default();
        *store.value.lock().await = Some(stored(None));
        let service = SessionService::new(store);

        let principal = service.current_principal().await.ok().flatten();
        assert_eq!(
            principal.map(|principal| principal.capabilities()),
            Some(CapabilitySet::least_privileged())
        );
    }

    #[tokio::test]
    async fn malformed_id_is_treated_as_no_session() {
        let store = FakeSessionStore::default();
        let mut value = stored(Some("ADMIN"));
        value.id = "not-a-uuid".to_owned();
        *store.value.lock().await = Some(value);
        let service = SessionService::new(store);

        assert!(matches!(service.current_principal().await, Ok(None)));
    }

    #[tokio::test]
    async fn establish_then_clear_roundtrip() {
        let service = SessionService::new(FakeSessionStore::default());
        let principal = Principal::new(
            UserId::new(),
            "Bruno",
            None,
            Some(Role::Infra),
            UserStatus::Active,
        );

        assert!(service.establish(&principal).await.is_ok());
        let restored = service.current_principal().await.ok().flatten();
        assert_eq!(restored.as_ref(), Some(&principal));

        assert!(service.clear_session().await.is_ok());
        assert!(matches!(service.current_principal().await, Ok(None)));
    }

    #[test]
    fn mistyped_role_is_dropped_when_decoding() {
        let id = UserId::new().to_string();
        let decoded = StoredPrincipal::from_json(&json!({
            "id": id,
            "name": "Ana",
            "role": 7,
            "status": "ACTIVE",
        }));

        assert_eq!(decoded.as_ref().map(|stored| stored.id.as_str()), Some(id.as_str()));
        assert_eq!(decoded.as_ref().and_then(|stored| stored.role.clone()), None);
        assert_eq!(decoded.and_then(|stored| stored.status), Some("ACTIVE".to_owned()));
    }

    #[test]
    fn unreadable_shapes_decode_to_nothing() {
        assert_eq!(StoredPrincipal::from_json(&json!("ADMIN")), None);
        assert_eq!(StoredPrincipal::from_json(&json!({ "id": 42, "role": "ADMIN" })), None);
        assert_eq!(StoredPrincipal::from_json(&json!({ "role": "ADMIN" })), None);
    }
}
