use async_trait::async_trait;
use nexus_application::{SessionStore, StoredPrincipal};
use nexus_core::{AppError, AppResult};
use serde_json::Value;
use tower_sessions::Session;
use tracing::warn;

use super::SESSION_PRINCIPAL_KEY;

/// [`SessionStore`] backed by the request's cookie session.
#[derive(Clone)]
pub struct TowerSessionStore {
    session: Session,
}

impl TowerSessionStore {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

#[async_trait]
impl SessionStore for TowerSessionStore {
    async fn load(&self) -> AppResult<Option<StoredPrincipal>> {
        let Some(value) = self
            .session
            .get::<Value>(SESSION_PRINCIPAL_KEY)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to read session principal: {error}"))
            })?
        else {
            return Ok(None);
        };

        let stored = StoredPrincipal::from_json(&value);
        if stored.is_none() {
            warn!("session principal has an unreadable shape; treating as no session");
        }
        Ok(stored)
    }

    async fn store(&self, principal: StoredPrincipal) -> AppResult<()> {
        self.session
            .insert(SESSION_PRINCIPAL_KEY, principal)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to persist session principal: {error}"))
            })
    }

    async fn clear(&self) -> AppResult<()> {
        self.session
            .flush()
            .await
            .map_err(|error| AppError::Internal(format!("failed to delete session: {error}")))
    }
}
