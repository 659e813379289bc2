use std::sync::Arc;

use nexus_core::{AppError, AppResult};
use nexus_domain::{Capability, CapabilitySet, Principal, ProtectedAction, UserId};
use tracing::warn;

use crate::PrincipalRepository;

mod surfaces;


/// Application service for server-side capability checks.
///
/// Capabilities are always derived from the role stored in the principal
/// repository, never from a client-held session copy.
#[derive(Clone)]
pub struct AuthorizationService {
    principal_repository: Arc<dyn PrincipalRepository>,
}

impl AuthorizationService {
    /// Creates a new authorization service from a principal repository.
    #[must_use]
    pub fn new(principal_repository: Arc<dyn PrincipalRepository>) -> Self {
        Self {
            principal_repository,
        }
    }

    /// Loads the principal as currently persisted.
    pub async fn trusted_principal(&self, user_id: UserId) -> AppResult<Option<Principal>> {
        Ok(self
            .principal_repository
            .find_by_id(user_id)
            .await?
            .map(|account| account.principal))
    }

    /// Resolves the capability set for a subject from its trusted role.
    ///
    /// Unknown subjects and inactive accounts resolve to least privilege.
    pub async fn capabilities_for(&self, user_id: UserId) -> AppResult<CapabilitySet> {
        Ok(self
            .trusted_principal(user_id)
            .await?
            .map(|principal| principal.capabilities())
            .unwrap_or_else(CapabilitySet::least_privileged))
    }

    /// Ensures a subject may perform the action and returns its capabilities.
    pub async fn require_action(
        &self,
        user_id: UserId,
        action: ProtectedAction,
    ) -> AppResult<CapabilitySet> {
        let capabilities = self.capabilities_for(user_id).await?;

        if let Some(missing) = missing_capability(&capabilities, action) {
            warn!(
                subject = %user_id,
                action = %action.label(),
                missing = missing.as_str(),
                "denied protected action"
            );
            return Err(AppError::Forbidden(format!(
                "action '{}' requires capability '{}'",
                action.label(),
                missing.as_str()
            )));
        }

        Ok(capabilities)
    }

    /// Returns whether the subject may currently perform the action.
    pub async fn is_allowed(&self, user_id: UserId, action: ProtectedAction) -> AppResult<bool> {
        let capabilities = self.capabilities_for(user_id).await?;
        Ok(missing_capability(&capabilities, action).is_none())
    }
}

/// Returns the first capability the action needs that the set lacks.
#[must_use]
pub fn missing_capability(
    capabilities: &CapabilitySet,
    action: ProtectedAction,
) -> Option<Capability> {
    action
        .required_capabilities()
        .into_iter()
        .find(|capability| !capabilities.grants(*capability))
}
