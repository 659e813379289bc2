use std::sync::Arc;

use nexus_application::{
    AuditRepository, AuthorizationService, PasswordHasher, PrincipalRepository, RecordRepository,
    RecordService, UserService,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub authorization_service: AuthorizationService,
    pub user_service: UserService,
    pub record_service: RecordService,
    pub frontend_url: String,
}

impl AppState {
    /// Wires the services over one set of adapters.
    pub fn from_ports(
        principal_repository: Arc<dyn PrincipalRepository>,
        record_repository: Arc<dyn RecordRepository>,
        audit_repository: Arc<dyn AuditRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        frontend_url: String,
    ) -> Self {
        let authorization_service = AuthorizationService::new(principal_repository.clone());

        Self {
            user_service: UserService::new(
                principal_repository,
                password_hasher,
                authorization_service.clone(),
                audit_repository.clone(),
            ),
            record_service: RecordService::new(
                authorization_service.clone(),
                record_repository,
                audit_repository,
            ),
            authorization_service,
            frontend_url,
        }
    }
}
