use std::sync::Arc;

use nexus_application::RegisterParams;
use nexus_domain::{Principal, Role};
use nexus_infrastructure::{
    Argon2PasswordHasher, InMemoryAuditRepository, InMemoryPrincipalRepository,
    InMemoryRecordRepository,
};

use crate::state::AppState;

pub(crate) const PASSWORD: &str = "correct-horse";

pub(crate) fn in_memory_state() -> AppState {
    AppState::from_ports(
        Arc::new(InMemoryPrincipalRepository::new()),
        Arc::new(InMemoryRecordRepository::new()),
        Arc::new(InMemoryAuditRepository::new()),
        Arc::new(Argon2PasswordHasher::new()),
        "http://localhost:3000".to_owned(),
    )
}

pub(crate) async fn director(state: &AppState) -> Principal {
    let _ = state
        .user_service
        .bootstrap_director("Dora", "dora@nexus.com", PASSWORD)
        .await;

    state
        .user_service
        .login("dora@nexus.com", PASSWORD)
        .await
        .unwrap_or_else(|error| panic!("director login failed: {error}"))
}

/// Registers, activates and assigns a role through the director, then logs in.
pub(crate) async fn member(state: &AppState, director: &Principal, name: &str, role: Role) -> Principal {
    let email = format!("{}@nexus.com", name.to_lowercase());
    let user_id = state
        .user_service
        .register(RegisterParams {
            name: name.to_owned(),
            email: email.clone(),
            password: PASSWORD.to_owned(),
        })
        .await
        .unwrap_or_else(|error| panic!("registration failed: {error}"));

    state
        .user_service
        .activate_member(director.id(), user_id)
        .await
        .unwrap_or_else(|error| panic!("activation failed: {error}"));
    state
        .user_service
        .change_role(director.id(), user_id, role)
        .await
        .unwrap_or_else(|error| panic!("role change failed: {error}"));

    state
        .user_service
        .login(&email, PASSWORD)
        .await
        .unwrap_or_else(|error| panic!("member login failed: {error}"))
}
