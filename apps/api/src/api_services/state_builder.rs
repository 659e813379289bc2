use std::sync::Arc;

use nexus_core::AppError;
use nexus_infrastructure::{
    Argon2PasswordHasher, PostgresAuditRepository, PostgresPrincipalRepository,
    PostgresRecordRepository,
};
use sqlx::PgPool;
use tracing::info;

use crate::api_config::BootstrapDirectorConfig;
use crate::state::AppState;

pub fn build_app_state(pool: PgPool, frontend_url: String) -> AppState {
    AppState::from_ports(
        Arc::new(PostgresPrincipalRepository::new(pool.clone())),
        Arc::new(PostgresRecordRepository::new(pool.clone())),
        Arc::new(PostgresAuditRepository::new(pool)),
        Arc::new(Argon2PasswordHasher::new()),
        frontend_url,
    )
}

/// Seeds the configured director account on first start.
pub async fn bootstrap_director(
    app_state: &AppState,
    config: &BootstrapDirectorConfig,
) -> Result<(), AppError> {
    let created = app_state
        .user_service
        .bootstrap_director(&config.name, &config.email, &config.password)
        .await?;

    if created {
        info!(email = %config.email, "seeded bootstrap director account");
    } else {
        info!(email = %config.email, "bootstrap director already exists; skipping");
    }

    Ok(())
}
