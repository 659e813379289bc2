use axum::Json;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use nexus_application::SessionService;
use nexus_core::AppError;
use nexus_domain::Principal;
use tower_sessions::Session;
use tracing::{info, warn};

use crate::dto::SessionResponse;
use crate::error::ApiResult;
use crate::state::AppState;

use super::TowerSessionStore;

pub async fn logout_handler(session: Session) -> ApiResult<StatusCode> {
    let sessions = SessionService::new(TowerSessionStore::new(session));
    let subject = match sessions.current_principal().await {
        Ok(principal) => principal.map(|principal| principal.id().to_string()),
        Err(error) => {
            warn!(error = %error, "could not read session principal during logout");
            None
        }
    };

    sessions.clear_session().await?;
    if let Some(subject) = subject {
        info!(%subject, "logged out");
    }

    Ok(StatusCode::NO_CONTENT)
}

/// GET /auth/me - Current principal with capabilities re-derived from the stored role.
pub async fn me_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<Json<SessionResponse>> {
    let trusted = state
        .user_service
        .find_principal(principal.id())
        .await?
        .ok_or_else(|| AppError::Unauthorized("account no longer exists".to_owned()))?;
    let capabilities = state
        .authorization_service
        .capabilities_for(trusted.id())
        .await?;

    Ok(Json(SessionResponse::new(&trusted, capabilities)))
}
