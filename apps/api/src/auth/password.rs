use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use nexus_application::{RegisterParams, SessionService};
use nexus_core::AppError;
use tower_sessions::Session;
use tracing::info;

use crate::dto::{
    AuthLoginRequest, AuthRegisterRequest, AuthResetPasswordRequest, GenericMessageResponse,
    SessionResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

use super::TowerSessionStore;

/// POST /auth/register - Create a pending account awaiting activation.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<AuthRegisterRequest>,
) -> ApiResult<(StatusCode, Json<GenericMessageResponse>)> {
    state
        .user_service
        .register(RegisterParams {
            name: payload.name,
            email: payload.email,
            password: payload.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(GenericMessageResponse {
            message: "registration received; an administrator must activate the account"
                .to_owned(),
        }),
    ))
}

/// POST /auth/login - Authenticate and establish a session.
pub async fn login_handler(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<AuthLoginRequest>,
) -> ApiResult<Json<SessionResponse>> {
    let principal = state
        .user_service
        .login(&payload.email, &payload.password)
        .await?;

    session
        .cycle_id()
        .await
        .map_err(|error| AppError::Internal(format!("failed to cycle session id: {error}")))?;
    SessionService::new(TowerSessionStore::new(session))
        .establish(&principal)
        .await?;

    let capabilities = state
        .authorization_service
        .capabilities_for(principal.id())
        .await?;
    info!(subject = %principal.id(), "login succeeded");

    Ok(Json(SessionResponse::new(&principal, capabilities)))
}

/// POST /auth/reset-password - Request a new password; takes effect after approval.
pub async fn reset_password_handler(
    State(state): State<AppState>,
    Json(payload): Json<AuthResetPasswordRequest>,
) -> ApiResult<(StatusCode, Json<GenericMessageResponse>)> {
    state
        .user_service
        .request_password_reset(&payload.email, &payload.new_password)
        .await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(GenericMessageResponse {
            message: "password change requested; an administrator must approve it".to_owned(),
        }),
    ))
}
