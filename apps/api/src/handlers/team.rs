use std::str::FromStr;

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use nexus_domain::{Principal, Role, UserId};
use uuid::Uuid;

use crate::dto::{ChangeRoleRequest, TeamMemberResponse};
use crate::error::ApiResult;
use crate::state::AppState;


pub async fn list_team_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<Json<Vec<TeamMemberResponse>>> {
    let members = state
        .user_service
        .list_team(principal.id())
        .await?
        .into_iter()
        .map(TeamMemberResponse::from)
        .collect();

    Ok(Json(members))
}

pub async fn activate_member_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state
        .user_service
        .activate_member(principal.id(), UserId::from_uuid(user_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn approve_password_change_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state
        .user_service
        .approve_password_change(principal.id(), UserId::from_uuid(user_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn change_role_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<ChangeRoleRequest>,
) -> ApiResult<StatusCode> {
    // Assignment is strict: an unknown role is a client error, not a downgrade.
    let role = Role::from_str(payload.role.as_str())?;
    state
        .user_service
        .change_role(principal.id(), UserId::from_uuid(user_id), role)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_member_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state
        .user_service
        .remove_member(principal.id(), UserId::from_uuid(user_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
