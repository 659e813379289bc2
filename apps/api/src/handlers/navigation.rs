use axum::Json;
use axum::extract::{Extension, State};
use nexus_domain::Principal;

use crate::dto::NavigationEntryResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/navigation - Sidebar entries for the caller's stored role.
pub async fn navigation_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<Json<Vec<NavigationEntryResponse>>> {
    let surfaces = state
        .authorization_service
        .accessible_surfaces(principal.id())
        .await?;

    Ok(Json(
        surfaces
            .into_iter()
            .map(NavigationEntryResponse::from)
            .collect(),
    ))
}
