use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use nexus_application::CreateRecordInput;
use nexus_domain::{Principal, RecordId, RecordKind};
use uuid::Uuid;

use crate::dto::{
    CreateRecordRequest, RecordListQuery, RecordResponse, RevealSecretQuery,
    RevealedSecretResponse, UpdateRecordRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

#[cfg(test)]
mod tests;

pub async fn list_records_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(collection): Path<String>,
    Query(query): Query<RecordListQuery>,
) -> ApiResult<Json<Vec<RecordResponse>>> {
    let kind = RecordKind::from_collection(&collection)?;
    let parent_id = query
        .parent_id
        .as_deref()
        .map(RecordId::parse)
        .transpose()?;

    let records = state
        .record_service
        .list_records(principal.id(), kind, parent_id)
        .await?
        .into_iter()
        .map(RecordResponse::from)
        .collect();

    Ok(Json(records))
}

pub async fn create_record_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(collection): Path<String>,
    Json(payload): Json<CreateRecordRequest>,
) -> ApiResult<(StatusCode, Json<RecordResponse>)> {
    let kind = RecordKind::from_collection(&collection)?;
    let parent_id = payload
        .parent_id
        .as_deref()
        .map(RecordId::parse)
        .transpose()?;

    let record = state
        .record_service
        .create_record(
            principal.id(),
            CreateRecordInput {
                kind,
                parent_id,
                data: payload.data,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(RecordResponse::from(record))))
}

pub async fn get_record_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path((collection, record_id)): Path<(String, Uuid)>,
) -> ApiResult<Json<RecordResponse>> {
    let kind = RecordKind::from_collection(&collection)?;
    let record = state
        .record_service
        .get_record(principal.id(), kind, RecordId::from_uuid(record_id))
        .await?;

    Ok(Json(RecordResponse::from(record)))
}

pub async fn update_record_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path((collection, record_id)): Path<(String, Uuid)>,
    Json(payload): Json<UpdateRecordRequest>,
) -> ApiResult<Json<RecordResponse>> {
    let kind = RecordKind::from_collection(&collection)?;
    let record = state
        .record_service
        .update_record(
            principal.id(),
            kind,
            RecordId::from_uuid(record_id),
            payload.data,
        )
        .await?;

    Ok(Json(RecordResponse::from(record)))
}

pub async fn delete_record_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path((collection, record_id)): Path<(String, Uuid)>,
) -> ApiResult<StatusCode> {
    let kind = RecordKind::from_collection(&collection)?;
    state
        .record_service
        .delete_record(principal.id(), kind, RecordId::from_uuid(record_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/records/{collection}/{id}/secret - Plaintext of one secret field.
pub async fn reveal_secret_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path((collection, record_id)): Path<(String, Uuid)>,
    Query(query): Query<RevealSecretQuery>,
) -> ApiResult<Json<RevealedSecretResponse>> {
    let kind = RecordKind::from_collection(&collection)?;
    let presentation = state
        .record_service
        .reveal_secret(
            principal.id(),
            kind,
            RecordId::from_uuid(record_id),
            query.field.as_deref(),
        )
        .await?;

    let field = query
        .field
        .or_else(|| kind.secret_fields().first().map(|field| (*field).to_owned()))
        .unwrap_or_default();

    Ok(Json(RevealedSecretResponse::new(field, presentation)))
}
