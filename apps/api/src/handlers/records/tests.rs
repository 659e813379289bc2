use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use nexus_domain::{Principal, Role};
use serde_json::json;
use uuid::Uuid;

use crate::dto::{CreateRecordRequest, RecordListQuery, RecordResponse, RevealSecretQuery};
use crate::state::AppState;
use crate::test_support::{director, in_memory_state, member};

use super::{
    create_record_handler, delete_record_handler, list_records_handler, reveal_secret_handler,
};

async fn create_server(state: &AppState, actor: &Principal) -> RecordResponse {
    let created = create_record_handler(
        State(state.clone()),
        Extension(actor.clone()),
        Path("servers".to_owned()),
        Json(CreateRecordRequest {
            parent_id: None,
            data: json!({
                "name": "srv-01",
                "ipAddress": "10.0.0.5",
                "username": "root",
                "password": "s3cret",
            }),
        }),
    )
    .await;

    match created {
        Ok((status, Json(record))) => {
            assert_eq!(status, StatusCode::CREATED);
            record
        }
        Err(error) => panic!("server creation failed: {}", error.0),
    }
}

fn record_uuid(record: &RecordResponse) -> Uuid {
    Uuid::parse_str(&record.record_id).unwrap_or_else(|error| panic!("bad record id: {error}"))
}

#[tokio::test]
async fn commercial_listing_servers_is_forbidden() {
    let state = in_memory_state();
    let director = director(&state).await;
    let commercial = member(&state, &director, "Edu", Role::Comercial).await;

    let result = list_records_handler(
        State(state),
        Extension(commercial),
        Path("servers".to_owned()),
        Query(RecordListQuery::default()),
    )
    .await;

    let status = result.err().map(|error| error.into_response().status());
    assert_eq!(status, Some(StatusCode::FORBIDDEN));
}

#[tokio::test]
async fn listings_mask_secrets_and_reveal_returns_plaintext() {
    let state = in_memory_state();
    let director = director(&state).await;
    let infra = member(&state, &director, "Ivo", Role::Infra).await;
    let server = create_server(&state, &infra).await;

    assert!(server.data.get("password").is_none());
    let password = server.secrets.get("password");
    assert_eq!(password.map(|field| field.state.as_str()), Some("masked"));
    assert_eq!(password.map(|field| field.display.as_str()), Some("••••••••"));
    assert_eq!(password.map(|field| field.can_reveal), Some(true));

    let revealed = reveal_secret_handler(
        State(state),
        Extension(director),
        Path(("servers".to_owned(), record_uuid(&server))),
        Query(RevealSecretQuery::default()),
    )
    .await;

    match revealed {
        Ok(Json(body)) => {
            assert_eq!(body.field, "password");
            assert_eq!(body.value.as_deref(), Some("s3cret"));
        }
        Err(error) => panic!("reveal failed: {}", error.0),
    }
}

#[tokio::test]
async fn unknown_collection_is_not_found() {
    let state = in_memory_state();
    let director = director(&state).await;

    let result = list_records_handler(
        State(state),
        Extension(director),
        Path("invoices".to_owned()),
        Query(RecordListQuery::default()),
    )
    .await;

    let status = result.err().map(|error| error.into_response().status());
    assert_eq!(status, Some(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn stale_session_role_does_not_authorize_delete() {
    let state = in_memory_state();
    let director = director(&state).await;
    let admin = member(&state, &director, "Ana", Role::Admin).await;
    let server = create_server(&state, &admin).await;

    // The session still carries ADMIN after the demotion.
    assert!(
        state
            .user_service
            .change_role(director.id(), admin.id(), Role::Comercial)
            .await
            .is_ok()
    );
    assert_eq!(admin.role(), Some(Role::Admin));

    let result = delete_record_handler(
        State(state.clone()),
        Extension(admin),
        Path(("servers".to_owned(), record_uuid(&server))),
    )
    .await;
    let status = result.err().map(|error| error.into_response().status());
    assert_eq!(status, Some(StatusCode::FORBIDDEN));

    let remaining = list_records_handler(
        State(state),
        Extension(director),
        Path("servers".to_owned()),
        Query(RecordListQuery::default()),
    )
    .await
    .map(|Json(records)| records.len())
    .ok();
    assert_eq!(remaining, Some(1));
}
