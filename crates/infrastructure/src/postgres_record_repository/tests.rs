use nexus_application::RecordRepository;
use nexus_domain::{Record, RecordKind};
use serde_json::json;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use super::PostgresRecordRepository;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for record repository tests: {error}");
    }

    Some(pool)
}

#[tokio::test]
async fn deleting_a_server_removes_its_environments() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repository = PostgresRecordRepository::new(pool);

    let server = Record::new(
        RecordKind::Server,
        None,
        json!({ "name": "srv-db", "ipAddress": "10.1.0.2", "password": "pw" }),
    )
    .unwrap_or_else(|error| panic!("invalid server fixture: {error}"));
    let environment = Record::new(
        RecordKind::Environment,
        Some(server.id()),
        json!({ "name": "vm", "accessType": "RDP", "accessId": "vm-7" }),
    )
    .unwrap_or_else(|error| panic!("invalid environment fixture: {error}"));

    assert!(repository.insert_record(server.clone()).await.is_ok());
    assert!(repository.insert_record(environment.clone()).await.is_ok());

    let children = repository
        .list_records(RecordKind::Environment, Some(server.id()))
        .await
        .unwrap_or_default();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].field_str("accessId"), Some("vm-7"));

    assert_eq!(
        repository
            .delete_record(RecordKind::Server, server.id())
            .await
            .ok(),
        Some(true)
    );
    let orphan = repository
        .find_record(RecordKind::Environment, environment.id())
        .await
        .ok()
        .flatten();
    assert!(orphan.is_none());
}

#[tokio::test]
async fn lookups_are_scoped_by_kind() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repository = PostgresRecordRepository::new(pool);

    let client = Record::new(
        RecordKind::Client,
        None,
        json!({ "name": "Acme", "internalCode": "AC-9" }),
    )
    .unwrap_or_else(|error| panic!("invalid client fixture: {error}"));
    assert!(repository.insert_record(client.clone()).await.is_ok());

    let as_project = repository
        .find_record(RecordKind::Project, client.id())
        .await
        .ok()
        .flatten();
    assert!(as_project.is_none());

    let mut updated = client.clone();
    assert!(updated.apply_patch(json!({ "internalCode": "AC-10" })).is_ok());
    assert!(repository.update_record(updated).await.is_ok());

    let reloaded = repository
        .find_record(RecordKind::Client, client.id())
        .await
        .ok()
        .flatten();
    assert_eq!(
        reloaded.as_ref().and_then(|record| record.field_str("internalCode")),
        Some("AC-10")
    );
    assert_eq!(
        reloaded.as_ref().and_then(|record| record.field_str("name")),
        Some("Acme")
    );
}
