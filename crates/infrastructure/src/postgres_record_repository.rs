//! PostgreSQL-backed record repository.
//!
//! All kinds share one `records` table; child rows reference their parent
//! with `ON DELETE CASCADE`.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::PgPool;

use nexus_application::RecordRepository;
use nexus_core::{AppError, AppResult};
use nexus_domain::{Record, RecordId, RecordKind};

#[cfg(test)]
mod tests;

/// PostgreSQL implementation of the record repository port.
#[derive(Clone)]
pub struct PostgresRecordRepository {
    pool: PgPool,
}

impl PostgresRecordRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RecordRow {
    id: uuid::Uuid,
    kind: String,
    parent_id: Option<uuid::Uuid>,
    data: sqlx::types::Json<Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<RecordRow> for Record {
    type Error = AppError;

    fn try_from(row: RecordRow) -> Result<Self, Self::Error> {
        let kind = RecordKind::from_str(&row.kind).map_err(|error| {
            AppError::Internal(format!("record '{}' has invalid kind: {error}", row.id))
        })?;
        let data = match row.data.0 {
            Value::Object(object) => object,
            _ => Map::new(),
        };

        Ok(Record::from_storage(
            RecordId::from_uuid(row.id),
            kind,
            row.parent_id.map(RecordId::from_uuid),
            data,
            row.created_at,
            row.updated_at,
        ))
    }
}

#[async_trait]
impl RecordRepository for PostgresRecordRepository {
    async fn list_records(
        &self,
        kind: RecordKind,
        parent_id: Option<RecordId>,
    ) -> AppResult<Vec<Record>> {
        let rows = sqlx::query_as::<_, RecordRow>(
            r#"
            SELECT id, kind, parent_id, data, created_at, updated_at
            FROM records
            WHERE kind = $1
              AND ($2::uuid IS NULL OR parent_id = $2)
            ORDER BY created_at, id
            "#,
        )
        .bind(kind.as_str())
        .bind(parent_id.map(|parent_id| parent_id.as_uuid()))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to list {} records: {error}",
                kind.as_str()
            ))
        })?;

        rows.into_iter().map(Record::try_from).collect()
    }

    async fn find_record(
        &self,
        kind: RecordKind,
        record_id: RecordId,
    ) -> AppResult<Option<Record>> {
        let row = sqlx::query_as::<_, RecordRow>(
            r#"
            SELECT id, kind, parent_id, data, created_at, updated_at
            FROM records
            WHERE kind = $1 AND id = $2
            LIMIT 1
            "#,
        )
        .bind(kind.as_str())
        .bind(record_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find record: {error}")))?;

        row.map(Record::try_from).transpose()
    }

    async fn insert_record(&self, record: Record) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO records (id, kind, parent_id, data, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(record.id().as_uuid())
        .bind(record.kind().as_str())
        .bind(record.parent_id().map(|parent_id| parent_id.as_uuid()))
        .bind(sqlx::types::Json(record.data()))
        .bind(record.created_at())
        .bind(record.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to insert record: {error}")))?;

        Ok(())
    }

    async fn update_record(&self, record: Record) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE records
            SET data = $3, updated_at = $4
            WHERE kind = $1 AND id = $2
            "#,
        )
        .bind(record.kind().as_str())
        .bind(record.id().as_uuid())
        .bind(sqlx::types::Json(record.data()))
        .bind(record.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update record: {error}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "{} '{}' not found",
                record.kind().as_str(),
                record.id()
            )));
        }

        Ok(())
    }

    async fn delete_record(&self, kind: RecordKind, record_id: RecordId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM records WHERE kind = $1 AND id = $2")
            .bind(kind.as_str())
            .bind(record_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to delete record: {error}")))?;

        Ok(result.rows_affected() > 0)
    }
}
