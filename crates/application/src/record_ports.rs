use async_trait::async_trait;
use nexus_core::AppResult;
use nexus_domain::{Record, RecordId, RecordKind};

/// Repository port for Record API persistence.
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Lists records of a kind, optionally restricted to one parent, oldest first.
    async fn list_records(
        &self,
        kind: RecordKind,
        parent_id: Option<RecordId>,
    ) -> AppResult<Vec<Record>>;

    /// Finds one record of a kind.
    async fn find_record(&self, kind: RecordKind, record_id: RecordId)
    -> AppResult<Option<Record>>;

    /// Inserts a new record.
    async fn insert_record(&self, record: Record) -> AppResult<()>;

    /// Replaces the payload of an existing record.
    async fn update_record(&self, record: Record) -> AppResult<()>;

    /// Deletes a record and every record parented by it.
    ///
    /// Returns `false` when the record did not exist.
    async fn delete_record(&self, kind: RecordKind, record_id: RecordId) -> AppResult<bool>;
}
