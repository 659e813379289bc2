use std::collections::HashMap;

use async_trait::async_trait;
use nexus_application::RecordRepository;
use nexus_core::{AppError, AppResult};
use nexus_domain::{Record, RecordId, RecordKind};
use tokio::sync::RwLock;

/// In-memory record repository implementation.
#[derive(Debug, Default)]
pub struct InMemoryRecordRepository {
    records: RwLock<HashMap<RecordId, Record>>,
}

impl InMemoryRecordRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordRepository for InMemoryRecordRepository {
    async fn list_records(
        &self,
        kind: RecordKind,
        parent_id: Option<RecordId>,
    ) -> AppResult<Vec<Record>> {
        let records = self.records.read().await;

        let mut values: Vec<Record> = records
            .values()
            .filter(|record| record.kind() == kind)
            .filter(|record| parent_id.is_none() || record.parent_id() == parent_id)
            .cloned()
            .collect();
        values.sort_by_key(|record| (record.created_at(), record.id().as_uuid()));

        Ok(values)
    }

    async fn find_record(
        &self,
        kind: RecordKind,
        record_id: RecordId,
    ) -> AppResult<Option<Record>> {
        Ok(self
            .records
            .read()
            .await
            .get(&record_id)
            .filter(|record| record.kind() == kind)
            .cloned())
    }

    async fn insert_record(&self, record: Record) -> AppResult<()> {
        let mut records = self.records.write().await;

        if records.contains_key(&record.id()) {
            return Err(AppError::Conflict(format!(
                "record '{}' already exists",
                record.id()
            )));
        }
        if let Some(parent_id) = record.parent_id()
            && !records.contains_key(&parent_id)
        {
            return Err(AppError::Validation(format!(
                "parent record '{parent_id}' does not exist"
            )));
        }

        records.insert(record.id(), record);
        Ok(())
    }

    async fn update_record(&self, record: Record) -> AppResult<()> {
        let mut records = self.records.write().await;

        match records.get_mut(&record.id()) {
            Some(existing) if existing.kind() == record.kind() => {
                *existing = record;
                Ok(())
            }
            _ => Err(AppError::NotFound(format!(
                "{} '{}' not found",
                record.kind().as_str(),
                record.id()
            ))),
        }
    }

    async fn delete_record(&self, kind: RecordKind, record_id: RecordId) -> AppResult<bool> {
        let mut records = self.records.write().await;

        let exists = records
            .get(&record_id)
            .is_some_and(|record| record.kind() == kind);
        if !exists {
            return Ok(false);
        }

        let mut pending = vec![record_id];
        while let Some(current) = pending.pop() {
            records.remove(&current);
            pending.extend(
                records
                    .values()
                    .filter(|record| record.parent_id() == Some(current))
                    .map(Record::id),
            );
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use nexus_application::RecordRepository;
    use nexus_core::AppError;
    use nexus_domain::{Record, RecordId, RecordKind};
    use serde_json::json;

    use super::InMemoryRecordRepository;

    fn project(title: &str) -> Record {
        Record::new(RecordKind::Project, None, json!({ "title": title }))
            .unwrap_or_else(|error| panic!("invalid project fixture: {error}"))
    }

    fn phase(project_id: RecordId, name: &str) -> Record {
        Record::new(
            RecordKind::TimelinePhase,
            Some(project_id),
            json!({ "name": name, "status": "Pendente" }),
        )
        .unwrap_or_else(|error| panic!("invalid phase fixture: {error}"))
    }

    #[tokio::test]
    async fn list_filters_by_kind_and_parent() {
        let repository = InMemoryRecordRepository::new();
        let first = project("Portal");
        let second = project("ERP");
        let first_id = first.id();
        let second_id = second.id();
        assert!(repository.insert_record(first).await.is_ok());
        assert!(repository.insert_record(second).await.is_ok());
        assert!(repository.insert_record(phase(first_id, "Kickoff")).await.is_ok());
        assert!(repository.insert_record(phase(second_id, "Design")).await.is_ok());

        let projects = repository
            .list_records(RecordKind::Project, None)
            .await
            .unwrap_or_default();
        assert_eq!(projects.len(), 2);

        let phases = repository
            .list_records(RecordKind::TimelinePhase, Some(first_id))
            .await
            .unwrap_or_default();
        assert_eq!(phases.len(), 1);
        assert_eq!(phases[0].field_str("name"), Some("Kickoff"));
    }

    #[tokio::test]
    async fn insert_rejects_missing_parent() {
        let repository = InMemoryRecordRepository::new();
        let result = repository.insert_record(phase(RecordId::new(), "Orphan")).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn delete_cascades_to_children() {
        let repository = InMemoryRecordRepository::new();
        let parent = project("Portal");
        let parent_id = parent.id();
        assert!(repository.insert_record(parent).await.is_ok());
        let child = phase(parent_id, "Kickoff");
        let child_id = child.id();
        assert!(repository.insert_record(child).await.is_ok());

        let wrong_kind = repository
            .delete_record(RecordKind::Client, parent_id)
            .await;
        assert_eq!(wrong_kind.ok(), Some(false));

        let deleted = repository
            .delete_record(RecordKind::Project, parent_id)
            .await;
        assert_eq!(deleted.ok(), Some(true));

        let child = repository
            .find_record(RecordKind::TimelinePhase, child_id)
            .await
            .ok()
            .flatten();
        assert!(child.is_none());
    }
}
