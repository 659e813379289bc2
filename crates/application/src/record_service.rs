//! Record API use-cases with per-action capability enforcement.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use nexus_core::{AppError, AppResult};
use nexus_domain::{
    AuditAction, CapabilitySet, ProtectedAction, Record, RecordId, RecordKind, SecretAffordance,
    SecretPresentation, UserId,
};
use serde_json::{Map, Value};

use crate::{AuditEvent, AuditRepository, AuthorizationService, RecordRepository};


/// Input payload for record creation.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateRecordInput {
    /// Kind of record to create.
    pub kind: RecordKind,
    /// Owning record for child kinds.
    pub parent_id: Option<RecordId>,
    /// JSON object payload.
    pub data: Value,
}

/// Presentation of one secret field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretFieldView {
    /// Masked or unset; never plaintext.
    pub presentation: SecretPresentation,
    /// Reveal/copy actions the caller may use.
    pub affordance: SecretAffordance,
}

/// Caller-specific view of a record with secret values withheld.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordView {
    /// Record identifier.
    pub record_id: RecordId,
    /// Record kind.
    pub kind: RecordKind,
    /// Owning record, if any.
    pub parent_id: Option<RecordId>,
    /// Payload without secret fields.
    pub data: Map<String, Value>,
    /// Secret fields by name.
    pub secrets: BTreeMap<String, SecretFieldView>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl RecordView {
    /// Projects a stored record for a caller.
    #[must_use]
    pub fn project(record: &Record, capabilities: &CapabilitySet) -> Self {
        let secret_fields = record.kind().secret_fields();
        let data = record
            .data()
            .iter()
            .filter(|(field, _)| !secret_fields.contains(&field.as_str()))
            .map(|(field, value)| (field.clone(), value.clone()))
            .collect();

        let secrets = secret_fields
            .iter()
            .map(|field| {
                let value = record.field_str(field);
                let has_value = value.is_some_and(|value| !value.is_empty());
                (
                    (*field).to_owned(),
                    SecretFieldView {
                        presentation: SecretPresentation::listing(capabilities, value),
                        affordance: SecretAffordance::from_capabilities(capabilities, has_value),
                    },
                )
            })
            .collect();

        Self {
            record_id: record.id(),
            kind: record.kind(),
            parent_id: record.parent_id(),
            data,
            secrets,
            created_at: record.created_at(),
            updated_at: record.updated_at(),
        }
    }
}

/// Application service for stored records.
#[derive(Clone)]
pub struct RecordService {
    authorization_service: AuthorizationService,
    repository: Arc<dyn RecordRepository>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl RecordService {
    /// Creates a new record service.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        repository: Arc<dyn RecordRepository>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            authorization_service,
            repository,
            audit_repository,
        }
    }

    /// Lists records of a kind, optionally limited to one parent.
    pub async fn list_records(
        &self,
        actor: UserId,
        kind: RecordKind,
        parent_id: Option<RecordId>,
    ) -> AppResult<Vec<RecordView>> {
        let capabilities = self
            .authorization_service
            .require_action(actor, ProtectedAction::ReadRecords(kind))
            .await?;

        if parent_id.is_some() && kind.parent_kind().is_none() {
            return Err(AppError::Validation(format!(
                "{} records have no parent",
                kind.as_str()
            )));
        }

        Ok(self
            .repository
            .list_records(kind, parent_id)
            .await?
            .iter()
            .map(|record| RecordView::project(record, &capabilities))
            .collect())
    }

    /// Returns one record.
    pub async fn get_record(
        &self,
        actor: UserId,
        kind: RecordKind,
        record_id: RecordId,
    ) -> AppResult<RecordView> {
        let capabilities = self
            .authorization_service
            .require_action(actor, ProtectedAction::ReadRecords(kind))
            .await?;

        let record = self.require_record(kind, record_id).await?;
        Ok(RecordView::project(&record, &capabilities))
    }

    /// Creates a record after validating its payload and parent.
    pub async fn create_record(
        &self,
        actor: UserId,
        input: CreateRecordInput,
    ) -> AppResult<RecordView> {
        let capabilities = self
            .authorization_service
            .require_action(actor, ProtectedAction::CreateRecord(input.kind))
            .await?;

        if let (Some(parent_kind), Some(parent_id)) = (input.kind.parent_kind(), input.parent_id) {
            let parent = self.repository.find_record(parent_kind, parent_id).await?;
            if parent.is_none() {
                return Err(AppError::Validation(format!(
                    "parent {} '{parent_id}' does not exist",
                    parent_kind.as_str()
                )));
            }
        }

        let record = Record::new(input.kind, input.parent_id, input.data)?;
        self.repository.insert_record(record.clone()).await?;

        Ok(RecordView::project(&record, &capabilities))
    }

    /// Merges a partial payload over a stored record.
    pub async fn update_record(
        &self,
        actor: UserId,
        kind: RecordKind,
        record_id: RecordId,
        patch: Value,
    ) -> AppResult<RecordView> {
        let capabilities = self
            .authorization_service
            .require_action(actor, ProtectedAction::UpdateRecord(kind))
            .await?;

        let mut record = self.require_record(kind, record_id).await?;
        record.apply_patch(patch)?;
        self.repository.update_record(record.clone()).await?;

        Ok(RecordView::project(&record, &capabilities))
    }

    /// Deletes a record and everything parented by it.
    pub async fn delete_record(
        &self,
        actor: UserId,
        kind: RecordKind,
        record_id: RecordId,
    ) -> AppResult<()> {
        self.authorization_service
            .require_action(actor, ProtectedAction::DeleteRecord(kind))
            .await?;

        let deleted = self.repository.delete_record(kind, record_id).await?;
        if !deleted {
            return Err(not_found(kind, record_id));
        }

        self.audit_repository
            .append_event(AuditEvent {
                subject: actor.to_string(),
                action: AuditAction::RecordDeleted,
                resource_type: kind.as_str().to_owned(),
                resource_id: record_id.to_string(),
                detail: None,
            })
            .await
    }

    /// Returns a stored secret in plaintext.
    ///
    /// `field` defaults to the kind's first secret field.
    pub async fn reveal_secret(
        &self,
        actor: UserId,
        kind: RecordKind,
        record_id: RecordId,
        field: Option<&str>,
    ) -> AppResult<SecretPresentation> {
        self.authorization_service
            .require_action(actor, ProtectedAction::RevealSecret(kind))
            .await?;

        let secret_fields = kind.secret_fields();
        let field = match field {
            Some(field) => secret_fields
                .iter()
                .copied()
                .find(|candidate| *candidate == field)
                .ok_or_else(|| {
                    AppError::Validation(format!(
                        "'{field}' is not a secret field of {}",
                        kind.as_str()
                    ))
                })?,
            None => secret_fields.first().copied().ok_or_else(|| {
                AppError::Validation(format!("{} has no secret fields", kind.as_str()))
            })?,
        };

        let record = self.require_record(kind, record_id).await?;
        let presentation = match record.field_str(field) {
            Some(value) if !value.is_empty() => SecretPresentation::Revealed(value.to_owned()),
            _ => SecretPresentation::Unset,
        };

        self.audit_repository
            .append_event(AuditEvent {
                subject: actor.to_string(),
                action: AuditAction::SecretRevealed,
                resource_type: kind.as_str().to_owned(),
                resource_id: record_id.to_string(),
                detail: Some(field.to_owned()),
            })
            .await?;

        Ok(presentation)
    }

    async fn require_record(&self, kind: RecordKind, record_id: RecordId) -> AppResult<Record> {
        self.repository
            .find_record(kind, record_id)
            .await?
            .ok_or_else(|| not_found(kind, record_id))
    }
}

fn not_found(kind: RecordKind, record_id: RecordId) -> AppError {
    AppError::NotFound(format!("{} '{record_id}' not found", kind.as_str()))
}
