use std::collections::BTreeMap;

use nexus_application::{RecordView, SecretFieldView};
use nexus_domain::SecretPresentation;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

/// Query string for record listings.
#[derive(Debug, Default, Deserialize)]
pub struct RecordListQuery {
    pub parent_id: Option<String>,
}

/// Query string for secret reveals.
#[derive(Debug, Default, Deserialize)]
pub struct RevealSecretQuery {
    pub field: Option<String>,
}

/// Incoming payload for record creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/create-record-request.ts"
)]
pub struct CreateRecordRequest {
    #[serde(default)]
    pub parent_id: Option<String>,
    #[ts(type = "Record<string, unknown>")]
    pub data: Value,
}

/// Incoming partial payload merged over a stored record.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/update-record-request.ts"
)]
pub struct UpdateRecordRequest {
    #[ts(type = "Record<string, unknown>")]
    pub data: Value,
}

/// Masked secret field with the actions offered next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/secret-field-response.ts"
)]
pub struct SecretFieldResponse {
    pub state: String,
    pub display: String,
    pub can_reveal: bool,
    pub can_copy: bool,
}

impl From<&SecretFieldView> for SecretFieldResponse {
    fn from(view: &SecretFieldView) -> Self {
        // Listings never carry plaintext; a stray value is shown masked.
        let presentation = match &view.presentation {
            SecretPresentation::Unset => SecretPresentation::Unset,
            SecretPresentation::Masked | SecretPresentation::Revealed(_) => {
                SecretPresentation::Masked
            }
        };
        let state = match presentation {
            SecretPresentation::Unset => "unset",
            _ => "masked",
        };

        Self {
            state: state.to_owned(),
            display: presentation.display_text().to_owned(),
            can_reveal: view.affordance.can_reveal,
            can_copy: view.affordance.can_copy,
        }
    }
}

/// API representation of a stored record.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/record-response.ts"
)]
pub struct RecordResponse {
    pub record_id: String,
    pub kind: String,
    pub parent_id: Option<String>,
    #[ts(type = "Record<string, unknown>")]
    pub data: Value,
    pub secrets: BTreeMap<String, SecretFieldResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<RecordView> for RecordResponse {
    fn from(view: RecordView) -> Self {
        Self {
            record_id: view.record_id.to_string(),
            kind: view.kind.as_str().to_owned(),
            parent_id: view.parent_id.map(|parent_id| parent_id.to_string()),
            secrets: view
                .secrets
                .iter()
                .map(|(field, secret)| (field.clone(), SecretFieldResponse::from(secret)))
                .collect(),
            data: Value::Object(view.data),
            created_at: view.created_at.to_rfc3339(),
            updated_at: view.updated_at.to_rfc3339(),
        }
    }
}

/// Plaintext secret returned by an explicit reveal.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/revealed-secret-response.ts"
)]
pub struct RevealedSecretResponse {
    pub field: String,
    pub value: Option<String>,
}

impl RevealedSecretResponse {
    pub fn new(field: String, presentation: SecretPresentation) -> Self {
        let value = match presentation {
            SecretPresentation::Revealed(value) => Some(value),
            SecretPresentation::Masked | SecretPresentation::Unset => None,
        };

        Self { field, value }
    }
}
