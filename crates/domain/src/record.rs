//! Record kinds stored behind the Record API and their payload rules.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use nexus_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::Capability;

/// Unique identifier for a stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Creates a new random record identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a record identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Parses a transport value into a record identifier.
    pub fn parse(value: &str) -> AppResult<Self> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|error| AppError::Validation(format!("invalid record id '{value}': {error}")))
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Kinds of records kept by the Record API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Client project.
    Project,
    /// Deliverable module of a project (API, bot, site...).
    Module,
    /// Infrastructure note or credential attached to a project.
    InfraItem,
    /// Client company.
    Client,
    /// Physical or virtual server.
    Server,
    /// Remote-access environment (VM) hosted on a server.
    Environment,
    /// Schedule phase of a project.
    TimelinePhase,
}

const PROJECT_STATUSES: &[&str] = &[
    "Em Andamento",
    "Planejamento",
    "Concluído",
    "Manutenção",
    "Produção",
];
const MODULE_TYPES: &[&str] = &["API", "Automação", "Bot", "Site", "Script"];
const INFRA_CATEGORIES: &[&str] = &["Server", "Database", "Security", "Network", "Other"];
const ACCESS_TYPES: &[&str] = &["Anydesk", "TeamViewer", "SSH", "VPN", "RDP", "Web"];
const PHASE_STATUSES: &[&str] = &["Pendente", "Em Andamento", "Concluído", "Atrasado"];

impl RecordKind {
    /// Returns all record kinds.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[RecordKind] = &[
            RecordKind::Project,
            RecordKind::Module,
            RecordKind::InfraItem,
            RecordKind::Client,
            RecordKind::Server,
            RecordKind::Environment,
            RecordKind::TimelinePhase,
        ];

        ALL
    }

    /// Returns the stable storage value for this kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Module => "module",
            Self::InfraItem => "infra_item",
            Self::Client => "client",
            Self::Server => "server",
            Self::Environment => "environment",
            Self::TimelinePhase => "timeline_phase",
        }
    }

    /// Returns the URL collection segment for this kind.
    #[must_use]
    pub fn collection(&self) -> &'static str {
        match self {
            Self::Project => "projects",
            Self::Module => "modules",
            Self::InfraItem => "infra",
            Self::Client => "clients",
            Self::Server => "servers",
            Self::Environment => "environments",
            Self::TimelinePhase => "timeline-phases",
        }
    }

    /// Resolves a URL collection segment.
    pub fn from_collection(value: &str) -> AppResult<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.collection() == value)
            .ok_or_else(|| AppError::NotFound(format!("unknown record collection '{value}'")))
    }

    /// Capability gating the section that owns this kind.
    #[must_use]
    pub fn section_capability(&self) -> Capability {
        match self {
            Self::Project | Self::Module | Self::InfraItem => Capability::AccessProjects,
            Self::Client => Capability::AccessClients,
            Self::Server | Self::Environment => Capability::AccessInfra,
            Self::TimelinePhase => Capability::AccessTimeline,
        }
    }

    /// Capability required to read records of this kind.
    ///
    /// Clients are readable from the projects section, where projects embed
    /// their client name.
    #[must_use]
    pub fn read_capability(&self) -> Capability {
        match self {
            Self::Client => Capability::AccessProjects,
            other => other.section_capability(),
        }
    }

    /// Kind of the record that owns records of this kind, if any.
    #[must_use]
    pub fn parent_kind(&self) -> Option<Self> {
        match self {
            Self::Module | Self::InfraItem | Self::TimelinePhase => Some(Self::Project),
            Self::Environment => Some(Self::Server),
            Self::Project | Self::Client | Self::Server => None,
        }
    }

    /// Payload fields that must be present and non-blank.
    #[must_use]
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            Self::Project => &["title"],
            Self::Module => &["name"],
            Self::InfraItem => &["name", "value"],
            Self::Client => &["name", "internalCode"],
            Self::Server => &["name", "ipAddress"],
            Self::Environment => &["name", "accessId"],
            Self::TimelinePhase => &["name"],
        }
    }

    /// Payload fields holding credentials.
    #[must_use]
    pub fn secret_fields(&self) -> &'static [&'static str] {
        match self {
            Self::InfraItem => &["value"],
            Self::Server => &["password"],
            Self::Environment => &["accessPassword"],
            _ => &[],
        }
    }

    fn enumerated_fields(&self) -> &'static [(&'static str, &'static [&'static str])] {
        match self {
            Self::Project => &[("status", PROJECT_STATUSES)],
            Self::Module => &[("type", MODULE_TYPES)],
            Self::InfraItem => &[("category", INFRA_CATEGORIES)],
            Self::Environment => &[("accessType", ACCESS_TYPES)],
            Self::TimelinePhase => &[("status", PHASE_STATUSES)],
            Self::Client | Self::Server => &[],
        }
    }

    /// Validates a full payload for a newly created record.
    pub fn validate_payload(&self, payload: &Value) -> AppResult<()> {
        let object = self.payload_object(payload)?;

        for field in self.required_fields() {
            let present = object
                .get(*field)
                .and_then(Value::as_str)
                .is_some_and(|value| !value.trim().is_empty());
            if !present {
                return Err(AppError::Validation(format!(
                    "{} field '{field}' is required",
                    self.as_str()
                )));
            }
        }

        self.validate_fields(object)
    }

    /// Validates a partial payload merged over an existing record.
    pub fn validate_patch(&self, patch: &Value) -> AppResult<()> {
        let object = self.payload_object(patch)?;

        for field in self.required_fields() {
            if let Some(value) = object.get(*field) {
                let blank = value.as_str().is_none_or(|value| value.trim().is_empty());
                if blank {
                    return Err(AppError::Validation(format!(
                        "{} field '{field}' must not be blank",
                        self.as_str()
                    )));
                }
            }
        }

        self.validate_fields(object)
    }

    fn payload_object<'a>(&self, payload: &'a Value) -> AppResult<&'a Map<String, Value>> {
        payload.as_object().ok_or_else(|| {
            AppError::Validation(format!("{} payload must be a JSON object", self.as_str()))
        })
    }

    fn validate_fields(&self, object: &Map<String, Value>) -> AppResult<()> {
        for (field, allowed) in self.enumerated_fields() {
            let Some(value) = object.get(*field).filter(|value| !value.is_null()) else {
                continue;
            };
            let accepted = value.as_str().is_some_and(|value| allowed.contains(&value));
            if !accepted {
                return Err(AppError::Validation(format!(
                    "{} field '{field}' must be one of: {}",
                    self.as_str(),
                    allowed.join(", ")
                )));
            }
        }

        if *self == Self::TimelinePhase {
            validate_phase_schedule(object)?;
        }

        Ok(())
    }
}

impl FromStr for RecordKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown record kind '{value}'")))
    }
}

fn validate_phase_schedule(object: &Map<String, Value>) -> AppResult<()> {
    let start = parse_optional_date(object, "startDate")?;
    let end = parse_optional_date(object, "endDate")?;
    if let (Some(start), Some(end)) = (start, end)
        && end < start
    {
        return Err(AppError::Validation(
            "timeline_phase field 'endDate' must not precede 'startDate'".to_owned(),
        ));
    }

    if let Some(hours) = object.get("estimatedHours").filter(|hours| !hours.is_null()) {
        let valid = hours.as_f64().is_some_and(|hours| hours >= 0.0);
        if !valid {
            return Err(AppError::Validation(
                "timeline_phase field 'estimatedHours' must be a non-negative number".to_owned(),
            ));
        }
    }

    Ok(())
}

fn parse_optional_date(object: &Map<String, Value>, field: &str) -> AppResult<Option<NaiveDate>> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) if value.is_empty() => Ok(None),
        Some(Value::String(value)) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Some)
            .map_err(|error| {
                AppError::Validation(format!(
                    "timeline_phase field '{field}' must be a YYYY-MM-DD date: {error}"
                ))
            }),
        Some(_) => Err(AppError::Validation(format!(
            "timeline_phase field '{field}' must be a string"
        ))),
    }
}

/// Stored record with a JSON object payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    id: RecordId,
    kind: RecordKind,
    parent_id: Option<RecordId>,
    data: Map<String, Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Record {
    /// Creates a validated record.
    pub fn new(kind: RecordKind, parent_id: Option<RecordId>, data: Value) -> AppResult<Self> {
        match (kind.parent_kind(), parent_id) {
            (Some(parent_kind), None) => {
                return Err(AppError::Validation(format!(
                    "{} requires a parent {}",
                    kind.as_str(),
                    parent_kind.as_str()
                )));
            }
            (None, Some(_)) => {
                return Err(AppError::Validation(format!(
                    "{} does not accept a parent record",
                    kind.as_str()
                )));
            }
            _ => {}
        }

        kind.validate_payload(&data)?;
        let data = match data {
            Value::Object(object) => object,
            _ => Map::new(),
        };

        let now = Utc::now();
        Ok(Self {
            id: RecordId::new(),
            kind,
            parent_id,
            data,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuilds a record from persisted values without validation.
    #[must_use]
    pub fn from_storage(
        id: RecordId,
        kind: RecordKind,
        parent_id: Option<RecordId>,
        data: Map<String, Value>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            kind,
            parent_id,
            data,
            created_at,
            updated_at,
        }
    }

    /// Merges a validated patch over the payload. `null` removes a field.
    ///
    /// The merged payload is validated as a whole before it replaces the
    /// stored one, so cross-field rules see both old and new values.
    pub fn apply_patch(&mut self, patch: Value) -> AppResult<()> {
        self.kind.validate_patch(&patch)?;
        let mut merged = self.data.clone();
        if let Value::Object(patch) = patch {
            for (field, value) in patch {
                if value.is_null() {
                    merged.remove(&field);
                } else {
                    merged.insert(field, value);
                }
            }
        }
        self.kind.validate_fields(&merged)?;

        self.data = merged;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Returns the record identifier.
    #[must_use]
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Returns the record kind.
    #[must_use]
    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Returns the owning record, if any.
    #[must_use]
    pub fn parent_id(&self) -> Option<RecordId> {
        self.parent_id
    }

    /// Returns the payload object.
    #[must_use]
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Returns a string payload field.
    #[must_use]
    pub fn field_str(&self, field: &str) -> Option<&str> {
        self.data.get(field).and_then(Value::as_str)
    }

    /// Creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last update timestamp.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
