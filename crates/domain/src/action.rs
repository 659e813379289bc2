use crate::{Capability, RecordKind};

/// Server-side operations guarded by a capability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtectedAction {
    /// List or read records of a kind.
    ReadRecords(RecordKind),
    /// Create a record.
    CreateRecord(RecordKind),
    /// Update a record, including its secret fields.
    UpdateRecord(RecordKind),
    /// Delete a record and its children.
    DeleteRecord(RecordKind),
    /// Return a stored secret in plaintext.
    RevealSecret(RecordKind),
    /// List team members.
    ViewTeam,
    /// Approve accounts, approve password changes, change roles.
    ManageTeam,
    /// Remove a team member.
    RemoveTeamMember,
}

impl ProtectedAction {
    /// Capabilities that must all be granted for the action.
    #[must_use]
    pub fn required_capabilities(&self) -> Vec<Capability> {
        match self {
            Self::ReadRecords(kind) => vec![kind.read_capability()],
            Self::CreateRecord(kind) | Self::UpdateRecord(kind) | Self::RevealSecret(kind) => {
                vec![kind.section_capability(), Capability::Edit]
            }
            Self::DeleteRecord(kind) => vec![kind.section_capability(), Capability::Delete],
            Self::ViewTeam => vec![Capability::AccessTeam],
            Self::ManageTeam => vec![Capability::Admin],
            Self::RemoveTeamMember => vec![Capability::Admin, Capability::Delete],
        }
    }

    /// Returns a stable label for logs and error messages.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::ReadRecords(kind) => format!("records.read:{}", kind.as_str()),
            Self::CreateRecord(kind) => format!("records.create:{}", kind.as_str()),
            Self::UpdateRecord(kind) => format!("records.update:{}", kind.as_str()),
            Self::DeleteRecord(kind) => format!("records.delete:{}", kind.as_str()),
            Self::RevealSecret(kind) => format!("records.reveal_secret:{}", kind.as_str()),
            Self::ViewTeam => "team.view".to_owned(),
            Self::ManageTeam => "team.manage".to_owned(),
            Self::RemoveTeamMember => "team.remove".to_owned(),
        }
    }
}
