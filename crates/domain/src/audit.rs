use serde::{Deserialize, Serialize};

/// Stable audit actions emitted by application use-cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// A pending account was activated.
    TeamMemberActivated,
    /// A requested password change was approved.
    TeamPasswordChangeApproved,
    /// A member's role was changed.
    TeamRoleChanged,
    /// A member was removed.
    TeamMemberRemoved,
    /// A record (and its children) was deleted.
    RecordDeleted,
    /// A stored secret was returned in plaintext.
    SecretRevealed,
}

impl AuditAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TeamMemberActivated => "team.member.activated",
            Self::TeamPasswordChangeApproved => "team.password_change.approved",
            Self::TeamRoleChanged => "team.role.changed",
            Self::TeamMemberRemoved => "team.member.removed",
            Self::RecordDeleted => "record.deleted",
            Self::SecretRevealed => "record.secret.revealed",
        }
    }
}
