//! Presentation gating for stored credentials.
//!
//! Secret values (server passwords, environment access passwords) never
//! appear in listings. Whether a caller may reveal or copy one depends only
//! on `canEdit`; this module decides the affordance, not the secret handling.

use serde::{Deserialize, Serialize};

use crate::CapabilitySet;

/// Placeholder rendered in place of a stored secret.
pub const MASKED_PLACEHOLDER: &str = "••••••••";

/// How a secret field is presented to a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum SecretPresentation {
    /// A masked placeholder; presence of a value is not disclosed.
    Masked,
    /// No value stored. Only shown to callers who could reveal one.
    Unset,
    /// Plaintext, returned only by an explicit reveal.
    Revealed(String),
}

impl SecretPresentation {
    /// Presentation used in listings and detail reads.
    ///
    /// Callers without `canEdit` always see [`SecretPresentation::Masked`],
    /// even when nothing is stored.
    #[must_use]
    pub fn listing(capabilities: &CapabilitySet, value: Option<&str>) -> Self {
        let has_value = value.is_some_and(|value| !value.is_empty());
        if capabilities.can_edit() && !has_value {
            return Self::Unset;
        }

        Self::Masked
    }

    /// Text to render for this presentation.
    #[must_use]
    pub fn display_text(&self) -> &str {
        match self {
            Self::Masked => MASKED_PLACEHOLDER,
            Self::Unset => "",
            Self::Revealed(value) => value.as_str(),
        }
    }
}

/// Reveal/copy actions offered next to a secret field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretAffordance {
    /// Show the reveal toggle.
    pub can_reveal: bool,
    /// Show the copy-to-clipboard action.
    pub can_copy: bool,
}

impl SecretAffordance {
    /// Derives the affordance from the caller's capabilities.
    #[must_use]
    pub fn from_capabilities(capabilities: &CapabilitySet, has_value: bool) -> Self {
        let allowed = capabilities.can_edit() && has_value;
        Self {
            can_reveal: allowed,
            can_copy: allowed,
        }
    }
}
