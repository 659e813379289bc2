use std::str::FromStr;

use nexus_core::AppError;
use serde::{Deserialize, Serialize};

/// Closed set of identity tiers carried by a principal's role claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Company director. Holds every capability.
    Diretor,
    /// System administrator.
    Admin,
    /// Software developer.
    Desenvolvedor,
    /// Infrastructure operator.
    Infra,
    /// Project coordinator (read-only).
    Coordenador,
    /// Sales (read-only).
    Comercial,
    /// Fallback tier assigned on registration.
    User,
}

impl Role {
    /// Every role, in the order administrators see them.
    pub const ALL: [Self; 7] = [
        Self::Diretor,
        Self::Desenvolvedor,
        Self::Infra,
        Self::Coordenador,
        Self::Comercial,
        Self::Admin,
        Self::User,
    ];

    /// Returns the stable wire value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Diretor => "DIRETOR",
            Self::Admin => "ADMIN",
            Self::Desenvolvedor => "DESENVOLVEDOR",
            Self::Infra => "INFRA",
            Self::Coordenador => "COORDENADOR",
            Self::Comercial => "COMERCIAL",
            Self::User => "USER",
        }
    }

    /// Returns all known roles.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &Self::ALL
    }

    /// Reads a stored role claim without failing.
    ///
    /// Absent, empty, or unrecognised claims yield `None`, which the resolver
    /// treats as "no session". Matching is exact and case-sensitive.
    #[must_use]
    pub fn from_claim(claim: Option<&str>) -> Option<Self> {
        claim.and_then(|value| Self::from_str(value).ok())
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "DIRETOR" => Ok(Self::Diretor),
            "ADMIN" => Ok(Self::Admin),
            "DESENVOLVEDOR" => Ok(Self::Desenvolvedor),
            "INFRA" => Ok(Self::Infra),
            "COORDENADOR" => Ok(Self::Coordenador),
            "COMERCIAL" => Ok(Self::Comercial),
            "USER" => Ok(Self::User),
            _ => Err(AppError::Validation(format!("unknown role value '{value}'"))),
        }
    }
}
