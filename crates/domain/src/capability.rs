//! Role to capability rule table.
//!
//! The table below is the single authoritative policy. Every capability is a
//! pure, total function of the role: no ownership, membership, or time input.
//! Capability sets are cheap to build and are derived fresh on every read;
//! nothing here caches or watches for role changes.

use serde::{Deserialize, Serialize};

use crate::{Role, Surface};

/// One boolean permission flag of a [`CapabilitySet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Create and edit records; reveal and copy stored secrets.
    Edit,
    /// Destructive deletes.
    Delete,
    /// Team administration (approvals, role changes).
    Admin,
    /// Projects section.
    AccessProjects,
    /// Dashboard section.
    AccessDashboard,
    /// Timeline section.
    AccessTimeline,
    /// Clients section.
    AccessClients,
    /// Team section.
    AccessTeam,
    /// Infrastructure section.
    AccessInfra,
}

impl Capability {
    /// Every capability, in rule-table order.
    pub const ALL: [Self; 9] = [
        Self::Edit,
        Self::Delete,
        Self::Admin,
        Self::AccessProjects,
        Self::AccessDashboard,
        Self::AccessTimeline,
        Self::AccessClients,
        Self::AccessTeam,
        Self::AccessInfra,
    ];

    /// Returns the stable wire value for this capability.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Edit => "can_edit",
            Self::Delete => "can_delete",
            Self::Admin => "is_admin",
            Self::AccessProjects => "can_access_projects",
            Self::AccessDashboard => "can_access_dashboard",
            Self::AccessTimeline => "can_access_timeline",
            Self::AccessClients => "can_access_clients",
            Self::AccessTeam => "can_access_team",
            Self::AccessInfra => "can_access_infra",
        }
    }

    /// Returns all known capabilities.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &Self::ALL
    }
}

/// Which roles a rule grants its capability to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Grant {
    /// Granted to everyone, including callers without a recognised role.
    Everyone,
    /// Granted to exactly the listed roles.
    Roles(&'static [Role]),
}

impl Grant {
    /// Returns whether the grant covers the given role (or lack of one).
    #[must_use]
    const fn includes(&self, role: Option<Role>) -> bool {
        match self {
            Self::Everyone => true,
            Self::Roles(roles) => {
                let Some(role) = role else {
                    return false;
                };
                let roles: &[Role] = *roles;
                let mut index = 0;
                while index < roles.len() {
                    if roles[index] as u8 == role as u8 {
                        return true;
                    }
                    index += 1;
                }
                false
            }
        }
    }
}

const CAPABILITY_RULES: &[(Capability, Grant)] = &[
    (
        Capability::Edit,
        Grant::Roles(&[Role::Diretor, Role::Desenvolvedor, Role::Infra, Role::Admin]),
    ),
    (Capability::Delete, Grant::Roles(&[Role::Diretor, Role::Admin])),
    (Capability::Admin, Grant::Roles(&[Role::Diretor, Role::Admin])),
    (Capability::AccessProjects, Grant::Everyone),
    (Capability::AccessDashboard, Grant::Everyone),
    (
        Capability::AccessTimeline,
        Grant::Roles(&[
            Role::Diretor,
            Role::Admin,
            Role::Desenvolvedor,
            Role::Coordenador,
            Role::Comercial,
        ]),
    ),
    (
        Capability::AccessClients,
        Grant::Roles(&[Role::Diretor, Role::Admin, Role::Desenvolvedor]),
    ),
    (Capability::AccessTeam, Grant::Roles(&[Role::Diretor, Role::Admin])),
    (
        Capability::AccessInfra,
        Grant::Roles(&[Role::Diretor, Role::Infra, Role::Admin]),
    ),
];

/// Pairs `(stronger, weaker)`: any role holding `stronger` must hold `weaker`.
const CAPABILITY_IMPLICATIONS: &[(Capability, Capability)] = &[
    (Capability::Delete, Capability::Edit),
    (Capability::Admin, Capability::Edit),
    (Capability::AccessTeam, Capability::Admin),
];

const _: () = assert!(
    rule_table_is_complete(),
    "every capability needs exactly one rule"
);
const _: () = assert!(
    rule_table_respects_implications(),
    "capability rule table violates a declared implication"
);

const fn is_granted(capability: Capability, role: Option<Role>) -> bool {
    let mut index = 0;
    while index < CAPABILITY_RULES.len() {
        let (rule_capability, grant) = &CAPABILITY_RULES[index];
        if *rule_capability as u8 == capability as u8 {
            return grant.includes(role);
        }
        index += 1;
    }
    false
}

const fn rule_table_is_complete() -> bool {
    let mut capability_index = 0;
    while capability_index < Capability::ALL.len() {
        let capability = Capability::ALL[capability_index];
        let mut occurrences = 0;
        let mut rule_index = 0;
        while rule_index < CAPABILITY_RULES.len() {
            if CAPABILITY_RULES[rule_index].0 as u8 == capability as u8 {
                occurrences += 1;
            }
            rule_index += 1;
        }
        if occurrences != 1 {
            return false;
        }
        capability_index += 1;
    }
    CAPABILITY_RULES.len() == Capability::ALL.len()
}

const fn rule_table_respects_implications() -> bool {
    let mut implication_index = 0;
    while implication_index < CAPABILITY_IMPLICATIONS.len() {
        let (stronger, weaker) = CAPABILITY_IMPLICATIONS[implication_index];
        if is_granted(stronger, None) && !is_granted(weaker, None) {
            return false;
        }
        let mut role_index = 0;
        while role_index < Role::ALL.len() {
            let role = Some(Role::ALL[role_index]);
            if is_granted(stronger, role) && !is_granted(weaker, role) {
                return false;
            }
            role_index += 1;
        }
        implication_index += 1;
    }
    true
}

/// Full bundle of capability flags derived from a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilitySet {
    can_edit: bool,
    can_delete: bool,
    is_admin: bool,
    can_access_projects: bool,
    can_access_dashboard: bool,
    can_access_timeline: bool,
    can_access_clients: bool,
    can_access_team: bool,
    can_access_infra: bool,
}

impl CapabilitySet {
    /// Resolves the capability set for a role. `None` is the least-privileged set.
    #[must_use]
    pub const fn resolve(role: Option<Role>) -> Self {
        Self {
            can_edit: is_granted(Capability::Edit, role),
            can_delete: is_granted(Capability::Delete, role),
            is_admin: is_granted(Capability::Admin, role),
            can_access_projects: is_granted(Capability::AccessProjects, role),
            can_access_dashboard: is_granted(Capability::AccessDashboard, role),
            can_access_timeline: is_granted(Capability::AccessTimeline, role),
            can_access_clients: is_granted(Capability::AccessClients, role),
            can_access_team: is_granted(Capability::AccessTeam, role),
            can_access_infra: is_granted(Capability::AccessInfra, role),
        }
    }

    /// Resolves the capability set for a raw role claim.
    ///
    /// Unrecognised or absent claims degrade to [`CapabilitySet::least_privileged`].
    #[must_use]
    pub fn resolve_claim(claim: Option<&str>) -> Self {
        Self::resolve(Role::from_claim(claim))
    }

    /// Capabilities granted when no recognised role is present.
    #[must_use]
    pub const fn least_privileged() -> Self {
        Self::resolve(None)
    }

    /// Returns whether the given capability is granted.
    #[must_use]
    pub const fn grants(&self, capability: Capability) -> bool {
        match capability {
            Capability::Edit => self.can_edit,
            Capability::Delete => self.can_delete,
            Capability::Admin => self.is_admin,
            Capability::AccessProjects => self.can_access_projects,
            Capability::AccessDashboard => self.can_access_dashboard,
            Capability::AccessTimeline => self.can_access_timeline,
            Capability::AccessClients => self.can_access_clients,
            Capability::AccessTeam => self.can_access_team,
            Capability::AccessInfra => self.can_access_infra,
        }
    }

    /// Returns the navigation entries to render. Disallowed entries are absent.
    #[must_use]
    pub fn navigation(&self) -> Vec<Surface> {
        Surface::all()
            .iter()
            .copied()
            .filter(|surface| self.grants(surface.required_capability()))
            .collect()
    }

    /// Create/edit permission.
    #[must_use]
    pub const fn can_edit(&self) -> bool {
        self.can_edit
    }

    /// Delete permission.
    #[must_use]
    pub const fn can_delete(&self) -> bool {
        self.can_delete
    }

    /// Team administration permission.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// Projects section visibility. Always true.
    #[must_use]
    pub const fn can_access_projects(&self) -> bool {
        self.can_access_projects
    }

    /// Dashboard section visibility. Always true.
    #[must_use]
    pub const fn can_access_dashboard(&self) -> bool {
        self.can_access_dashboard
    }

    /// Timeline section visibility.
    #[must_use]
    pub const fn can_access_timeline(&self) -> bool {
        self.can_access_timeline
    }

    /// Clients section visibility.
    #[must_use]
    pub const fn can_access_clients(&self) -> bool {
        self.can_access_clients
    }

    /// Team section visibility.
    #[must_use]
    pub const fn can_access_team(&self) -> bool {
        self.can_access_team
    }

    /// Infrastructure section visibility.
    #[must_use]
    pub const fn can_access_infra(&self) -> bool {
        self.can_access_infra
    }
}

impl Default for CapabilitySet {
    fn default() -> Self {
        Self::least_privileged()
    }
}
