use serde::{Deserialize, Serialize};

use crate::Capability;

/// Navigation sections of the workspace shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    /// Project catalogue and project details.
    Projects,
    /// Client registry.
    Clients,
    /// Team members and approvals.
    Team,
    /// Per-project schedules.
    Timeline,
    /// Servers, VMs and access credentials.
    Infrastructure,
    /// Summary dashboard.
    Dashboard,
}

impl Surface {
    /// Returns a stable string value for this surface.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Clients => "clients",
            Self::Team => "team",
            Self::Timeline => "timeline",
            Self::Infrastructure => "infrastructure",
            Self::Dashboard => "dashboard",
        }
    }

    /// Returns the route path of this surface.
    #[must_use]
    pub fn path(&self) -> &'static str {
        match self {
            Self::Projects => "/projects",
            Self::Clients => "/clients",
            Self::Team => "/team",
            Self::Timeline => "/timeline",
            Self::Infrastructure => "/infrastructure",
            Self::Dashboard => "/dashboard",
        }
    }

    /// Returns the capability that makes this surface visible.
    #[must_use]
    pub fn required_capability(&self) -> Capability {
        match self {
            Self::Projects => Capability::AccessProjects,
            Self::Clients => Capability::AccessClients,
            Self::Team => Capability::AccessTeam,
            Self::Timeline => Capability::AccessTimeline,
            Self::Infrastructure => Capability::AccessInfra,
            Self::Dashboard => Capability::AccessDashboard,
        }
    }

    /// Returns all surfaces in sidebar order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Surface] = &[
            Surface::Projects,
            Surface::Clients,
            Surface::Team,
            Surface::Timeline,
            Surface::Infrastructure,
            Surface::Dashboard,
        ];

        ALL
    }
}

#[cfg(test)]
mod tests {
    use super::Surface;

    #[test]
    fn every_surface_has_a_distinct_capability() {
        let capabilities: std::collections::HashSet<_> = Surface::all()
            .iter()
            .map(Surface::required_capability)
            .collect();
        assert_eq!(capabilities.len(), Surface::all().len());
    }

    #[test]
    fn paths_start_with_slash() {
        assert!(
            Surface::all()
                .iter()
                .all(|surface| surface.path() == format!("/{}", surface.as_str()))
        );
    }
}
