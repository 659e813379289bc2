use nexus_domain::{CapabilitySet, ProtectedAction};

use super::*;

impl UserService {
    /// Lists every account for the team page.
    pub async fn list_team(&self, actor: UserId) -> AppResult<Vec<TeamMember>> {
        self.authorization_service
            .require_action(actor, ProtectedAction::ViewTeam)
            .await?;

        Ok(self
            .principal_repository
            .list_accounts()
            .await?
            .into_iter()
            .map(TeamMember::from)
            .collect())
    }

    /// Activates a pending or blocked account.
    pub async fn activate_member(&self, actor: UserId, target: UserId) -> AppResult<()> {
        self.authorization_service
            .require_action(actor, ProtectedAction::ManageTeam)
            .await?;
        self.require_account(target).await?;

        self.principal_repository
            .update_status(target, UserStatus::Active)
            .await?;
        self.audit_team_event(actor, AuditAction::TeamMemberActivated, target, None)
            .await
    }

    /// Promotes a requested password to the account's current password.
    pub async fn approve_password_change(&self, actor: UserId, target: UserId) -> AppResult<()> {
        self.authorization_service
            .require_action(actor, ProtectedAction::ManageTeam)
            .await?;
        self.require_account(target).await?;

        let applied = self.principal_repository.apply_pending_password(target).await?;
        if !applied {
            return Err(AppError::Conflict(format!(
                "user '{target}' has no pending password change"
            )));
        }

        self.audit_team_event(actor, AuditAction::TeamPasswordChangeApproved, target, None)
            .await
    }

    /// Assigns a new role to an account.
    pub async fn change_role(&self, actor: UserId, target: UserId, role: Role) -> AppResult<()> {
        self.authorization_service
            .require_action(actor, ProtectedAction::ManageTeam)
            .await?;
        let account = self.require_account(target).await?;
        if !CapabilitySet::resolve(Some(role)).is_admin() {
            self.ensure_other_administrator(&account).await?;
        }

        self.principal_repository.update_role(target, role).await?;

        let previous = account
            .principal
            .role()
            .map_or("none", |previous| previous.as_str());
        self.audit_team_event(
            actor,
            AuditAction::TeamRoleChanged,
            target,
            Some(format!("{previous} -> {}", role.as_str())),
        )
        .await
    }

    /// Deletes an account. Administrators cannot remove themselves.
    pub async fn remove_member(&self, actor: UserId, target: UserId) -> AppResult<()> {
        self.authorization_service
            .require_action(actor, ProtectedAction::RemoveTeamMember)
            .await?;
        if actor == target {
            return Err(AppError::Validation(
                "you cannot remove your own account".to_owned(),
            ));
        }
        let account = self.require_account(target).await?;
        self.ensure_other_administrator(&account).await?;

        self.principal_repository.delete_account(target).await?;
        self.audit_team_event(actor, AuditAction::TeamMemberRemoved, target, None)
            .await
    }

    /// Fails with `Conflict` when `account` is the last active administrator.
    async fn ensure_other_administrator(&self, account: &UserAccount) -> AppResult<()> {
        if !account.principal.capabilities().is_admin() {
            return Ok(());
        }

        let target = account.principal.id();
        let another = self
            .principal_repository
            .list_accounts()
            .await?
            .iter()
            .any(|other| {
                other.principal.id() != target && other.principal.capabilities().is_admin()
            });
        if !another {
            return Err(AppError::Conflict(
                "at least one active administrator must remain".to_owned(),
            ));
        }

        Ok(())
    }
}
