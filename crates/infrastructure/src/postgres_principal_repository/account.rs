use super::*;

impl PostgresPrincipalRepository {
    pub(super) async fn create_account_impl(&self, account: UserAccount) -> AppResult<()> {
        let principal = &account.principal;

        sqlx::query(
            r#"
            INSERT INTO users (
                id, name, email, role, status, password_hash, pending_password_hash, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(principal.id().as_uuid())
        .bind(principal.name())
        .bind(principal.email().unwrap_or_default())
        .bind(principal.role().map(|role| role.as_str()))
        .bind(principal.status().as_str())
        .bind(&account.password_hash)
        .bind(account.pending_password_hash.as_deref())
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(|error| email_conflict_or_internal(error, "create user"))?;

        Ok(())
    }

    pub(super) async fn update_status_impl(
        &self,
        user_id: UserId,
        status: UserStatus,
    ) -> AppResult<()> {
        let result = sqlx::query("UPDATE users SET status = $2, updated_at = now() WHERE id = $1")
            .bind(user_id.as_uuid())
            .bind(status.as_str())
            .execute(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to update user status: {error}"))
            })?;

        ensure_updated(result.rows_affected(), user_id)
    }

    pub(super) async fn update_role_impl(&self, user_id: UserId, role: Role) -> AppResult<()> {
        let result = sqlx::query("UPDATE users SET role = $2, updated_at = now() WHERE id = $1")
            .bind(user_id.as_uuid())
            .bind(role.as_str())
            .execute(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to update user role: {error}")))?;

        ensure_updated(result.rows_affected(), user_id)
    }

    pub(super) async fn set_pending_password_impl(
        &self,
        user_id: UserId,
        password_hash: &str,
    ) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE users SET pending_password_hash = $2, updated_at = now() WHERE id = $1",
        )
        .bind(user_id.as_uuid())
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to store pending password: {error}"))
        })?;

        ensure_updated(result.rows_affected(), user_id)
    }

    pub(super) async fn apply_pending_password_impl(&self, user_id: UserId) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET password_hash = pending_password_hash,
                pending_password_hash = NULL,
                updated_at = now()
            WHERE id = $1 AND pending_password_hash IS NOT NULL
            "#,
        )
        .bind(user_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to apply pending password: {error}"))
        })?;

        Ok(result.rows_affected() > 0)
    }

    pub(super) async fn delete_account_impl(&self, user_id: UserId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to delete user: {error}")))?;

        ensure_updated(result.rows_affected(), user_id)
    }
}
