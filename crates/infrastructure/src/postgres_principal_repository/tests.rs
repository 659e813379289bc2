use chrono::Utc;
use nexus_application::{PrincipalRepository, UserAccount};
use nexus_core::AppError;
use nexus_domain::{Principal, Role, UserId, UserStatus};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use super::PostgresPrincipalRepository;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for principal repository tests: {error}");
    }

    Some(pool)
}

fn account(email: &str, role: Option<Role>) -> UserAccount {
    UserAccount {
        principal: Principal::new(
            UserId::new(),
            "Test Member",
            Some(email.to_owned()),
            role,
            UserStatus::Pending,
        ),
        password_hash: "hash-1".to_owned(),
        pending_password_hash: None,
        created_at: Utc::now(),
    }
}

fn unique_email() -> String {
    format!("member-{}@nexus.test", UserId::new())
}

#[tokio::test]
async fn stored_role_and_status_are_read_back() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repository = PostgresPrincipalRepository::new(pool);
    let email = unique_email();
    let created = account(&email, Some(Role::User));
    let user_id = created.principal.id();

    assert!(repository.create_account(created).await.is_ok());
    assert!(
        repository
            .update_status(user_id, UserStatus::Active)
            .await
            .is_ok()
    );
    assert!(repository.update_role(user_id, Role::Infra).await.is_ok());

    let found = repository
        .find_by_email(&email.to_uppercase())
        .await
        .ok()
        .flatten();
    let principal = found.map(|account| account.principal);
    assert_eq!(principal.as_ref().map(Principal::id), Some(user_id));
    assert_eq!(principal.as_ref().and_then(Principal::role), Some(Role::Infra));
    assert_eq!(
        principal.as_ref().map(Principal::status),
        Some(UserStatus::Active)
    );

    assert!(repository.delete_account(user_id).await.is_ok());
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repository = PostgresPrincipalRepository::new(pool);
    let email = unique_email();

    assert!(
        repository
            .create_account(account(&email, Some(Role::User)))
            .await
            .is_ok()
    );
    let duplicate = repository
        .create_account(account(&email, Some(Role::User)))
        .await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn unknown_stored_role_degrades_to_none() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repository = PostgresPrincipalRepository::new(pool.clone());
    let created = account(&unique_email(), Some(Role::User));
    let user_id = created.principal.id();
    assert!(repository.create_account(created).await.is_ok());

    let tampered = sqlx::query("UPDATE users SET role = 'ROOT' WHERE id = $1")
        .bind(user_id.as_uuid())
        .execute(&pool)
        .await;
    assert!(tampered.is_ok());

    let found = repository.find_by_id(user_id).await.ok().flatten();
    assert_eq!(found.and_then(|account| account.principal.role()), None);
}

#[tokio::test]
async fn pending_password_is_applied_once() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repository = PostgresPrincipalRepository::new(pool);
    let created = account(&unique_email(), Some(Role::User));
    let user_id = created.principal.id();
    assert!(repository.create_account(created).await.is_ok());

    assert!(
        repository
            .set_pending_password(user_id, "hash-2")
            .await
            .is_ok()
    );
    assert_eq!(repository.apply_pending_password(user_id).await.ok(), Some(true));
    assert_eq!(repository.apply_pending_password(user_id).await.ok(), Some(false));

    let found = repository.find_by_id(user_id).await.ok().flatten();
    assert_eq!(
        found.map(|account| account.password_hash),
        Some("hash-2".to_owned())
    );
}
