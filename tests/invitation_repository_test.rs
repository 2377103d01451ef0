//! Database-backed invitation acceptance tests
//!
//! Requires a live MySQL via `DATABASE_URL`; skips otherwise.

mod common;

use accounts_core::domain::StringUuid;
use accounts_core::repository::invitation::InvitationRepositoryImpl;
use accounts_core::repository::InvitationRepository;
use sqlx::MySqlPool;
use std::sync::Arc;

/// Insert a pending invitation directly and return its token and email.
async fn seed_invitation(pool: &MySqlPool) -> (String, String) {
    let token = uuid::Uuid::new_v4().simple().to_string();
    let email = format!("invitee-{}@example.com", uuid::Uuid::new_v4().simple());

    sqlx::query(
        r#"
        INSERT INTO employee_invitations (id, email, first_name, last_name, phone, role, business_id, created_by, token, accepted, created_at, updated_at)
        VALUES (?, ?, 'New', 'Hire', '912345678', 'Sales', ?, ?, ?, false, NOW(), NOW())
        "#,
    )
    .bind(StringUuid::new_v4())
    .bind(&email)
    .bind(StringUuid::new_v4())
    .bind(StringUuid::new_v4())
    .bind(&token)
    .execute(pool)
    .await
    .expect("Failed to seed invitation");

    (token, email)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_accepts_redeem_exactly_once() {
    let Some(pool) = common::try_test_pool().await else {
        return;
    };
    let (token, email) = seed_invitation(&pool).await;
    let repo = Arc::new(InvitationRepositoryImpl::new(pool.clone()));

    let first = {
        let repo = repo.clone();
        let token = token.clone();
        tokio::spawn(async move { repo.accept(&token, "hash-one").await })
    };
    let second = {
        let repo = repo.clone();
        let token = token.clone();
        tokio::spawn(async move { repo.accept(&token, "hash-two").await })
    };

    let a = first.await.unwrap().expect("first accept errored");
    let b = second.await.unwrap().expect("second accept errored");

    // One attempt materializes the employee, the other loses the race.
    let winners = [&a, &b].iter().filter(|r| r.is_some()).count();
    assert_eq!(winners, 1);

    let employee = a.or(b).unwrap();
    assert_eq!(employee.email, email);

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM employees WHERE email = ?")
        .bind(&email)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_second_sequential_accept_returns_none() {
    let Some(pool) = common::try_test_pool().await else {
        return;
    };
    let (token, _) = seed_invitation(&pool).await;
    let repo = InvitationRepositoryImpl::new(pool.clone());

    let first = repo.accept(&token, "hash-one").await.unwrap();
    assert!(first.is_some());

    let second = repo.accept(&token, "hash-two").await.unwrap();
    assert!(second.is_none());
}

#[tokio::test]
async fn test_accept_unknown_token_returns_none() {
    let Some(pool) = common::try_test_pool().await else {
        return;
    };
    let repo = InvitationRepositoryImpl::new(pool);

    let result = repo.accept("no-such-token", "hash").await.unwrap();
    assert!(result.is_none());
}
