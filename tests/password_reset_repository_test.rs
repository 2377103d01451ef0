//! Database-backed password reset token tests
//!
//! Requires a live MySQL via `DATABASE_URL`; skips otherwise.

mod common;

use accounts_core::domain::StringUuid;
use accounts_core::repository::password_reset::PasswordResetRepositoryImpl;
use accounts_core::repository::PasswordResetRepository;
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_consumes_redeem_exactly_once() {
    let Some(pool) = common::try_test_pool().await else {
        return;
    };
    let repo = Arc::new(PasswordResetRepositoryImpl::new(pool));

    let user_id = StringUuid::new_v4();
    let token = uuid::Uuid::new_v4().simple().to_string();
    repo.create(user_id, &token).await.unwrap();

    let first = {
        let repo = repo.clone();
        let token = token.clone();
        tokio::spawn(async move { repo.consume(&token).await })
    };
    let second = {
        let repo = repo.clone();
        let token = token.clone();
        tokio::spawn(async move { repo.consume(&token).await })
    };

    let a = first.await.unwrap().expect("first consume errored");
    let b = second.await.unwrap().expect("second consume errored");

    let winners = [&a, &b].iter().filter(|r| r.is_some()).count();
    assert_eq!(winners, 1);
    assert_eq!(a.or(b).unwrap().user_id, user_id);
}

#[tokio::test]
async fn test_second_sequential_consume_returns_none() {
    let Some(pool) = common::try_test_pool().await else {
        return;
    };
    let repo = PasswordResetRepositoryImpl::new(pool);

    let token = uuid::Uuid::new_v4().simple().to_string();
    repo.create(StringUuid::new_v4(), &token).await.unwrap();

    assert!(repo.consume(&token).await.unwrap().is_some());
    assert!(repo.consume(&token).await.unwrap().is_none());
}
