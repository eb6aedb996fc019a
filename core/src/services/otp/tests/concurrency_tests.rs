//! Concurrency tests: same-phone requests must serialise

use std::time::Duration;

use crate::errors::{DomainError, OtpError};
use crate::repositories::OtpStore;
use crate::services::otp::OtpServiceConfig;

use super::mocks::{harness, harness_with, issue, wrong_code, MockSmsSender, PHONE};

const PARALLEL: usize = 12;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_issuance_sends_exactly_one_sms() {
    // Slow delivery widens the window between cooldown check and write
    let sms = MockSmsSender::new(false).with_delay(Duration::from_millis(20));
    let h = harness_with(sms, OtpServiceConfig::default()).await;

    let mut handles = Vec::new();
    for _ in 0..PARALLEL {
        let service = h.service.clone();
        handles.push(tokio::spawn(async move { service.request_otp(PHONE).await }));
    }

    let mut successes = 0;
    let mut cooldowns = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(DomainError::Otp(OtpError::CooldownActive { .. })) => cooldowns += 1,
            Err(other) => panic!("Unexpected error: {:?}", other),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(cooldowns, PARALLEL - 1);
    assert_eq!(h.sms.sent_count(), 1);
    assert_eq!(h.store.len().await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_wrong_codes_count_exactly_max_attempts() {
    let h = harness().await;
    let code = issue(&h).await;
    let wrong = wrong_code(&code);

    let mut handles = Vec::new();
    for _ in 0..PARALLEL {
        let service = h.service.clone();
        let wrong = wrong.clone();
        handles.push(tokio::spawn(async move { service.verify_otp(PHONE, &wrong).await }));
    }

    let mut remaining_seen = Vec::new();
    let mut exceeded = 0;
    let mut not_found = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Err(DomainError::Otp(OtpError::InvalidCode { remaining })) => remaining_seen.push(remaining),
            Err(DomainError::Otp(OtpError::AttemptsExceeded)) => exceeded += 1,
            Err(DomainError::Otp(OtpError::NotFound)) => not_found += 1,
            other => panic!("Unexpected outcome: {:?}", other),
        }
    }

    remaining_seen.sort_unstable();
    assert_eq!(remaining_seen, vec![0, 1, 2]);
    assert_eq!(exceeded, 1);
    assert_eq!(not_found, PARALLEL - 4);
    assert!(h.store.get(PHONE).await.unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_resets_succeed_once() {
    let h = harness().await;
    let code = issue(&h).await;
    h.service.verify_otp(PHONE, &code).await.unwrap();

    let mut handles = Vec::new();
    for i in 0..PARALLEL {
        let service = h.service.clone();
        handles.push(tokio::spawn(async move {
            service.reset_password(PHONE, &format!("new-password-{}", i)).await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => successes += 1,
            Err(DomainError::Otp(OtpError::NotVerified)) => {}
            Err(other) => panic!("Unexpected error: {:?}", other),
        }
    }

    assert_eq!(successes, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_different_phones_do_not_interfere() {
    use crate::domain::entities::user::NewUser;
    use crate::repositories::UserRepository;

    let sms = MockSmsSender::new(false).with_delay(Duration::from_millis(10));
    let h = harness_with(sms, OtpServiceConfig::default()).await;

    let phones: Vec<String> = (0..PARALLEL).map(|i| format!("90000000{:02}", i)).collect();
    for (i, phone) in phones.iter().enumerate() {
        h.users
            .insert_user(NewUser {
                email: format!("user{}@spendly.in", i),
                name: String::new(),
                phone: phone.clone(),
                password_hash: "hashed:x".to_string(),
            })
            .await
            .unwrap();
    }

    let mut handles = Vec::new();
    for phone in phones.clone() {
        let service = h.service.clone();
        handles.push(tokio::spawn(async move { service.request_otp(&phone).await }));
    }
    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }

    assert_eq!(h.sms.sent_count(), PARALLEL);
    assert_eq!(h.store.len().await, PARALLEL);
}
