use pa_core::domain::{PhoneIdentifier, VerificationOutcome};
use pa_core::errors::ProviderError;
use pa_core::services::VerificationProvider;

use crate::verification::mock_provider::{MockVerificationProvider, CODE_LENGTH};

fn phone() -> PhoneIdentifier {
    PhoneIdentifier::parse("+15551234567").unwrap()
}

#[tokio::test]
async fn test_request_issues_six_digit_code() {
    let provider = MockVerificationProvider::new().quiet();

    provider.request_code(&phone()).await.unwrap();

    let code = provider.pending_code(&phone()).unwrap();
    assert_eq!(code.len(), CODE_LENGTH);
    assert!(code.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(provider.issued_count(), 1);
}

#[tokio::test]
async fn test_correct_code_is_approved_once() {
    let provider = MockVerificationProvider::new().quiet().with_fixed_code("123456");
    provider.request_code(&phone()).await.unwrap();

    let first = provider.check_code(&phone(), "123456").await.unwrap();
    let second = provider.check_code(&phone(), "123456").await.unwrap();

    assert_eq!(first, VerificationOutcome::Approved);
    assert_eq!(second, VerificationOutcome::Rejected);
    assert!(provider.pending_code(&phone()).is_none());
}

#[tokio::test]
async fn test_wrong_code_keeps_pending_code() {
    let provider = MockVerificationProvider::new().quiet().with_fixed_code("123456");
    provider.request_code(&phone()).await.unwrap();

    let outcome = provider.check_code(&phone(), "654321").await.unwrap();

    assert_eq!(outcome, VerificationOutcome::Rejected);
    assert_eq!(provider.pending_code(&phone()).as_deref(), Some("123456"));
    assert_eq!(
        provider.check_code(&phone(), "123456").await.unwrap(),
        VerificationOutcome::Approved
    );
}

#[tokio::test]
async fn test_check_without_request_is_rejected() {
    let provider = MockVerificationProvider::new().quiet();

    let outcome = provider.check_code(&phone(), "000000").await.unwrap();

    assert_eq!(outcome, VerificationOutcome::Rejected);
}

#[tokio::test]
async fn test_new_request_replaces_code() {
    let provider = MockVerificationProvider::new().quiet().with_fixed_code("111111");
    provider.request_code(&phone()).await.unwrap();

    let provider = provider.with_fixed_code("222222");
    provider.request_code(&phone()).await.unwrap();

    assert_eq!(
        provider.check_code(&phone(), "111111").await.unwrap(),
        VerificationOutcome::Rejected
    );
    assert_eq!(
        provider.check_code(&phone(), "222222").await.unwrap(),
        VerificationOutcome::Approved
    );
    assert_eq!(provider.issued_count(), 2);
}

#[tokio::test]
async fn test_codes_are_per_phone() {
    let provider = MockVerificationProvider::new().quiet().with_fixed_code("123456");
    let other = PhoneIdentifier::parse("+447911123456").unwrap();
    provider.request_code(&phone()).await.unwrap();

    let outcome = provider.check_code(&other, "123456").await.unwrap();

    assert_eq!(outcome, VerificationOutcome::Rejected);
}

#[tokio::test]
async fn test_simulated_failure() {
    let provider = MockVerificationProvider::failing();

    let requested = provider.request_code(&phone()).await;
    let checked = provider.check_code(&phone(), "123456").await;

    assert!(matches!(requested, Err(ProviderError::Transport(_))));
    assert!(matches!(checked, Err(ProviderError::Transport(_))));
    assert_eq!(provider.issued_count(), 0);
}
