//! Unit tests for the pure decision logic

use serde_json::json;

use crate::domain::{FormData, PhoneIdentifier, Session, VerificationOutcome};
use crate::errors::{ProviderError, StrategyError};
use crate::services::phone::DefaultPhoneFormatter;
use crate::services::session::SessionKeys;
use crate::services::strategy::{
    decide, evaluate_check, Effect, StrategyConfig, TransitionInput, VerificationState,
};

use super::mocks::TestUser;

fn config() -> StrategyConfig {
    StrategyConfig::new("/account")
}

fn run(
    state: VerificationState<TestUser>,
    phone: Option<&str>,
    code: Option<&str>,
    config: &StrategyConfig,
) -> Result<Effect<TestUser>, StrategyError> {
    let input = TransitionInput { phone, code };
    decide(state, &input, &DefaultPhoneFormatter::default(), config)
}

#[test]
fn test_state_from_empty_session() {
    let state = VerificationState::<TestUser>::from_session(&Session::new(), &SessionKeys::default()).unwrap();
    assert_eq!(state, VerificationState::NoPendingVerification);
}

#[test]
fn test_state_awaiting_code_does_not_consume_flash() {
    let keys = SessionKeys::default();
    let mut session = Session::new();
    session.flash(&keys.pending_phone, "+15551234567").unwrap();

    let state = VerificationState::<TestUser>::from_session(&session, &keys).unwrap();
    assert_eq!(
        state,
        VerificationState::AwaitingCode { pending_phone: "+15551234567".to_string() }
    );
    assert!(session.has(&keys.pending_phone));
}

#[test]
fn test_state_authenticated_wins_over_pending() {
    let keys = SessionKeys::default();
    let mut session = Session::new();
    session.set(&keys.principal, &json!({ "id": 7, "phone": "+15551234567" })).unwrap();
    session.flash(&keys.pending_phone, "+15551234567").unwrap();

    let state = VerificationState::<TestUser>::from_session(&session, &keys).unwrap();
    assert_eq!(state.name(), "authenticated");
}

#[test]
fn test_corrupt_principal_is_an_error() {
    let keys = SessionKeys::default();
    let mut session = Session::new();
    session.set(&keys.principal, "not a user").unwrap();
    assert!(VerificationState::<TestUser>::from_session(&session, &keys).is_err());
}

#[test]
fn test_authenticated_returns_principal_even_without_redirect() {
    let user = TestUser { id: 7, phone: "+15551234567".into() };
    let effect = run(
        VerificationState::Authenticated { principal: user.clone() },
        None,
        None,
        &StrategyConfig::default(),
    )
    .unwrap();
    assert!(matches!(effect, Effect::ReturnPrincipal(p) if p == user));
}

#[test]
fn test_missing_success_redirect_checked_first() {
    let result = run(
        VerificationState::NoPendingVerification,
        None,
        None,
        &StrategyConfig::default(),
    );
    assert!(matches!(result, Err(StrategyError::MissingSuccessRedirect)));
}

#[test]
fn test_missing_phone_fails_even_with_code() {
    let effect = run(VerificationState::NoPendingVerification, None, Some("123456"), &config()).unwrap();
    assert!(matches!(effect, Effect::Fail(StrategyError::MissingPhoneNumber)));

    let pending = VerificationState::AwaitingCode { pending_phone: "+15551234567".into() };
    let effect = run(pending, None, Some("123456"), &config()).unwrap();
    assert!(matches!(effect, Effect::Fail(StrategyError::MissingPhoneNumber)));
}

#[test]
fn test_invalid_phone_fails() {
    let effect = run(VerificationState::NoPendingVerification, Some("12"), None, &config()).unwrap();
    assert!(matches!(effect, Effect::Fail(StrategyError::InvalidPhoneNumber { .. })));
}

#[test]
fn test_phone_only_requests_code() {
    let effect = run(VerificationState::NoPendingVerification, Some("555-123-4567"), None, &config()).unwrap();
    match effect {
        Effect::RequestCode { phone } => assert_eq!(phone.as_str(), "+15551234567"),
        other => panic!("Expected RequestCode, got {:?}", other),
    }
}

#[test]
fn test_phone_and_code_checks_code() {
    let pending = VerificationState::AwaitingCode { pending_phone: "+15551234567".into() };
    let effect = run(pending, Some("555-123-4567"), Some("123456"), &config()).unwrap();
    match effect {
        Effect::CheckCode { phone, code } => {
            assert_eq!(phone.as_str(), "+15551234567");
            assert_eq!(code, "123456");
        }
        other => panic!("Expected CheckCode, got {:?}", other),
    }
}

#[test]
fn test_input_from_form_ignores_blank_code() {
    let form = FormData::new().with("phone", "555-123-4567").with("code", "");
    let input = TransitionInput::from_form(&form);
    assert_eq!(input.phone, Some("555-123-4567"));
    assert_eq!(input.code, None);
}

#[test]
fn test_evaluate_check_variants() {
    assert!(evaluate_check(Ok(VerificationOutcome::Approved)).is_ok());
    assert!(matches!(
        evaluate_check(Ok(VerificationOutcome::Rejected)),
        Err(StrategyError::InvalidCode)
    ));
    assert!(matches!(
        evaluate_check(Ok(VerificationOutcome::ProviderError { message: "max attempts".into() })),
        Err(StrategyError::ProviderRejected { message }) if message == "max attempts"
    ));
    assert!(matches!(
        evaluate_check(Err(ProviderError::Transport("timeout".into()))),
        Err(StrategyError::DeliveryFailed { .. })
    ));
}

#[test]
fn test_formatted_phone_matches_canonical_identifier() {
    let first = run(VerificationState::NoPendingVerification, Some("(555) 123-4567"), None, &config()).unwrap();
    let expected = PhoneIdentifier::parse("+15551234567").unwrap();
    assert!(matches!(first, Effect::RequestCode { phone } if phone == expected));
}
