//! Pure state derivation and decision logic
//!
//! Nothing here touches the network or cookies; the driver in `service.rs`
//! runs the returned [`Effect`].

use serde::de::DeserializeOwned;

use crate::domain::{FormData, PhoneIdentifier, Session, VerificationOutcome, CODE_FIELD, PHONE_FIELD};
use crate::errors::{ProviderError, SessionError, StrategyError};
use crate::services::phone::PhoneFormatter;
use crate::services::session::SessionKeys;

use super::config::StrategyConfig;

/// Where a visitor is in the flow, derived once per transition
#[derive(Debug, Clone, PartialEq)]
pub enum VerificationState<U> {
    NoPendingVerification,
    /// A code was sent and the phone flashed
    AwaitingCode { pending_phone: String },
    /// The session holds a principal
    Authenticated { principal: U },
}

impl<U: DeserializeOwned> VerificationState<U> {
    /// Derive the state without consuming any flash
    pub fn from_session(session: &Session, keys: &SessionKeys) -> Result<Self, SessionError> {
        if let Some(principal) = session.peek_as::<U>(&keys.principal)? {
            return Ok(VerificationState::Authenticated { principal });
        }

        let pending = session
            .peek(&keys.pending_phone)
            .and_then(|value| value.as_str())
            .map(str::to_string);

        Ok(match pending {
            Some(pending_phone) => VerificationState::AwaitingCode { pending_phone },
            None => VerificationState::NoPendingVerification,
        })
    }
}

impl<U> VerificationState<U> {
    pub fn name(&self) -> &'static str {
        match self {
            VerificationState::NoPendingVerification => "no_pending_verification",
            VerificationState::AwaitingCode { .. } => "awaiting_code",
            VerificationState::Authenticated { .. } => "authenticated",
        }
    }
}

/// Form fields relevant to the transition, blank values treated as absent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransitionInput<'a> {
    pub phone: Option<&'a str>,
    pub code: Option<&'a str>,
}

impl<'a> TransitionInput<'a> {
    pub fn from_form(form: &'a FormData) -> Self {
        Self {
            phone: form.get_trimmed(PHONE_FIELD),
            code: form.get_trimmed(CODE_FIELD),
        }
    }
}

/// Side effect selected for a transition
#[derive(Debug)]
pub enum Effect<U> {
    ReturnPrincipal(U),
    RequestCode { phone: PhoneIdentifier },
    CheckCode { phone: PhoneIdentifier, code: String },
    /// Go straight to the failure transition
    Fail(StrategyError),
}

/// Map the current state and input to the effect to run
///
/// `Err` is only returned for misconfiguration; input problems become
/// [`Effect::Fail`].
pub fn decide<U, F>(
    state: VerificationState<U>,
    input: &TransitionInput<'_>,
    formatter: &F,
    config: &StrategyConfig,
) -> Result<Effect<U>, StrategyError>
where
    F: PhoneFormatter + ?Sized,
{
    if let VerificationState::Authenticated { principal } = state {
        return Ok(Effect::ReturnPrincipal(principal));
    }

    if config.success_redirect.is_none() {
        return Err(StrategyError::MissingSuccessRedirect);
    }

    let Some(raw_phone) = input.phone else {
        return Ok(Effect::Fail(StrategyError::MissingPhoneNumber));
    };

    let phone = match formatter.format(raw_phone) {
        Ok(phone) => phone,
        Err(error) => return Ok(Effect::Fail(error.into())),
    };

    Ok(match input.code {
        Some(code) => Effect::CheckCode {
            phone,
            code: code.to_string(),
        },
        None => Effect::RequestCode { phone },
    })
}

/// Fold a provider check result into success or the failure to report
pub fn evaluate_check(
    result: Result<VerificationOutcome, ProviderError>,
) -> Result<(), StrategyError> {
    match result {
        Ok(VerificationOutcome::Approved) => Ok(()),
        Ok(VerificationOutcome::Rejected) => Err(StrategyError::InvalidCode),
        Ok(VerificationOutcome::ProviderError { message }) => {
            Err(StrategyError::ProviderRejected { message })
        }
        Err(error) => Err(error.into()),
    }
}
