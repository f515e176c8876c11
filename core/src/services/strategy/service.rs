//! Strategy driver running one transition per request

use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::{AuthRequest, PhoneIdentifier, Session};
use crate::errors::{StrategyError, StrategyResult};
use crate::services::phone::{DefaultPhoneFormatter, PhoneFormatter};
use crate::services::session::SessionStore;
use crate::services::verification::VerificationProvider;

use super::config::StrategyConfig;
use super::machine::{decide, evaluate_check, Effect, TransitionInput, VerificationState};
use super::resolver::UserResolver;
use super::types::{AuthOutcome, LoginState};

/// Two-step phone authentication strategy
///
/// Holds no per-request state; a single instance can serve concurrent
/// requests. Concurrent requests for the same session are not coordinated
/// and the last cookie written wins.
pub struct PhoneStrategy<P, S, F = DefaultPhoneFormatter>
where
    P: VerificationProvider + ?Sized,
    S: SessionStore + ?Sized,
    F: PhoneFormatter + ?Sized,
{
    /// Issues and checks codes
    provider: Arc<P>,
    /// Loads and persists the session cookie
    sessions: Arc<S>,
    /// Normalizes submitted phone numbers
    formatter: Arc<F>,
    config: StrategyConfig,
}

impl<P, S> PhoneStrategy<P, S, DefaultPhoneFormatter>
where
    P: VerificationProvider + ?Sized,
    S: SessionStore + ?Sized,
{
    /// Create a strategy using the default NANP formatter
    pub fn new(provider: Arc<P>, sessions: Arc<S>, config: StrategyConfig) -> Self {
        Self::with_formatter(
            provider,
            sessions,
            Arc::new(DefaultPhoneFormatter::default()),
            config,
        )
    }
}

impl<P, S, F> PhoneStrategy<P, S, F>
where
    P: VerificationProvider + ?Sized,
    S: SessionStore + ?Sized,
    F: PhoneFormatter + ?Sized,
{
    /// Create a strategy with a caller-supplied formatter
    pub fn with_formatter(
        provider: Arc<P>,
        sessions: Arc<S>,
        formatter: Arc<F>,
        config: StrategyConfig,
    ) -> Self {
        Self {
            provider,
            sessions,
            formatter,
            config,
        }
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    /// Run one transition for the request
    ///
    /// # Returns
    ///
    /// * `Ok(AuthOutcome::Authenticated)` - The session already holds a principal
    /// * `Ok(AuthOutcome::Redirect)` - Code sent, code accepted, or a failure with a failure redirect
    /// * `Ok(AuthOutcome::Failed)` - A recoverable failure without a failure redirect
    /// * `Err(StrategyError)` - Missing success redirect or a session store failure
    pub async fn authenticate<U, R>(
        &self,
        request: &AuthRequest,
        resolver: &R,
    ) -> StrategyResult<AuthOutcome<U>>
    where
        U: Serialize + DeserializeOwned + Send + Sync,
        R: UserResolver<U> + ?Sized,
    {
        let session = self.sessions.get(request).await?;
        let state = VerificationState::<U>::from_session(&session, &self.config.session_keys)?;
        let input = TransitionInput::from_form(request.form());

        debug!(
            state = state.name(),
            has_phone = input.phone.is_some(),
            has_code = input.code.is_some(),
            event = "transition_started",
            "Starting phone verification transition"
        );

        match decide(state, &input, &*self.formatter, &self.config)? {
            Effect::ReturnPrincipal(principal) => {
                debug!(event = "already_authenticated", "Session already holds a principal");
                Ok(AuthOutcome::Authenticated { principal })
            }
            Effect::Fail(error) => self.fail(session, None, error).await,
            Effect::RequestCode { phone } => self.send_code(session, phone).await,
            Effect::CheckCode { phone, code } => {
                self.verify_code(session, phone, &code, request, resolver).await
            }
        }
    }

    /// Run the failure transition for input rejected before the strategy saw it
    ///
    /// An authenticated session still short-circuits and a missing success
    /// redirect still propagates, in the same order as [`Self::authenticate`].
    /// Any pending phone stays in the session.
    pub async fn reject<U>(
        &self,
        request: &AuthRequest,
        error: StrategyError,
    ) -> StrategyResult<AuthOutcome<U>>
    where
        U: Serialize + DeserializeOwned + Send + Sync,
    {
        let session = self.sessions.get(request).await?;
        let state = VerificationState::<U>::from_session(&session, &self.config.session_keys)?;
        if let VerificationState::Authenticated { principal } = state {
            return Ok(AuthOutcome::Authenticated { principal });
        }
        self.success_target()?;

        self.fail(session, None, error).await
    }

    /// Principal stored in the request's session, if any
    pub async fn current_principal<U: DeserializeOwned>(
        &self,
        request: &AuthRequest,
    ) -> StrategyResult<Option<U>> {
        let session = self.sessions.get(request).await?;
        Ok(session.peek_as::<U>(&self.config.session_keys.principal)?)
    }

    /// Read the flashed pending phone and error for rendering a login page
    ///
    /// Both flashes are consumed; the returned cookie must be sent back.
    pub async fn login_state(&self, request: &AuthRequest) -> StrategyResult<LoginState> {
        let keys = &self.config.session_keys;
        let mut session = self.sessions.get(request).await?;

        let pending_phone = session
            .get(&keys.pending_phone)
            .and_then(|value| value.as_str().map(str::to_string));
        let error = session
            .get(&keys.error)
            .and_then(|value| value.as_str().map(str::to_string));
        let cookie = self.sessions.persist(&session).await?;

        Ok(LoginState {
            pending_phone,
            error,
            cookie,
        })
    }

    /// End the request's session and return the clearing cookie
    pub async fn logout(&self, request: &AuthRequest) -> StrategyResult<String> {
        let session = self.sessions.get(request).await?;
        let cookie = self.sessions.destroy(&session).await?;
        info!(event = "logged_out", "Session destroyed");
        Ok(cookie)
    }

    async fn send_code<U>(
        &self,
        mut session: Session,
        phone: PhoneIdentifier,
    ) -> StrategyResult<AuthOutcome<U>> {
        if let Err(error) = self.provider.request_code(&phone).await {
            warn!(
                phone = %phone.masked(),
                error = %error,
                event = "code_request_failed",
                "Verification provider failed to send code"
            );
            return self.fail(session, None, error.into()).await;
        }

        info!(
            phone = %phone.masked(),
            event = "code_requested",
            "Verification code requested"
        );

        let keys = &self.config.session_keys;
        session.flash(&keys.pending_phone, phone.as_str())?;
        session.unset(&keys.error);
        let cookie = self.sessions.persist(&session).await?;

        Ok(AuthOutcome::Redirect {
            target: self.success_target()?.to_string(),
            cookie,
        })
    }

    async fn verify_code<U, R>(
        &self,
        mut session: Session,
        phone: PhoneIdentifier,
        code: &str,
        request: &AuthRequest,
        resolver: &R,
    ) -> StrategyResult<AuthOutcome<U>>
    where
        U: Serialize + Send + Sync,
        R: UserResolver<U> + ?Sized,
    {
        let checked = self.provider.check_code(&phone, code).await;
        if let Err(error) = evaluate_check(checked) {
            return self.fail(session, Some(&phone), error).await;
        }

        info!(
            phone = %phone.masked(),
            outcome = "approved",
            event = "code_checked",
            "Verification code approved"
        );

        let keys = &self.config.session_keys;
        let principal = match resolver.resolve(&phone, request.form(), request).await {
            Ok(principal) => principal,
            Err(error) => {
                // The code is spent once approved
                session.unset(&keys.pending_phone);
                return self
                    .fail(session, None, StrategyError::UserResolution(error))
                    .await;
            }
        };

        session.set(&keys.principal, &principal)?;
        session.unset(&keys.pending_phone);
        session.unset(&keys.error);
        let cookie = self.sessions.persist(&session).await?;

        info!(
            phone = %phone.masked(),
            event = "authenticated",
            "Phone verification completed"
        );

        Ok(AuthOutcome::Redirect {
            target: self.success_target()?.to_string(),
            cookie,
        })
    }

    /// Flash the failure, persist, then redirect or hand the failure back
    async fn fail<U>(
        &self,
        mut session: Session,
        pending_phone: Option<&PhoneIdentifier>,
        error: StrategyError,
    ) -> StrategyResult<AuthOutcome<U>> {
        let Some(kind) = error.kind() else {
            return Err(error);
        };

        warn!(
            kind = %kind,
            error = %error,
            event = "transition_failed",
            "Phone verification transition failed"
        );

        let keys = &self.config.session_keys;
        session.flash(&keys.error, error.to_string().as_str())?;
        if let Some(phone) = pending_phone {
            session.flash(&keys.pending_phone, phone.as_str())?;
        }
        let cookie = self.sessions.persist(&session).await?;

        match &self.config.failure_redirect {
            Some(target) => Ok(AuthOutcome::Redirect {
                target: target.clone(),
                cookie,
            }),
            None => Ok(AuthOutcome::Failed { error, cookie }),
        }
    }

    fn success_target(&self) -> StrategyResult<&str> {
        self.config
            .success_redirect
            .as_deref()
            .ok_or(StrategyError::MissingSuccessRedirect)
    }
}
