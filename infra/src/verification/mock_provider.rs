//! Mock Verification Provider
//!
//! Generates codes locally for development and tests. Codes are printed to the
//! console and logged instead of being delivered.

use async_trait::async_trait;
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

use pa_core::domain::{PhoneIdentifier, VerificationOutcome};
use pa_core::errors::ProviderError;
use pa_core::services::VerificationProvider;

/// Number of digits in a generated code
pub const CODE_LENGTH: usize = 6;

/// In-process verification provider
///
/// One pending code per phone. A new request replaces the previous code, a
/// correct check consumes it, and a wrong guess leaves it in place.
#[derive(Clone)]
pub struct MockVerificationProvider {
    pending: Arc<Mutex<HashMap<String, String>>>,
    /// Total codes issued
    issued: Arc<AtomicU64>,
    /// Code handed out instead of a random one
    fixed_code: Option<String>,
    simulate_failure: bool,
    console_output: bool,
}

impl MockVerificationProvider {
    pub fn new() -> Self {
        Self {
            pending: Arc::new(Mutex::new(HashMap::new())),
            issued: Arc::new(AtomicU64::new(0)),
            fixed_code: None,
            simulate_failure: false,
            console_output: true,
        }
    }

    /// Always issue `code`
    pub fn with_fixed_code(mut self, code: impl Into<String>) -> Self {
        self.fixed_code = Some(code.into());
        self
    }

    /// Disable the console banner
    pub fn quiet(mut self) -> Self {
        self.console_output = false;
        self
    }

    /// Fail every call with a transport error
    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
            ..Self::new().quiet()
        }
    }

    pub fn issued_count(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }

    /// Code currently pending for `phone`
    pub fn pending_code(&self, phone: &PhoneIdentifier) -> Option<String> {
        self.pending
            .lock()
            .ok()
            .and_then(|pending| pending.get(phone.as_str()).cloned())
    }

    fn generate_code(&self) -> String {
        match &self.fixed_code {
            Some(code) => code.clone(),
            None => format!("{:0width$}", OsRng.gen_range(0..1_000_000u32), width = CODE_LENGTH),
        }
    }

    fn simulated_failure(&self, phone: &PhoneIdentifier) -> Result<(), ProviderError> {
        if self.simulate_failure {
            warn!(
                provider = "mock",
                phone = %phone.masked(),
                "Mock verification provider simulating failure"
            );
            return Err(ProviderError::Transport(
                "Simulated verification failure".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for MockVerificationProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VerificationProvider for MockVerificationProvider {
    async fn request_code(&self, phone: &PhoneIdentifier) -> Result<(), ProviderError> {
        self.simulated_failure(phone)?;

        let code = self.generate_code();
        self.pending
            .lock()
            .map_err(|_| ProviderError::Transport("mock code store poisoned".to_string()))?
            .insert(phone.as_str().to_string(), code.clone());
        let count = self.issued.fetch_add(1, Ordering::SeqCst) + 1;

        if self.console_output {
            println!("\n{}", "=".repeat(60));
            println!("MOCK VERIFICATION - CODE #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {}", phone);
            println!("Code: {}", code);
            println!("{}\n", "=".repeat(60));
        }

        info!(
            target: "verification",
            provider = "mock",
            phone = %phone.masked(),
            "Verification code issued (mock)"
        );

        Ok(())
    }

    async fn check_code(
        &self,
        phone: &PhoneIdentifier,
        code: &str,
    ) -> Result<VerificationOutcome, ProviderError> {
        self.simulated_failure(phone)?;

        let mut pending = self
            .pending
            .lock()
            .map_err(|_| ProviderError::Transport("mock code store poisoned".to_string()))?;

        let approved = pending
            .get(phone.as_str())
            .map(|expected| constant_time_eq(expected.as_bytes(), code.as_bytes()))
            .unwrap_or(false);

        if approved {
            pending.remove(phone.as_str());
            info!(provider = "mock", phone = %phone.masked(), "Verification code approved (mock)");
            Ok(VerificationOutcome::Approved)
        } else {
            info!(provider = "mock", phone = %phone.masked(), "Verification code rejected (mock)");
            Ok(VerificationOutcome::Rejected)
        }
    }
}
