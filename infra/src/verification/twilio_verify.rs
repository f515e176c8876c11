//! Twilio Verify provider
//!
//! Talks to the Verify v2 API: `POST /v2/Services/{sid}/Verifications` starts a
//! verification and `POST /v2/Services/{sid}/VerificationCheck` checks a code.
//! Each call is made exactly once, without retry.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use pa_core::domain::{PhoneIdentifier, VerificationOutcome};
use pa_core::errors::ProviderError;
use pa_core::services::VerificationProvider;
use pa_shared::{VerificationConfig, VerifyChannel};

use crate::InfrastructureError;

/// Credentials and endpoint of a Twilio Verify service
#[derive(Debug, Clone)]
pub struct TwilioVerifyConfig {
    pub account_sid: String,
    pub auth_token: String,
    /// Verify service SID (`VA...`)
    pub service_sid: String,
    pub channel: VerifyChannel,
    /// Overridable for tests
    pub base_url: String,
    pub request_timeout_secs: u64,
}

impl TwilioVerifyConfig {
    /// Take the Twilio fields from the shared verification config
    pub fn from_verification_config(config: &VerificationConfig) -> Result<Self, InfrastructureError> {
        let required = [
            ("TWILIO_ACCOUNT_SID", &config.account_sid),
            ("TWILIO_AUTH_TOKEN", &config.auth_token),
            ("TWILIO_VERIFY_SERVICE_SID", &config.service_sid),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(InfrastructureError::Config(format!("{} not set", name)));
            }
        }

        Ok(Self {
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            service_sid: config.service_sid.clone(),
            channel: config.channel,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            request_timeout_secs: config.request_timeout_secs,
        })
    }

    /// Load from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::from_verification_config(&VerificationConfig::from_env())
    }

    fn verifications_url(&self) -> String {
        format!("{}/v2/Services/{}/Verifications", self.base_url, self.service_sid)
    }

    fn check_url(&self) -> String {
        format!("{}/v2/Services/{}/VerificationCheck", self.base_url, self.service_sid)
    }
}

/// Verification resource returned by both endpoints
#[derive(Debug, Deserialize)]
struct VerificationResource {
    #[serde(default)]
    sid: Option<String>,
    status: String,
}

/// Error body returned by the Twilio REST API
#[derive(Debug, Deserialize)]
struct TwilioErrorBody {
    #[serde(default)]
    code: Option<u32>,
    message: String,
}

/// Twilio Verify backed [`VerificationProvider`]
pub struct TwilioVerifyProvider {
    client: Client,
    config: TwilioVerifyConfig,
}

impl TwilioVerifyProvider {
    pub fn new(config: TwilioVerifyConfig) -> Result<Self, InfrastructureError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            provider = "twilio",
            channel = config.channel.as_str(),
            "Twilio Verify provider initialized"
        );

        Ok(Self { client, config })
    }

    async fn post_form(&self, url: String, form: &[(&str, &str)]) -> Result<Response, ProviderError> {
        self.client
            .post(url)
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(form)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "twilio", error = %e, "Twilio Verify request failed");
                ProviderError::Transport(e.to_string())
            })
    }

    /// Message from a Twilio error response, falling back to the status text
    async fn error_message(response: Response) -> String {
        let status = response.status();
        match response.json::<TwilioErrorBody>().await {
            Ok(body) => match body.code {
                Some(code) => format!("{} (code {})", body.message, code),
                None => body.message,
            },
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unexpected response")
                .to_string(),
        }
    }

    async fn parse_resource(response: Response) -> Result<VerificationResource, ProviderError> {
        response
            .json::<VerificationResource>()
            .await
            .map_err(|e| ProviderError::Transport(format!("invalid Twilio response: {}", e)))
    }
}

#[async_trait]
impl VerificationProvider for TwilioVerifyProvider {
    async fn request_code(&self, phone: &PhoneIdentifier) -> Result<(), ProviderError> {
        let form = [("To", phone.as_str()), ("Channel", self.config.channel.as_str())];
        let response = self.post_form(self.config.verifications_url(), &form).await?;
        let status = response.status();

        if status.is_success() {
            let resource = Self::parse_resource(response).await?;
            info!(
                provider = "twilio",
                phone = %phone.masked(),
                verification_sid = resource.sid.as_deref().unwrap_or(""),
                status = %resource.status,
                "Verification started"
            );
            return Ok(());
        }

        let message = Self::error_message(response).await;
        if status.is_server_error() {
            error!(provider = "twilio", status = status.as_u16(), reason = %message, "Twilio Verify unavailable");
            return Err(ProviderError::Transport(format!("{}: {}", status, message)));
        }

        warn!(
            provider = "twilio",
            phone = %phone.masked(),
            status = status.as_u16(),
            reason = %message,
            "Twilio Verify refused to start verification"
        );
        Err(ProviderError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    async fn check_code(
        &self,
        phone: &PhoneIdentifier,
        code: &str,
    ) -> Result<VerificationOutcome, ProviderError> {
        let form = [("To", phone.as_str()), ("Code", code)];
        let response = self.post_form(self.config.check_url(), &form).await?;
        let status = response.status();

        if status.is_success() {
            let resource = Self::parse_resource(response).await?;
            debug!(
                provider = "twilio",
                phone = %phone.masked(),
                status = %resource.status,
                "Verification checked"
            );
            return Ok(if resource.status == "approved" {
                VerificationOutcome::Approved
            } else {
                VerificationOutcome::Rejected
            });
        }

        // Expired, already approved, or too many attempts
        if status == StatusCode::NOT_FOUND {
            debug!(provider = "twilio", phone = %phone.masked(), "No pending verification");
            return Ok(VerificationOutcome::Rejected);
        }

        let message = Self::error_message(response).await;
        if status.is_server_error() {
            error!(provider = "twilio", status = status.as_u16(), reason = %message, "Twilio Verify unavailable");
            return Err(ProviderError::Transport(format!("{}: {}", status, message)));
        }

        warn!(
            provider = "twilio",
            phone = %phone.masked(),
            status = status.as_u16(),
            reason = %message,
            "Twilio Verify returned an error for the check"
        );
        Ok(VerificationOutcome::ProviderError { message })
    }
}
