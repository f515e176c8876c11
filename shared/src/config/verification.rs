//! Verification provider configuration

use serde::{Deserialize, Serialize};
use std::env;

/// Channel the provider uses to deliver the code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerifyChannel {
    Sms,
    Call,
    Email,
    Whatsapp,
}

impl VerifyChannel {
    /// Wire value expected by the provider
    pub fn as_str(&self) -> &'static str {
        match self {
            VerifyChannel::Sms => "sms",
            VerifyChannel::Call => "call",
            VerifyChannel::Email => "email",
            VerifyChannel::Whatsapp => "whatsapp",
        }
    }
}

impl Default for VerifyChannel {
    fn default() -> Self {
        VerifyChannel::Sms
    }
}

impl std::str::FromStr for VerifyChannel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sms" => Ok(VerifyChannel::Sms),
            "call" | "voice" => Ok(VerifyChannel::Call),
            "email" => Ok(VerifyChannel::Email),
            "whatsapp" => Ok(VerifyChannel::Whatsapp),
            _ => Err(format!("Invalid verification channel: {}", s)),
        }
    }
}

/// Verification provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Provider name ("twilio", "mock")
    pub provider: String,

    /// Twilio Account SID
    #[serde(default)]
    pub account_sid: String,

    /// Twilio Auth Token
    #[serde(skip_serializing, default)]
    pub auth_token: String,

    /// Twilio Verify service SID
    #[serde(default)]
    pub service_sid: String,

    /// Delivery channel
    #[serde(default)]
    pub channel: VerifyChannel,

    /// API base URL, overridable for testing
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout for provider requests in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            provider: String::from("mock"),
            account_sid: String::new(),
            auth_token: String::new(),
            service_sid: String::new(),
            channel: VerifyChannel::default(),
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            provider: env::var("VERIFY_PROVIDER").unwrap_or(defaults.provider),
            account_sid: env::var("TWILIO_ACCOUNT_SID").unwrap_or_default(),
            auth_token: env::var("TWILIO_AUTH_TOKEN").unwrap_or_default(),
            service_sid: env::var("TWILIO_VERIFY_SERVICE_SID").unwrap_or_default(),
            channel: env::var("TWILIO_VERIFY_CHANNEL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.channel),
            base_url: env::var("TWILIO_VERIFY_BASE_URL").unwrap_or(defaults.base_url),
            request_timeout_secs: env::var("TWILIO_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
        }
    }

    /// Whether the development provider is selected
    pub fn is_mock(&self) -> bool {
        self.provider.eq_ignore_ascii_case("mock")
    }
}

fn default_base_url() -> String {
    String::from("https://verify.twilio.com")
}

fn default_request_timeout_secs() -> u64 {
    30
}
