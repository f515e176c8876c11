use pa_shared::VerificationConfig;

use crate::verification::create_verification_provider;
use crate::InfrastructureError;

#[test]
fn test_mock_provider_by_default() {
    let provider = create_verification_provider(&VerificationConfig::default());
    assert!(provider.is_ok());
}

#[test]
fn test_unknown_provider_is_rejected() {
    let config = VerificationConfig {
        provider: "carrier-pigeon".to_string(),
        ..Default::default()
    };

    let result = create_verification_provider(&config);

    assert!(matches!(result, Err(InfrastructureError::Config(_))));
}

#[cfg(feature = "twilio-verify")]
#[test]
fn test_twilio_requires_credentials() {
    let config = VerificationConfig {
        provider: "twilio".to_string(),
        account_sid: "AC123".to_string(),
        ..Default::default()
    };

    let error = create_verification_provider(&config).err().unwrap();

    assert!(error.to_string().contains("TWILIO_AUTH_TOKEN"));
}

#[cfg(feature = "twilio-verify")]
#[test]
fn test_twilio_provider_from_complete_config() {
    let config = VerificationConfig {
        provider: "Twilio".to_string(),
        account_sid: "AC123".to_string(),
        auth_token: "secret".to_string(),
        service_sid: "VA123".to_string(),
        ..Default::default()
    };

    assert!(create_verification_provider(&config).is_ok());
}
