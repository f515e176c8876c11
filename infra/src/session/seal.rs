//! Authenticated encryption of cookie payloads
//!
//! AES-256-GCM with a key derived as SHA-256 of the configured secret. The
//! sealed form is `base64url(nonce || ciphertext)` with a fresh 96-bit nonce
//! per seal.

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use sha2::{Digest, Sha256};

use crate::InfrastructureError;

const NONCE_LEN: usize = 12;

/// Seals and opens cookie values with one secret
#[derive(Clone)]
pub struct CookieSealer {
    cipher: Aes256Gcm,
}

impl CookieSealer {
    pub fn new(secret: &str) -> Self {
        let digest = Sha256::digest(secret.as_bytes());
        let key = Key::<Aes256Gcm>::from_slice(&digest);
        Self {
            cipher: Aes256Gcm::new(key),
        }
    }

    pub fn seal(&self, plaintext: &[u8]) -> Result<String, InfrastructureError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext)
            .map_err(|e| InfrastructureError::Crypto(format!("Failed to seal cookie: {}", e)))?;

        let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);
        Ok(URL_SAFE_NO_PAD.encode(sealed))
    }

    /// Decrypt a sealed value; any tampering or a foreign key fails
    pub fn open(&self, sealed: &str) -> Result<Vec<u8>, InfrastructureError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(sealed)
            .map_err(|e| InfrastructureError::Crypto(format!("Invalid cookie encoding: {}", e)))?;

        if bytes.len() <= NONCE_LEN {
            return Err(InfrastructureError::Crypto("Cookie too short".to_string()));
        }

        let (nonce, ciphertext) = bytes.split_at(NONCE_LEN);
        self.cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| InfrastructureError::Crypto("Cookie authentication failed".to_string()))
    }
}
