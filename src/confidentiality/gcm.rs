//! AES-256-GCM implementation of [`SummaryCodec`].

use super::{ConfidentialityError, DecryptionFailure, Envelope, SummaryCodec};
use aes_gcm::Aes256Gcm;
use aes_gcm::aead::{Aead, AeadCore, KeyInit, Nonce, OsRng};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::fmt;

/// AES-256-GCM codec keyed from configuration.
///
/// Every call to [`SummaryCodec::encrypt`] draws a fresh 96-bit nonce from
/// the operating system RNG, so equal plaintexts never share an envelope.
#[derive(Clone)]
pub struct AesGcmCodec {
    cipher: Aes256Gcm,
}

impl AesGcmCodec {
    /// Required raw key length in bytes.
    pub const KEY_LEN: usize = 32;
    /// Nonce prefix length in bytes.
    pub const NONCE_LEN: usize = 12;

    /// Builds a codec from a standard-base64 encoded 32-byte key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfidentialityError::InvalidKey`] when the value is not
    /// base64 or does not decode to exactly [`Self::KEY_LEN`] bytes.
    pub fn from_base64_key(encoded: &str) -> Result<Self, ConfidentialityError> {
        let key = STANDARD
            .decode(encoded.trim())
            .map_err(|err| ConfidentialityError::InvalidKey(format!("not valid base64: {err}")))?;
        Self::from_key_bytes(&key)
    }

    /// Builds a codec from raw key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfidentialityError::InvalidKey`] when the key is not
    /// exactly [`Self::KEY_LEN`] bytes.
    pub fn from_key_bytes(key: &[u8]) -> Result<Self, ConfidentialityError> {
        if key.len() != Self::KEY_LEN {
            return Err(ConfidentialityError::InvalidKey(format!(
                "expected {} bytes, got {}",
                Self::KEY_LEN,
                key.len()
            )));
        }
        let cipher = Aes256Gcm::new_from_slice(key)
            .map_err(|err| ConfidentialityError::InvalidKey(err.to_string()))?;
        Ok(Self { cipher })
    }
}

impl fmt::Debug for AesGcmCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AesGcmCodec").finish_non_exhaustive()
    }
}

impl SummaryCodec for AesGcmCodec {
    fn encrypt(&self, plaintext: &str) -> Result<Envelope, ConfidentialityError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|_| ConfidentialityError::EncryptionFailed)?;

        let mut sealed = Vec::with_capacity(Self::NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(nonce.as_slice());
        sealed.extend_from_slice(&ciphertext);
        Ok(Envelope::from_stored(STANDARD.encode(sealed)))
    }

    fn decrypt(&self, envelope: &Envelope) -> Result<String, ConfidentialityError> {
        let data = STANDARD
            .decode(envelope.as_str())
            .map_err(|_| DecryptionFailure::Encoding)?;
        let (nonce, ciphertext) =
            data.split_at_checked(Self::NONCE_LEN)
                .ok_or(DecryptionFailure::TooShort {
                    actual: data.len(),
                    nonce_len: Self::NONCE_LEN,
                })?;

        let plaintext = self
            .cipher
            .decrypt(Nonce::<Aes256Gcm>::from_slice(nonce), ciphertext)
            .map_err(|_| DecryptionFailure::Authentication)?;
        Ok(String::from_utf8(plaintext).map_err(|_| DecryptionFailure::Utf8)?)
    }
}
