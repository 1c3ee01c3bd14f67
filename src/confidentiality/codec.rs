//! Codec contract and the sealed envelope it produces.

use super::ConfidentialityError;
use std::fmt;

/// Opaque, base64-encoded `nonce‖ciphertext‖tag` as stored at rest.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Envelope(String);

impl Envelope {
    /// Wraps an envelope read back from storage.
    #[must_use]
    pub const fn from_stored(value: String) -> Self {
        Self(value)
    }

    /// Returns the encoded envelope.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the envelope, returning the encoded string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Envelope({} bytes)", self.0.len())
    }
}

/// Authenticated symmetric encryption of a single text field.
#[cfg_attr(test, mockall::automock)]
pub trait SummaryCodec: Send + Sync {
    /// Seals `plaintext` under a fresh nonce.
    ///
    /// # Errors
    ///
    /// Returns [`ConfidentialityError::EncryptionFailed`] when the primitive
    /// rejects the input.
    fn encrypt(&self, plaintext: &str) -> Result<Envelope, ConfidentialityError>;

    /// Opens an envelope produced by [`SummaryCodec::encrypt`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfidentialityError::DecryptionFailed`] when the envelope is
    /// malformed, truncated, tampered with, or sealed under another key.
    fn decrypt(&self, envelope: &Envelope) -> Result<String, ConfidentialityError>;
}
