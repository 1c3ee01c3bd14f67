//! Error types for the confidentiality codec.

use thiserror::Error;

/// Reason an envelope could not be opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecryptionFailure {
    /// The envelope is not valid standard base64.
    #[error("envelope is not valid base64")]
    Encoding,
    /// The decoded envelope is shorter than the nonce prefix.
    #[error("envelope is {actual} bytes, shorter than the {nonce_len}-byte nonce")]
    TooShort {
        /// Decoded envelope length.
        actual: usize,
        /// Required nonce length.
        nonce_len: usize,
    },
    /// The authentication tag did not verify (tampering or wrong key).
    #[error("authentication tag mismatch")]
    Authentication,
    /// The opened plaintext is not valid UTF-8.
    #[error("plaintext is not valid UTF-8")]
    Utf8,
}

/// Errors returned by confidentiality codecs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfidentialityError {
    /// The configured key is malformed or has the wrong length.
    #[error("invalid encryption key: {0}")]
    InvalidKey(String),
    /// Sealing the plaintext failed.
    #[error("encryption failed")]
    EncryptionFailed,
    /// Opening the envelope failed.
    #[error("decryption failed: {0}")]
    DecryptionFailed(#[from] DecryptionFailure),
}
