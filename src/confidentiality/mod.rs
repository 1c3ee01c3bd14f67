//! At-rest encryption for sensitive text fields.
//!
//! Task summaries are sealed with [`SummaryCodec::encrypt`] before they reach
//! a repository and opened with [`SummaryCodec::decrypt`] on the way out.
//! Keys arrive as base64 from configuration; a key of the wrong size is
//! rejected when the codec is built.

mod codec;
mod error;
mod gcm;

pub use codec::{Envelope, SummaryCodec};
#[cfg(test)]
pub use codec::MockSummaryCodec;
pub use error::{ConfidentialityError, DecryptionFailure};
pub use gcm::AesGcmCodec;
