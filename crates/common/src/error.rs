//! Error types shared across crates.
//!
//! Two layers: [`EnvelopeError`] for the seal/open layer and [`CodecError`]
//! for the session encode/decode pipeline, which wraps envelope failures with
//! the stage they happened in. [`ErrorKind`] flattens both into the failure
//! kinds callers match on.

use thiserror::Error;

use crate::protocol::CipherKind;

/// Flat classification of every failure the codec can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Block-cipher key length is invalid.
    KeySetup,
    /// AEAD primitive could not be built from the key.
    AeadSetup,
    /// Seal or open was invoked without a configured cipher.
    NoCipher,
    /// The random source failed while drawing a nonce.
    RandomSource,
    /// Envelope is shorter than the cipher's nonce.
    CiphertextTooShort,
    /// Tag verification or the underlying open failed.
    Authentication,
    /// The AEAD primitive refused to seal (e.g. plaintext over its size limit).
    SealFailure,
    /// The session values could not be serialized.
    Serialization,
    /// The decrypted bytes are not a session record.
    Deserialization,
}

/// Failure reported by a nonce random source.
#[derive(Debug, Error)]
#[error("random source failure: {message}")]
pub struct RandomError {
    message: String,
}

impl RandomError {
    /// Construct a [`RandomError`] carrying `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors produced by the envelope (seal/open) layer.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// The key length is not valid for the block cipher.
    #[error("failed to create {cipher} cipher: invalid key length {got}")]
    KeySetup { cipher: CipherKind, got: usize },

    /// The AEAD construction rejected the key.
    #[error("failed to create {cipher} AEAD")]
    AeadSetup { cipher: CipherKind },

    /// No cipher is configured.
    #[error("cipher is not configured")]
    NoCipher,

    /// Nonce generation failed.
    #[error("failed to generate random nonce")]
    RandomSource(#[source] RandomError),

    /// The envelope cannot even hold a nonce.
    #[error("ciphertext too short: expected at least {expected} bytes, got {got}")]
    CiphertextTooShort { expected: usize, got: usize },

    /// The AEAD primitive refused to seal the plaintext.
    #[error("aead seal failed")]
    SealFailed,

    /// Opening failed. Tag mismatch and any other primitive failure are
    /// reported identically.
    #[error("message authentication failed")]
    Authentication,
}

impl EnvelopeError {
    /// Returns the [`ErrorKind`] of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EnvelopeError::KeySetup { .. } => ErrorKind::KeySetup,
            EnvelopeError::AeadSetup { .. } => ErrorKind::AeadSetup,
            EnvelopeError::NoCipher => ErrorKind::NoCipher,
            EnvelopeError::RandomSource(_) => ErrorKind::RandomSource,
            EnvelopeError::CiphertextTooShort { .. } => ErrorKind::CiphertextTooShort,
            EnvelopeError::SealFailed => ErrorKind::SealFailure,
            EnvelopeError::Authentication => ErrorKind::Authentication,
        }
    }
}

/// Errors produced by session encode/decode, tagged with the failing stage.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The session record could not be serialized.
    #[error("failed to encode session data")]
    Serialization(#[source] serde_json::Error),

    /// Sealing the serialized record failed.
    #[error("failed to encrypt session data")]
    Seal(#[source] EnvelopeError),

    /// Opening the envelope failed.
    #[error("failed to decrypt session data")]
    Open(#[source] EnvelopeError),

    /// The opened plaintext is not a session record.
    #[error("failed to decode session data")]
    Deserialization(#[source] serde_json::Error),
}

impl CodecError {
    /// Returns the [`ErrorKind`] of this error, looking through the stage
    /// wrapper for envelope failures.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::Serialization(_) => ErrorKind::Serialization,
            CodecError::Seal(e) | CodecError::Open(e) => e.kind(),
            CodecError::Deserialization(_) => ErrorKind::Deserialization,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn envelope_kinds() {
        assert_eq!(EnvelopeError::NoCipher.kind(), ErrorKind::NoCipher);
        assert_eq!(
            EnvelopeError::CiphertextTooShort {
                expected: 12,
                got: 1
            }
            .kind(),
            ErrorKind::CiphertextTooShort
        );
        assert_eq!(
            EnvelopeError::KeySetup {
                cipher: CipherKind::AesGcm,
                got: 1
            }
            .kind(),
            ErrorKind::KeySetup
        );
        assert_eq!(
            EnvelopeError::RandomSource(RandomError::new("x")).kind(),
            ErrorKind::RandomSource
        );
    }

    #[test]
    fn codec_kind_looks_through_stage() {
        assert_eq!(
            CodecError::Seal(EnvelopeError::NoCipher).kind(),
            ErrorKind::NoCipher
        );
        assert_eq!(
            CodecError::Open(EnvelopeError::Authentication).kind(),
            ErrorKind::Authentication
        );
        let bad_json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(
            CodecError::Deserialization(bad_json).kind(),
            ErrorKind::Deserialization
        );
    }

    #[test]
    fn display_includes_stage_and_source() {
        let e = CodecError::Open(EnvelopeError::CiphertextTooShort {
            expected: 24,
            got: 3,
        });
        assert_eq!(e.to_string(), "failed to decrypt session data");
        let source = e.source().unwrap().to_string();
        assert!(source.contains("expected at least 24 bytes, got 3"));
    }

    #[test]
    fn random_error_keeps_message() {
        let e = EnvelopeError::RandomSource(RandomError::new("intentionally failed to read"));
        let source = e.source().unwrap().to_string();
        assert!(source.contains("intentionally failed to read"));
    }
}
