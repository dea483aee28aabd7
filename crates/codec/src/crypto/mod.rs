//! AEAD envelope primitives.
//!
//! This module knows nothing about sessions; it seals and opens opaque byte
//! buffers.
//!
//! # Envelope format
//!
//! ```text
//! nonce (12 or 24 bytes) || ciphertext || tag (16 bytes)
//! ```
//!
//! The nonce length is a property of the configured cipher: 12 bytes for
//! AES-GCM and ChaCha20-Poly1305, 24 bytes for XChaCha20-Poly1305. Nonces are
//! drawn fresh from a [`RandomSource`] on every seal.

pub mod cipher;
pub mod envelope;
pub mod random;

pub use cipher::AeadCipher;
pub use envelope::Encrypter;
pub use random::{OsRandom, RandomSource};
