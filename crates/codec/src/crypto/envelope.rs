//! [`Encrypter`]: seals byte buffers into nonce-prefixed envelopes and opens them again.

use std::fmt;
use std::sync::Arc;

use session_common::{CipherKind, EnvelopeError};
use tracing::debug;

use super::cipher::{self, AeadCipher};
use super::random::{OsRandom, RandomSource};

/// Symmetric AEAD codec for opaque byte buffers.
///
/// An envelope is `nonce || ciphertext+tag`, where the nonce length is fixed
/// by the configured cipher. There is no length prefix, version byte, cipher
/// identifier or associated data, so an envelope can only be opened by an
/// `Encrypter` built with the same cipher family and key.
///
/// The cipher handle may be absent (see [`Encrypter::without_cipher`]); every
/// operation then fails with [`EnvelopeError::NoCipher`].
///
/// `Encrypter` holds no mutable state and is `Send + Sync`, so one instance can
/// serve any number of concurrent callers.
pub struct Encrypter {
    cipher: Option<Box<dyn AeadCipher>>,
    random: Arc<dyn RandomSource>,
}

impl Encrypter {
    /// Wrap an already-configured AEAD cipher.
    pub fn new(cipher: impl AeadCipher + 'static) -> Self {
        Self::from_handle(Some(Box::new(cipher)))
    }

    /// Wrap an optional boxed cipher handle.
    pub fn from_handle(cipher: Option<Box<dyn AeadCipher>>) -> Self {
        Self {
            cipher,
            random: Arc::new(OsRandom),
        }
    }

    /// An `Encrypter` with no cipher configured.
    pub fn without_cipher() -> Self {
        Self::from_handle(None)
    }

    /// AES-GCM with a 16, 24 or 32-byte key.
    ///
    /// # Errors
    ///
    /// [`EnvelopeError::KeySetup`] for an invalid AES key length,
    /// [`EnvelopeError::AeadSetup`] if the GCM construction fails.
    pub fn aes_gcm(key: &[u8]) -> Result<Self, EnvelopeError> {
        Self::from_kind(CipherKind::AesGcm, key)
    }

    /// ChaCha20-Poly1305 with a 32-byte key.
    ///
    /// # Errors
    ///
    /// [`EnvelopeError::AeadSetup`] if the key is not 32 bytes.
    pub fn chacha20_poly1305(key: &[u8]) -> Result<Self, EnvelopeError> {
        Self::from_kind(CipherKind::ChaCha20Poly1305, key)
    }

    /// XChaCha20-Poly1305 with a 32-byte key. Its 24-byte nonce keeps random
    /// nonce collisions negligible over long-lived keys.
    ///
    /// # Errors
    ///
    /// [`EnvelopeError::AeadSetup`] if the key is not 32 bytes.
    pub fn xchacha20_poly1305(key: &[u8]) -> Result<Self, EnvelopeError> {
        Self::from_kind(CipherKind::XChaCha20Poly1305, key)
    }

    /// Build the cipher family named by `kind`.
    pub fn from_kind(kind: CipherKind, key: &[u8]) -> Result<Self, EnvelopeError> {
        let cipher = cipher::for_kind(kind, key)?;
        debug!(cipher = %kind, key_bits = key.len() * 8, "session cipher configured");
        Ok(Self::from_handle(Some(cipher)))
    }

    /// Replace the nonce source.
    pub fn with_random_source(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    /// Returns `true` if a cipher is configured.
    pub fn has_cipher(&self) -> bool {
        self.cipher.is_some()
    }

    /// Nonce (and envelope prefix) length of the configured cipher.
    pub fn nonce_size(&self) -> Option<usize> {
        self.cipher.as_deref().map(|c| c.nonce_size())
    }

    fn cipher(&self) -> Result<&dyn AeadCipher, EnvelopeError> {
        self.cipher.as_deref().ok_or(EnvelopeError::NoCipher)
    }

    /// Seal `plaintext` under a fresh random nonce.
    ///
    /// # Errors
    ///
    /// [`EnvelopeError::NoCipher`] without a cipher,
    /// [`EnvelopeError::RandomSource`] if no nonce could be drawn,
    /// [`EnvelopeError::SealFailed`] if the primitive refuses the plaintext.
    pub fn seal(&self, plaintext: &[u8]) -> Result<Vec<u8>, EnvelopeError> {
        let cipher = self.cipher()?;

        let mut nonce = vec![0u8; cipher.nonce_size()];
        self.random
            .fill(&mut nonce)
            .map_err(EnvelopeError::RandomSource)?;

        let sealed = cipher
            .seal(&nonce, plaintext)
            .map_err(|_| EnvelopeError::SealFailed)?;

        let mut envelope = nonce;
        envelope.extend_from_slice(&sealed);
        Ok(envelope)
    }

    /// Open an envelope produced by [`seal`](Encrypter::seal).
    ///
    /// # Errors
    ///
    /// [`EnvelopeError::NoCipher`] without a cipher,
    /// [`EnvelopeError::CiphertextTooShort`] if `envelope` cannot hold a nonce,
    /// [`EnvelopeError::Authentication`] for every other failure.
    pub fn open(&self, envelope: &[u8]) -> Result<Vec<u8>, EnvelopeError> {
        let cipher = self.cipher()?;

        let nonce_size = cipher.nonce_size();
        if envelope.len() < nonce_size {
            return Err(EnvelopeError::CiphertextTooShort {
                expected: nonce_size,
                got: envelope.len(),
            });
        }

        let (nonce, sealed) = envelope.split_at(nonce_size);
        cipher
            .open(nonce, sealed)
            .map_err(|_| EnvelopeError::Authentication)
    }
}

impl Default for Encrypter {
    /// Same as [`Encrypter::without_cipher`].
    fn default() -> Self {
        Self::without_cipher()
    }
}

impl fmt::Debug for Encrypter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Key material never reaches the formatter.
        f.debug_struct("Encrypter")
            .field("nonce_size", &self.nonce_size())
            .finish_non_exhaustive()
    }
}
