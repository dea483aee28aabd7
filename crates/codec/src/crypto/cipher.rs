//! AEAD primitives behind one object-safe capability.
//!
//! Every RustCrypto AEAD (anything implementing [`Aead`] and [`KeySizeUser`])
//! is an [`AeadCipher`] through the blanket impl below, so the envelope layer
//! only ever sees `Box<dyn AeadCipher>` and never a concrete algorithm.

use aes_gcm::aead::consts::U12;
use aes_gcm::aead::generic_array::typenum::Unsigned;
use aes_gcm::aead::{self, Aead, KeyInit, KeySizeUser, Nonce};
use aes_gcm::aes::Aes192;
use aes_gcm::{Aes128Gcm, Aes256Gcm, AesGcm};
use chacha20poly1305::{ChaCha20Poly1305, XChaCha20Poly1305};
use session_common::{CipherKind, EnvelopeError};

/// Byte length of a ChaCha20-Poly1305 / XChaCha20-Poly1305 key.
pub const CHACHA_KEY_LEN: usize = 32;

/// AES-192 in GCM mode with the standard 96-bit nonce.
pub type Aes192Gcm = AesGcm<Aes192, U12>;

/// A configured AEAD primitive.
///
/// `seal` and `open` never use associated data. A nonce whose length differs
/// from [`nonce_size`](AeadCipher::nonce_size) is rejected with
/// [`aead::Error`].
pub trait AeadCipher: Send + Sync {
    /// Nonce length in bytes.
    fn nonce_size(&self) -> usize;

    /// Key length in bytes.
    fn key_size(&self) -> usize;

    /// Encrypt and authenticate `plaintext`, returning ciphertext with the tag appended.
    fn seal(&self, nonce: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, aead::Error>;

    /// Verify and decrypt `sealed` (ciphertext with tag appended).
    fn open(&self, nonce: &[u8], sealed: &[u8]) -> Result<Vec<u8>, aead::Error>;
}

impl<T> AeadCipher for T
where
    T: Aead + KeySizeUser + Send + Sync,
{
    fn nonce_size(&self) -> usize {
        <T::NonceSize as Unsigned>::USIZE
    }

    fn key_size(&self) -> usize {
        <T::KeySize as Unsigned>::USIZE
    }

    fn seal(&self, nonce: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, aead::Error> {
        if nonce.len() != self.nonce_size() {
            return Err(aead::Error);
        }
        self.encrypt(Nonce::<T>::from_slice(nonce), plaintext)
    }

    fn open(&self, nonce: &[u8], sealed: &[u8]) -> Result<Vec<u8>, aead::Error> {
        if nonce.len() != self.nonce_size() {
            return Err(aead::Error);
        }
        self.decrypt(Nonce::<T>::from_slice(nonce), sealed)
    }
}

/// Build AES-GCM from a 16, 24 or 32-byte key (AES-128/192/256).
///
/// # Errors
///
/// Returns [`EnvelopeError::KeySetup`] for any other key length and
/// [`EnvelopeError::AeadSetup`] if the GCM construction rejects the key.
pub fn aes_gcm(key: &[u8]) -> Result<Box<dyn AeadCipher>, EnvelopeError> {
    let setup = |_| EnvelopeError::AeadSetup {
        cipher: CipherKind::AesGcm,
    };
    let cipher: Box<dyn AeadCipher> = match key.len() {
        16 => Box::new(Aes128Gcm::new_from_slice(key).map_err(setup)?),
        24 => Box::new(Aes192Gcm::new_from_slice(key).map_err(setup)?),
        32 => Box::new(Aes256Gcm::new_from_slice(key).map_err(setup)?),
        got => {
            return Err(EnvelopeError::KeySetup {
                cipher: CipherKind::AesGcm,
                got,
            })
        }
    };
    Ok(cipher)
}

/// Build ChaCha20-Poly1305 from a [`CHACHA_KEY_LEN`]-byte key.
///
/// # Errors
///
/// Returns [`EnvelopeError::AeadSetup`] if the key is not exactly 32 bytes.
pub fn chacha20_poly1305(key: &[u8]) -> Result<Box<dyn AeadCipher>, EnvelopeError> {
    let cipher = ChaCha20Poly1305::new_from_slice(key).map_err(|_| EnvelopeError::AeadSetup {
        cipher: CipherKind::ChaCha20Poly1305,
    })?;
    Ok(Box::new(cipher))
}

/// Build XChaCha20-Poly1305 (24-byte nonce) from a [`CHACHA_KEY_LEN`]-byte key.
///
/// # Errors
///
/// Returns [`EnvelopeError::AeadSetup`] if the key is not exactly 32 bytes.
pub fn xchacha20_poly1305(key: &[u8]) -> Result<Box<dyn AeadCipher>, EnvelopeError> {
    let cipher = XChaCha20Poly1305::new_from_slice(key).map_err(|_| EnvelopeError::AeadSetup {
        cipher: CipherKind::XChaCha20Poly1305,
    })?;
    Ok(Box::new(cipher))
}

/// Build the cipher for `kind` from `key`.
pub fn for_kind(kind: CipherKind, key: &[u8]) -> Result<Box<dyn AeadCipher>, EnvelopeError> {
    match kind {
        CipherKind::AesGcm => aes_gcm(key),
        CipherKind::ChaCha20Poly1305 => chacha20_poly1305(key),
        CipherKind::XChaCha20Poly1305 => xchacha20_poly1305(key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use session_common::ErrorKind;

    #[test]
    fn aes_key_lengths_select_variant() {
        for len in [16, 24, 32] {
            let cipher = aes_gcm(&vec![0x11; len]).unwrap();
            assert_eq!(cipher.key_size(), len);
            assert_eq!(cipher.nonce_size(), 12);
        }
    }

    #[test]
    fn aes_rejects_bad_key_length_as_key_setup() {
        for len in [0, 1, 15, 17, 31, 33, 64] {
            let err = aes_gcm(&vec![0u8; len]).err().unwrap();
            assert_eq!(err.kind(), ErrorKind::KeySetup);
        }
    }

    #[test]
    fn chacha_families_require_32_byte_keys() {
        for len in [0, 1, 16, 24, 31, 33] {
            let key = vec![0u8; len];
            assert_eq!(
                chacha20_poly1305(&key).err().unwrap().kind(),
                ErrorKind::AeadSetup
            );
            assert_eq!(
                xchacha20_poly1305(&key).err().unwrap().kind(),
                ErrorKind::AeadSetup
            );
        }
    }

    #[test]
    fn nonce_sizes_match_cipher_kind() {
        let key = [0x22u8; 32];
        for kind in [
            CipherKind::AesGcm,
            CipherKind::ChaCha20Poly1305,
            CipherKind::XChaCha20Poly1305,
        ] {
            let cipher = for_kind(kind, &key).unwrap();
            assert_eq!(cipher.nonce_size(), kind.nonce_size());
            assert_eq!(cipher.key_size(), 32);
        }
    }

    #[test]
    fn wrong_nonce_length_is_an_error_not_a_panic() {
        let cipher = chacha20_poly1305(&[0x33u8; 32]).unwrap();
        assert!(cipher.seal(&[0u8; 11], b"data").is_err());
        assert!(cipher.open(&[0u8; 24], b"data").is_err());
    }

    #[test]
    fn seal_then_open_with_explicit_nonce() {
        let cipher = xchacha20_poly1305(&[0x44u8; 32]).unwrap();
        let nonce = [0x07u8; 24];
        let sealed = cipher.seal(&nonce, b"hello").unwrap();
        assert_eq!(sealed.len(), b"hello".len() + 16);
        assert_eq!(cipher.open(&nonce, &sealed).unwrap(), b"hello");
        assert!(cipher.open(&[0x08u8; 24], &sealed).is_err());
    }
}
