//! Nonce randomness.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::OsRng;
use session_common::RandomError;

/// Source of unpredictable bytes for nonces.
///
/// Implementations must be safe to call concurrently and must report failure
/// instead of blocking indefinitely.
#[cfg_attr(test, mockall::automock)]
pub trait RandomSource: Send + Sync {
    /// Fill `dest` entirely with random bytes.
    fn fill(&self, dest: &mut [u8]) -> Result<(), RandomError>;
}

/// The operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<(), RandomError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| RandomError::new(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_random_fills_buffer() {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        OsRandom.fill(&mut a).unwrap();
        OsRandom.fill(&mut b).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn os_random_accepts_empty_buffer() {
        assert!(OsRandom.fill(&mut []).is_ok());
    }
}
