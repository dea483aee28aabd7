//! Configuration loading and validation for session-sealer.
//!
//! Values come from `SEALER_`-prefixed environment variables. The process
//! exits with a clear message if any required variable is missing or invalid.

use std::fmt;

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::Deserialize;
use session_codec::{CipherKind, Encrypter};

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "SEALER";

/// Validated session-sealer configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Cipher family used to seal and open envelopes.
    #[serde(default = "default_cipher")]
    pub cipher: CipherKind,

    /// Base64 (standard alphabet) key material. **Required.**
    pub key: String,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_cipher() -> CipherKind {
    CipherKind::XChaCha20Poly1305
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::load(
            config::Config::builder().add_source(config::Environment::with_prefix(ENV_PREFIX)),
        )
    }

    fn load(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let cfg = builder
            .build()
            .context("failed to build session-sealer configuration")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise session-sealer configuration")?;

        c.validate()?;
        Ok(c)
    }

    fn validate(&self) -> Result<()> {
        if self.key.trim().is_empty() {
            anyhow::bail!("{ENV_PREFIX}_KEY is required and must not be empty");
        }
        self.key_bytes()?;
        Ok(())
    }

    /// Decoded key bytes.
    pub fn key_bytes(&self) -> Result<Vec<u8>> {
        STANDARD
            .decode(self.key.trim())
            .with_context(|| format!("{ENV_PREFIX}_KEY must be standard base64"))
    }

    /// Build the [`Encrypter`] described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the key length does not suit the cipher.
    pub fn build_encrypter(&self) -> Result<Encrypter> {
        let key = self.key_bytes()?;
        Encrypter::from_kind(self.cipher, &key)
            .with_context(|| format!("failed to configure {} cipher", self.cipher))
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print key material.
        f.debug_struct("Config")
            .field("cipher", &self.cipher)
            .field("key", &"[REDACTED]")
            .field("log_level", &self.log_level)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_32_B64: &str = "AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8=";

    fn with_overrides(pairs: &[(&str, &str)]) -> ConfigBuilder<DefaultState> {
        pairs
            .iter()
            .fold(config::Config::builder(), |builder, (k, v)| {
                builder.set_override(*k, *v).unwrap()
            })
    }

    #[test]
    fn defaults() {
        assert_eq!(default_cipher(), CipherKind::XChaCha20Poly1305);
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn load_applies_defaults() {
        let cfg = Config::load(with_overrides(&[("key", KEY_32_B64)])).unwrap();
        assert_eq!(cfg.cipher, CipherKind::XChaCha20Poly1305);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.key_bytes().unwrap(), (0u8..32).collect::<Vec<_>>());
    }

    #[test]
    fn load_reads_cipher_name() {
        let cfg = Config::load(with_overrides(&[
            ("key", KEY_32_B64),
            ("cipher", "aes-gcm"),
            ("log_level", "debug"),
        ]))
        .unwrap();
        assert_eq!(cfg.cipher, CipherKind::AesGcm);
        assert_eq!(cfg.log_level, "debug");
        assert!(cfg.build_encrypter().unwrap().has_cipher());
    }

    #[test]
    fn load_rejects_missing_key() {
        assert!(Config::load(with_overrides(&[])).is_err());
    }

    #[test]
    fn load_rejects_unknown_cipher() {
        let result = Config::load(with_overrides(&[("key", KEY_32_B64), ("cipher", "rot13")]));
        assert!(result.is_err());
    }

    #[test]
    fn validate_rejects_empty_key() {
        let cfg = Config {
            cipher: default_cipher(),
            key: "  ".into(),
            log_level: default_log_level(),
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_base64_key() {
        let cfg = Config {
            cipher: default_cipher(),
            key: "not base64!".into(),
            log_level: default_log_level(),
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn build_rejects_short_key() {
        let cfg = Config {
            cipher: CipherKind::ChaCha20Poly1305,
            key: "AAEC".into(),
            log_level: default_log_level(),
        };
        let err = cfg.build_encrypter().unwrap_err();
        assert!(err.to_string().contains("ChaCha20-Poly1305"));
    }

    #[test]
    fn debug_redacts_key() {
        let cfg = Config {
            cipher: default_cipher(),
            key: KEY_32_B64.into(),
            log_level: default_log_level(),
        };
        let rendered = format!("{cfg:?}");
        assert!(rendered.contains("REDACTED"));
        assert!(!rendered.contains(KEY_32_B64));
    }
}
