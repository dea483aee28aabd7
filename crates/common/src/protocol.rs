//! Types shared between the codec and its callers.
//!
//! [`SessionRecord`] is the shape handed to the serializer before sealing;
//! its JSON form is `{"Deadline": "<RFC 3339>", "Values": {...}}`.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default session value mapping: string keys to arbitrary JSON values.
pub type SessionValues = HashMap<String, serde_json::Value>;

// ---------------------------------------------------------------------------
// Cipher families
// ---------------------------------------------------------------------------

/// AEAD cipher family an envelope was sealed with.
///
/// Envelopes carry no cipher identifier, so the decoder must be configured
/// with the same family and key as the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CipherKind {
    /// AES-GCM with a 128, 192 or 256-bit key and a 12-byte nonce.
    #[serde(rename = "aes-gcm")]
    AesGcm,
    /// ChaCha20-Poly1305 with a 12-byte nonce.
    #[serde(rename = "chacha20-poly1305")]
    ChaCha20Poly1305,
    /// XChaCha20-Poly1305 with a 24-byte nonce.
    #[serde(rename = "xchacha20-poly1305")]
    XChaCha20Poly1305,
}

impl CipherKind {
    /// Nonce length in bytes, which is also the envelope prefix length.
    pub fn nonce_size(self) -> usize {
        match self {
            CipherKind::AesGcm | CipherKind::ChaCha20Poly1305 => 12,
            CipherKind::XChaCha20Poly1305 => 24,
        }
    }
}

impl fmt::Display for CipherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CipherKind::AesGcm => "AES-GCM",
            CipherKind::ChaCha20Poly1305 => "ChaCha20-Poly1305",
            CipherKind::XChaCha20Poly1305 => "XChaCha20-Poly1305",
        })
    }
}

// ---------------------------------------------------------------------------
// Session record
// ---------------------------------------------------------------------------

/// A session's expiry instant together with its named values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SessionRecord<V = serde_json::Value> {
    /// Instant after which the session framework treats the session as expired.
    pub deadline: DateTime<Utc>,
    /// Named session values.
    pub values: HashMap<String, V>,
}

/// Borrowed form of [`SessionRecord`] used on the encode path.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SessionRecordRef<'a, V> {
    /// Instant after which the session is expired.
    pub deadline: &'a DateTime<Utc>,
    /// Named session values.
    pub values: &'a HashMap<String, V>,
}
