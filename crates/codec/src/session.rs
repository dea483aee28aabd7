//! Session encode/decode on top of the envelope codec.
//!
//! Encode serializes a [`SessionRecord`] to JSON and seals it; decode opens the
//! envelope and deserializes the record. Each call is independent and either
//! succeeds completely or returns a [`CodecError`] naming the failing stage.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use session_common::{CodecError, SessionRecord, SessionRecordRef, SessionValues};
use tracing::debug;

use crate::crypto::Encrypter;
use crate::finite::ensure_finite;

/// The codec contract a session framework plugs into.
pub trait SessionCodec: Send + Sync {
    /// Turn a session's deadline and values into an opaque blob.
    fn encode(&self, deadline: DateTime<Utc>, values: &SessionValues)
        -> Result<Vec<u8>, CodecError>;

    /// Recover a session's deadline and values from a blob produced by `encode`.
    fn decode(&self, data: &[u8]) -> Result<(DateTime<Utc>, SessionValues), CodecError>;
}

impl Encrypter {
    /// Serialize and seal a session.
    ///
    /// # Errors
    ///
    /// [`CodecError::Serialization`] if a value cannot be serialized,
    /// including NaN and infinite floats (nothing is sealed in that case),
    /// [`CodecError::Seal`] if sealing fails.
    pub fn encode<V: Serialize>(
        &self,
        deadline: DateTime<Utc>,
        values: &HashMap<String, V>,
    ) -> Result<Vec<u8>, CodecError> {
        let record = SessionRecordRef {
            deadline: &deadline,
            values,
        };
        ensure_finite(&record).map_err(CodecError::Serialization)?;
        let plaintext = serde_json::to_vec(&record).map_err(CodecError::Serialization)?;
        self.seal(&plaintext).map_err(CodecError::Seal)
    }

    /// Open and deserialize a session.
    ///
    /// # Errors
    ///
    /// [`CodecError::Open`] if the envelope is rejected,
    /// [`CodecError::Deserialization`] if the plaintext is not a session
    /// record with values of type `V`.
    pub fn decode<V: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<(DateTime<Utc>, HashMap<String, V>), CodecError> {
        let plaintext = self.open(data).map_err(|e| {
            debug!(kind = ?e.kind(), len = data.len(), "session envelope rejected");
            CodecError::Open(e)
        })?;
        let record: SessionRecord<V> =
            serde_json::from_slice(&plaintext).map_err(CodecError::Deserialization)?;
        Ok((record.deadline, record.values))
    }
}

impl SessionCodec for Encrypter {
    fn encode(
        &self,
        deadline: DateTime<Utc>,
        values: &SessionValues,
    ) -> Result<Vec<u8>, CodecError> {
        Encrypter::encode(self, deadline, values)
    }

    fn decode(&self, data: &[u8]) -> Result<(DateTime<Utc>, SessionValues), CodecError> {
        Encrypter::decode(self, data)
    }
}
