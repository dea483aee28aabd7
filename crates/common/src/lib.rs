//! Common types and errors shared across the sealed session crates.

pub mod error;
pub mod protocol;

pub use error::{CodecError, EnvelopeError, ErrorKind, RandomError};
pub use protocol::{CipherKind, SessionRecord, SessionRecordRef, SessionValues};
