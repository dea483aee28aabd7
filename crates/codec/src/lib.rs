//! Authenticated, encrypted session codec.
//!
//! [`Encrypter`] turns a session (an expiry instant plus named values) into a
//! sealed byte blob and back:
//!
//! ```text
//! encode: record -> serde_json -> seal -> nonce || ciphertext || tag
//! decode: nonce || ciphertext || tag -> open -> serde_json -> record
//! ```
//!
//! Key management, storage and expiry enforcement belong to the caller.

pub mod crypto;
mod finite;
pub mod session;

pub use crypto::{AeadCipher, Encrypter, OsRandom, RandomSource};
pub use session::SessionCodec;
pub use session_common::{
    CipherKind, CodecError, EnvelopeError, ErrorKind, RandomError, SessionRecord, SessionValues,
};
