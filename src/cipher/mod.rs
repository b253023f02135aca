//! # Cryptographic Operations
//!
//! The three primitives the container relies on, plus the integrity digest:
//!
//! - [`KeyBinder`]: `HMAC-SHA256(salt, file_id)`, tying a salt to one container
//! - [`Derive`]: PBKDF2-HMAC-SHA256 from password and bound salt to an AES key
//! - [`AesGcm`]: AES-256-GCM seal/open with a 12-byte nonce and 16-byte tag
//! - [`ContentHash`]: SHA-256 of the plaintext, re-checked after decryption
//!
//! Every type here is a pure function of its inputs and holds no shared
//! state, so concurrent engine calls need no coordination.

mod aes_gcm;
mod binder;
mod derive;
mod hash;

pub use aes_gcm::{AesGcm, split_tag};
pub use binder::KeyBinder;
pub use derive::Derive;
pub use hash::ContentHash;
