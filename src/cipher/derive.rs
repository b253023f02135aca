//! # Key Derivation with PBKDF2-HMAC-SHA256
//!
//! Stretches a password and a bound salt into a 256-bit AES key. The
//! iteration count is an input rather than a constant: new containers use
//! the engine's configured count, while decryption replays whatever count
//! the container header recorded, so older containers stay readable after
//! the default is raised.
//!
//! The derived key only ever feeds [`AesGcm`](super::AesGcm); it is held in
//! a zeroizing buffer and never exported.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::config::{KEY_LEN, SALT_LEN};
use crate::secret::Secret;

/// Password-based key derivation for one password.
pub struct Derive<'a> {
    /// The password to stretch, borrowed for the lifetime of the derivation.
    password: &'a Secret,
}

impl<'a> Derive<'a> {
    #[must_use]
    pub const fn new(password: &'a Secret) -> Self {
        Self { password }
    }

    /// Derives the AES-256 key.
    ///
    /// A pure function of its inputs; the same password, bound salt and
    /// iteration count always produce the same key.
    ///
    /// # Arguments
    /// * `bound_salt` - Output of [`KeyBinder::bind`](super::KeyBinder::bind)
    /// * `iterations` - PBKDF2 rounds, already validated to be non-zero
    #[must_use]
    pub fn derive_key(&self, bound_salt: &[u8; SALT_LEN], iterations: u32) -> Zeroizing<[u8; KEY_LEN]> {
        let mut key = Zeroizing::new([0u8; KEY_LEN]);
        pbkdf2_hmac::<Sha256>(self.password.expose_secret().as_bytes(), bound_salt, iterations, &mut key[..]);
        key
    }
}
