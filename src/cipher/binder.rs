//! Binds a key-derivation salt to one container's identity.
//!
//! `bound = HMAC-SHA256(key = salt, message = utf8(file_id))`
//!
//! Two containers with the same password, and even the same raw salt, derive
//! different keys as long as their file ids differ, so a key recovered for
//! one container never opens another.

use hmac::{Hmac, Mac as _};
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::config::SALT_LEN;
use crate::error::{Error, Result};

/// HMAC-SHA256 keyed by the container salt.
pub struct KeyBinder {
    /// The raw salt from the header, used as the HMAC key.
    salt: Zeroizing<[u8; SALT_LEN]>,
}

impl KeyBinder {
    #[must_use]
    pub fn new(salt: &[u8; SALT_LEN]) -> Self {
        Self { salt: Zeroizing::new(*salt) }
    }

    /// Computes the bound salt for `file_id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Header`] if the salt is rejected as an HMAC key.
    pub fn bind(&self, file_id: &str) -> Result<Zeroizing<[u8; SALT_LEN]>> {
        let mut mac = Hmac::<Sha256>::new_from_slice(self.salt.as_slice()).map_err(|e| Error::Header(format!("invalid salt: {e}")))?;
        mac.update(file_id.as_bytes());

        Ok(Zeroizing::new(mac.finalize().into_bytes().into()))
    }
}
