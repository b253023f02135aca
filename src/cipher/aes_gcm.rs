use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};

use crate::config::{IV_LEN, KEY_LEN, TAG_LEN};
use crate::error::{Error, Result};

/// AES-256-GCM with a caller-supplied 96-bit nonce and a 128-bit tag
/// appended to the ciphertext.
///
/// No associated data is bound; the `UFENC001` header stays outside the
/// authenticated input for compatibility with existing readers.
pub struct AesGcm {
    inner: Aes256Gcm,
}

impl AesGcm {
    #[inline]
    #[must_use]
    pub fn new(key: &[u8; KEY_LEN]) -> Self {
        Self { inner: Aes256Gcm::new(key.into()) }
    }

    /// Encrypts `plaintext`, returning `ciphertext || tag`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SizeLimit`] only if the plaintext exceeds the GCM
    /// message limit, which the engine's size ceiling already prevents.
    #[inline]
    pub fn seal(&self, iv: &[u8; IV_LEN], plaintext: &[u8]) -> Result<Vec<u8>> {
        const GCM_MAX_PLAINTEXT: u64 = (1 << 36) - 32;

        self.inner.encrypt(Nonce::from_slice(iv), plaintext).map_err(|_| Error::SizeLimit { size: plaintext.len() as u64, max: GCM_MAX_PLAINTEXT })
    }

    /// Verifies the trailing tag and decrypts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decryption`] if the input is shorter than a tag or
    /// the tag does not verify. Nothing is returned from a failed open.
    #[inline]
    pub fn open(&self, iv: &[u8; IV_LEN], sealed: &[u8]) -> Result<Vec<u8>> {
        if sealed.len() < TAG_LEN {
            return Err(Error::Decryption);
        }

        self.inner.decrypt(Nonce::from_slice(iv), sealed).map_err(|_| Error::Decryption)
    }
}

/// Splits `ciphertext || tag` into its two parts.
///
/// Returns `None` when `sealed` is shorter than a tag.
#[must_use]
pub fn split_tag(sealed: &[u8]) -> Option<(&[u8], &[u8; TAG_LEN])> {
    let at = sealed.len().checked_sub(TAG_LEN)?;
    let (ciphertext, tag) = sealed.split_at(at);
    Some((ciphertext, tag.try_into().ok()?))
}
