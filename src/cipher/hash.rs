//! Plaintext integrity digest.
//!
//! The header stores `SHA-256(plaintext)` as lowercase hex. After a
//! successful open the engine recomputes it and compares, which catches a
//! header paired with the wrong payload even though GCM already
//! authenticated the payload itself.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::config::HASH_SIZE;
use crate::error::{Error, Result};

/// A computed SHA-256 digest of some content.
pub struct ContentHash {
    hash: [u8; HASH_SIZE],
}

impl ContentHash {
    #[must_use]
    pub fn new(data: &[u8]) -> Self {
        Self { hash: Sha256::digest(data).into() }
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.hash
    }

    /// Lowercase hex, the form stored in `originalFileHash`.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.hash)
    }

    /// Compares against a hex digest from a header.
    ///
    /// Uppercase hex is accepted; anything that does not decode to 32 bytes
    /// counts as a mismatch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Integrity`] on mismatch.
    pub fn verify_hex(&self, expected: &str) -> Result<()> {
        let expected = hex::decode(expected).map_err(|_| Error::Integrity)?;
        if expected.len() != HASH_SIZE || !bool::from(self.hash.as_slice().ct_eq(expected.as_slice())) {
            return Err(Error::Integrity);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_known_vector() {
        assert_eq!(ContentHash::new(b"hello test").to_hex(), "25ed92417af3bbda3761ca1cb87210cad5f9116fd9b0d502b01c36522ffa4463");
    }

    #[test]
    fn test_hash_empty() {
        assert_eq!(ContentHash::new(&[]).to_hex(), "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855");
    }

    #[test]
    fn test_verify_hex_valid() {
        let hash = ContentHash::new(b"verify me");
        assert!(hash.verify_hex(&hash.to_hex()).is_ok());
        assert!(hash.verify_hex(&hash.to_hex().to_uppercase()).is_ok());
    }

    #[test]
    fn test_verify_hex_mismatch() {
        let hash = ContentHash::new(b"verify me");
        let mut corrupted = *hash.as_bytes();
        corrupted[0] ^= 0x01;
        assert!(matches!(hash.verify_hex(&hex::encode(corrupted)), Err(Error::Integrity)));
    }

    #[test]
    fn test_verify_hex_malformed() {
        let hash = ContentHash::new(b"verify me");
        assert!(hash.verify_hex("zz").is_err());
        assert!(hash.verify_hex("abcd").is_err());
    }
}
