//! Format constants and engine configuration.
//!
//! The constants describe the `UFENC001` container as it is written by the
//! browser tool and the mobile application; changing any of them breaks
//! compatibility with containers already in the wild. [`Config`] holds the
//! tunables that may legitimately differ between engine instances.

use crate::error::{Error, Result};

/// File extension for encrypted containers.
pub const FILE_EXTENSION: &str = ".ufenc";

// === Container layout ===

/// Magic bytes at offset 0 of every container ("UFENC001").
pub const MAGIC: [u8; MAGIC_SIZE] = *b"UFENC001";

/// Length of the magic tag.
pub const MAGIC_SIZE: usize = 8;

/// Highest container version this implementation reads and the one it writes.
pub const FORMAT_VERSION: u8 = 1;

/// Length of the big-endian header length field.
pub const HEADER_LENGTH_SIZE: usize = 4;

/// Offset of the JSON header: magic, version byte, length field.
pub const PREAMBLE_SIZE: usize = MAGIC_SIZE + 1 + HEADER_LENGTH_SIZE;

// === Cryptographic parameters ===

/// Length of the random key-derivation salt in bytes.
pub const SALT_LEN: usize = 32;

/// Length of the AES-GCM nonce in bytes.
pub const IV_LEN: usize = 12;

/// Length of the AES-GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Length of the derived AES-256 key in bytes.
pub const KEY_LEN: usize = 32;

/// Length of a SHA-256 digest in bytes.
pub const HASH_SIZE: usize = 32;

/// Default PBKDF2 iteration count for new containers.
///
/// Decryption never uses this value; it replays the count stored in the header.
pub const PBKDF2_ITERATIONS: u32 = 150_000;

/// Upper bound accepted for a stored iteration count.
///
/// A header is untrusted input and a huge count would pin a CPU for hours.
pub const MAX_PBKDF2_ITERATIONS: u32 = 10_000_000;

/// Identifier written to the header `algorithm` field.
pub const ALGORITHM: &str = "AES-256-GCM";

/// Identifier written to the header `kdf` field.
pub const KDF: &str = "PBKDF2-SHA256";

// === Policy ===

/// Minimum password length, counted in characters.
pub const PASSWORD_MIN_LENGTH: usize = 12;

/// Largest plaintext accepted by `encrypt`.
pub const MAX_FILE_SIZE: u64 = 100 * bytesize::MIB;

/// Schema marker stored in the `u` field of a key share.
pub const KEY_SHARE_SCHEMA: u8 = 1;

/// Length of passwords produced by the generator when none is given.
pub const GENERATED_PASSWORD_LENGTH: usize = 32;

/// Tunables for one [`Engine`](crate::engine::Engine) instance.
///
/// Several engines with different configurations can live in one process;
/// nothing here is global.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// PBKDF2 iterations used for new containers.
    pub iterations: u32,

    /// Plaintext size ceiling in bytes.
    pub max_file_size: u64,

    /// Minimum password length in characters.
    pub min_password_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { iterations: PBKDF2_ITERATIONS, max_file_size: MAX_FILE_SIZE, min_password_length: PASSWORD_MIN_LENGTH }
    }
}

impl Config {
    #[must_use]
    pub const fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    #[must_use]
    pub const fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    /// Checks that the iteration count is one the engine can also read back.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when `iterations` is zero or above
    /// [`MAX_PBKDF2_ITERATIONS`].
    pub fn validate(&self) -> Result<()> {
        validate_iterations(self.iterations).map_err(|reason| Error::Config(reason.into()))
    }
}

/// Shared bound check for configured and stored iteration counts.
pub(crate) fn validate_iterations(iterations: u32) -> std::result::Result<(), String> {
    if iterations == 0 {
        return Err("pbkdf2 iteration count cannot be zero".to_owned());
    }
    if iterations > MAX_PBKDF2_ITERATIONS {
        return Err(format!("pbkdf2 iteration count {iterations} exceeds maximum of {MAX_PBKDF2_ITERATIONS}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magic_spells_format_tag() {
        assert_eq!(MAGIC, [0x55, 0x46, 0x45, 0x4E, 0x43, 0x30, 0x30, 0x31]);
        assert_eq!(PREAMBLE_SIZE, 13);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.iterations, 150_000);
        assert_eq!(config.max_file_size, 100 * 1024 * 1024);
        assert_eq!(config.min_password_length, 12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_zero_iterations() {
        let config = Config::default().with_iterations(0);
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_config_rejects_excessive_iterations() {
        let config = Config::default().with_iterations(MAX_PBKDF2_ITERATIONS + 1);
        assert!(config.validate().is_err());
    }
}
