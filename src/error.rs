use thiserror::Error;

/// Errors produced by the UFENC engine.
///
/// Every failure is reported at the step that detected it and never retried
/// internally. [`Error::Decryption`] deliberately does not say whether the
/// password was wrong or the payload was altered.
#[derive(Debug, Error)]
pub enum Error {
    #[error("file too large: {size} bytes exceeds the maximum of {max} bytes")]
    SizeLimit { size: u64, max: u64 },

    #[error("password must be at least {min} characters")]
    WeakPassword { min: usize },

    #[error("invalid file format: {0}")]
    Format(&'static str),

    #[error("unsupported file version v{found} (highest supported is v{supported})")]
    Version { found: u8, supported: u8 },

    #[error("corrupted file header: {0}")]
    Header(String),

    #[error("the encryption key for this file expired at {0}")]
    ExpiredKey(String),

    #[error("decryption failed: wrong password or corrupted file")]
    Decryption,

    #[error("integrity check failed: file may have been tampered with")]
    Integrity,

    #[error("invalid key share: {0}")]
    KeyShare(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("random number generator failed: {0}")]
    Random(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decryption_message_is_undifferentiated() {
        assert_eq!(Error::Decryption.to_string(), "decryption failed: wrong password or corrupted file");
    }

    #[test]
    fn test_version_message() {
        let err = Error::Version { found: 7, supported: 1 };
        assert_eq!(err.to_string(), "unsupported file version v7 (highest supported is v1)");
    }
}
