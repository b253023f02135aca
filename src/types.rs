//! Operation labels shared by the command line and the terminal UI.

use strum::Display;

/// Which direction a command transforms a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ProcessorMode {
    Encrypt,
    Decrypt,
}

impl ProcessorMode {
    /// Past-tense verb for success messages.
    #[inline]
    #[must_use]
    pub const fn past_tense(self) -> &'static str {
        match self {
            Self::Encrypt => "encrypted",
            Self::Decrypt => "decrypted",
        }
    }
}

/// An operation in progress, labelled for the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Processing {
    #[strum(to_string = "Encrypting")]
    Encryption,
    #[strum(to_string = "Decrypting")]
    Decryption,
}

impl Processing {
    #[inline]
    #[must_use]
    pub const fn mode(self) -> ProcessorMode {
        match self {
            Self::Encryption => ProcessorMode::Encrypt,
            Self::Decryption => ProcessorMode::Decrypt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(ProcessorMode::Encrypt.to_string(), "Encrypt");
        assert_eq!(Processing::Decryption.to_string(), "Decrypting");
        assert_eq!(Processing::Decryption.mode().past_tense(), "decrypted");
    }
}
