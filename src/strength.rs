//! Advisory password scoring and strong-password generation.
//!
//! The score is a UI hint only. The engine's sole password gate is the
//! minimum length in [`Config`](crate::config::Config).

use strum::{Display, EnumIter, IntoStaticStr};

use crate::encoding::random_bytes;
use crate::error::{Error, Result};

/// Highest score [`evaluate`] can return.
pub const MAX_SCORE: u8 = 7;

/// Characters drawn from by [`generate_strong_password`].
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+[]{}|;:,.<>?";

/// Strength bands, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, IntoStaticStr)]
pub enum Level {
    #[strum(to_string = "Very Weak")]
    VeryWeak,
    Weak,
    Fair,
    Strong,
    #[strum(to_string = "Very Strong")]
    VeryStrong,
    Excellent,
}

impl Level {
    /// Maps a score to its band: 0-1, 2, 3, 4-5, 6-7.
    ///
    /// `Excellent` sits above the reachable range and is kept for parity
    /// with the other implementations' label table.
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        match score {
            0..=1 => Self::VeryWeak,
            2 => Self::Weak,
            3 => Self::Fair,
            4..=5 => Self::Strong,
            6..=7 => Self::VeryStrong,
            _ => Self::Excellent,
        }
    }

    /// Display color as a hex RGB string.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::VeryWeak => "#FF5252",
            Self::Weak => "#FF9800",
            Self::Fair => "#FFC107",
            Self::Strong => "#8BC34A",
            Self::VeryStrong => "#4CAF50",
            Self::Excellent => "#00E676",
        }
    }
}

/// Result of [`evaluate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strength {
    pub score: u8,
    /// `None` for an empty password.
    pub level: Option<Level>,
    pub percent: u8,
}

impl Strength {
    pub fn label(&self) -> &'static str {
        self.level.map_or("", Into::into)
    }

    pub fn color(&self) -> &'static str {
        self.level.map_or("", Level::color)
    }
}

/// Seven-point additive heuristic: one point each for length of at least
/// 8, 12, 16 and 24 characters, mixed case, a digit, and a symbol.
#[must_use]
pub fn evaluate(password: &str) -> Strength {
    if password.is_empty() {
        return Strength { score: 0, level: None, percent: 0 };
    }

    let length = password.chars().count();
    let checks = [
        length >= 8,
        length >= 12,
        length >= 16,
        password.chars().any(|c| c.is_ascii_lowercase()) && password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
        length >= 24,
    ];

    let score = checks.iter().copied().map(u8::from).sum::<u8>();
    let percent = (u16::from(score) * 100 / u16::from(MAX_SCORE)).min(100);

    Strength { score, level: Some(Level::from_score(score)), percent: u8::try_from(percent).unwrap_or(100) }
}

/// Generates a password of `length` characters drawn uniformly from the
/// built-in charset using the OS generator.
///
/// # Errors
///
/// Returns [`Error::Config`] if `length` is zero and [`Error::Random`] if
/// the OS generator fails.
pub fn generate_strong_password(length: usize) -> Result<String> {
    if length == 0 {
        return Err(Error::Config("password length must be positive".to_owned()));
    }

    // Bytes at or above the largest multiple of the charset size are
    // rejected so every character is equally likely.
    let limit = 256 / CHARSET.len() * CHARSET.len();

    let mut password = String::with_capacity(length);
    while password.len() < length {
        let bytes = random_bytes::<64>()?;
        let remaining = length - password.len();
        password.extend(bytes.iter().map(|&b| usize::from(b)).filter(|&b| b < limit).take(remaining).map(|b| char::from(CHARSET[b % CHARSET.len()])));
    }

    Ok(password)
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::config::{GENERATED_PASSWORD_LENGTH, PASSWORD_MIN_LENGTH};

    #[test]
    fn test_empty_password() {
        let strength = evaluate("");
        assert_eq!(strength.score, 0);
        assert_eq!(strength.label(), "");
        assert_eq!(strength.percent, 0);
    }

    #[test]
    fn test_scores() {
        assert_eq!(evaluate("abc").score, 0);
        assert_eq!(evaluate("abc").label(), "Very Weak");
        assert_eq!(evaluate("abcdefgh").score, 1);
        assert_eq!(evaluate("abcdefgh1").score, 2);
        assert_eq!(evaluate("abcdefgh1").label(), "Weak");
        assert_eq!(evaluate("Abcdefgh1").label(), "Fair");
        assert_eq!(evaluate("Abcdefgh1!").score, 4);
        assert_eq!(evaluate("Abcdefgh1!").label(), "Strong");
        assert_eq!(evaluate("CorrectHorseBattery1!").score, 6);
        assert_eq!(evaluate("CorrectHorseBattery1!").label(), "Very Strong");
    }

    #[test]
    fn test_max_score() {
        let strength = evaluate("CorrectHorseBatteryStaple-2026!");
        assert_eq!(strength.score, MAX_SCORE);
        assert_eq!(strength.percent, 100);
        assert_eq!(strength.label(), "Very Strong");
        assert_eq!(strength.color(), "#4CAF50");
    }

    #[test]
    fn test_percent() {
        assert_eq!(evaluate("abcdefgh").percent, 14);
        assert_eq!(evaluate("Abcdefgh1!").percent, 57);
    }

    #[test]
    fn test_every_level_has_a_label_and_color() {
        for level in Level::iter() {
            assert!(!level.to_string().is_empty());
            assert!(level.color().starts_with('#'));
        }
    }

    #[test]
    fn test_generate_strong_password() {
        let password = generate_strong_password(GENERATED_PASSWORD_LENGTH).unwrap();
        assert_eq!(password.chars().count(), GENERATED_PASSWORD_LENGTH);
        assert!(password.bytes().all(|b| CHARSET.contains(&b)));
        assert!(password.chars().count() >= PASSWORD_MIN_LENGTH);

        assert_ne!(password, generate_strong_password(GENERATED_PASSWORD_LENGTH).unwrap());
    }

    #[test]
    fn test_generate_zero_length_is_config_error() {
        assert!(matches!(generate_strong_password(0), Err(Error::Config(_))));
    }

    #[test]
    fn test_generate_long_password_spans_several_draws() {
        let password = generate_strong_password(500).unwrap();
        assert_eq!(password.len(), 500);
        assert!(password.bytes().all(|b| CHARSET.contains(&b)));
        assert_eq!(generate_strong_password(1).unwrap().len(), 1);
    }
}
