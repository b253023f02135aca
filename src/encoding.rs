//! Primitive helpers shared by every layer: secure randomness, base64
//! codecs, byte-size formatting and file identity generation.

use base64::{DecodeError, Engine as _};
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use rand::rand_core::{OsRng, TryRngCore};

use crate::error::{Error, Result};

/// Fills an `N`-byte array from the operating system's CSPRNG.
///
/// # Errors
///
/// Returns [`Error::Random`] if the OS generator is unavailable.
pub fn random_bytes<const N: usize>() -> Result<[u8; N]> {
    let mut bytes = [0u8; N];
    OsRng.try_fill_bytes(&mut bytes).map_err(|e| Error::Random(e.to_string()))?;
    Ok(bytes)
}

/// Standard, padded base64 as used in the container header.
#[must_use]
pub fn to_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decodes standard base64.
///
/// # Errors
///
/// Returns the decoder's error when `encoded` is not valid base64.
pub fn from_base64(encoded: &str) -> std::result::Result<Vec<u8>, DecodeError> {
    STANDARD.decode(encoded)
}

/// URL-safe base64 without padding.
#[must_use]
pub fn to_base64url(data: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(data)
}

/// Formats a byte count the way the upload form shows it.
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    if bytes < bytesize::KIB {
        return format!("{bytes} B");
    }

    #[allow(clippy::cast_precision_loss)]
    let size = bytes as f64;
    if bytes < bytesize::MIB {
        return format!("{:.1} KB", size / bytesize::KIB as f64);
    }

    format!("{:.2} MB", size / bytesize::MIB as f64)
}

/// Generates a fresh container identity: base36 epoch millis, a dash, and
/// eight random URL-safe characters.
///
/// Uniqueness only; the value is public and not security sensitive.
///
/// # Errors
///
/// Returns [`Error::Random`] if the OS generator is unavailable.
pub fn generate_file_id() -> Result<String> {
    let millis = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default();
    let suffix: String = to_base64url(&random_bytes::<8>()?).chars().take(8).collect();
    Ok(format!("{}-{suffix}", to_base36(millis)))
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if value == 0 {
        return "0".to_owned();
    }

    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    out.into_iter().map(char::from).collect()
}
