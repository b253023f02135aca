//! The `UFENC001` JSON header and its binary framing.
//!
//! ```text
//! offset 0   : 8 bytes   magic "UFENC001"
//! offset 8   : 1 byte    version
//! offset 9   : 4 bytes   header length (u32, big-endian)
//! offset 13  : N bytes   UTF-8 JSON header
//! offset 13+N: rest      ciphertext || 16-byte tag
//! ```
//!
//! The header is written by three independent implementations, so field
//! names, their order and the timestamp format follow the existing files
//! exactly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{ALGORITHM, IV_LEN, KDF, SALT_LEN, TAG_LEN, validate_iterations};
use crate::encoding::{from_base64, to_base64};
use crate::error::{Error, Result};
use crate::header::metadata::Metadata;

pub mod deserializer;
pub mod metadata;
pub mod serializer;

pub use deserializer::{parse_container, parse_header};
pub use serializer::assemble;

/// Everything a reader needs besides the password, plus provenance for
/// restoring the plaintext's name and type.
///
/// Fields are fixed when the header is built; there is no mutation path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    file_id: String,
    original_file_name: String,
    original_extension: String,
    original_size: u64,
    mime_type: String,
    salt: String,
    iv: String,
    auth_tag: String,
    pbkdf2_iterations: u32,
    encrypted_at: String,
    #[serde(default, with = "timestamp::option")]
    key_expiry: Option<DateTime<Utc>>,
    original_file_hash: String,
    algorithm: String,
    kdf: String,
}

/// Inputs for [`Header::new`], gathered by the engine during encryption.
pub struct HeaderParams<'a> {
    pub file_id: String,
    pub metadata: Metadata,
    pub salt: &'a [u8; SALT_LEN],
    pub iv: &'a [u8; IV_LEN],
    pub auth_tag: &'a [u8; TAG_LEN],
    pub iterations: u32,
    pub encrypted_at: DateTime<Utc>,
    pub key_expiry: Option<DateTime<Utc>>,
    pub content_hash: String,
}

impl Header {
    #[must_use]
    pub fn new(params: HeaderParams<'_>) -> Self {
        let HeaderParams { file_id, metadata, salt, iv, auth_tag, iterations, encrypted_at, key_expiry, content_hash } = params;

        Self {
            file_id,
            original_file_name: metadata.name,
            original_extension: metadata.extension,
            original_size: metadata.size,
            mime_type: metadata.mime_type,
            salt: to_base64(salt),
            iv: to_base64(iv),
            auth_tag: to_base64(auth_tag),
            pbkdf2_iterations: iterations,
            encrypted_at: timestamp::format(&encrypted_at),
            key_expiry,
            original_file_hash: content_hash,
            algorithm: ALGORITHM.to_owned(),
            kdf: KDF.to_owned(),
        }
    }

    pub fn file_id(&self) -> &str {
        &self.file_id
    }

    pub fn original_file_name(&self) -> &str {
        &self.original_file_name
    }

    pub fn original_extension(&self) -> &str {
        &self.original_extension
    }

    pub const fn original_size(&self) -> u64 {
        self.original_size
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub const fn pbkdf2_iterations(&self) -> u32 {
        self.pbkdf2_iterations
    }

    /// The encryption time, or `None` if the stored value is not a
    /// recognizable timestamp. The field is informational, so an odd value
    /// never blocks decryption.
    pub fn encrypted_at(&self) -> Option<DateTime<Utc>> {
        timestamp::parse(&self.encrypted_at).ok()
    }

    /// The encryption time exactly as stored in the header.
    pub fn encrypted_at_raw(&self) -> &str {
        &self.encrypted_at
    }

    pub const fn key_expiry(&self) -> Option<DateTime<Utc>> {
        self.key_expiry
    }

    pub fn original_file_hash(&self) -> &str {
        &self.original_file_hash
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn kdf(&self) -> &str {
        &self.kdf
    }

    /// The base64 tag copy. Informational only; decryption uses the tag
    /// appended to the payload.
    pub fn auth_tag(&self) -> &str {
        &self.auth_tag
    }

    /// True when a key expiry is set and `now` is past it.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.key_expiry.is_some_and(|expiry| now > expiry)
    }

    /// Decodes the raw key-derivation salt.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Header`] if the field is not base64 of 32 bytes.
    pub fn salt_bytes(&self) -> Result<[u8; SALT_LEN]> {
        decode_fixed("salt", &self.salt)
    }

    /// Decodes the AES-GCM nonce.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Header`] if the field is not base64 of 12 bytes.
    pub fn iv_bytes(&self) -> Result<[u8; IV_LEN]> {
        decode_fixed("iv", &self.iv)
    }

    /// Checks that this implementation can process the header's parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Header`] for an unknown algorithm or KDF, or an
    /// iteration count outside the accepted range.
    pub fn validate(&self) -> Result<()> {
        if self.algorithm != ALGORITHM {
            return Err(Error::Header(format!("unsupported algorithm: {}", self.algorithm)));
        }
        if self.kdf != KDF {
            return Err(Error::Header(format!("unsupported kdf: {}", self.kdf)));
        }
        validate_iterations(self.pbkdf2_iterations).map_err(Error::Header)
    }

    /// Compact JSON, the exact bytes framed into the container.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Header`] if serialization fails.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| Error::Header(e.to_string()))
    }
}

fn decode_fixed<const N: usize>(field: &str, encoded: &str) -> Result<[u8; N]> {
    let bytes = from_base64(encoded).map_err(|e| Error::Header(format!("invalid {field}: {e}")))?;
    bytes.try_into().map_err(|bytes: Vec<u8>| Error::Header(format!("invalid {field} length: expected {N} bytes, got {}", bytes.len())))
}

/// ISO-8601 with millisecond precision and a `Z` suffix, matching
/// JavaScript's `Date.prototype.toISOString`.
///
/// Reading is lenient: a timestamp without an offset is taken as UTC.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
    use serde::Serializer;

    const LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    pub fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(value))
    }

    pub fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .or_else(|_| NaiveDateTime::parse_from_str(raw, LOCAL_FORMAT).map(|naive| naive.and_utc()))
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        #[allow(clippy::ref_option)]
        pub fn serialize<S: Serializer>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error> {
            match value {
                Some(value) => super::serialize(value, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error> {
            Option::<String>::deserialize(deserializer)?.map(|raw| super::parse(&raw).map_err(serde::de::Error::custom)).transpose()
        }
    }
}
