//! Out-of-band password delivery payload.
//!
//! A key share is `base64(json({k, f, e, u}))`: the cleartext password, the
//! container's file id, the expiry as epoch milliseconds (`0` for none) and
//! a schema marker. It is as sensitive as the password itself and is never
//! written into a container.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::KEY_SHARE_SCHEMA;
use crate::encoding::{from_base64, to_base64};
use crate::error::{Error, Result};
use crate::secret::Secret;

/// Decoded key share.
pub struct KeyShare {
    password: Secret,
    file_id: String,
    expiry: Option<DateTime<Utc>>,
}

/// Wire shape, field order as produced by the browser tool.
#[derive(Serialize)]
struct Wire<'a> {
    k: &'a str,
    f: &'a str,
    e: i64,
    u: u8,
}

/// Owned wire shape for decoding, so escaped JSON strings are accepted.
#[derive(Deserialize)]
struct OwnedWire {
    k: String,
    f: String,
    e: i64,
    u: u8,
}

impl KeyShare {
    #[must_use]
    pub fn new(password: &Secret, file_id: impl Into<String>, expiry: Option<DateTime<Utc>>) -> Self {
        Self { password: Secret::new(password.expose_secret()), file_id: file_id.into(), expiry }
    }

    pub fn password(&self) -> &Secret {
        &self.password
    }

    pub fn file_id(&self) -> &str {
        &self.file_id
    }

    pub const fn expiry(&self) -> Option<DateTime<Utc>> {
        self.expiry
    }

    /// Encodes to the base64 string handed to the recipient.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyShare`] if JSON serialization fails.
    pub fn encode(&self) -> Result<String> {
        let wire = Wire {
            k: self.password.expose_secret(),
            f: &self.file_id,
            e: self.expiry.map_or(0, |expiry| expiry.timestamp_millis()),
            u: KEY_SHARE_SCHEMA,
        };
        let json = serde_json::to_vec(&wire).map_err(|e| Error::KeyShare(e.to_string()))?;
        Ok(to_base64(&json))
    }

    /// Decodes a key share string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyShare`] for invalid base64 or JSON, an
    /// unrecognized schema marker, or an out-of-range expiry.
    pub fn decode(encoded: &str) -> Result<Self> {
        let json = from_base64(encoded.trim()).map_err(|e| Error::KeyShare(format!("invalid base64: {e}")))?;
        let wire: OwnedWire = serde_json::from_slice(&json).map_err(|e| Error::KeyShare(format!("invalid json: {e}")))?;

        if wire.u != KEY_SHARE_SCHEMA {
            return Err(Error::KeyShare(format!("unsupported schema version {}", wire.u)));
        }

        let expiry = match wire.e {
            0 => None,
            millis => Some(DateTime::from_timestamp_millis(millis).ok_or_else(|| Error::KeyShare(format!("expiry out of range: {millis}")))?),
        };

        Ok(Self { password: Secret::from_string(wire.k), file_id: wire.f, expiry })
    }
}

impl std::fmt::Debug for KeyShare {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyShare").field("password", &"[REDACTED]").field("file_id", &self.file_id).field("expiry", &self.expiry).finish()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_encode_wire_format() {
        let share = KeyShare::new(&Secret::new("pw"), "id-1", None);
        let json = from_base64(&share.encode().unwrap()).unwrap();
        assert_eq!(json, br#"{"k":"pw","f":"id-1","e":0,"u":1}"#);
    }

    #[test]
    fn test_decode_with_expiry() {
        let expiry = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let encoded = KeyShare::new(&Secret::new("CorrectHorseBattery1!"), "abc-def", Some(expiry)).encode().unwrap();

        let decoded = KeyShare::decode(&encoded).unwrap();
        assert_eq!(decoded.password().expose_secret(), "CorrectHorseBattery1!");
        assert_eq!(decoded.file_id(), "abc-def");
        assert_eq!(decoded.expiry(), Some(expiry));
    }

    #[test]
    fn test_decode_escaped_password() {
        let encoded = to_base64(br#"{"k":"a\"b\\c","f":"x","e":0,"u":1}"#);
        assert_eq!(KeyShare::decode(&encoded).unwrap().password().expose_secret(), "a\"b\\c");
    }

    #[test]
    fn test_decode_rejects_unknown_schema() {
        let encoded = to_base64(br#"{"k":"pw","f":"x","e":0,"u":2}"#);
        assert!(matches!(KeyShare::decode(&encoded), Err(Error::KeyShare(_))));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(KeyShare::decode("%%%").is_err());
        assert!(KeyShare::decode(&to_base64(b"[]")).is_err());
    }

    #[test]
    fn test_debug_redacts_password() {
        let share = KeyShare::new(&Secret::new("hunter2hunter2"), "id", None);
        assert!(!format!("{share:?}").contains("hunter2"));
    }
}
