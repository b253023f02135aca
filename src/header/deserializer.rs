//! Container parsing.
//!
//! Two entry points with different failure contracts:
//!
//! - [`parse_header`] is an optimistic reader for showing file details before
//!   a password is known. It never fails; any structural problem yields
//!   `None`, which callers read as "not one of ours".
//! - [`parse_container`] is the strict path used by decryption. It reports
//!   exactly why a buffer was rejected.
//!
//! The header length is untrusted and is bound-checked before slicing.

use crate::config::{FORMAT_VERSION, HEADER_LENGTH_SIZE, MAGIC, MAGIC_SIZE, PREAMBLE_SIZE, TAG_LEN};
use crate::error::{Error, Result};
use crate::header::Header;

/// The framed regions of a container, before the header is decoded.
struct Frame<'a> {
    version: u8,
    header: &'a [u8],
    payload: &'a [u8],
}

impl<'a> Frame<'a> {
    /// Splits `data` into version, header bytes and payload.
    fn split(data: &'a [u8]) -> Result<Self> {
        let magic = data.get(..MAGIC_SIZE).ok_or(Error::Format("file too short to be a .ufenc file"))?;
        if magic != MAGIC {
            return Err(Error::Format("not a .ufenc file"));
        }

        let version = *data.get(MAGIC_SIZE).ok_or(Error::Format("missing version byte"))?;

        let len_bytes: [u8; HEADER_LENGTH_SIZE] = data
            .get(MAGIC_SIZE + 1..PREAMBLE_SIZE)
            .and_then(|bytes| bytes.try_into().ok())
            .ok_or(Error::Format("truncated header length"))?;
        let header_len = u32::from_be_bytes(len_bytes) as usize;

        let header_end = PREAMBLE_SIZE.checked_add(header_len).filter(|&end| end <= data.len()).ok_or(Error::Format("header length exceeds file size"))?;

        Ok(Self { version, header: &data[PREAMBLE_SIZE..header_end], payload: &data[header_end..] })
    }

    fn decode_header(&self) -> Result<Header> {
        let text = std::str::from_utf8(self.header).map_err(|e| Error::Header(format!("header is not valid utf-8: {e}")))?;
        serde_json::from_str(text).map_err(|e| Error::Header(e.to_string()))
    }
}

/// Reads the header without touching the payload.
///
/// Returns `None` on a bad magic, a truncated length field, a length that
/// runs past the buffer, invalid UTF-8 or invalid JSON. The version byte is
/// not checked here; [`parse_container`] rejects unsupported versions.
#[must_use]
pub fn parse_header(data: &[u8]) -> Option<Header> {
    Frame::split(data).and_then(|frame| frame.decode_header()).ok()
}

/// Parses a whole container into its header and `ciphertext || tag` payload.
///
/// # Errors
///
/// - [`Error::Format`] for a bad magic, a truncated preamble, a header length
///   past the end of the buffer, or a payload shorter than the tag
/// - [`Error::Version`] if the version is newer than [`FORMAT_VERSION`]
/// - [`Error::Header`] if the header bytes are not UTF-8 JSON of the
///   expected shape
pub fn parse_container(data: &[u8]) -> Result<(Header, &[u8])> {
    let frame = Frame::split(data)?;

    if frame.version > FORMAT_VERSION {
        return Err(Error::Version { found: frame.version, supported: FORMAT_VERSION });
    }

    let header = frame.decode_header()?;

    if frame.payload.len() < TAG_LEN {
        return Err(Error::Format("payload shorter than authentication tag"));
    }

    Ok((header, frame.payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::assemble;
    use crate::header::tests::sample_header;

    fn container() -> Vec<u8> {
        assemble(&sample_header(), &[0x5Au8; 32]).unwrap()
    }

    fn with_header_bytes(header: &[u8]) -> Vec<u8> {
        let mut data = MAGIC.to_vec();
        data.push(FORMAT_VERSION);
        data.extend_from_slice(&u32::try_from(header.len()).unwrap().to_be_bytes());
        data.extend_from_slice(header);
        data.extend_from_slice(&[0u8; TAG_LEN]);
        data
    }

    #[test]
    fn test_parse_container_roundtrip() {
        let data = container();
        let (header, payload) = parse_container(&data).unwrap();
        assert_eq!(header, sample_header());
        assert_eq!(payload, &[0x5Au8; 32]);
    }

    #[test]
    fn test_parse_header_idempotent() {
        let data = container();
        let first = parse_header(&data).unwrap();
        let second = parse_header(&data).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_bad_magic() {
        let mut data = container();
        data[0] = b'X';

        assert!(parse_header(&data).is_none());
        assert!(matches!(parse_container(&data), Err(Error::Format(_))));
    }

    #[test]
    fn test_empty_and_short_buffers() {
        for len in [0, 4, MAGIC_SIZE, MAGIC_SIZE + 1, PREAMBLE_SIZE - 1] {
            let data = &container()[..len];
            assert!(parse_header(data).is_none(), "len {len}");
            assert!(matches!(parse_container(data), Err(Error::Format(_))), "len {len}");
        }
    }

    #[test]
    fn test_future_version() {
        let mut data = container();
        data[MAGIC_SIZE] = FORMAT_VERSION + 1;

        assert!(matches!(parse_container(&data), Err(Error::Version { found: 2, supported: 1 })));
        assert!(parse_header(&data).is_some());
    }

    #[test]
    fn test_header_length_past_end() {
        let mut data = container();
        data[MAGIC_SIZE + 1..PREAMBLE_SIZE].copy_from_slice(&u32::MAX.to_be_bytes());

        assert!(parse_header(&data).is_none());
        assert!(matches!(parse_container(&data), Err(Error::Format(_))));
    }

    #[test]
    fn test_invalid_json() {
        let data = with_header_bytes(b"{not json");
        assert!(parse_header(&data).is_none());
        assert!(matches!(parse_container(&data), Err(Error::Header(_))));
    }

    #[test]
    fn test_invalid_utf8() {
        let data = with_header_bytes(&[0xFF, 0xFE, 0xFD]);
        assert!(parse_header(&data).is_none());
        assert!(matches!(parse_container(&data), Err(Error::Header(_))));
    }

    #[test]
    fn test_json_missing_fields() {
        let data = with_header_bytes(br#"{"fileId":"x"}"#);
        assert!(matches!(parse_container(&data), Err(Error::Header(_))));
    }

    #[test]
    fn test_payload_shorter_than_tag() {
        let data = assemble(&sample_header(), &[0u8; TAG_LEN - 1]).unwrap();
        assert!(matches!(parse_container(&data), Err(Error::Format(_))));
        assert!(parse_header(&data).is_some());
    }
}
