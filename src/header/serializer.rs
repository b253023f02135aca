use crate::config::{FORMAT_VERSION, MAGIC, PREAMBLE_SIZE};
use crate::error::{Error, Result};
use crate::header::Header;

/// Lays out magic, version, big-endian header length, JSON header and
/// payload, in that order and without padding.
///
/// # Errors
///
/// Returns [`Error::Header`] if the header cannot be serialized or its
/// length does not fit the 32-bit length field.
pub fn assemble(header: &Header, payload: &[u8]) -> Result<Vec<u8>> {
    let header_bytes = header.to_json()?;
    let header_len = u32::try_from(header_bytes.len()).map_err(|_| Error::Header(format!("header too large: {} bytes", header_bytes.len())))?;

    let mut container = Vec::with_capacity(PREAMBLE_SIZE + header_bytes.len() + payload.len());
    container.extend_from_slice(&MAGIC);
    container.push(FORMAT_VERSION);
    container.extend_from_slice(&header_len.to_be_bytes());
    container.extend_from_slice(&header_bytes);
    container.extend_from_slice(payload);

    Ok(container)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HEADER_LENGTH_SIZE, MAGIC_SIZE};
    use crate::header::tests::sample_header;

    #[test]
    fn test_assemble_layout() {
        let header = sample_header();
        let payload = [0xAAu8; 26];
        let container = assemble(&header, &payload).unwrap();
        let json = header.to_json().unwrap();

        assert_eq!(&container[..MAGIC_SIZE], b"UFENC001");
        assert_eq!(container[MAGIC_SIZE], 1);

        let len_bytes: [u8; HEADER_LENGTH_SIZE] = container[MAGIC_SIZE + 1..PREAMBLE_SIZE].try_into().unwrap();
        assert_eq!(u32::from_be_bytes(len_bytes) as usize, json.len());

        assert_eq!(&container[PREAMBLE_SIZE..PREAMBLE_SIZE + json.len()], json.as_slice());
        assert_eq!(&container[PREAMBLE_SIZE + json.len()..], &payload);
        assert_eq!(container.len(), PREAMBLE_SIZE + json.len() + payload.len());
    }
}
