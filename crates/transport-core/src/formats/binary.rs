//! Binary persistence format.
//!
//! The only lossless representation: every field, `year` included, is kept.
//!
//! ## Layout
//!
//! ```text
//! +-------+---------+-------------+-----------+------------------+
//! | magic | version | payload len |  CRC-32   | postcard payload |
//! | TRNS  |   u8    |   u32 LE    |  u32 LE   |                  |
//! +-------+---------+-------------+-----------+------------------+
//!    4        1           4             4        payload len bytes
//! ```
//!
//! The payload is the postcard encoding of `(licensePlate, brand, year)`:
//! two length-prefixed UTF-8 strings followed by a zigzag varint.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TransportError;
use crate::types::Transport;

/// Magic bytes opening every binary file.
pub const BINARY_MAGIC: [u8; 4] = *b"TRNS";

/// Current binary layout version.
pub const BINARY_VERSION: u8 = 1;

/// Size of [`PersistenceHeader`] on disk.
pub const HEADER_LEN: usize = 13;

// =============================================================================
// HEADER
// =============================================================================

/// Fixed-size header preceding the postcard payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistenceHeader {
    /// Layout version, always [`BINARY_VERSION`] when written by this crate.
    pub version: u8,
    /// Exact number of payload bytes following the header.
    pub payload_len: u32,
    /// CRC-32 (IEEE) of the payload bytes.
    pub checksum: u32,
}

impl PersistenceHeader {
    /// Build the header describing `payload`.
    pub fn for_payload(payload: &[u8]) -> Result<Self, TransportError> {
        let payload_len = u32::try_from(payload.len())
            .map_err(|_| TransportError::PayloadTooLarge { len: payload.len() })?;
        Ok(Self {
            version: BINARY_VERSION,
            payload_len,
            checksum: crc32fast::hash(payload),
        })
    }

    /// Encode the header.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[..4].copy_from_slice(&BINARY_MAGIC);
        out[4] = self.version;
        out[5..9].copy_from_slice(&self.payload_len.to_le_bytes());
        out[9..13].copy_from_slice(&self.checksum.to_le_bytes());
        out
    }

    /// Decode and check the header at the start of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransportError> {
        if bytes.len() < HEADER_LEN {
            return Err(TransportError::HeaderTooShort { len: bytes.len() });
        }

        let found = [bytes[0], bytes[1], bytes[2], bytes[3]];
        if found != BINARY_MAGIC {
            return Err(TransportError::InvalidMagic { found });
        }

        let version = bytes[4];
        if version != BINARY_VERSION {
            return Err(TransportError::UnsupportedVersion { version });
        }

        Ok(Self {
            version,
            payload_len: le_u32(bytes, 5),
            checksum: le_u32(bytes, 9),
        })
    }
}

fn le_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

// =============================================================================
// PAYLOAD
// =============================================================================

/// Wire shape of the payload. Field order is part of the layout.
#[derive(Debug, Serialize, Deserialize)]
struct SerializableTransport {
    license_plate: String,
    brand: String,
    year: i32,
}

impl From<&Transport> for SerializableTransport {
    fn from(transport: &Transport) -> Self {
        Self {
            license_plate: transport.license_plate().to_string(),
            brand: transport.brand().to_string(),
            year: transport.year(),
        }
    }
}

impl From<SerializableTransport> for Transport {
    fn from(st: SerializableTransport) -> Self {
        Transport::new(st.license_plate, st.brand, st.year)
    }
}

/// Encode a transport into the binary layout (header + payload).
pub fn transport_to_bytes(transport: &Transport) -> Result<Vec<u8>, TransportError> {
    let payload = postcard::to_allocvec(&SerializableTransport::from(transport))
        .map_err(TransportError::Encode)?;
    let header = PersistenceHeader::for_payload(&payload)?;

    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    bytes.extend_from_slice(&header.to_bytes());
    bytes.extend_from_slice(&payload);
    Ok(bytes)
}

/// Decode a transport from the binary layout.
///
/// Truncated, padded or corrupted input is rejected before the payload is
/// handed to postcard.
pub fn transport_from_bytes(bytes: &[u8]) -> Result<Transport, TransportError> {
    let header = PersistenceHeader::from_bytes(bytes)?;
    let payload = &bytes[HEADER_LEN..];

    let declared = header.payload_len as usize;
    if payload.len() != declared {
        return Err(TransportError::LengthMismatch {
            declared,
            actual: payload.len(),
        });
    }

    let computed = crc32fast::hash(payload);
    if computed != header.checksum {
        return Err(TransportError::ChecksumMismatch {
            expected: header.checksum,
            computed,
        });
    }

    let (wire, rest) = postcard::take_from_bytes::<SerializableTransport>(payload)
        .map_err(TransportError::Decode)?;
    if !rest.is_empty() {
        return Err(TransportError::TrailingBytes { count: rest.len() });
    }

    Ok(wire.into())
}

// =============================================================================
// FILE I/O
// =============================================================================

/// Write the binary representation to `path` in a single open/write/close.
pub fn write_binary(transport: &Transport, path: &Path) -> Result<(), TransportError> {
    let bytes = transport_to_bytes(transport)?;
    std::fs::write(path, bytes).map_err(TransportError::writing(path))
}

/// Read a transport from a file written by [`write_binary`].
pub fn read_binary(path: &Path) -> Result<Transport, TransportError> {
    let bytes = std::fs::read(path).map_err(TransportError::reading(path))?;
    transport_from_bytes(&bytes)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use proptest::prelude::*;

    fn sample() -> Transport {
        Transport::new("ABC123", "Toyota", 2015)
    }

    #[test]
    fn header_layout() {
        let bytes = transport_to_bytes(&sample()).unwrap();
        assert_eq!(&bytes[..4], b"TRNS");
        assert_eq!(bytes[4], BINARY_VERSION);

        let header = PersistenceHeader::from_bytes(&bytes).unwrap();
        assert_eq!(header.payload_len as usize, bytes.len() - HEADER_LEN);
    }

    #[test]
    fn file_roundtrip_preserves_year() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transport.ser");
        let transport = Transport::new("XYZ999", "Honda", 2005);

        write_binary(&transport, &path).unwrap();
        let restored = read_binary(&path).unwrap();

        assert_eq!(restored, transport);
        assert_eq!(restored.year(), 2005);
    }

    #[test]
    fn encoding_is_stable() {
        let a = transport_to_bytes(&sample()).unwrap();
        let b = transport_to_bytes(&sample()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_binary(&dir.path().join("absent.ser")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn write_into_missing_directory_is_io_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nodir").join("transport.ser");
        let err = write_binary(&sample(), &path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = transport_from_bytes(&[]).unwrap_err();
        assert!(matches!(err, TransportError::HeaderTooShort { len: 0 }));
    }

    #[test]
    fn truncated_payload_is_rejected() {
        let bytes = transport_to_bytes(&sample()).unwrap();
        let err = transport_from_bytes(&bytes[..bytes.len() - 1]).unwrap_err();
        assert!(matches!(err, TransportError::LengthMismatch { .. }));
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
    }

    #[test]
    fn appended_bytes_are_rejected() {
        let mut bytes = transport_to_bytes(&sample()).unwrap();
        bytes.push(0);
        let err = transport_from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, TransportError::LengthMismatch { .. }));
    }

    #[test]
    fn corrupted_payload_fails_checksum() {
        let mut bytes = transport_to_bytes(&sample()).unwrap();
        let last = bytes.len() - 2;
        bytes[last] ^= 0xFF;
        let err = transport_from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, TransportError::ChecksumMismatch { .. }));
    }

    #[test]
    fn wrong_magic_is_rejected() {
        let mut bytes = transport_to_bytes(&sample()).unwrap();
        bytes[0] = b'X';
        let err = transport_from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, TransportError::InvalidMagic { .. }));
    }

    #[test]
    fn unknown_version_is_rejected() {
        let mut bytes = transport_to_bytes(&sample()).unwrap();
        bytes[4] = 99;
        let err = transport_from_bytes(&bytes).unwrap_err();
        assert!(matches!(
            err,
            TransportError::UnsupportedVersion { version: 99 }
        ));
    }

    #[test]
    fn payload_with_extra_bytes_is_rejected() {
        let mut payload = postcard::to_allocvec(&SerializableTransport::from(&sample())).unwrap();
        payload.extend_from_slice(&[1, 2, 3]);
        let header = PersistenceHeader::for_payload(&payload).unwrap();

        let mut bytes = header.to_bytes().to_vec();
        bytes.extend_from_slice(&payload);

        let err = transport_from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, TransportError::TrailingBytes { count: 3 }));
    }

    #[test]
    fn incompatible_payload_shape_is_rejected() {
        // A lone string cannot decode as (string, string, i32).
        let payload = postcard::to_allocvec(&"ABC123").unwrap();
        let header = PersistenceHeader::for_payload(&payload).unwrap();

        let mut bytes = header.to_bytes().to_vec();
        bytes.extend_from_slice(&payload);

        let err = transport_from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
    }

    proptest! {
        #[test]
        fn roundtrip_any_record(
            plate in any::<String>(),
            brand in any::<String>(),
            year in any::<i32>(),
        ) {
            let transport = Transport::new(plate, brand, year);
            let bytes = transport_to_bytes(&transport).unwrap();
            prop_assert_eq!(transport_from_bytes(&bytes).unwrap(), transport);
        }
    }
}
