//! # Formats Module
//!
//! The four file representations of a [`Transport`].
//!
//! This module contains:
//! - Text format (three labelled lines, two-phase write)
//! - Binary persistence format (header + postcard)
//! - JSON writer (exposed fields only)
//! - YAML writer (effective view, block style)
//!
//! The codecs are independent of each other. Each write or read opens and
//! closes its own file handle and holds no state between calls.

mod binary;
mod json;
mod text;
mod yaml;

pub use binary::*;
pub use json::*;
pub use text::*;
pub use yaml::*;

use std::path::Path;

use crate::error::TransportError;
use crate::types::{Format, Transport};

/// Write `transport` to `path` in the given format.
pub fn write(format: Format, transport: &Transport, path: &Path) -> Result<(), TransportError> {
    match format {
        Format::Text => write_text(transport, path),
        Format::Binary => write_binary(transport, path),
        Format::Json => write_json(transport, path),
        Format::Yaml => write_yaml(transport, path),
    }
}

/// Read a transport from `path` in the given format.
///
/// Only text and binary can be read back; JSON and YAML are lossy by
/// construction and fail with [`TransportError::Unsupported`].
pub fn read(format: Format, path: &Path) -> Result<Transport, TransportError> {
    match format {
        Format::Text => read_text(path),
        Format::Binary => read_binary(path),
        Format::Json | Format::Yaml => Err(TransportError::Unsupported {
            format,
            operation: "read",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn every_format_writes_its_own_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let transport = Transport::new("ABC123", "Toyota", 2015);

        for format in Format::ALL {
            let path = dir.path().join(format!("transport.{}", format.name()));
            assert!(write(format, &transport, &path).is_ok());
            assert!(path.exists());
        }
    }

    #[test]
    fn readable_formats_roundtrip_through_dispatch() {
        let dir = tempfile::tempdir().expect("temp dir");
        let transport = Transport::new("ABC123", "Toyota", 2015);

        for format in Format::ALL.into_iter().filter(|f| f.supports_read()) {
            let path = dir.path().join(format.name());
            assert!(write(format, &transport, &path).is_ok());
            assert_eq!(read(format, &path).ok(), Some(transport.clone()));
        }
    }

    #[test]
    fn reading_json_or_yaml_is_unsupported() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("transport.json");
        let transport = Transport::new("ABC123", "Toyota", 2015);
        assert!(write_json(&transport, &path).is_ok());

        for format in [Format::Json, Format::Yaml] {
            let err = read(format, &path).err().map(|e| e.kind());
            assert_eq!(err, Some(ErrorKind::Unsupported));
        }
    }
}
