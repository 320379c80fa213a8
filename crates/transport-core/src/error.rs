//! Error types for Transport encoding/decoding and file I/O.

use std::num::ParseIntError;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::types::Format;

/// Coarse classification of a [`TransportError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Target file missing on read.
    NotFound,
    /// Text or binary content that cannot be decoded into a record.
    MalformedInput,
    /// Underlying filesystem failure (permissions, disk full, ...).
    Io,
    /// Operation not offered by the requested format.
    Unsupported,
}

impl ErrorKind {
    /// Short lowercase name, used in log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not-found",
            ErrorKind::MalformedInput => "malformed-input",
            ErrorKind::Io => "io-failure",
            ErrorKind::Unsupported => "unsupported",
        }
    }
}

/// Error raised by a codec operation.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Text format ===
    #[error("line {line} is not valid UTF-8")]
    InvalidEncoding { line: usize },

    #[error("line {line} ({field}) is missing: not enough data")]
    MissingLine { line: usize, field: &'static str },

    #[error("line {line} ({field}) has no \": \" separator")]
    MissingSeparator { line: usize, field: &'static str },

    #[error("year {value:?} is not a valid integer: {source}")]
    InvalidYear {
        value: String,
        #[source]
        source: ParseIntError,
    },

    // === Binary format ===
    #[error("binary header too short: {len} bytes")]
    HeaderTooShort { len: usize },

    #[error("invalid magic bytes: expected TRNS, found {found:?}")]
    InvalidMagic { found: [u8; 4] },

    #[error("unsupported binary version: {version}")]
    UnsupportedVersion { version: u8 },

    #[error("payload length {actual} doesn't match declared {declared}")]
    LengthMismatch { declared: usize, actual: usize },

    #[error("payload checksum mismatch: expected {expected:#010x}, computed {computed:#010x}")]
    ChecksumMismatch { expected: u32, computed: u32 },

    #[error("payload encode failed: {0}")]
    Encode(#[source] postcard::Error),

    #[error("payload decode failed: {0}")]
    Decode(#[source] postcard::Error),

    #[error("{count} trailing bytes after payload")]
    TrailingBytes { count: usize },

    #[error("payload of {len} bytes exceeds the u32 length field")]
    PayloadTooLarge { len: usize },

    // === Structured writers ===
    #[error("JSON encode failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML encode failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // === Dispatch ===
    #[error("{format} format does not support {operation}")]
    Unsupported {
        format: Format,
        operation: &'static str,
    },

    #[error("unknown format: {name}")]
    UnknownFormat { name: String },
}

impl TransportError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TransportError::NotFound { .. } => ErrorKind::NotFound,
            TransportError::Io { .. }
            | TransportError::Encode(_)
            | TransportError::Json(_)
            | TransportError::Yaml(_) => ErrorKind::Io,
            TransportError::Unsupported { .. } | TransportError::UnknownFormat { .. } => {
                ErrorKind::Unsupported
            }
            _ => ErrorKind::MalformedInput,
        }
    }

    /// Wrap an I/O error raised while reading `path`.
    ///
    /// A missing file becomes [`TransportError::NotFound`].
    pub(crate) fn on_read(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            TransportError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            TransportError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// Wrap an I/O error raised while writing `path`. Always [`ErrorKind::Io`].
    pub(crate) fn on_write(path: &Path, source: std::io::Error) -> Self {
        TransportError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// `map_err` adapter for read paths.
    pub(crate) fn reading(path: &Path) -> impl Fn(std::io::Error) -> Self + '_ {
        move |source| Self::on_read(path, source)
    }

    /// `map_err` adapter for write paths.
    pub(crate) fn writing(path: &Path) -> impl Fn(std::io::Error) -> Self + '_ {
        move |source| Self::on_write(path, source)
    }
}
