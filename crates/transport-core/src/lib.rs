//! # transport-core
//!
//! The Transport record and its four file representations.
//!
//! A [`Transport`] is a vehicle identified by license plate, brand and
//! manufacture year. It can be persisted as:
//!
//! - **text**: three labelled lines, readable back
//! - **binary**: a versioned envelope around a postcard payload, readable back
//! - **JSON**: only the fields exposed to JSON (`year` is left out)
//! - **YAML**: an effective view where `brand` is nulled for pre-2010 vehicles
//!
//! Which field reaches which format is decided by an explicit
//! [`FieldPolicy`] table, see [`Field::policy`].
//!
//! ## Architectural Constraints
//!
//! - No async, no network dependencies (pure Rust)
//! - Every codec opens and closes its own file handle
//! - Errors are surfaced to the caller, never retried or logged here

// =============================================================================
// MODULES
// =============================================================================

pub mod error;
pub mod formats;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types
// =============================================================================

pub use error::{ErrorKind, TransportError};
pub use types::{Field, FieldPolicy, Format, Transport};

// =============================================================================
// RE-EXPORTS: Formats
// =============================================================================

pub use formats::{
    BINARY_MAGIC, BINARY_VERSION, EffectiveYamlView, HEADER_LEN, PersistenceHeader,
    YAML_BRAND_CUTOFF_YEAR, parse_text, read, read_binary, read_text, render_json, render_text,
    render_yaml, transport_from_bytes, transport_to_bytes, write, write_binary, write_json,
    write_text, write_yaml,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Convenience result alias for codec operations.
pub type Result<T> = std::result::Result<T, TransportError>;
