//! # Types Module
//!
//! The Transport record and the metadata describing which of its fields
//! reach which file format.

use std::fmt;
use std::str::FromStr;

use crate::error::TransportError;

// =============================================================================
// TRANSPORT RECORD
// =============================================================================

/// A vehicle identified by license plate, brand and manufacture year.
///
/// Immutable once constructed: there are accessors but no setters.
/// No validation is performed, any text and any integer is accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Transport {
    license_plate: String,
    brand: String,
    year: i32,
}

impl Transport {
    /// Create a new transport record.
    #[must_use]
    pub fn new(license_plate: impl Into<String>, brand: impl Into<String>, year: i32) -> Self {
        Self {
            license_plate: license_plate.into(),
            brand: brand.into(),
            year,
        }
    }

    /// The license plate.
    #[must_use]
    pub fn license_plate(&self) -> &str {
        &self.license_plate
    }

    /// The brand.
    #[must_use]
    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// The manufacture year.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.license_plate, self.brand, self.year)
    }
}

// =============================================================================
// FORMAT
// =============================================================================

/// The four file representations of a [`Transport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Format {
    Text,
    Binary,
    Json,
    Yaml,
}

impl Format {
    /// All formats, in the order the demo driver runs them.
    pub const ALL: [Format; 4] = [Format::Text, Format::Json, Format::Yaml, Format::Binary];

    /// Lowercase name, as accepted on the command line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Format::Text => "text",
            Format::Binary => "binary",
            Format::Json => "json",
            Format::Yaml => "yaml",
        }
    }

    /// Whether a record can be read back from this format.
    #[must_use]
    pub fn supports_read(self) -> bool {
        matches!(self, Format::Text | Format::Binary)
    }

    /// Fields carried by this format, in declaration order.
    #[must_use]
    pub fn fields(self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| field.included_in(self))
            .collect()
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = TransportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Format::Text),
            "binary" | "bin" | "ser" => Ok(Format::Binary),
            "json" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            other => Err(TransportError::UnknownFormat {
                name: other.to_string(),
            }),
        }
    }
}

// =============================================================================
// FIELD POLICY
// =============================================================================

/// A field of the [`Transport`] record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    LicensePlate,
    Brand,
    Year,
}

/// Per-format exposure flags for a single field.
///
/// This replaces annotation-driven field filtering with a table that can be
/// inspected and tested directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPolicy {
    pub text: bool,
    pub binary: bool,
    pub json: bool,
    pub yaml: bool,
}

impl FieldPolicy {
    /// A field present in every format.
    pub const EVERYWHERE: FieldPolicy = FieldPolicy {
        text: true,
        binary: true,
        json: true,
        yaml: true,
    };

    /// Whether the field is written by `format`.
    #[must_use]
    pub fn includes(&self, format: Format) -> bool {
        match format {
            Format::Text => self.text,
            Format::Binary => self.binary,
            Format::Json => self.json,
            Format::Yaml => self.yaml,
        }
    }
}

impl Field {
    /// All fields in declaration order.
    pub const ALL: [Field; 3] = [Field::LicensePlate, Field::Brand, Field::Year];

    /// Key used in JSON and YAML documents.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Field::LicensePlate => "licensePlate",
            Field::Brand => "brand",
            Field::Year => "year",
        }
    }

    /// Label used in the text format.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Field::LicensePlate => "License Plate",
            Field::Brand => "Brand",
            Field::Year => "Year",
        }
    }

    /// Exposure of this field across the four formats.
    ///
    /// `brand` is listed as present in YAML: the pre-2010 rule nulls its
    /// value but keeps the key (see [`crate::EffectiveYamlView`]).
    #[must_use]
    pub fn policy(self) -> FieldPolicy {
        match self {
            Field::LicensePlate | Field::Brand => FieldPolicy::EVERYWHERE,
            Field::Year => FieldPolicy {
                json: false,
                ..FieldPolicy::EVERYWHERE
            },
        }
    }

    /// Shorthand for `self.policy().includes(format)`.
    #[must_use]
    pub fn included_in(self, format: Format) -> bool {
        self.policy().includes(format)
    }
}

// =============================================================================
// TESTS
// =============================================================================
