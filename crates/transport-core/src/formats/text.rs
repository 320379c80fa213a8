//! Text format: three labelled lines in fixed order.
//!
//! ```text
//! License Plate: ABC123
//! Brand: Toyota
//! Year: 2015
//! ```
//!
//! Reading relies on line position only, labels are not checked.

use std::fmt::Display;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::TransportError;
use crate::types::{Field, Transport};

/// Separator between label and value on every line.
pub const TEXT_SEPARATOR: &str = ": ";

fn line(field: Field, value: impl Display) -> String {
    format!("{}{}{}\n", field.label(), TEXT_SEPARATOR, value)
}

/// Render the three-line text representation.
#[must_use]
pub fn render_text(transport: &Transport) -> String {
    let mut out = line(Field::LicensePlate, transport.license_plate());
    out.push_str(&line(Field::Brand, transport.brand()));
    out.push_str(&line(Field::Year, transport.year()));
    out
}

/// Write the text representation to `path`.
///
/// The write happens in two phases: the file is truncated and receives the
/// plate and brand lines, then it is reopened in append mode for the year
/// line. A failure between the phases leaves a two-line file behind; it is
/// not rolled back, and reading it fails with [`TransportError::MissingLine`].
pub fn write_text(transport: &Transport, path: &Path) -> Result<(), TransportError> {
    let at = TransportError::writing(path);

    {
        let mut writer = BufWriter::new(File::create(path).map_err(&at)?);
        writer
            .write_all(line(Field::LicensePlate, transport.license_plate()).as_bytes())
            .map_err(&at)?;
        writer
            .write_all(line(Field::Brand, transport.brand()).as_bytes())
            .map_err(&at)?;
        writer.flush().map_err(&at)?;
    }

    let mut file = OpenOptions::new().append(true).open(path).map_err(&at)?;
    file.write_all(line(Field::Year, transport.year()).as_bytes())
        .map_err(&at)?;
    Ok(())
}

/// Read a transport from a text file written by [`write_text`].
///
/// Only the first three lines are consumed. A line that is not valid UTF-8
/// fails with [`TransportError::InvalidEncoding`].
pub fn read_text(path: &Path) -> Result<Transport, TransportError> {
    let file = File::open(path).map_err(TransportError::reading(path))?;
    let lines = BufReader::new(file)
        .lines()
        .enumerate()
        .map(|(index, line)| {
            line.map_err(|source| match source.kind() {
                std::io::ErrorKind::InvalidData => {
                    TransportError::InvalidEncoding { line: index + 1 }
                }
                _ => TransportError::on_read(path, source),
            })
        });
    from_lines(lines)
}

/// Parse the text representation from memory.
pub fn parse_text(input: &str) -> Result<Transport, TransportError> {
    from_lines(input.lines().map(|line| Ok(line.to_string())))
}

fn from_lines<I>(mut lines: I) -> Result<Transport, TransportError>
where
    I: Iterator<Item = Result<String, TransportError>>,
{
    let mut next_value = |number: usize, field: Field| -> Result<String, TransportError> {
        let line = lines.next().transpose()?.ok_or(TransportError::MissingLine {
            line: number,
            field: field.label(),
        })?;
        field_value(&line, number, field).map(str::to_string)
    };

    let license_plate = next_value(1, Field::LicensePlate)?;
    let brand = next_value(2, Field::Brand)?;
    let year_text = next_value(3, Field::Year)?;
    let year = year_text
        .parse::<i32>()
        .map_err(|source| TransportError::InvalidYear {
            value: year_text.clone(),
            source,
        })?;

    Ok(Transport::new(license_plate, brand, year))
}

/// The segment between the first separator and the next one, if any.
fn field_value(line: &str, number: usize, field: Field) -> Result<&str, TransportError> {
    line.split(TEXT_SEPARATOR)
        .nth(1)
        .ok_or(TransportError::MissingSeparator {
            line: number,
            field: field.label(),
        })
}

// =============================================================================
// TESTS
// =============================================================================
