//! JSON writer.
//!
//! Only fields exposed to JSON by [`Field::policy`] are written, in
//! declaration order. `year` is never part of the document.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::TransportError;
use crate::types::{Field, Format, Transport};

fn json_value(transport: &Transport, field: Field) -> Value {
    match field {
        Field::LicensePlate => Value::from(transport.license_plate()),
        Field::Brand => Value::from(transport.brand()),
        Field::Year => Value::from(transport.year()),
    }
}

/// Build the JSON object for `transport`, filtered by the field policy.
fn json_document(transport: &Transport) -> Value {
    let object: Map<String, Value> = Format::Json
        .fields()
        .into_iter()
        .map(|field| (field.key().to_string(), json_value(transport, field)))
        .collect();
    Value::Object(object)
}

/// Render the pretty-printed JSON document.
pub fn render_json(transport: &Transport) -> Result<String, TransportError> {
    Ok(serde_json::to_string_pretty(&json_document(transport))?)
}

/// Write the JSON document to `path`, overwriting any previous content.
pub fn write_json(transport: &Transport, path: &Path) -> Result<(), TransportError> {
    let at = TransportError::writing(path);
    let mut writer = BufWriter::new(File::create(path).map_err(&at)?);
    serde_json::to_writer_pretty(&mut writer, &json_document(transport))?;
    writer.flush().map_err(&at)
}
