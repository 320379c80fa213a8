//! YAML writer.
//!
//! The document is produced from an [`EffectiveYamlView`], not from the
//! record itself: vehicles built before [`YAML_BRAND_CUTOFF_YEAR`] have
//! their brand replaced by null. The key stays in the mapping.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::TransportError;
use crate::types::Transport;

/// First year for which the brand is written to YAML.
pub const YAML_BRAND_CUTOFF_YEAR: i32 = 2010;

/// Transient view of a [`Transport`] with the YAML business rule applied.
///
/// Borrows from the record; the record itself is never modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveYamlView<'a> {
    pub license_plate: &'a str,
    pub brand: Option<&'a str>,
    pub year: i32,
}

impl<'a> EffectiveYamlView<'a> {
    /// Apply the brand rule: `None` when `year < 2010`, unchanged otherwise.
    #[must_use]
    pub fn derive(transport: &'a Transport) -> Self {
        let brand = (transport.year() >= YAML_BRAND_CUTOFF_YEAR).then_some(transport.brand());
        Self {
            license_plate: transport.license_plate(),
            brand,
            year: transport.year(),
        }
    }
}

impl<'a> From<&'a Transport> for EffectiveYamlView<'a> {
    fn from(transport: &'a Transport) -> Self {
        Self::derive(transport)
    }
}

/// Render the block-style YAML document.
pub fn render_yaml(transport: &Transport) -> Result<String, TransportError> {
    Ok(serde_yaml::to_string(&EffectiveYamlView::derive(transport))?)
}

/// Write the YAML document to `path`, overwriting any previous content.
pub fn write_yaml(transport: &Transport, path: &Path) -> Result<(), TransportError> {
    let at = TransportError::writing(path);
    let mut writer = BufWriter::new(File::create(path).map_err(&at)?);
    serde_yaml::to_writer(&mut writer, &EffectiveYamlView::derive(transport))?;
    writer.flush().map_err(&at)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_yaml::Value;

    #[test]
    fn old_vehicle_has_null_brand() {
        let yaml = render_yaml(&Transport::new("XYZ999", "Honda", 2005)).unwrap();

        assert!(yaml.contains("licensePlate: XYZ999"));
        assert!(yaml.contains("year: 2005"));
        assert!(!yaml.contains("Honda"));

        let doc: Value = serde_yaml::from_str(&yaml).unwrap();
        let mapping = doc.as_mapping().unwrap();
        assert!(mapping.contains_key("brand"));
        assert!(mapping.get("brand").unwrap().is_null());
    }

    #[test]
    fn recent_vehicle_keeps_brand() {
        let yaml = render_yaml(&Transport::new("XYZ999", "Honda", 2012)).unwrap();
        assert!(yaml.contains("licensePlate: XYZ999"));
        assert!(yaml.contains("brand: Honda"));
        assert!(yaml.contains("year: 2012"));
    }

    #[test]
    fn cutoff_year_is_inclusive() {
        let at_cutoff = Transport::new("A", "B", YAML_BRAND_CUTOFF_YEAR);
        let before = Transport::new("A", "B", YAML_BRAND_CUTOFF_YEAR - 1);
        assert_eq!(EffectiveYamlView::derive(&at_cutoff).brand, Some("B"));
        assert_eq!(EffectiveYamlView::derive(&before).brand, None);
    }

    #[test]
    fn derive_leaves_record_untouched() {
        let transport = Transport::new("XYZ999", "Honda", 2005);
        let view = EffectiveYamlView::from(&transport);
        assert_eq!(view.brand, None);
        assert_eq!(transport.brand(), "Honda");
    }

    #[test]
    fn document_is_block_style_in_field_order() {
        let yaml = render_yaml(&Transport::new("ABC123", "Toyota", 2015)).unwrap();
        assert_eq!(yaml, "licensePlate: ABC123\nbrand: Toyota\nyear: 2015\n");
        assert!(!yaml.contains('{'));
    }

    #[test]
    fn write_creates_parseable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transport.yaml");
        write_yaml(&Transport::new("ABC123", "Toyota", 2015), &path).unwrap();

        let doc: Value = serde_yaml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(doc["licensePlate"], Value::from("ABC123"));
        assert_eq!(doc["year"], Value::from(2015));
    }
}
