use crate::error::{CatalogError, Result};
use crate::record::{MeasurementRecord, RawRecord};
use serde_json::Value;
use std::path::Path;

/// Parse a catalog JSON array into normalized records, preserving order.
///
/// Array items that are not objects are skipped with a warning.
pub fn records_from_str(json: &str) -> Result<Vec<MeasurementRecord>> {
    let value: Value = serde_json::from_str(json)?;
    records_from_value(&value)
}

pub fn records_from_value(value: &Value) -> Result<Vec<MeasurementRecord>> {
    let items = value
        .as_array()
        .ok_or_else(|| CatalogError::invalid_catalog("expected a JSON array of records"))?;

    let mut records = Vec::with_capacity(items.len());
    for (position, item) in items.iter().enumerate() {
        match item {
            Value::Object(map) => records.push(MeasurementRecord::from_raw(map)),
            other => log::warn!("skipping catalog item #{position}: expected object, got {other}"),
        }
    }
    Ok(records)
}

pub fn records_from_raw<'a>(raw: impl IntoIterator<Item = &'a RawRecord>) -> Vec<MeasurementRecord> {
    raw.into_iter().map(MeasurementRecord::from_raw).collect()
}

/// Read and parse a catalog file.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<MeasurementRecord>> {
    let content = std::fs::read_to_string(path.as_ref())?;
    log::debug!("read catalog {} ({} bytes)", path.as_ref().display(), content.len());
    records_from_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::fields;
    use std::io::Write;

    #[test]
    fn parses_array_and_skips_non_objects() {
        let json = format!(
            r#"[{{"{}": "בריאות", "{}": "ידע"}}, 3, {{"{}": "צרכנות"}}]"#,
            fields::DOMAIN,
            fields::BEHAVIOR_ATTITUDE_KNOWLEDGE,
            fields::DOMAIN
        );
        let records = records_from_str(&json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].dimension, "ידע");
        assert_eq!(records[1].domain, "צרכנות");
    }

    #[test]
    fn normalizes_in_memory_maps() {
        let mut raw = RawRecord::new();
        raw.insert(fields::DOMAIN.to_string(), Value::from("  Health "));
        raw.insert(fields::CHARACTERISTIC.to_string(), Value::from("Usage"));
        let records = records_from_raw([&raw]);
        assert_eq!(records[0].domain, "Health");
        assert_eq!(records[0].dimension, "Usage");
    }

    #[test]
    fn rejects_non_array() {
        let err = records_from_str(r#"{"a": 1}"#).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidCatalog(_)));

        let err = records_from_str("not json").unwrap_err();
        assert!(matches!(err, CatalogError::JsonError(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"{}": "x"}}]"#, fields::DOMAIN).unwrap();
        let records = load_records(file.path()).unwrap();
        assert_eq!(records.len(), 1);

        let missing = load_records(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(CatalogError::IoError(_))));
    }
}
