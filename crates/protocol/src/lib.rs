use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const PAYLOAD_SCHEMA_VERSION: u32 = 1;

/// Matrix ready for a heat-map widget: `x` labels columns, `y` labels rows, `z[row][col]`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct MatrixPayload {
    pub schema_version: u32,
    pub row_keys: Vec<String>,
    pub column_keys: Vec<String>,
    /// Decorated column labels (markup)
    pub x: Vec<String>,
    /// Decorated row labels (markup)
    pub y: Vec<String>,
    pub z: Vec<Vec<Option<f64>>>,
    /// Color band name per cell; `None` where the value is null
    pub bands: Vec<Vec<Option<String>>>,
    pub value_range: [f64; 2],
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct ChartPayload {
    pub kind: String,
    pub categories: Vec<String>,
    pub series: Vec<f64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct MetadataPayload {
    pub measurement_method: String,
    pub survey_item: String,
    pub original_item: String,
    pub source: String,
    pub link: String,
    pub notes: String,
}

/// Detail view for a clicked cell. `found == false` means "data not available".
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct CellDetailPayload {
    pub schema_version: u32,
    pub found: bool,
    pub title: String,
    pub domain: Option<String>,
    pub dimension: Option<String>,
    /// `canonical` or `swapped`
    pub lookup_order: Option<String>,
    pub metadata: Option<MetadataPayload>,
    pub chart: Option<ChartPayload>,
}

impl CellDetailPayload {
    pub fn not_found(title: impl Into<String>) -> Self {
        Self {
            schema_version: PAYLOAD_SCHEMA_VERSION,
            found: false,
            title: title.into(),
            domain: None,
            dimension: None,
            lookup_order: None,
            metadata: None,
            chart: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct ChecklistOptionPayload {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct ChecklistPayload {
    pub options: Vec<ChecklistOptionPayload>,
    pub selected: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct LabelPayload {
    pub key: String,
    pub markup: String,
    pub plain: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    pub hint: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            hint: None,
        }
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

pub fn serialize_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(Into::into)
}

pub fn serialize_json_pretty<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(Into::into)
}

/// JSON schema of a payload type.
pub fn schema_json<T: JsonSchema>() -> Result<String> {
    let schema = schemars::schema_for!(T);
    serde_json::to_string_pretty(&schema).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_payload_is_empty() {
        let payload = CellDetailPayload::not_found("x, y");
        assert!(!payload.found);
        assert!(payload.chart.is_none());
        let json = serialize_json(&payload).unwrap();
        assert!(json.contains(r#""found":false"#));
    }

    #[test]
    fn matrix_payload_serializes_nulls() {
        let payload = MatrixPayload {
            schema_version: PAYLOAD_SCHEMA_VERSION,
            row_keys: vec!["r".to_string()],
            column_keys: vec!["a".to_string(), "b".to_string()],
            x: vec!["a".to_string(), "b".to_string()],
            y: vec!["r".to_string()],
            z: vec![vec![Some(1.5), None]],
            bands: vec![vec![Some("cold".to_string()), None]],
            value_range: [0.0, 100.0],
        };
        let json = serialize_json(&payload).unwrap();
        assert!(json.contains(r#""z":[[1.5,null]]"#));
        let back: MatrixPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back, payload);
    }

    #[test]
    fn schema_mentions_fields() {
        let schema = schema_json::<CellDetailPayload>().unwrap();
        assert!(schema.contains("lookup_order"));
        let envelope = ErrorEnvelope::new("bad_input", "oops").with_hint("check the path");
        assert_eq!(envelope.hint.as_deref(), Some("check the path"));
    }
}
