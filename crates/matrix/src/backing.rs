use crate::error::{MatrixError, Result};
use heatmap_catalog::{clean_text, NormalizedKey, RawRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Which catalog axis the topic field of a backing row names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TopicAxis {
    Domain,
    #[default]
    Dimension,
}

/// Shape of the backing values file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackingConfig {
    /// Field holding the row label of each backing row
    pub topic_field: String,

    /// Axis the topic labels belong to; the other fields name the opposite axis
    pub topic_axis: TopicAxis,
}

impl Default for BackingConfig {
    fn default() -> Self {
        Self {
            topic_field: "נושא".to_string(),
            topic_axis: TopicAxis::Dimension,
        }
    }
}

/// Scalar heat-map value per (domain, dimension) cell, loaded independently of the catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackingValues {
    cells: HashMap<(NormalizedKey, NormalizedKey), f64>,
}

impl BackingValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value unless the cell already has one. Returns whether it was inserted.
    pub fn insert(&mut self, domain: NormalizedKey, dimension: NormalizedKey, value: f64) -> bool {
        match self.cells.entry((domain, dimension)) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }

    pub fn get(&self, domain: &NormalizedKey, dimension: &NormalizedKey) -> Option<f64> {
        self.cells
            .get(&(domain.clone(), dimension.clone()))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Build from row-major records: one topic field plus one numeric field per column.
    ///
    /// Rows without a topic and non-numeric cells are skipped; nothing is fabricated.
    pub fn from_rows<'a>(
        rows: impl IntoIterator<Item = &'a RawRecord>,
        config: &BackingConfig,
    ) -> Self {
        let mut values = Self::new();
        let mut skipped = 0usize;

        for (position, row) in rows.into_iter().enumerate() {
            let topic = row
                .get(&config.topic_field)
                .map(value_text)
                .unwrap_or_default();
            if topic.is_empty() {
                log::warn!(
                    "backing row #{position} has no '{}' field; skipped",
                    config.topic_field
                );
                skipped += 1;
                continue;
            }
            let topic = NormalizedKey::new(&topic);

            for (column, cell) in row {
                if column == &config.topic_field {
                    continue;
                }
                let Some(number) = numeric(cell) else {
                    log::warn!("backing cell ({topic}, {column}) is not numeric: {cell}");
                    skipped += 1;
                    continue;
                };
                let column = NormalizedKey::new(column);
                let (domain, dimension) = match config.topic_axis {
                    TopicAxis::Dimension => (column, topic.clone()),
                    TopicAxis::Domain => (topic.clone(), column),
                };
                if !values.insert(domain, dimension, number) {
                    log::warn!("duplicate backing cell for '{topic}'; keeping the first value");
                }
            }
        }

        log::info!("backing values loaded: {} cells, {skipped} skipped", values.len());
        values
    }

    pub fn from_json_str(json: &str, config: &BackingConfig) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        let items = value
            .as_array()
            .ok_or_else(|| MatrixError::invalid_backing("expected a JSON array of rows"))?;
        let rows: Vec<&RawRecord> = items.iter().filter_map(Value::as_object).collect();
        if rows.len() != items.len() {
            log::warn!("{} backing items are not objects", items.len() - rows.len());
        }
        Ok(Self::from_rows(rows, config))
    }

    pub fn load(path: impl AsRef<Path>, config: &BackingConfig) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content, config)
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => clean_text(s),
        Value::Null => String::new(),
        other => clean_text(&other.to_string()),
    }
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => clean_text(s).parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}
