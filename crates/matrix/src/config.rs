use crate::backing::BackingConfig;
use crate::color::ColorBands;
use crate::error::{MatrixError, Result};
use crate::label::LabelConfig;
use heatmap_catalog::ChartConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for matrix assembly and rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatrixConfig {
    /// Default inclusive value filter
    pub value_range: (f64, f64),

    /// Canonical domain order; unlisted domains follow in first-seen order
    pub row_order: Vec<String>,

    /// Canonical dimension order; unlisted dimensions follow in first-seen order
    pub column_order: Vec<String>,

    pub backing: BackingConfig,
    pub labels: LabelConfig,
    pub bands: ColorBands,
    pub chart: ChartConfig,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            value_range: (0.0, 100.0),
            row_order: Vec::new(),
            column_order: Vec::new(),
            backing: BackingConfig::default(),
            labels: LabelConfig::default(),
            bands: ColorBands::default(),
            chart: ChartConfig::default(),
        }
    }
}

impl MatrixConfig {
    /// Parse and validate a TOML document; missing keys take defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate().map_err(MatrixError::invalid_config)?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&raw)
    }

    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        let (lo, hi) = self.value_range;
        if lo.is_nan() || hi.is_nan() || lo > hi {
            return Err(format!("value_range ({lo}, {hi}) must have min <= max"));
        }

        if self.backing.topic_field.trim().is_empty() {
            return Err("backing.topic_field must not be empty".to_string());
        }

        self.labels.validate()?;
        self.bands.validate()?;
        self.chart.validate()?;
        Ok(())
    }
}
