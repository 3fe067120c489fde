use serde::{Deserialize, Serialize};

/// Configuration for detail chart synthesis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Placeholder categories for bar/pie charts without extracted values
    pub default_categories: Vec<String>,

    /// Number of points in a scatter chart
    pub scatter_points: usize,

    /// Length of the index axis of a line chart without extracted values
    pub line_points: usize,

    /// Inclusive range of mock bar/pie/line values
    pub value_range: (f64, f64),

    /// Inclusive range of generated scatter x values
    pub scatter_x_range: (f64, f64),

    /// Inclusive range of generated scatter y values
    pub scatter_y_range: (f64, f64),

    /// Seed for the mock series generator (None = entropy)
    pub seed: Option<u64>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            default_categories: ["Category A", "Category B", "Category C", "Category D"]
                .into_iter()
                .map(String::from)
                .collect(),
            scatter_points: 20,
            line_points: 5,
            value_range: (5.0, 30.0),
            scatter_x_range: (1.0, 10.0),
            scatter_y_range: (10.0, 100.0),
            seed: None,
        }
    }
}

impl ChartConfig {
    /// Create config with a fixed seed (reproducible mock series)
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.default_categories.is_empty() {
            return Err("default_categories must not be empty".to_string());
        }

        if self.scatter_points == 0 {
            return Err("scatter_points must be > 0".to_string());
        }

        if self.line_points == 0 {
            return Err("line_points must be > 0".to_string());
        }

        for (name, (lo, hi)) in [
            ("value_range", self.value_range),
            ("scatter_x_range", self.scatter_x_range),
            ("scatter_y_range", self.scatter_y_range),
        ] {
            if !lo.is_finite() || !hi.is_finite() || lo > hi {
                return Err(format!("{name} ({lo}, {hi}) must be finite with min <= max"));
            }
        }

        Ok(())
    }
}
