use crate::config::ChartConfig;
use crate::error::CatalogError;
use crate::record::ChartKind;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// Category/series pair used to draw one metric's detail chart.
///
/// Built only by [`ChartSynthesizer`], which guarantees
/// `categories().len() == series().len()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    kind: ChartKind,
    categories: Vec<String>,
    series: Vec<f64>,
}

impl ChartSpec {
    /// Chart kind actually rendered (`Unknown` is resolved to `Bar`)
    #[must_use]
    pub const fn kind(&self) -> ChartKind {
        self.kind
    }

    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    #[must_use]
    pub fn series(&self) -> &[f64] {
        &self.series
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Provider of chart values. Injected so that tests and real data feeds can replace the
/// mock generator.
pub trait SeriesSource {
    /// Dependent-axis values; implementations should return exactly `len` of them.
    fn dependent(&mut self, kind: ChartKind, len: usize) -> Vec<f64>;

    /// Generated independent-axis values for charts without explicit categories.
    fn independent(&mut self, kind: ChartKind, len: usize) -> Vec<f64>;
}

/// Mock generator producing uniformly distributed integers in the configured ranges.
pub struct RandomSeries {
    rng: StdRng,
    value_range: (f64, f64),
    scatter_x_range: (f64, f64),
    scatter_y_range: (f64, f64),
}

impl RandomSeries {
    pub fn new(config: &ChartConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            value_range: config.value_range,
            scatter_x_range: config.scatter_x_range,
            scatter_y_range: config.scatter_y_range,
        }
    }

    fn draw(&mut self, (lo, hi): (f64, f64), len: usize) -> Vec<f64> {
        let lo = lo.ceil() as i64;
        let hi = (hi.floor() as i64).max(lo);
        (0..len).map(|_| self.rng.gen_range(lo..=hi) as f64).collect()
    }
}

impl SeriesSource for RandomSeries {
    fn dependent(&mut self, kind: ChartKind, len: usize) -> Vec<f64> {
        let range = match kind {
            ChartKind::Scatter => self.scatter_y_range,
            _ => self.value_range,
        };
        self.draw(range, len)
    }

    fn independent(&mut self, _kind: ChartKind, len: usize) -> Vec<f64> {
        self.draw(self.scatter_x_range, len)
    }
}

/// Deterministic arithmetic sequence `start, start + step, ...`, restarted per call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepSeries {
    pub start: f64,
    pub step: f64,
}

impl StepSeries {
    pub const fn new(start: f64, step: f64) -> Self {
        Self { start, step }
    }

    fn sequence(&self, len: usize) -> Vec<f64> {
        (0..len).map(|i| self.start + self.step * i as f64).collect()
    }
}

impl SeriesSource for StepSeries {
    fn dependent(&mut self, _kind: ChartKind, len: usize) -> Vec<f64> {
        self.sequence(len)
    }

    fn independent(&mut self, _kind: ChartKind, len: usize) -> Vec<f64> {
        (1..=len).map(|i| i as f64).collect()
    }
}

/// Builds [`ChartSpec`]s from a chart kind and optional extracted categories.
#[derive(Debug, Clone, Default)]
pub struct ChartSynthesizer {
    config: ChartConfig,
}

impl ChartSynthesizer {
    pub fn new(config: ChartConfig) -> Self {
        Self { config }
    }

    /// Create a synthesizer after validating the configuration
    pub fn try_new(config: ChartConfig) -> crate::Result<Self> {
        config.validate().map_err(CatalogError::invalid_config)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Synthesize a chart. Empty `extracted` values count as absent.
    pub fn synthesize(
        &self,
        kind: ChartKind,
        extracted: Option<&[String]>,
        source: &mut dyn SeriesSource,
    ) -> ChartSpec {
        let extracted = extracted.filter(|values| !values.is_empty());

        let (kind, categories) = match kind {
            ChartKind::Bar | ChartKind::Pie | ChartKind::Unknown => {
                let kind = if kind == ChartKind::Pie {
                    ChartKind::Pie
                } else {
                    ChartKind::Bar
                };
                let categories = extracted
                    .map(<[String]>::to_vec)
                    .unwrap_or_else(|| self.config.default_categories.clone());
                (kind, categories)
            }
            ChartKind::Scatter => {
                let points = self.config.scatter_points;
                let categories = match extracted {
                    Some(values) => values.iter().cycle().take(points).cloned().collect(),
                    None => format_numbers(&fit(
                        source.independent(kind, points),
                        points,
                        "scatter x",
                    )),
                };
                (kind, categories)
            }
            ChartKind::Line => {
                let categories = match extracted {
                    Some(values) => values.to_vec(),
                    None => (1..=self.config.line_points).map(|i| i.to_string()).collect(),
                };
                (kind, categories)
            }
        };

        let series = fit(source.dependent(kind, categories.len()), categories.len(), "series");
        ChartSpec {
            kind,
            categories,
            series,
        }
    }
}

fn fit(mut values: Vec<f64>, len: usize, what: &str) -> Vec<f64> {
    if values.len() != len {
        log::warn!(
            "series source returned {} {what} values, expected {len}",
            values.len()
        );
        values.resize(len, 0.0);
    }
    values
}

fn format_numbers(values: &[f64]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
