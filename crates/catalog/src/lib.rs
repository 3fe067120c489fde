//! # Heatmap Catalog
//!
//! Turns a flat survey measurement catalog into an immutable lookup of detail entries.
//!
//! ## Pipeline
//!
//! ```text
//! Catalog JSON (array of records)
//!     │
//!     ├──> Record Normalizer
//!     │      └─> MeasurementRecord (clean text, derived dimension, chart kind)
//!     │
//!     ├──> Bracket Value Extractor
//!     │      └─> "[A, B, C]" → ["A", "B", "C"]
//!     │
//!     ├──> Chart Synthesizer (+ injected SeriesSource)
//!     │      └─> ChartSpec { categories, series }
//!     │
//!     └──> Catalog Index
//!            └─> domain → dimension → { metadata, chart }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use heatmap_catalog::{CatalogIndex, ChartSynthesizer, NormalizedKey, StepSeries};
//!
//! let json = r#"[{"תחום": "Health", "מאפיין": "Usage", "התנהגות / עמדות / ידע": "Knowledge",
//!                "סוג גרף": "pie", "פריט/היגד מקורי": "Which? [A, B, C]"}]"#;
//! let records = heatmap_catalog::records_from_str(json).unwrap();
//! let index = CatalogIndex::build(
//!     &records,
//!     &ChartSynthesizer::default(),
//!     &mut StepSeries::new(1.0, 1.0),
//! );
//!
//! let entry = index
//!     .get(&NormalizedKey::new("health"), &NormalizedKey::new("usage knowledge"))
//!     .unwrap();
//! assert_eq!(entry.chart.categories(), &["A", "B", "C"]);
//! ```

mod brackets;
mod chart;
mod config;
mod error;
mod index;
mod loader;
mod normalize;
mod record;

pub use brackets::{extract_bracket_values, extract_first_available};
pub use chart::{ChartSpec, ChartSynthesizer, RandomSeries, SeriesSource, StepSeries};
pub use config::ChartConfig;
pub use error::{CatalogError, Result};
pub use index::{CatalogEntry, CatalogIndex, IndexStats, LookupOrder, SharedCatalog};
pub use loader::{load_records, records_from_raw, records_from_str, records_from_value};
pub use normalize::{clean_text, is_directionality_mark, NormalizedKey};
pub use record::{fields, ChartKind, MeasurementRecord, Metadata, RawRecord, NOT_AVAILABLE};
