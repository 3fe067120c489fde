//! # Heatmap Matrix
//!
//! Heat-map assembly and drill-down resolution on top of a [`heatmap_catalog::CatalogIndex`].
//!
//! ## Flow
//!
//! ```text
//! CatalogIndex ─┬─> axes (domains × dimensions)
//!               │
//! BackingValues ┴─> MatrixAssembler (+ MatrixFilters)
//!                       └─> MatrixView ──> MatrixPayload (x/y markup, z, bands)
//!
//! click (x markup, y markup)
//!     └─> LabelCodec::decode_markup ──> CellResolver ──> Found | NotFound
//! ```
//!
//! ## Example
//!
//! ```rust
//! use heatmap_catalog::{CatalogIndex, ChartSynthesizer, StepSeries};
//! use heatmap_matrix::{
//!     BackingValues, CellResolver, ColorBands, LabelCodec, LabelConfig, MatrixAssembler,
//!     MatrixFilters,
//! };
//!
//! let records = heatmap_catalog::records_from_str(
//!     r#"[{"תחום": "Finance", "מאפיין": "Budget", "התנהגות / עמדות / ידע": "Knowledge"}]"#,
//! )
//! .unwrap();
//! let index = CatalogIndex::build(&records, &ChartSynthesizer::default(), &mut StepSeries::new(1.0, 1.0));
//!
//! let assembler = MatrixAssembler::new(LabelCodec::new(&LabelConfig::default()).unwrap());
//! let view = assembler.assemble(&index, &BackingValues::new(), &MatrixFilters::default());
//! let payload = view.to_payload(assembler.codec(), &ColorBands::default());
//! assert_eq!(payload.x, vec!["<b>budget</b> | knowledge"]);
//!
//! let resolver = CellResolver::new(&index, assembler.codec());
//! assert!(resolver.resolve_markup(&payload.x[0], &payload.y[0]).is_found());
//! ```

mod assembler;
mod backing;
mod checklist;
mod color;
mod config;
mod error;
mod label;
mod resolver;

pub use assembler::{MatrixAssembler, MatrixFilters, MatrixView, ValueRange};
pub use backing::{BackingConfig, BackingValues, TopicAxis};
pub use checklist::{checklist_payload, column_options, toggle_selection, ColumnOption};
pub use color::{ColorBand, ColorBands};
pub use config::MatrixConfig;
pub use error::{MatrixError, Result};
pub use label::{wrap_markup, DecoratedLabel, LabelCodec, LabelConfig, TermSubstitution};
pub use resolver::{resolve_cell, CellResolution, CellResolver};
