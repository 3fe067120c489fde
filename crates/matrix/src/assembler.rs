use crate::backing::BackingValues;
use crate::color::ColorBands;
use crate::config::MatrixConfig;
use crate::error::Result;
use crate::label::{DecoratedLabel, LabelCodec};
use heatmap_catalog::{CatalogIndex, NormalizedKey};
use heatmap_protocol::{MatrixPayload, PAYLOAD_SCHEMA_VERSION};
use std::collections::HashSet;

/// Inclusive value filter. Bounds given in reverse are swapped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    min: f64,
    max: f64,
}

impl ValueRange {
    pub fn new(a: f64, b: f64) -> Self {
        if a > b {
            Self { min: b, max: a }
        } else {
            Self { min: a, max: b }
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// NaN never matches.
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self::new(0.0, 100.0)
    }
}

impl From<(f64, f64)> for ValueRange {
    fn from((a, b): (f64, f64)) -> Self {
        Self::new(a, b)
    }
}

/// User-facing filters of one matrix request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatrixFilters {
    /// Columns to keep; `None` or an empty list keeps every column
    pub selected_columns: Option<Vec<NormalizedKey>>,
    pub value_range: ValueRange,
}

impl MatrixFilters {
    pub fn all(value_range: ValueRange) -> Self {
        Self {
            selected_columns: None,
            value_range,
        }
    }

    #[must_use]
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.selected_columns = Some(
            columns
                .into_iter()
                .map(|column| NormalizedKey::new(column.as_ref()))
                .collect(),
        );
        self
    }
}

/// Filtered heat-map grid: `values[row][column]`, `None` for absent or filtered cells.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixView {
    row_keys: Vec<NormalizedKey>,
    column_keys: Vec<NormalizedKey>,
    values: Vec<Vec<Option<f64>>>,
    row_labels: Vec<DecoratedLabel>,
    column_labels: Vec<DecoratedLabel>,
    value_range: ValueRange,
}

impl MatrixView {
    pub fn row_keys(&self) -> &[NormalizedKey] {
        &self.row_keys
    }

    pub fn column_keys(&self) -> &[NormalizedKey] {
        &self.column_keys
    }

    pub fn values(&self) -> &[Vec<Option<f64>>] {
        &self.values
    }

    pub fn row_labels(&self) -> &[DecoratedLabel] {
        &self.row_labels
    }

    pub fn column_labels(&self) -> &[DecoratedLabel] {
        &self.column_labels
    }

    pub fn value_range(&self) -> ValueRange {
        self.value_range
    }

    pub fn cell(&self, row: &NormalizedKey, column: &NormalizedKey) -> Option<f64> {
        let r = self.row_keys.iter().position(|k| k == row)?;
        let c = self.column_keys.iter().position(|k| k == column)?;
        self.values[r][c]
    }

    /// Non-null cells.
    pub fn filled(&self) -> usize {
        self.values.iter().flatten().filter(|v| v.is_some()).count()
    }

    /// Render for the heat-map widget: decorated labels, values and color bands.
    pub fn to_payload(&self, codec: &LabelCodec, bands: &ColorBands) -> MatrixPayload {
        MatrixPayload {
            schema_version: PAYLOAD_SCHEMA_VERSION,
            row_keys: self.row_keys.iter().map(|k| k.as_str().to_string()).collect(),
            column_keys: self
                .column_keys
                .iter()
                .map(|k| k.as_str().to_string())
                .collect(),
            x: self
                .column_labels
                .iter()
                .map(|label| codec.render_display(label))
                .collect(),
            y: self
                .row_labels
                .iter()
                .map(|label| codec.render_display(label))
                .collect(),
            z: self.values.clone(),
            bands: self
                .values
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|value| value.map(|v| bands.classify(v).as_str().to_string()))
                        .collect()
                })
                .collect(),
            value_range: [self.value_range.min, self.value_range.max],
        }
    }
}

/// Builds [`MatrixView`]s from a catalog index and backing values.
///
/// Rows are domains and columns are dimensions. Keys listed in the canonical orders come
/// first (when present in the catalog), the rest follow in first-seen order.
#[derive(Debug, Clone)]
pub struct MatrixAssembler {
    codec: LabelCodec,
    row_order: Vec<NormalizedKey>,
    column_order: Vec<NormalizedKey>,
}

impl MatrixAssembler {
    pub fn new(codec: LabelCodec) -> Self {
        Self {
            codec,
            row_order: Vec::new(),
            column_order: Vec::new(),
        }
    }

    pub fn from_config(config: &MatrixConfig) -> Result<Self> {
        let codec = LabelCodec::new(&config.labels)?;
        Ok(Self::new(codec)
            .with_row_order(&config.row_order)
            .with_column_order(&config.column_order))
    }

    #[must_use]
    pub fn with_row_order<S: AsRef<str>>(mut self, order: &[S]) -> Self {
        self.row_order = order.iter().map(|s| NormalizedKey::new(s.as_ref())).collect();
        self
    }

    #[must_use]
    pub fn with_column_order<S: AsRef<str>>(mut self, order: &[S]) -> Self {
        self.column_order = order.iter().map(|s| NormalizedKey::new(s.as_ref())).collect();
        self
    }

    pub fn codec(&self) -> &LabelCodec {
        &self.codec
    }

    /// Full row axis for `index`.
    pub fn row_axis(&self, index: &CatalogIndex) -> Vec<NormalizedKey> {
        ordered_axis(&self.row_order, index.domains())
    }

    /// Full column axis for `index`.
    pub fn column_axis(&self, index: &CatalogIndex) -> Vec<NormalizedKey> {
        ordered_axis(&self.column_order, index.dimensions())
    }

    pub fn assemble(
        &self,
        index: &CatalogIndex,
        backing: &BackingValues,
        filters: &MatrixFilters,
    ) -> MatrixView {
        let row_keys = self.row_axis(index);
        let all_columns = self.column_axis(index);

        let column_keys = match filters.selected_columns.as_deref() {
            Some(selected) if !selected.is_empty() => {
                let wanted: HashSet<&NormalizedKey> = selected.iter().collect();
                for unknown in selected.iter().filter(|k| !all_columns.contains(*k)) {
                    log::debug!("selected column '{unknown}' is not in the catalog; ignored");
                }
                all_columns
                    .into_iter()
                    .filter(|column| wanted.contains(column))
                    .collect()
            }
            _ => all_columns,
        };

        let range = filters.value_range;
        let values: Vec<Vec<Option<f64>>> = row_keys
            .iter()
            .map(|row| {
                column_keys
                    .iter()
                    .map(|column| backing.get(row, column).filter(|v| range.contains(*v)))
                    .collect()
            })
            .collect();

        let row_labels = row_keys.iter().map(|k| self.codec.encode(k)).collect();
        let column_labels = column_keys.iter().map(|k| self.codec.encode(k)).collect();

        let view = MatrixView {
            row_keys,
            column_keys,
            values,
            row_labels,
            column_labels,
            value_range: range,
        };
        log::info!(
            "matrix assembled: {} rows x {} columns, {} filled cells in [{}, {}]",
            view.row_keys.len(),
            view.column_keys.len(),
            view.filled(),
            range.min,
            range.max
        );
        view
    }
}

fn ordered_axis(canonical: &[NormalizedKey], seen: &[NormalizedKey]) -> Vec<NormalizedKey> {
    let mut axis: Vec<NormalizedKey> = Vec::with_capacity(seen.len());
    for key in canonical {
        if seen.contains(key) && !axis.contains(key) {
            axis.push(key.clone());
        }
    }
    for key in seen {
        if !axis.contains(key) {
            axis.push(key.clone());
        }
    }
    axis
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::LabelConfig;
    use heatmap_catalog::{ChartKind, ChartSynthesizer, MeasurementRecord, StepSeries};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn record(domain: &str, dimension: &str) -> MeasurementRecord {
        MeasurementRecord {
            domain: domain.to_string(),
            dimension: dimension.to_string(),
            chart_kind: ChartKind::Bar,
            measurement_method: String::new(),
            survey_item: String::new(),
            raw_item_text: String::new(),
            answer_options_text: String::new(),
            source: String::new(),
            link: String::new(),
            notes: String::new(),
        }
    }

    fn index(pairs: &[(&str, &str)]) -> CatalogIndex {
        let records: Vec<_> = pairs.iter().map(|(d, x)| record(d, x)).collect();
        CatalogIndex::build(
            &records,
            &ChartSynthesizer::default(),
            &mut StepSeries::new(1.0, 1.0),
        )
    }

    fn assembler() -> MatrixAssembler {
        MatrixAssembler::new(LabelCodec::new(&LabelConfig::default()).unwrap())
    }

    fn key(raw: &str) -> NormalizedKey {
        NormalizedKey::new(raw)
    }

    fn sample() -> (CatalogIndex, BackingValues) {
        let index = index(&[
            ("Health", "usage knowledge"),
            ("Health", "AI attitudes"),
            ("Finance", "usage knowledge"),
            ("Finance", "general"),
        ]);
        let mut backing = BackingValues::new();
        backing.insert(key("health"), key("usage knowledge"), 4.0);
        backing.insert(key("health"), key("ai attitudes"), 12.0);
        backing.insert(key("finance"), key("usage knowledge"), 150.0);
        (index, backing)
    }

    fn strs(keys: &[NormalizedKey]) -> Vec<&str> {
        keys.iter().map(NormalizedKey::as_str).collect()
    }

    #[test]
    fn assembles_full_grid_with_nulls_for_missing_cells() {
        let (index, backing) = sample();
        let view = assembler().assemble(&index, &backing, &MatrixFilters::default());

        assert_eq!(strs(view.row_keys()), vec!["health", "finance"]);
        assert_eq!(
            strs(view.column_keys()),
            vec!["usage knowledge", "ai attitudes", "general"]
        );
        assert_eq!(
            view.values(),
            &[
                vec![Some(4.0), Some(12.0), None],
                vec![None, None, None],
            ]
        );
        assert_eq!(view.filled(), 2);
    }

    #[test]
    fn selection_projects_columns_in_axis_order() {
        let (index, backing) = sample();
        let filters = MatrixFilters::all(ValueRange::new(0.0, 200.0))
            .with_columns(["General", "Usage  Knowledge", "unknown column"]);
        let view = assembler().assemble(&index, &backing, &filters);

        assert_eq!(strs(view.column_keys()), vec!["usage knowledge", "general"]);
        assert_eq!(view.cell(&key("finance"), &key("usage knowledge")), Some(150.0));
        assert_eq!(view.cell(&key("health"), &key("ai attitudes")), None);
    }

    #[test]
    fn empty_selection_means_all_columns() {
        let (index, backing) = sample();
        let filters = MatrixFilters::default().with_columns(Vec::<String>::new());
        let view = assembler().assemble(&index, &backing, &filters);
        assert_eq!(view.column_keys().len(), 3);
    }

    #[test]
    fn value_range_is_inclusive_and_order_tolerant() {
        let (index, backing) = sample();
        let view = assembler().assemble(
            &index,
            &backing,
            &MatrixFilters::all(ValueRange::new(12.0, 4.0)),
        );
        assert_eq!(view.value_range().min(), 4.0);
        assert_eq!(view.cell(&key("health"), &key("usage knowledge")), Some(4.0));
        assert_eq!(view.cell(&key("health"), &key("ai attitudes")), Some(12.0));
        assert!(!ValueRange::default().contains(f64::NAN));
    }

    #[test]
    fn canonical_order_comes_first() {
        let (index, backing) = sample();
        let assembler = assembler()
            .with_row_order(&["Finance", "Missing"])
            .with_column_order(&["general"]);
        let view = assembler.assemble(&index, &backing, &MatrixFilters::default());
        assert_eq!(strs(view.row_keys()), vec!["finance", "health"]);
        assert_eq!(
            strs(view.column_keys()),
            vec!["general", "usage knowledge", "ai attitudes"]
        );
    }

    #[test]
    fn payload_carries_markup_and_bands() {
        let (index, backing) = sample();
        let assembler = assembler();
        let view = assembler.assemble(&index, &backing, &MatrixFilters::default());
        let payload = view.to_payload(assembler.codec(), &ColorBands::default());

        assert_eq!(payload.y, vec!["health", "finance"]);
        assert_eq!(payload.x[0], "<b>usage</b> | knowledge");
        assert_eq!(
            payload.x[1],
            r#"<b><b class="term">בינה מלאכותית</b></b> | attitudes"#
        );
        assert_eq!(payload.bands[0][0].as_deref(), Some("cold"));
        assert_eq!(payload.bands[0][1].as_deref(), Some("warm"));
        assert_eq!(payload.bands[0][2], None);
        assert_eq!(payload.value_range, [0.0, 100.0]);

        for (markup, column) in payload.x.iter().zip(view.column_keys()) {
            assert_eq!(&assembler.codec().decode_markup(markup), column);
        }
    }

    proptest! {
        #[test]
        fn proptest_dimensions_and_range(
            cells in proptest::collection::vec((0usize..4, 0usize..5, -50.0f64..150.0), 0..30),
            bounds in (-20.0f64..120.0, -20.0f64..120.0),
            picks in proptest::collection::vec(0usize..6, 0..4),
        ) {
            let domains = ["a", "b", "c", "d"];
            let dimensions = ["p q", "r", "s t", "u", "v"];
            let pairs: Vec<(&str, &str)> = cells
                .iter()
                .map(|(d, x, _)| (domains[*d], dimensions[*x]))
                .collect();
            let index = index(&pairs);

            let mut backing = BackingValues::new();
            for (d, x, value) in &cells {
                backing.insert(key(domains[*d]), key(dimensions[*x]), *value);
            }

            let selection: Vec<&str> = picks
                .iter()
                .map(|i| dimensions.get(*i).copied().unwrap_or("nope"))
                .collect();
            let range = ValueRange::new(bounds.0, bounds.1);
            let filters = MatrixFilters::all(range).with_columns(selection);
            let view = assembler().assemble(&index, &backing, &filters);

            prop_assert_eq!(view.values().len(), view.row_keys().len());
            for row in view.values() {
                prop_assert_eq!(row.len(), view.column_keys().len());
                for value in row.iter().flatten() {
                    prop_assert!(range.contains(*value));
                }
            }

            let full = assembler().column_axis(&index);
            let positions: Vec<usize> = view
                .column_keys()
                .iter()
                .filter_map(|k| full.iter().position(|f| f == k))
                .collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
