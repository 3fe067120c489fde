use crate::label::LabelCodec;
use heatmap_catalog::{CatalogEntry, CatalogIndex, LookupOrder, NormalizedKey};
use heatmap_protocol::{
    CellDetailPayload, ChartPayload, MetadataPayload, PAYLOAD_SCHEMA_VERSION,
};

/// Outcome of resolving a clicked cell. A miss is a value, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum CellResolution<'a> {
    Found {
        domain: NormalizedKey,
        dimension: NormalizedKey,
        order: LookupOrder,
        entry: &'a CatalogEntry,
    },
    NotFound {
        column: NormalizedKey,
        row: NormalizedKey,
    },
}

impl<'a> CellResolution<'a> {
    pub fn is_found(&self) -> bool {
        matches!(self, CellResolution::Found { .. })
    }

    pub fn entry(&self) -> Option<&'a CatalogEntry> {
        match self {
            CellResolution::Found { entry, .. } => Some(*entry),
            CellResolution::NotFound { .. } => None,
        }
    }

    /// Detail payload for the drill-down view; a miss yields `found == false`.
    pub fn to_payload(&self) -> CellDetailPayload {
        match self {
            CellResolution::Found { order, entry, .. } => CellDetailPayload {
                schema_version: PAYLOAD_SCHEMA_VERSION,
                found: true,
                title: format!("{}, {}", entry.domain, entry.dimension),
                domain: Some(entry.domain.clone()),
                dimension: Some(entry.dimension.clone()),
                lookup_order: Some(
                    match order {
                        LookupOrder::Canonical => "canonical",
                        LookupOrder::Swapped => "swapped",
                    }
                    .to_string(),
                ),
                metadata: Some(MetadataPayload {
                    measurement_method: entry.metadata.measurement_method.clone(),
                    survey_item: entry.metadata.survey_item.clone(),
                    original_item: entry.metadata.original_item.clone(),
                    source: entry.metadata.source.clone(),
                    link: entry.metadata.link.clone(),
                    notes: entry.metadata.notes.clone(),
                }),
                chart: Some(ChartPayload {
                    kind: entry.chart.kind().as_str().to_string(),
                    categories: entry.chart.categories().to_vec(),
                    series: entry.chart.series().to_vec(),
                }),
            },
            CellResolution::NotFound { column, row } => {
                CellDetailPayload::not_found(format!("{row}, {column}"))
            }
        }
    }
}

/// Look up decoded keys: `(domain = row, dimension = column)` first, then the swapped order.
pub fn resolve_cell<'a>(
    index: &'a CatalogIndex,
    row: &NormalizedKey,
    column: &NormalizedKey,
) -> CellResolution<'a> {
    match index.get_either_order(row, column) {
        Some((entry, order)) => {
            let (domain, dimension) = match order {
                LookupOrder::Canonical => (row.clone(), column.clone()),
                LookupOrder::Swapped => (column.clone(), row.clone()),
            };
            CellResolution::Found {
                domain,
                dimension,
                order,
                entry,
            }
        }
        None => {
            log::debug!("no catalog entry for row '{row}' and column '{column}'");
            CellResolution::NotFound {
                column: column.clone(),
                row: row.clone(),
            }
        }
    }
}

/// Entry point for clicks on the rendered matrix: decodes labels then queries the index.
#[derive(Debug, Clone, Copy)]
pub struct CellResolver<'a> {
    index: &'a CatalogIndex,
    codec: &'a LabelCodec,
}

impl<'a> CellResolver<'a> {
    pub fn new(index: &'a CatalogIndex, codec: &'a LabelCodec) -> Self {
        Self { index, codec }
    }

    /// Resolve a `(x, y)` markup pair exactly as the heat-map widget reports it.
    pub fn resolve_markup(&self, column_label: &str, row_label: &str) -> CellResolution<'a> {
        let column = self.codec.decode_markup(column_label);
        let row = self.codec.decode_markup(row_label);
        resolve_cell(self.index, &row, &column)
    }

    pub fn resolve_keys(&self, column: &NormalizedKey, row: &NormalizedKey) -> CellResolution<'a> {
        resolve_cell(self.index, row, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::LabelConfig;
    use heatmap_catalog::{ChartKind, ChartSynthesizer, MeasurementRecord, StepSeries};
    use pretty_assertions::assert_eq;

    fn index() -> CatalogIndex {
        let record = MeasurementRecord {
            domain: "Finance".to_string(),
            dimension: "General".to_string(),
            chart_kind: ChartKind::Line,
            measurement_method: "share of respondents".to_string(),
            survey_item: "Budgeting".to_string(),
            raw_item_text: "Do you budget? [never, sometimes, always]".to_string(),
            answer_options_text: String::new(),
            source: "survey 2023".to_string(),
            link: "https://example.org/q1".to_string(),
            notes: String::new(),
        };
        CatalogIndex::build(
            &[record],
            &ChartSynthesizer::default(),
            &mut StepSeries::new(10.0, 5.0),
        )
    }

    fn codec() -> LabelCodec {
        LabelCodec::new(&LabelConfig::default()).unwrap()
    }

    #[test]
    fn resolves_rendered_labels_canonically() {
        let index = index();
        let codec = codec();
        let resolver = CellResolver::new(&index, &codec);

        let resolution = resolver.resolve_markup("general", "finance");
        let CellResolution::Found {
            domain,
            dimension,
            order,
            entry,
        } = &resolution
        else {
            panic!("expected a hit, got {resolution:?}");
        };
        assert_eq!(domain.as_str(), "finance");
        assert_eq!(dimension.as_str(), "general");
        assert_eq!(*order, LookupOrder::Canonical);
        assert_eq!(entry.chart.categories(), &["never", "sometimes", "always"]);
        assert_eq!(entry.chart.series(), &[10.0, 15.0, 20.0]);

        assert_eq!(
            resolver.resolve_keys(&"general".into(), &"finance".into()),
            resolution
        );
    }

    #[test]
    fn swapped_labels_hit_through_the_fallback() {
        let index = index();
        let codec = codec();
        let resolution = CellResolver::new(&index, &codec).resolve_markup("Finance", "<b>GENERAL</b>");
        assert!(resolution.is_found());
        let payload = resolution.to_payload();
        assert_eq!(payload.lookup_order.as_deref(), Some("swapped"));
        assert_eq!(payload.title, "Finance, General");
    }

    #[test]
    fn miss_is_a_value_with_empty_payload() {
        let index = index();
        let codec = codec();
        let resolution = CellResolver::new(&index, &codec).resolve_markup("<b>ai</b> | ידע", "בריאות");
        assert!(!resolution.is_found());
        assert!(resolution.entry().is_none());

        let payload = resolution.to_payload();
        assert!(!payload.found);
        assert_eq!(payload.title, "בריאות, ai ידע");
        assert!(payload.chart.is_none());
    }

    #[test]
    fn found_payload_carries_metadata_and_chart() {
        let index = index();
        let resolution = resolve_cell(&index, &"finance".into(), &"general".into());
        let payload = resolution.to_payload();

        assert!(payload.found);
        let metadata = payload.metadata.expect("metadata");
        assert_eq!(metadata.survey_item, "Budgeting");
        assert_eq!(metadata.link, "https://example.org/q1");
        assert_eq!(metadata.notes, "");
        let chart = payload.chart.expect("chart");
        assert_eq!(chart.kind, "line");
        assert_eq!(chart.categories.len(), chart.series.len());
    }
}
