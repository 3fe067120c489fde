use crate::assembler::MatrixAssembler;
use heatmap_catalog::{CatalogIndex, NormalizedKey};
use heatmap_protocol::{ChecklistOptionPayload, ChecklistPayload};

/// One selectable column of the column filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnOption {
    /// Plain display text
    pub label: String,
    pub value: NormalizedKey,
}

/// Column filter options in column-axis order.
pub fn column_options(assembler: &MatrixAssembler, index: &CatalogIndex) -> Vec<ColumnOption> {
    assembler
        .column_axis(index)
        .into_iter()
        .map(|key| ColumnOption {
            label: assembler.codec().render_plain(&assembler.codec().encode(&key)),
            value: key,
        })
        .collect()
}

/// Select-all toggle: no clicks selects nothing, an odd count selects every option, an even
/// count clears the selection.
pub fn toggle_selection(options: &[ColumnOption], n_clicks: u32) -> Vec<NormalizedKey> {
    if n_clicks % 2 == 1 {
        options.iter().map(|option| option.value.clone()).collect()
    } else {
        Vec::new()
    }
}

pub fn checklist_payload(options: &[ColumnOption], selected: &[NormalizedKey]) -> ChecklistPayload {
    ChecklistPayload {
        options: options
            .iter()
            .map(|option| ChecklistOptionPayload {
                label: option.label.clone(),
                value: option.value.as_str().to_string(),
            })
            .collect(),
        selected: selected.iter().map(|k| k.as_str().to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::{LabelCodec, LabelConfig};
    use heatmap_catalog::{ChartKind, ChartSynthesizer, MeasurementRecord, StepSeries};
    use pretty_assertions::assert_eq;

    fn index() -> CatalogIndex {
        let records: Vec<MeasurementRecord> = [("בריאות", "AI ידע"), ("בריאות", "כללי")]
            .iter()
            .map(|(domain, dimension)| MeasurementRecord {
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
            })
            .collect();
        CatalogIndex::build(
            &records,
            &ChartSynthesizer::default(),
            &mut StepSeries::new(0.0, 1.0),
        )
    }

    #[test]
    fn options_use_plain_labels() {
        let assembler = MatrixAssembler::new(LabelCodec::new(&LabelConfig::default()).unwrap());
        let options = column_options(&assembler, &index());
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].label, "בינה מלאכותית | ידע");
        assert_eq!(options[0].value.as_str(), "ai ידע");
        assert_eq!(options[1].label, "כללי");
    }

    #[test]
    fn select_all_toggle_follows_click_parity() {
        let assembler = MatrixAssembler::new(LabelCodec::new(&LabelConfig::default()).unwrap());
        let options = column_options(&assembler, &index());

        assert!(toggle_selection(&options, 0).is_empty());
        assert_eq!(toggle_selection(&options, 1).len(), 2);
        assert!(toggle_selection(&options, 2).is_empty());
        assert_eq!(toggle_selection(&options, 7).len(), 2);

        let payload = checklist_payload(&options, &toggle_selection(&options, 1));
        assert_eq!(payload.selected, vec!["ai ידע", "כללי"]);
        assert_eq!(payload.options[1].value, "כללי");
    }
}
