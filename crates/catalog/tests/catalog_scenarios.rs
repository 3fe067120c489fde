use heatmap_catalog::{
    load_records, CatalogIndex, ChartConfig, ChartKind, ChartSynthesizer, NormalizedKey,
    RandomSeries, NOT_AVAILABLE,
};
use pretty_assertions::assert_eq;
use std::io::Write;

const CATALOG: &str = r#"[
    {"תחום": "Health", "מאפיין": "Usage", "התנהגות / עמדות / ידע": "Knowledge",
     "סוג גרף": "pie", "פריט/היגד מקורי": "How often? [A, B, C]"},
    {"תחום": "Finance", "מאפיין": "Budget", "התנהגות / עמדות / ידע": "Behavior",
     "סוג גרף": "scatter", "אפשרויות תשובה": "[low, high]"},
    {"תחום": "Finance", "מאפיין": "Budget", "התנהגות / עמדות / ידע": "Attitude",
     "סוג גרף": "histogram"},
    {"תחום": "Finance", "התנהגות / עמדות / ידע": "General", "סוג גרף": "line"},
    {"מאפיין": "Orphan"},
    "not a record"
]"#;

fn load() -> Vec<heatmap_catalog::MeasurementRecord> {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CATALOG.as_bytes()).unwrap();
    load_records(file.path()).unwrap()
}

#[test]
fn loads_hebrew_schema_and_applies_defaults() {
    let records = load();
    assert_eq!(records.len(), 5);
    assert_eq!(records[3].dimension, "General");
    assert_eq!(records[4].domain, NOT_AVAILABLE);
    assert_eq!(records[4].dimension, "Orphan");
}

#[test]
fn every_entry_has_matching_chart_lengths() {
    let records = load();
    let index = CatalogIndex::build(
        &records,
        &ChartSynthesizer::default(),
        &mut RandomSeries::new(&ChartConfig::seeded(11)),
    );
    assert_eq!(index.len(), 5);

    for (_, _, entry) in index.iter() {
        assert_eq!(entry.chart.categories().len(), entry.chart.series().len());
        assert!(!entry.chart.is_empty());
    }

    let key = |raw: &str| NormalizedKey::new(raw);
    let scatter = index.get(&key("finance"), &key("budget behavior")).unwrap();
    assert_eq!(scatter.chart.len(), 20);
    assert_eq!(&scatter.chart.categories()[..3], &["low", "high", "low"]);

    let fallback = index.get(&key("finance"), &key("budget attitude")).unwrap();
    assert_eq!(fallback.chart.kind(), ChartKind::Bar);
    assert_eq!(fallback.chart.len(), 4);

    let line = index.get(&key("finance"), &key("general")).unwrap();
    assert_eq!(line.chart.categories(), &["1", "2", "3", "4", "5"]);
}

#[test]
fn seeded_series_are_reproducible() {
    let records = load();
    let build = || {
        CatalogIndex::build(
            &records,
            &ChartSynthesizer::default(),
            &mut RandomSeries::new(&ChartConfig::seeded(42)),
        )
    };
    let (a, b) = (build(), build());
    let key = |raw: &str| NormalizedKey::new(raw);
    assert_eq!(
        a.get(&key("health"), &key("usage knowledge")),
        b.get(&key("health"), &key("usage knowledge"))
    );
}
