use crate::normalize::{clean_text, NormalizedKey};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field names of the source catalog. These are the wire contract with the catalog file.
pub mod fields {
    pub const DOMAIN: &str = "תחום";
    pub const CHARACTERISTIC: &str = "מאפיין";
    pub const BEHAVIOR_ATTITUDE_KNOWLEDGE: &str = "התנהגות / עמדות / ידע";
    pub const CHART_KIND: &str = "סוג גרף";
    pub const MEASUREMENT_METHOD: &str = "אופן חישוב המדד";
    pub const SURVEY_ITEM: &str = "סעיף / היגד על";
    pub const RAW_ITEM_TEXT: &str = "פריט/היגד מקורי";
    pub const ANSWER_OPTIONS: &str = "אפשרויות תשובה";
    pub const SOURCE: &str = "מקור";
    pub const LINK: &str = "קישור";
    pub const NOTES: &str = "הערות";
}

/// Substituted for a missing domain or dimension and for empty display metadata.
pub const NOT_AVAILABLE: &str = "N/A";

/// One catalog record as read from the source file.
pub type RawRecord = Map<String, Value>;

/// Chart type declared by a catalog record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Scatter,
    Pie,
    #[default]
    Unknown,
}

impl ChartKind {
    /// Parse a free-text chart tag; anything unrecognised is `Unknown`.
    pub fn parse(raw: &str) -> Self {
        match clean_text(raw).to_lowercase().as_str() {
            "bar" => ChartKind::Bar,
            "line" => ChartKind::Line,
            "scatter" => ChartKind::Scatter,
            "pie" => ChartKind::Pie,
            _ => ChartKind::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Scatter => "scatter",
            ChartKind::Pie => "pie",
            ChartKind::Unknown => "unknown",
        }
    }
}

/// A catalog record with every text field cleaned. Missing fields are empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    pub domain: String,
    /// Characteristic and behavior/attitude/knowledge joined by a single space.
    pub dimension: String,
    pub chart_kind: ChartKind,
    pub measurement_method: String,
    pub survey_item: String,
    pub raw_item_text: String,
    pub answer_options_text: String,
    pub source: String,
    pub link: String,
    pub notes: String,
}

impl MeasurementRecord {
    /// Normalize one raw record. Never fails: absent fields become empty strings and a
    /// record without domain or dimension text is filed under [`NOT_AVAILABLE`].
    pub fn from_raw(raw: &RawRecord) -> Self {
        let text = |name: &str| field_text(raw, name);

        let mut domain = text(fields::DOMAIN);
        if domain.is_empty() {
            log::warn!("catalog record without '{}', using '{NOT_AVAILABLE}'", fields::DOMAIN);
            domain = NOT_AVAILABLE.to_string();
        }

        let mut dimension = clean_text(&format!(
            "{} {}",
            text(fields::CHARACTERISTIC),
            text(fields::BEHAVIOR_ATTITUDE_KNOWLEDGE)
        ));
        if dimension.is_empty() {
            log::warn!("catalog record for '{domain}' has no dimension, using '{NOT_AVAILABLE}'");
            dimension = NOT_AVAILABLE.to_string();
        }

        Self {
            domain,
            dimension,
            chart_kind: ChartKind::parse(&text(fields::CHART_KIND)),
            measurement_method: text(fields::MEASUREMENT_METHOD),
            survey_item: text(fields::SURVEY_ITEM),
            raw_item_text: text(fields::RAW_ITEM_TEXT),
            answer_options_text: text(fields::ANSWER_OPTIONS),
            source: text(fields::SOURCE),
            link: text(fields::LINK),
            notes: text(fields::NOTES),
        }
    }

    pub fn domain_key(&self) -> NormalizedKey {
        NormalizedKey::new(&self.domain)
    }

    pub fn dimension_key(&self) -> NormalizedKey {
        NormalizedKey::new(&self.dimension)
    }

    /// Candidate texts for category extraction, most specific first.
    pub fn category_sources(&self) -> [&str; 3] {
        [
            self.answer_options_text.as_str(),
            self.raw_item_text.as_str(),
            self.survey_item.as_str(),
        ]
    }

    pub fn metadata(&self) -> Metadata {
        Metadata {
            measurement_method: or_not_available(&self.measurement_method),
            survey_item: or_not_available(&self.survey_item),
            original_item: self.raw_item_text.clone(),
            source: or_not_available(&self.source),
            link: self.link.clone(),
            notes: self.notes.clone(),
        }
    }
}

/// Display-only metadata of a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub measurement_method: String,
    pub survey_item: String,
    pub original_item: String,
    pub source: String,
    pub link: String,
    pub notes: String,
}

fn or_not_available(value: &str) -> String {
    if value.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        value.to_string()
    }
}

/// Text of one field; numbers and booleans keep their literal form.
fn field_text(raw: &RawRecord, name: &str) -> String {
    match raw.get(name) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => clean_text(s),
        Some(other) => clean_text(&other.to_string()),
    }
}
