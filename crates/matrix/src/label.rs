use crate::error::{MatrixError, Result};
use heatmap_catalog::{clean_text, NormalizedKey};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use unicode_segmentation::UnicodeSegmentation;

const TERM_OPEN: &str = r#"<b class="term">"#;
const BREAK_TAG: &str = "<br>";

static LINE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").expect("static line-break regex"));
static TERM_ELEMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<b class="term">([^<]*)</b>"#).expect("static term regex"));
static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("static tag regex"));
static ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|amp|lt|gt|quot|apos);").expect("static entity regex")
});

/// A token rendered as an emphasized localized term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermSubstitution {
    /// Key token to replace (matched as a whole, case-insensitive word)
    pub term: String,
    /// Text shown instead
    pub display: String,
}

/// Configuration for axis label decoration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Placed between the bold parent segment and the child segment
    pub separator: String,

    /// Localized emphasized terms
    pub substitutions: Vec<TermSubstitution>,

    /// Insert line breaks once a line reaches this many graphemes (None = never)
    pub wrap_width: Option<usize>,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            separator: " | ".to_string(),
            substitutions: vec![TermSubstitution {
                term: "AI".to_string(),
                display: "בינה מלאכותית".to_string(),
            }],
            wrap_width: None,
        }
    }
}

impl LabelConfig {
    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        let token = self.separator.trim();
        if token.is_empty() {
            return Err("separator must contain a visible token".to_string());
        }
        if token
            .chars()
            .any(|ch| ch.is_alphanumeric() || ch.is_whitespace() || "&;#<>\"".contains(ch))
        {
            return Err(format!(
                "separator token '{token}' may only use punctuation other than & ; # < > \""
            ));
        }

        let mut displays = Vec::new();
        for substitution in &self.substitutions {
            let term = NormalizedKey::new(&substitution.term);
            if term.is_empty() || term.as_str().contains(' ') {
                return Err(format!(
                    "substitution term '{}' must be a single word",
                    substitution.term
                ));
            }
            let display = clean_text(&substitution.display);
            if display.is_empty() {
                return Err(format!("substitution for '{}' has no display text", term));
            }
            if displays.contains(&display) {
                return Err(format!("display text '{display}' is used by two terms"));
            }
            displays.push(display);
        }

        if self.wrap_width == Some(0) {
            return Err("wrap_width must be > 0 when set".to_string());
        }

        Ok(())
    }
}

/// Structured axis label. Markup is produced only by [`LabelCodec::render_markup`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecoratedLabel {
    /// Parent segment (bold) or the whole key when it has no internal space
    pub primary: String,
    /// Child segment after the last space
    pub secondary: Option<String>,
    /// Terms of this label shown as emphasized localized text
    pub emphasized: Vec<TermSubstitution>,
}

/// Two-way mapping between canonical keys and decorated axis labels.
///
/// `decode(&encode(k)) == k` and `decode_markup(&render_markup(&encode(k))) == k` for every
/// normalized key `k`, including after [`LabelCodec::wrap_markup`].
#[derive(Debug, Clone)]
pub struct LabelCodec {
    separator: String,
    separator_regex: Regex,
    escaped_chars: Vec<char>,
    substitutions: Vec<TermSubstitution>,
    term_by_display: HashMap<String, String>,
    wrap_width: Option<usize>,
}

impl LabelCodec {
    pub fn new(config: &LabelConfig) -> Result<Self> {
        config.validate().map_err(MatrixError::invalid_config)?;

        let token = config.separator.trim();
        let separator_regex = Regex::new(&format!(r"\s*{}\s*", regex::escape(token)))
            .map_err(|err| MatrixError::invalid_config(err.to_string()))?;

        let substitutions: Vec<TermSubstitution> = config
            .substitutions
            .iter()
            .map(|s| TermSubstitution {
                term: NormalizedKey::new(&s.term).into_string(),
                display: clean_text(&s.display),
            })
            .collect();
        let term_by_display = substitutions
            .iter()
            .map(|s| (s.display.clone(), s.term.clone()))
            .collect();

        Ok(Self {
            separator: config.separator.clone(),
            separator_regex,
            escaped_chars: token.chars().collect(),
            substitutions,
            term_by_display,
            wrap_width: config.wrap_width,
        })
    }

    /// Decorate a canonical key: split at the last space into parent and child.
    pub fn encode(&self, key: &NormalizedKey) -> DecoratedLabel {
        let (primary, secondary) = match key.split_compound() {
            Some((parent, child)) => (parent.to_string(), Some(child.to_string())),
            None => (key.as_str().to_string(), None),
        };

        let emphasized = self
            .substitutions
            .iter()
            .filter(|s| key.as_str().split(' ').any(|token| token == s.term))
            .cloned()
            .collect();

        DecoratedLabel {
            primary,
            secondary,
            emphasized,
        }
    }

    pub fn encode_pair(&self, parent: &str, child: &str) -> DecoratedLabel {
        self.encode(&NormalizedKey::new(&format!("{parent} {child}")))
    }

    pub fn decode(&self, label: &DecoratedLabel) -> NormalizedKey {
        match &label.secondary {
            Some(secondary) => NormalizedKey::new(&format!("{} {secondary}", label.primary)),
            None => NormalizedKey::new(&label.primary),
        }
    }

    /// Markup handed to the rendering layer, e.g. `<b>ניהול מידע</b> | התנהגות`.
    pub fn render_markup(&self, label: &DecoratedLabel) -> String {
        let primary = self.render_segment(&label.primary, &label.emphasized);
        match &label.secondary {
            Some(secondary) => format!(
                "<b>{primary}</b>{}{}",
                self.separator,
                self.render_segment(secondary, &label.emphasized)
            ),
            None => primary,
        }
    }

    /// Markup with configured wrapping applied.
    pub fn render_display(&self, label: &DecoratedLabel) -> String {
        let markup = self.render_markup(label);
        match self.wrap_width {
            Some(width) => wrap_markup(&markup, width),
            None => markup,
        }
    }

    /// Human-readable text without markup.
    pub fn render_plain(&self, label: &DecoratedLabel) -> String {
        let plain = |segment: &str| {
            segment
                .split(' ')
                .map(|token| {
                    label
                        .emphasized
                        .iter()
                        .find(|s| s.term == token)
                        .map_or(token, |s| s.display.as_str())
                })
                .collect::<Vec<_>>()
                .join(" ")
        };
        match &label.secondary {
            Some(secondary) => format!(
                "{}{}{}",
                plain(&label.primary),
                self.separator,
                plain(secondary)
            ),
            None => plain(&label.primary),
        }
    }

    /// Recover the canonical key from rendered markup, tolerating inserted line breaks.
    pub fn decode_markup(&self, markup: &str) -> NormalizedKey {
        let text = LINE_BREAK.replace_all(markup, " ");
        let text = TERM_ELEMENT.replace_all(&text, |caps: &regex::Captures<'_>| {
            let display = clean_text(&unescape(&caps[1]));
            match self.term_by_display.get(&display) {
                Some(term) => self.escape(term),
                None => caps[1].to_string(),
            }
        });
        let text = ANY_TAG.replace_all(&text, "");
        let text = self.separator_regex.replace_all(&text, " ");
        NormalizedKey::new(&unescape(&text))
    }

    fn render_segment(&self, segment: &str, emphasized: &[TermSubstitution]) -> String {
        segment
            .split(' ')
            .map(|token| match emphasized.iter().find(|s| s.term == token) {
                Some(s) => format!("{TERM_OPEN}{}</b>", self.escape(&s.display)),
                None => self.escape(token),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn escape(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for ch in text.chars() {
            match ch {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                ch if self.escaped_chars.contains(&ch) => {
                    out.push_str(&format!("&#{};", u32::from(ch)));
                }
                ch => out.push(ch),
            }
        }
        out
    }
}

fn unescape(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let name = &caps[1];
            let decoded = match name {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => {
                    let code = if let Some(hex) = name
                        .strip_prefix("#x")
                        .or_else(|| name.strip_prefix("#X"))
                    {
                        u32::from_str_radix(hex, 16).ok()
                    } else {
                        name[1..].parse::<u32>().ok()
                    };
                    code.and_then(char::from_u32)
                }
            };
            decoded.map_or_else(|| caps[0].to_string(), |ch| ch.to_string())
        })
        .into_owned()
}

/// Replace spaces outside tags with `<br>` once the current line reaches `width` graphemes.
/// An entity counts as one grapheme.
pub fn wrap_markup(markup: &str, width: usize) -> String {
    if width == 0 {
        return markup.to_string();
    }

    let mut out = String::with_capacity(markup.len() + 8);
    let mut in_tag = false;
    let mut in_entity = false;
    let mut line_len = 0usize;

    for grapheme in markup.graphemes(true) {
        if in_tag {
            in_tag = grapheme != ">";
            out.push_str(grapheme);
            continue;
        }
        if in_entity {
            in_entity = grapheme != ";";
            out.push_str(grapheme);
            continue;
        }
        match grapheme {
            "<" => {
                in_tag = true;
                out.push_str(grapheme);
            }
            "&" => {
                in_entity = true;
                line_len += 1;
                out.push_str(grapheme);
            }
            " " if line_len >= width => {
                out.push_str(BREAK_TAG);
                line_len = 0;
            }
            _ => {
                line_len += 1;
                out.push_str(grapheme);
            }
        }
    }
    out
}
