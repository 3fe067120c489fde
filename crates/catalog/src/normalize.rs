use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Bidirectional control marks and invisible format characters that survive copy/paste
/// from right-to-left spreadsheets.
const DIRECTIONALITY_MARKS: &[char] = &[
    '\u{061C}', // ARABIC LETTER MARK
    '\u{200B}', // ZERO WIDTH SPACE
    '\u{200E}', // LEFT-TO-RIGHT MARK
    '\u{200F}', // RIGHT-TO-LEFT MARK
    '\u{202A}', '\u{202B}', '\u{202C}', '\u{202D}', '\u{202E}', // embeddings/overrides
    '\u{2066}', '\u{2067}', '\u{2068}', '\u{2069}', // isolates
    '\u{FEFF}', // BOM
];

#[must_use]
pub fn is_directionality_mark(ch: char) -> bool {
    DIRECTIONALITY_MARKS.contains(&ch)
}

/// Strip directionality marks, collapse whitespace runs to a single space and trim.
///
/// Case is preserved; this is the display-text cleaner used for metadata fields.
#[must_use]
pub fn clean_text(raw: &str) -> String {
    let stripped: String = raw.chars().filter(|ch| !is_directionality_mark(*ch)).collect();
    let mut out = String::with_capacity(stripped.len());
    for word in stripped.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Canonical lookup key: cleaned with [`clean_text`] and lower-cased.
///
/// Two keys compare equal iff their normalized forms are equal, and normalizing an
/// already-normalized string is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct NormalizedKey(String);

impl NormalizedKey {
    #[must_use]
    pub fn new(raw: &str) -> Self {
        // Lower-casing can expand a char into several, so collapse again afterwards.
        Self(clean_text(&clean_text(raw).to_lowercase()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Split at the last internal space into `(parent, child)`.
    #[must_use]
    pub fn split_compound(&self) -> Option<(&str, &str)> {
        self.0.rsplit_once(' ')
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NormalizedKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NormalizedKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NormalizedKey {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for NormalizedKey {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}
