use once_cell::sync::Lazy;
use regex::Regex;

static FIRST_BRACKET_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\[\]]*)\]").expect("static bracket regex"));

/// Extract the comma-separated labels of the first `[...]` span.
///
/// Returns `None` when the text has no complete bracket span. An empty span (or one with
/// only separators) yields `Some(vec![])`.
#[must_use]
pub fn extract_bracket_values(text: &str) -> Option<Vec<String>> {
    let captures = FIRST_BRACKET_SPAN.captures(text)?;
    let inner = captures.get(1).map_or("", |m| m.as_str());
    Some(
        inner
            .split(',')
            .map(crate::normalize::clean_text)
            .filter(|value| !value.is_empty())
            .collect(),
    )
}

/// First candidate text that carries a bracket span; later candidates are only consulted
/// when earlier ones have none.
#[must_use]
pub fn extract_first_available<'a>(
    candidates: impl IntoIterator<Item = &'a str>,
) -> Option<Vec<String>> {
    candidates
        .into_iter()
        .filter(|text| !text.is_empty())
        .find_map(extract_bracket_values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extracts_trimmed_values_in_order() {
        assert_eq!(
            extract_bracket_values("Do you use X? [Option A,  Option B ,Option C]"),
            Some(vec![
                "Option A".to_string(),
                "Option B".to_string(),
                "Option C".to_string()
            ])
        );
    }

    #[test]
    fn only_first_span_is_honored() {
        assert_eq!(
            extract_bracket_values("[כן, לא] ועוד [אולי]"),
            Some(vec!["כן".to_string(), "לא".to_string()])
        );
    }

    #[test]
    fn empty_span_is_some_empty() {
        assert_eq!(extract_bracket_values("question []"), Some(Vec::new()));
        assert_eq!(extract_bracket_values("question [ , ]"), Some(Vec::new()));
    }

    #[test]
    fn missing_or_unclosed_bracket_is_none() {
        assert_eq!(extract_bracket_values("no brackets here"), None);
        assert_eq!(extract_bracket_values("unclosed [a, b"), None);
        assert_eq!(extract_bracket_values("reversed ] a ["), None);
    }

    #[test]
    fn first_available_prefers_earlier_candidates() {
        let values = extract_first_available(["[x, y]", "[a, b, c]"]);
        assert_eq!(values, Some(vec!["x".to_string(), "y".to_string()]));

        let values = extract_first_available(["no list", "item [a, b, c]"]);
        assert_eq!(values.map(|v| v.len()), Some(3));

        assert_eq!(extract_first_available(["", "plain"]), None);
    }
}
