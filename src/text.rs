//! Text normalization
//!
//! Every comparison in the search core goes through [`normalize`]: trimmed,
//! whitespace-collapsed, lowercased, with compatibility decomposition and
//! combining marks removed so that `"Crème Fraîche"` and `"creme  fraiche"`
//! compare equal. The display policy ([`capitalize`]) is cosmetic and never
//! used for matching.

use serde_json::Value;
use std::collections::BTreeMap;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::AppError;

/// Minimum normalized length (in characters) for a free-text query to constrain results
pub const MIN_QUERY_CHARS: usize = 3;

/// Fold text for comparison
///
/// Empty or whitespace-only input yields an empty string, which callers treat
/// as "no constraint".
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.extend(word.chars().flat_map(char::to_lowercase).nfkd().filter(|c| !is_combining_mark(*c)));
    }
    out
}

/// Normalize an untyped value, rejecting anything that is not a JSON string
pub fn normalize_value(value: &Value) -> Result<String, AppError> {
    match value {
        Value::String(s) => Ok(normalize(s)),
        other => Err(AppError::InvalidInput(format!(
            "expected a string, got {}",
            json_kind(other)
        ))),
    }
}

/// Length of an already-normalized string in characters
pub fn char_len(normalized: &str) -> usize {
    normalized.chars().count()
}

/// Whether a normalized query is long enough to act as a constraint
pub fn is_significant(normalized: &str, min_chars: usize) -> bool {
    char_len(normalized) >= min_chars
}

/// Fold a single character the way [`normalize`] folds it, without whitespace handling
///
/// Combining marks fold to an empty string.
pub fn fold_char(c: char) -> String {
    c.to_lowercase()
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Display policy: first grapheme uppercased, the rest lowercased
///
/// `"  SUCRE en poudre "` becomes `"Sucre en poudre"`.
pub fn capitalize(text: &str) -> String {
    let trimmed = text.trim();
    let mut graphemes = trimmed.graphemes(true);
    match graphemes.next() {
        Some(first) => {
            let mut out = first.to_uppercase();
            out.push_str(&graphemes.as_str().to_lowercase());
            out
        }
        None => String::new(),
    }
}

/// Deduplicate values on their normalized form
///
/// Keys are normalized forms in sorted order; each maps to the first display
/// value seen. Values that normalize to nothing are dropped.
pub fn distinct_by_normalized<'a, I>(values: I) -> BTreeMap<String, &'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut distinct = BTreeMap::new();
    for value in values {
        let key = normalize(value);
        if !key.is_empty() {
            distinct.entry(key).or_insert(value);
        }
    }
    distinct
}

/// Short JSON type name used in validation messages
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_trims_and_lowercases() {
        assert_eq!(normalize("  Tarte aux POMMES  "), "tarte aux pommes");
    }

    #[test]
    fn test_collapses_inner_whitespace() {
        assert_eq!(normalize("soupe \t de\n\ncourge"), "soupe de courge");
    }

    #[test]
    fn test_strips_accents() {
        assert_eq!(normalize("Crème Fraîche"), "creme fraiche");
        assert_eq!(normalize("Pâtes à la Réunionnaise"), "pates a la reunionnaise");
        assert_eq!(normalize("Noël"), "noel");
    }

    #[test]
    fn test_decomposed_and_precomposed_agree() {
        // "é" precomposed vs "e" + combining acute
        assert_eq!(normalize("caf\u{e9}"), normalize("cafe\u{301}"));
    }

    #[test]
    fn test_compatibility_forms() {
        assert_eq!(normalize("ﬁlet"), "filet");
    }

    #[test]
    fn test_empty_and_blank() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t "), "");
    }

    #[test]
    fn test_idempotent() {
        let once = normalize("  Œufs  Brouillés ");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_normalize_value_accepts_strings() {
        assert_eq!(normalize_value(&json!(" Pomme ")).unwrap(), "pomme");
    }

    #[test]
    fn test_normalize_value_rejects_non_strings() {
        for value in [json!(42), json!(null), json!(true), json!(["a"]), json!({"q": "a"})] {
            let err = normalize_value(&value).unwrap_err();
            assert_eq!(err.error_code(), "invalid_input");
        }
    }

    #[test]
    fn test_significance_counts_chars_not_bytes() {
        assert!(!is_significant("ab", MIN_QUERY_CHARS));
        assert!(is_significant("abc", MIN_QUERY_CHARS));
        // "ñ" folds to "n"; multi-byte originals never inflate the count
        assert_eq!(char_len(&normalize("ñu")), 2);
    }

    #[test]
    fn test_fold_char() {
        assert_eq!(fold_char('É'), "e");
        assert_eq!(fold_char('\u{301}'), "");
        assert_eq!(fold_char('a'), "a");
    }

    #[test]
    fn test_distinct_keeps_first_display_value() {
        let distinct = distinct_by_normalized(["Crème", "creme", "Beurre", "  ", "CRÈME"]);
        let entries: Vec<_> = distinct.into_iter().collect();
        assert_eq!(entries, vec![("beurre".to_string(), "Beurre"), ("creme".to_string(), "Crème")]);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("  SUCRE en poudre "), "Sucre en poudre");
        assert_eq!(capitalize("éPINARDS"), "Épinards");
        assert_eq!(capitalize(""), "");
    }
}
