//! Attendance records, the analytics input unit
//!
//! One record per (event, user) pair, read from the flattened
//! `event_user_analytics` view. The language preference column has
//! accumulated three encodings over time (plain comma-delimited text,
//! JSON-encoded lists, native lists), so it is classified into a tagged
//! variant once at the ingestion boundary instead of being re-sniffed on
//! every aggregation pass.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub matched: bool,
    pub gender: Option<String>,
    pub preferred_drink: Option<String>,
    pub music_preference: Option<String>,
    pub age_group: Option<String>,
    pub language_preference: Option<LanguagePreference>,
}

/// How a user's language preference was stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LanguagePreference {
    /// Raw text that looks like a JSON encoding (starts with `[` or `{`).
    Encoded(String),
    /// Plain text, possibly comma-delimited.
    Delimited(String),
    /// Already a native list of languages.
    ListOf(Vec<String>),
}

impl LanguagePreference {
    /// Classify a raw text column value. Empty input carries no preference.
    pub fn from_raw(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed.starts_with('[') || trimmed.starts_with('{') {
            Some(LanguagePreference::Encoded(trimmed.to_string()))
        } else {
            Some(LanguagePreference::Delimited(raw.to_string()))
        }
    }

    /// Resolve to the list of languages this user selected.
    ///
    /// `Encoded` values are decoded as JSON: an array keeps its scalar
    /// elements, a bare scalar is wrapped in a single-element list. Any
    /// decode failure, and any shape that is not a list of scalars, falls
    /// back to comma-splitting the raw text. Empty entries are discarded.
    /// This never fails; malformed data degrades to the fallback.
    pub fn resolve(&self) -> Vec<String> {
        let entries = match self {
            LanguagePreference::ListOf(list) => list.clone(),
            LanguagePreference::Delimited(raw) => comma_split(raw),
            LanguagePreference::Encoded(raw) => match serde_json::from_str::<Value>(raw) {
                Ok(Value::Array(items)) => items.iter().filter_map(scalar_to_string).collect(),
                Ok(value) => match scalar_to_string(&value) {
                    Some(single) => vec![single],
                    None => comma_split(raw),
                },
                Err(_) => comma_split(raw),
            },
        };
        entries.into_iter().filter(|lang| !lang.is_empty()).collect()
    }
}

fn comma_split(raw: &str) -> Vec<String> {
    raw.split(',').map(|part| part.trim().to_string()).collect()
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        // Nulls and nested structures are not languages.
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_raw_values() {
        assert_eq!(
            LanguagePreference::from_raw("en, fr"),
            Some(LanguagePreference::Delimited("en, fr".to_string()))
        );
        assert_eq!(
            LanguagePreference::from_raw(r#"["en","fr"]"#),
            Some(LanguagePreference::Encoded(r#"["en","fr"]"#.to_string()))
        );
        assert_eq!(
            LanguagePreference::from_raw(r#"{"lang":"en"}"#),
            Some(LanguagePreference::Encoded(r#"{"lang":"en"}"#.to_string()))
        );
        assert_eq!(LanguagePreference::from_raw("   "), None);
    }

    #[test]
    fn resolves_delimited_with_trim() {
        let pref = LanguagePreference::Delimited("en, fr".to_string());
        assert_eq!(pref.resolve(), vec!["en", "fr"]);
    }

    #[test]
    fn resolves_encoded_list() {
        let pref = LanguagePreference::Encoded(r#"["en","fr"]"#.to_string());
        assert_eq!(pref.resolve(), vec!["en", "fr"]);
    }

    #[test]
    fn wraps_encoded_scalar() {
        let pref = LanguagePreference::Encoded("[3]".to_string());
        assert_eq!(pref.resolve(), vec!["3"]);
    }

    #[test]
    fn malformed_encoding_falls_back_to_comma_split() {
        let pref = LanguagePreference::Encoded("[en".to_string());
        assert_eq!(pref.resolve(), vec!["[en"]);
    }

    #[test]
    fn object_encoding_falls_back_to_comma_split() {
        let pref = LanguagePreference::Encoded(r#"{"en": true}"#.to_string());
        assert_eq!(pref.resolve(), vec![r#"{"en": true}"#]);
    }

    #[test]
    fn native_list_used_as_is() {
        let pref = LanguagePreference::ListOf(vec!["en".to_string(), String::new()]);
        assert_eq!(pref.resolve(), vec!["en"]);
    }
}
