use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::lenient;

pub const ID_COLUMN: &str = "EDCS-ID";
pub const STATUS_COLUMN: &str = "status";

/// One inscription after normalization.
///
/// Named columns are lifted into fields; every other source column is kept
/// verbatim in `extra`. Values are never null: a missing cell is `""`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InscriptionRecord {
    #[serde(rename = "EDCS-ID", default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub publication: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub province: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub place: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub dating_from: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub dating_to: String,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub status: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub inscription: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl InscriptionRecord {
    /// Dating bounds as whole years, when both parse.
    pub fn dating(&self) -> Option<(i64, i64)> {
        let from = lenient::parse_int(&self.dating_from)?;
        let to = lenient::parse_int(&self.dating_to)?;
        Some((from, to))
    }

    /// True when there is nothing worth sending to the extractor.
    pub fn has_no_text(&self) -> bool {
        let text = self.inscription.trim();
        text.is_empty() || text == "?"
    }

    /// Look up a passthrough column.
    pub fn column(&self, name: &str) -> Option<&str> {
        self.extra.get(name).and_then(|v| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_pandas_style_numbers() {
        let json = r#"{"EDCS-ID": "EDCS-123", "dating_from": 101.0, "dating_to": 200,
                       "status": ["tituli honorarii"], "inscription": "Imp(eratori)",
                       "Latitude": 32.6}"#;
        let record: InscriptionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "EDCS-123");
        assert_eq!(record.dating(), Some((101, 200)));
        assert_eq!(record.status, vec!["tituli honorarii"]);
        assert!(record.extra.contains_key("Latitude"));
    }

    #[test]
    fn status_string_is_split() {
        let record: InscriptionRecord =
            serde_json::from_str(r#"{"EDCS-ID": "E", "status": "a; b"}"#).unwrap();
        assert_eq!(record.status, vec!["a", "b"]);
    }

    #[test]
    fn question_mark_counts_as_no_text() {
        let mut record = InscriptionRecord::default();
        assert!(record.has_no_text());
        record.inscription = " ? ".to_string();
        assert!(record.has_no_text());
        record.inscription = "D(is) M(anibus)".to_string();
        assert!(!record.has_no_text());
    }

    #[test]
    fn missing_bound_means_no_dating() {
        let record = InscriptionRecord {
            dating_from: "100".to_string(),
            ..Default::default()
        };
        assert_eq!(record.dating(), None);
    }
}
