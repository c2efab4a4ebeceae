use crate::domain::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored situation with the recommendation that was given for it.
///
/// Records are append-only: once inserted they are never updated or evicted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryRecord {
    /// Decimal string of the insertion index within its collection ("0", "1", ...).
    pub id: String,
    pub situation: String,
    pub recommendation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
    pub created_at: DateTime<Utc>,
}

/// Input pair for [`crate::MemoryBank::add_situations`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSituation {
    pub situation: String,
    pub recommendation: String,
}

impl NewSituation {
    pub fn new(situation: impl Into<String>, recommendation: impl Into<String>) -> Self {
        Self {
            situation: situation.into(),
            recommendation: recommendation.into(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SituationInput {
    Object(NewSituation),
    Pair(String, String),
}

impl NewSituation {
    /// Parse a JSON array whose items are either
    /// `{"situation": .., "recommendation": ..}` or `[situation, recommendation]`.
    pub fn parse_batch(json: &str) -> Result<Vec<Self>, DomainError> {
        let items: Vec<SituationInput> = serde_json::from_str(json)
            .map_err(|e| DomainError::Parse(format!("Expected an array of situation/recommendation pairs: {e}")))?;
        Ok(items
            .into_iter()
            .map(|item| match item {
                SituationInput::Object(s) => s,
                SituationInput::Pair(situation, recommendation) => Self::new(situation, recommendation),
            })
            .collect())
    }
}

impl<S: Into<String>, R: Into<String>> From<(S, R)> for NewSituation {
    fn from((situation, recommendation): (S, R)) -> Self {
        Self::new(situation, recommendation)
    }
}

/// One recalled memory, best matches first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryMatch {
    pub matched_situation: String,
    pub recommendation: String,
    pub similarity_score: f64,
}

impl MemoryMatch {
    pub fn from_record(record: &MemoryRecord, similarity_score: f64) -> Self {
        Self {
            matched_situation: record.situation.clone(),
            recommendation: record.recommendation.clone(),
            similarity_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_batch_accepts_objects_and_pairs() {
        let batch = NewSituation::parse_batch(
            r#"[
                {"situation": "inflation rising", "recommendation": "defensive sectors"},
                ["strong dollar", "hedge currency exposure"]
            ]"#,
        )
        .unwrap();
        assert_eq!(
            batch,
            vec![
                NewSituation::new("inflation rising", "defensive sectors"),
                NewSituation::new("strong dollar", "hedge currency exposure"),
            ]
        );
    }

    #[test]
    fn test_parse_batch_rejects_malformed_items() {
        assert!(matches!(
            NewSituation::parse_batch(r#"[["only one"]]"#),
            Err(DomainError::Parse(_))
        ));
        assert!(matches!(
            NewSituation::parse_batch(r#"{"situation": "x", "recommendation": "y"}"#),
            Err(DomainError::Parse(_))
        ));
    }

    #[test]
    fn test_match_serializes_with_public_field_names() {
        let m = MemoryMatch {
            matched_situation: "a".into(),
            recommendation: "b".into(),
            similarity_score: 1.0,
        };
        let v = serde_json::to_value(&m).unwrap();
        assert_eq!(v["matched_situation"], "a");
        assert_eq!(v["similarity_score"], 1.0);
    }
}
