//! Word-overlap ranking for banks whose vectors carry no meaning.

use crate::domain::entities::memory_record::{MemoryMatch, MemoryRecord};
use std::collections::HashSet;

/// Lowercased words: maximal runs of alphanumerics or `_`.
pub fn word_set(text: &str) -> HashSet<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}

/// `|a ∩ b| / |a ∪ b|`, and 0 when both are empty.
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Top `n_matches` records by Jaccard score, highest first; equal scores keep
/// the order of `records`.
pub fn rank(query: &str, records: &[MemoryRecord], n_matches: usize) -> Vec<MemoryMatch> {
    let query_words = word_set(query);
    let mut scored: Vec<(usize, f64)> = records
        .iter()
        .enumerate()
        .map(|(i, r)| (i, jaccard(&query_words, &word_set(&r.situation))))
        .collect();

    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });

    scored
        .into_iter()
        .take(n_matches)
        .map(|(i, score)| MemoryMatch::from_record(&records[i], score))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(id: usize, situation: &str) -> MemoryRecord {
        MemoryRecord {
            id: id.to_string(),
            situation: situation.to_string(),
            recommendation: format!("rec {id}"),
            embedding: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_word_set_folds_case_and_punctuation() {
        let words = word_set("Tech-sector VOLATILITY, tech sector!");
        let expected: HashSet<String> = ["tech", "sector", "volatility"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(words, expected);
    }

    #[test]
    fn test_word_set_keeps_underscores_and_digits() {
        let words = word_set("q3_earnings beat by 12%");
        assert!(words.contains("q3_earnings"));
        assert!(words.contains("12"));
    }

    #[test]
    fn test_jaccard_values() {
        let a = word_set("rates rising fast");
        let b = word_set("rates rising slowly");
        assert!((jaccard(&a, &b) - 0.5).abs() < 1e-9);
        assert_eq!(jaccard(&a, &a), 1.0);
        assert_eq!(jaccard(&word_set(""), &word_set("...")), 0.0);
        assert_eq!(jaccard(&a, &word_set("")), 0.0);
    }

    #[test]
    fn test_identical_situation_ranks_first_with_full_score() {
        let records = vec![
            record(0, "Strong dollar hurting emerging markets"),
            record(1, "High inflation with rising interest rates"),
        ];
        let hits = rank("high inflation with rising interest rates", &records, 2);
        assert_eq!(hits[0].matched_situation, "High inflation with rising interest rates");
        assert_eq!(hits[0].similarity_score, 1.0);
        assert!(hits[1].similarity_score < 1.0);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let records = vec![record(0, "alpha beta"), record(1, "alpha gamma"), record(2, "delta")];
        let hits = rank("alpha", &records, 3);
        assert_eq!(hits[0].recommendation, "rec 0");
        assert_eq!(hits[1].recommendation, "rec 1");
        assert_eq!(hits[2].similarity_score, 0.0);
    }

    #[test]
    fn test_takes_at_most_n() {
        let records = vec![record(0, "a"), record(1, "b"), record(2, "c")];
        assert_eq!(rank("a", &records, 1).len(), 1);
        assert_eq!(rank("a", &records, 10).len(), 3);
    }
}
