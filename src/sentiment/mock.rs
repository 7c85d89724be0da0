//! Fixed-score scorer for tests
//!
//! Decouples aggregation tests from the lexicon: scores come from a canned
//! table instead of the analyzer.

use super::{ScoreSentiment, SentimentScores};
use std::collections::HashMap;

/// Deterministic scorer backed by a text -> scores table.
///
/// Unknown text falls back to an all-neutral score.
pub struct MockScorer {
    scores: HashMap<String, SentimentScores>,
}

impl MockScorer {
    pub fn new() -> Self {
        Self {
            scores: HashMap::new(),
        }
    }

    /// Register a compound score for a text; the sub-scores are filled in
    /// from the sign of the compound.
    pub fn with_compound(self, text: &str, compound: f64) -> Self {
        let scores = SentimentScores {
            positive: if compound > 0.0 { compound } else { 0.0 },
            negative: if compound < 0.0 { -compound } else { 0.0 },
            neutral: 1.0 - compound.abs(),
            compound,
        };
        self.with_scores(text, scores)
    }

    pub fn with_scores(mut self, text: &str, scores: SentimentScores) -> Self {
        self.scores.insert(text.to_string(), scores);
        self
    }
}

impl Default for MockScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreSentiment for MockScorer {
    fn score(&self, text: &str) -> SentimentScores {
        self.scores.get(text).copied().unwrap_or(SentimentScores {
            positive: 0.0,
            negative: 0.0,
            neutral: 1.0,
            compound: 0.0,
        })
    }
}
