//! Batch aggregation

use super::Batch;
use crate::error::{AnalyzerError, Result};
use crate::sentiment::SentimentLabel;
use serde::Serialize;

/// Count and share of one label within a batch
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LabelStats {
    pub count: usize,
    /// Share of the batch, rounded to 2 decimal places
    pub percentage: f64,
}

/// Aggregate view of a batch: per-label counts and percentages, mean
/// compound score, and the dominant label
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub total: usize,
    pub positive: LabelStats,
    pub neutral: LabelStats,
    pub negative: LabelStats,
    pub mean_compound: f64,
    /// Label with the highest count. Ties resolve by the fixed priority
    /// Positive > Neutral > Negative.
    pub dominant: SentimentLabel,
}

impl Summary {
    /// Aggregate a batch. Empty batches are a distinct condition, never a
    /// division by zero.
    pub fn from_batch(batch: &Batch) -> Result<Self> {
        let total = batch.retrieved();
        if total == 0 {
            return Err(AnalyzerError::EmptyBatch);
        }

        let count_of = |label: SentimentLabel| {
            batch
                .comments()
                .iter()
                .filter(|c| c.label == label)
                .count()
        };
        let stats_of = |label: SentimentLabel| {
            let count = count_of(label);
            LabelStats {
                count,
                percentage: round2(100.0 * count as f64 / total as f64),
            }
        };

        let mean_compound = batch
            .comments()
            .iter()
            .map(|c| c.scores.compound)
            .sum::<f64>()
            / total as f64;

        let mut dominant = SentimentLabel::ALL[0];
        for label in SentimentLabel::ALL {
            if count_of(label) > count_of(dominant) {
                dominant = label;
            }
        }

        Ok(Self {
            total,
            positive: stats_of(SentimentLabel::Positive),
            neutral: stats_of(SentimentLabel::Neutral),
            negative: stats_of(SentimentLabel::Negative),
            mean_compound,
            dominant,
        })
    }

    /// Stats for one label
    pub fn stats(&self, label: SentimentLabel) -> LabelStats {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Neutral => self.neutral,
            SentimentLabel::Negative => self.negative,
        }
    }

    /// Stats for the dominant label
    pub fn dominant_stats(&self) -> LabelStats {
        self.stats(self.dominant)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
