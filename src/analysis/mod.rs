//! Analysis pipeline
//!
//! Coordinates one run: validate the URL and sample size, pull at most N
//! comments from the source, score and label each, then aggregate into a
//! summary. Each run owns its batch; nothing is shared between runs.

pub mod summary;
#[cfg(test)]
mod tests;

pub use summary::{LabelStats, Summary};

use crate::client::{Comment, CommentSource};
use crate::config::AnalysisConfig;
use crate::error::{AnalyzerError, Result};
use crate::sentiment::{ScoreSentiment, SentimentLabel, SentimentScores};
use crate::url::parse_video_url;
use serde::Serialize;
use tracing::{debug, info};

/// A comment with its scores and label, immutable once computed
#[derive(Debug, Clone, Serialize)]
pub struct ScoredComment {
    pub comment: Comment,
    pub scores: SentimentScores,
    pub label: SentimentLabel,
}

/// One run's worth of scored comments
#[derive(Debug, Clone, Serialize)]
pub struct Batch {
    requested: usize,
    comments: Vec<ScoredComment>,
}

impl Batch {
    pub fn new(requested: usize, comments: Vec<ScoredComment>) -> Self {
        Self {
            requested,
            comments,
        }
    }

    /// Sample size the caller asked for
    pub fn requested(&self) -> usize {
        self.requested
    }

    /// How many comments were actually retrieved
    pub fn retrieved(&self) -> usize {
        self.comments.len()
    }

    /// True when the source ran out before the requested count
    pub fn is_partial(&self) -> bool {
        self.retrieved() < self.requested
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn comments(&self) -> &[ScoredComment] {
        &self.comments
    }
}

/// Batch plus its summary, the full output of one run
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub batch: Batch,
    pub summary: Summary,
}

/// Fetch-then-score-then-aggregate engine, generic over the comment
/// source and scorer so tests can swap in deterministic fakes.
pub struct AnalysisEngine<S, A> {
    source: S,
    scorer: A,
    config: AnalysisConfig,
}

impl<S: CommentSource, A: ScoreSentiment> AnalysisEngine<S, A> {
    pub fn new(source: S, scorer: A, config: AnalysisConfig) -> Self {
        Self {
            source,
            scorer,
            config,
        }
    }

    /// The underlying comment source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Run one analysis. Invalid input is rejected before any retrieval;
    /// a source failure aborts the run with its cause; fewer comments than
    /// requested is reported through the batch, not as an error.
    pub async fn analyze(&self, url: &str, sample_size: usize) -> Result<AnalysisReport> {
        let video = parse_video_url(url)
            .ok_or_else(|| AnalyzerError::InvalidUrl(url.to_string()))?;
        if sample_size == 0 || sample_size > self.config.max_sample_size {
            return Err(AnalyzerError::InvalidSampleSize {
                requested: sample_size,
                max: self.config.max_sample_size,
            });
        }

        info!(video = %video, sample_size, "fetching comments");
        let stream = self.source.stream_comments(&video).await?;
        let comments = stream.take(sample_size).await?;
        if comments.len() < sample_size {
            debug!(
                retrieved = comments.len(),
                requested = sample_size,
                "source exhausted early"
            );
        }

        let scored = comments
            .into_iter()
            .map(|comment| {
                let scores = self.scorer.score(&comment.text);
                ScoredComment {
                    label: scores.label(),
                    scores,
                    comment,
                }
            })
            .collect();

        let batch = Batch::new(sample_size, scored);
        let summary = Summary::from_batch(&batch)?;
        info!(
            retrieved = batch.retrieved(),
            dominant = %summary.dominant,
            "analysis complete"
        );

        Ok(AnalysisReport { batch, summary })
    }
}
