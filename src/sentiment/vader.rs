//! VADER-backed scorer

use super::{ScoreSentiment, SentimentScores};
use vader_sentiment::SentimentIntensityAnalyzer;

/// Lexicon-based scorer wrapping the VADER analyzer.
///
/// Holds the analyzer (and its lexicon) so repeated scoring does not
/// rebuild it per comment.
pub struct VaderScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderScorer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl Default for VaderScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreSentiment for VaderScorer {
    fn score(&self, text: &str) -> SentimentScores {
        let polarity = self.analyzer.polarity_scores(text);
        SentimentScores {
            positive: polarity.get("pos").copied().unwrap_or(0.0),
            negative: polarity.get("neg").copied().unwrap_or(0.0),
            neutral: polarity.get("neu").copied().unwrap_or(0.0),
            compound: polarity.get("compound").copied().unwrap_or(0.0),
        }
    }
}
