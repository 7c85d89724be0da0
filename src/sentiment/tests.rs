//! Tests for sentiment scoring and classification

#[cfg(test)]
mod tests {
    use crate::sentiment::{
        MockScorer, ScoreSentiment, SentimentLabel, SentimentScores, VaderScorer,
    };

    fn scores_with_compound(compound: f64) -> SentimentScores {
        SentimentScores {
            positive: 0.0,
            negative: 0.0,
            neutral: 1.0,
            compound,
        }
    }

    #[test]
    fn classifies_positive_at_threshold() {
        assert_eq!(SentimentLabel::from_compound(0.05), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_compound(0.65), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_compound(1.0), SentimentLabel::Positive);
    }

    #[test]
    fn classifies_negative_at_threshold() {
        assert_eq!(
            SentimentLabel::from_compound(-0.05),
            SentimentLabel::Negative
        );
        assert_eq!(
            SentimentLabel::from_compound(-0.72),
            SentimentLabel::Negative
        );
        assert_eq!(SentimentLabel::from_compound(-1.0), SentimentLabel::Negative);
    }

    #[test]
    fn classifies_neutral_between_thresholds() {
        assert_eq!(SentimentLabel::from_compound(0.0), SentimentLabel::Neutral);
        assert_eq!(
            SentimentLabel::from_compound(0.049999),
            SentimentLabel::Neutral
        );
        assert_eq!(
            SentimentLabel::from_compound(-0.049999),
            SentimentLabel::Neutral
        );
    }

    #[test]
    fn score_label_helpers_agree_with_rule() {
        assert!(scores_with_compound(0.3).is_positive());
        assert!(scores_with_compound(-0.3).is_negative());
        assert!(scores_with_compound(0.01).is_neutral());
    }

    #[test]
    fn vader_scoring_is_idempotent() {
        let scorer = VaderScorer::new();
        let text = "I absolutely love this video, great work! 🚀";
        let first = scorer.score(text);
        let second = scorer.score(text);
        assert_eq!(first, second);
        assert_eq!(first.label(), second.label());
    }

    #[test]
    fn vader_separates_praise_from_abuse() {
        let scorer = VaderScorer::new();
        let praise = scorer.score("This is wonderful, I love it!");
        let abuse = scorer.score("This is terrible, I hate it.");
        assert!(praise.compound > abuse.compound);
        assert_eq!(praise.label(), SentimentLabel::Positive);
        assert_eq!(abuse.label(), SentimentLabel::Negative);
    }

    #[test]
    fn vader_handles_empty_and_odd_text() {
        let scorer = VaderScorer::new();
        for text in ["", "   ", "12345", "<b>markup</b>", "😶"] {
            let scores = scorer.score(text);
            assert!(scores.compound.is_finite(), "non-finite compound for {text:?}");
            assert!((-1.0..=1.0).contains(&scores.compound));
        }
    }

    #[test]
    fn mock_scorer_returns_registered_scores() {
        let scorer = MockScorer::new().with_compound("great", 0.8);
        assert_eq!(scorer.score("great").compound, 0.8);
        assert_eq!(scorer.score("great").label(), SentimentLabel::Positive);
        // unknown text is neutral
        assert_eq!(scorer.score("???").compound, 0.0);
        assert_eq!(scorer.score("???").label(), SentimentLabel::Neutral);
    }

    #[test]
    fn label_display_matches_report_wording() {
        assert_eq!(SentimentLabel::Positive.to_string(), "Positive");
        assert_eq!(SentimentLabel::Neutral.to_string(), "Neutral");
        assert_eq!(SentimentLabel::Negative.to_string(), "Negative");
    }
}
