//! Tests for the analysis pipeline

#[cfg(test)]
mod tests {
    use crate::analysis::{AnalysisEngine, Batch, ScoredComment, Summary};
    use crate::client::MockCommentSource;
    use crate::config::AnalysisConfig;
    use crate::error::AnalyzerError;
    use crate::sentiment::{MockScorer, SentimentLabel, SentimentScores};
    use chrono::Utc;

    fn scored(text: &str, compound: f64) -> ScoredComment {
        let scores = SentimentScores {
            positive: 0.0,
            negative: 0.0,
            neutral: 1.0,
            compound,
        };
        ScoredComment {
            comment: crate::client::Comment {
                id: text.to_string(),
                text: text.to_string(),
                author: "@a".to_string(),
                published: "now".to_string(),
                like_count: 0,
                reply_count: 0,
                is_hearted: false,
                author_is_channel_owner: false,
                fetched_at: Utc::now(),
            },
            label: scores.label(),
            scores,
        }
    }

    fn engine_with(
        source: MockCommentSource,
        scorer: MockScorer,
    ) -> AnalysisEngine<MockCommentSource, MockScorer> {
        AnalysisEngine::new(source, scorer, AnalysisConfig::default())
    }

    const URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

    #[tokio::test]
    async fn analyzes_a_mixed_batch_end_to_end() {
        let texts = ["I love this!", "This is terrible.", "It's okay I guess."];
        let scorer = MockScorer::new()
            .with_compound("I love this!", 0.65)
            .with_compound("This is terrible.", -0.72)
            .with_compound("It's okay I guess.", 0.0);
        let engine = engine_with(MockCommentSource::from_texts(&texts), scorer);

        let report = engine.analyze(URL, 3).await.unwrap();

        let labels: Vec<SentimentLabel> =
            report.batch.comments().iter().map(|c| c.label).collect();
        assert_eq!(
            labels,
            [
                SentimentLabel::Positive,
                SentimentLabel::Negative,
                SentimentLabel::Neutral
            ]
        );

        let summary = &report.summary;
        assert_eq!(summary.total, 3);
        assert_eq!(summary.positive.count, 1);
        assert_eq!(summary.negative.count, 1);
        assert_eq!(summary.neutral.count, 1);
        assert!((summary.positive.percentage - 33.33).abs() < 0.01);
        assert!((summary.neutral.percentage - 33.33).abs() < 0.01);
        assert!((summary.negative.percentage - 33.33).abs() < 0.01);
        assert!((summary.mean_compound - (-0.0233)).abs() < 0.001);
    }

    #[tokio::test]
    async fn partial_retrieval_is_reported_not_failed() {
        let texts: Vec<String> = (0..120).map(|i| format!("comment {i}")).collect();
        let engine = engine_with(MockCommentSource::from_texts(&texts), MockScorer::new());

        let report = engine.analyze(URL, 500).await.unwrap();
        assert_eq!(report.batch.requested(), 500);
        assert_eq!(report.batch.retrieved(), 120);
        assert!(report.batch.is_partial());
        assert_eq!(report.summary.total, 120);
    }

    #[tokio::test]
    async fn full_retrieval_is_not_partial() {
        let engine = engine_with(
            MockCommentSource::from_texts(&["a", "b"]),
            MockScorer::new(),
        );
        let report = engine.analyze(URL, 2).await.unwrap();
        assert!(!report.batch.is_partial());
    }

    #[tokio::test]
    async fn empty_source_surfaces_the_empty_condition() {
        let engine = engine_with(
            MockCommentSource::from_texts::<&str>(&[]),
            MockScorer::new(),
        );
        let err = engine.analyze(URL, 10).await.unwrap_err();
        assert!(matches!(err, AnalyzerError::EmptyBatch));
    }

    #[tokio::test]
    async fn invalid_url_is_rejected_before_retrieval() {
        let engine = engine_with(MockCommentSource::from_texts(&["a"]), MockScorer::new());

        let err = engine.analyze("not a url", 10).await.unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidUrl(_)));
        // the source was never consulted
        assert_eq!(engine.source().call_count(), 0);
    }

    #[tokio::test]
    async fn out_of_bounds_sample_size_is_rejected_before_retrieval() {
        let engine = engine_with(MockCommentSource::from_texts(&["a"]), MockScorer::new());

        for n in [0usize, 1001] {
            let err = engine.analyze(URL, n).await.unwrap_err();
            assert!(matches!(err, AnalyzerError::InvalidSampleSize { .. }));
        }
        assert_eq!(engine.source().call_count(), 0);
    }

    #[tokio::test]
    async fn source_failure_aborts_the_run() {
        let engine = engine_with(MockCommentSource::failing(), MockScorer::new());
        let err = engine.analyze(URL, 10).await.unwrap_err();
        assert!(matches!(err, AnalyzerError::Source(_)));
    }

    #[test]
    fn percentages_sum_to_one_hundred() {
        let comments = vec![
            scored("a", 0.9),
            scored("b", 0.5),
            scored("c", 0.2),
            scored("d", 0.0),
            scored("e", -0.3),
            scored("f", -0.6),
            scored("g", 0.07),
        ];
        let summary = Summary::from_batch(&Batch::new(7, comments)).unwrap();
        let sum = summary.positive.percentage
            + summary.neutral.percentage
            + summary.negative.percentage;
        assert!((sum - 100.0).abs() <= 0.02, "sum was {sum}");
    }

    #[test]
    fn empty_batch_yields_no_summary() {
        let err = Summary::from_batch(&Batch::new(10, Vec::new())).unwrap_err();
        assert!(matches!(err, AnalyzerError::EmptyBatch));
    }

    #[test]
    fn dominant_label_prefers_positive_on_ties() {
        let comments = vec![
            scored("a", 0.5),
            scored("b", 0.5),
            scored("c", -0.5),
            scored("d", -0.5),
            scored("e", 0.0),
        ];
        let summary = Summary::from_batch(&Batch::new(5, comments)).unwrap();
        assert_eq!(summary.dominant, SentimentLabel::Positive);
        assert_eq!(summary.dominant_stats().count, 2);
    }

    #[test]
    fn dominant_label_prefers_neutral_over_negative_on_ties() {
        let comments = vec![
            scored("a", 0.0),
            scored("b", 0.0),
            scored("c", -0.5),
            scored("d", -0.5),
        ];
        let summary = Summary::from_batch(&Batch::new(4, comments)).unwrap();
        assert_eq!(summary.dominant, SentimentLabel::Neutral);
    }

    #[test]
    fn strict_majority_wins_regardless_of_priority() {
        let comments = vec![scored("a", -0.5), scored("b", -0.6), scored("c", 0.5)];
        let summary = Summary::from_batch(&Batch::new(3, comments)).unwrap();
        assert_eq!(summary.dominant, SentimentLabel::Negative);
        assert!((summary.negative.percentage - 66.67).abs() < 0.01);
    }

    #[test]
    fn mean_compound_is_the_arithmetic_mean() {
        let comments = vec![scored("a", 0.4), scored("b", -0.2), scored("c", 0.1)];
        let summary = Summary::from_batch(&Batch::new(3, comments)).unwrap();
        assert!((summary.mean_compound - 0.1).abs() < 1e-9);
    }
}
