//! YouTube Comment Sentiment Analyzer
//!
//! CLI front end: fetch comments for a video, score them, and print the
//! per-comment labels plus the aggregate summary.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use yt_sentiment::{
    analysis::{AnalysisEngine, AnalysisReport},
    client::InnertubeClient,
    config::Config,
    error::AnalyzerError,
    sentiment::{SentimentLabel, VaderScorer},
    url,
};

#[derive(Parser)]
#[command(name = "yt-sentiment")]
#[command(about = "Sentiment analysis for YouTube video comments")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path (defaults are used when omitted)
    #[arg(short, long)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and analyze comments for a video
    Analyze {
        /// Video URL (watch, share, embed, or shorts link)
        url: String,

        /// Maximum number of comments to analyze
        #[arg(short = 'n', long)]
        sample_size: Option<usize>,

        /// Emit the full report as JSON instead of tables
        #[arg(long)]
        json: bool,
    },
    /// Check whether a URL is a recognizable video link (no network)
    Check {
        url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };

    match cli.command {
        Commands::Analyze {
            url,
            sample_size,
            json,
        } => analyze(config, &url, sample_size, json).await,
        Commands::Check { url } => check(&url),
    }
}

async fn analyze(
    config: Config,
    url: &str,
    sample_size: Option<usize>,
    json: bool,
) -> anyhow::Result<()> {
    let sample_size = sample_size.unwrap_or(config.analysis.default_sample_size);

    let client = InnertubeClient::new(config.youtube)?;
    let engine = AnalysisEngine::new(client, VaderScorer::new(), config.analysis);

    let report = match engine.analyze(url, sample_size).await {
        Ok(report) => report,
        Err(AnalyzerError::EmptyBatch) => {
            println!("No comments found.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    render_report(&report);
    Ok(())
}

fn check(url: &str) -> anyhow::Result<()> {
    match url::parse_video_url(url) {
        Some(id) => {
            println!("OK: video id {id}");
            Ok(())
        }
        None => anyhow::bail!("not a recognizable YouTube video URL: {url}"),
    }
}

fn render_report(report: &AnalysisReport) {
    let batch = &report.batch;
    let summary = &report.summary;

    if batch.is_partial() {
        println!(
            "\nAnalyzed {} comments only (the video has fewer than the {} requested)\n",
            batch.retrieved(),
            batch.requested()
        );
    } else {
        println!("\nAnalyzed {} comments\n", batch.retrieved());
    }

    println!("{:<64} {:>10}", "Comment", "Review");
    println!("{}", "-".repeat(76));
    for scored in batch.comments() {
        println!("{:<64} {:>10}", scored.comment.preview(64), scored.label);
    }

    println!("\nComments Review Distribution");
    let max_count = SentimentLabel::ALL
        .iter()
        .map(|&l| summary.stats(l).count)
        .max()
        .unwrap_or(0)
        .max(1);
    for label in SentimentLabel::ALL {
        let stats = summary.stats(label);
        let bar_len = stats.count * 40 / max_count;
        println!(
            "  {:<8} {:<40} {}",
            label.to_string(),
            "#".repeat(bar_len),
            stats.count
        );
    }

    println!("\nStatus");
    println!("  Positive reviews (😊): {}%", summary.positive.percentage);
    println!("  Neutral reviews  (😐): {}%", summary.neutral.percentage);
    println!("  Negative reviews (😔): {}%", summary.negative.percentage);
    println!(
        "  Dominant: {} ({} of {}, {}%)",
        summary.dominant,
        summary.dominant_stats().count,
        summary.total,
        summary.dominant_stats().percentage
    );
    println!("  Mean compound score: {:.4}", summary.mean_compound);
}
