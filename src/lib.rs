//! YouTube Comment Sentiment Analyzer
//!
//! Fetches up to N comments for a video, scores each with a VADER lexicon
//! analyzer, and aggregates label counts, percentages, and a dominant label.

pub mod analysis;
pub mod client;
pub mod config;
pub mod error;
pub mod sentiment;
pub mod url;
