//! YouTube comment retrieval
//!
//! This module provides the comment source used by the analysis pipeline:
//! - InnerTube client: pages comments through the same youtubei endpoints
//!   the web player uses
//! - Mock source: canned comments for tests and offline runs

pub mod innertube;
pub mod mock;

pub use innertube::InnertubeClient;
pub use mock::MockCommentSource;

use crate::error::Result;
use crate::url::VideoId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc;

/// A single comment fetched from a video
#[derive(Debug, Clone, Serialize)]
pub struct Comment {
    pub id: String,
    pub text: String,
    pub author: String,
    /// Relative display string, e.g. "2 days ago"
    pub published: String,
    pub like_count: u64,
    pub reply_count: u64,
    pub is_hearted: bool,
    pub author_is_channel_owner: bool,
    pub fetched_at: DateTime<Utc>,
}

impl Comment {
    /// Single-line preview capped at `max_chars`, for table output
    pub fn preview(&self, max_chars: usize) -> String {
        let flat = self.text.replace(['\n', '\r'], " ");
        if flat.chars().count() <= max_chars {
            return flat;
        }
        let cut: String = flat.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", cut.trim_end())
    }
}

/// Source of comments for a video (allows mocking)
#[async_trait]
pub trait CommentSource: Send + Sync {
    /// Open a lazy comment sequence for the video.
    ///
    /// The sequence may be unbounded; callers pull as many items as they
    /// need and drop the stream to stop retrieval.
    async fn stream_comments(&self, video: &VideoId) -> Result<CommentStream>;
}

/// Lazy comment sequence backed by a channel.
///
/// The producer side is either a paging task (network source) or a
/// pre-filled buffer (mock source). Dropping the stream closes the channel
/// and stops a paging producer.
#[derive(Debug)]
pub struct CommentStream {
    rx: mpsc::Receiver<Result<Comment>>,
}

impl CommentStream {
    pub(crate) fn new(rx: mpsc::Receiver<Result<Comment>>) -> Self {
        Self { rx }
    }

    /// Build a stream from fixed items. Used by mock sources.
    pub fn from_results(items: Vec<Result<Comment>>) -> Self {
        let (tx, rx) = mpsc::channel(items.len().max(1));
        for item in items {
            // capacity equals item count, so try_send cannot fail
            let _ = tx.try_send(item);
        }
        Self { rx }
    }

    /// Next comment, or `None` once the source is exhausted
    pub async fn next(&mut self) -> Option<Result<Comment>> {
        self.rx.recv().await
    }

    /// Collect at most `n` comments.
    ///
    /// Exhaustion before `n` is not an error: the caller compares the
    /// returned length against what it requested. A failed fetch aborts
    /// the whole run with the underlying cause.
    pub async fn take(mut self, n: usize) -> Result<Vec<Comment>> {
        let mut comments = Vec::with_capacity(n.min(64));
        while comments.len() < n {
            match self.next().await {
                Some(Ok(comment)) => comments.push(comment),
                Some(Err(e)) => return Err(e),
                None => break,
            }
        }
        Ok(comments)
    }
}
