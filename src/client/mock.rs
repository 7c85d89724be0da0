//! Mock comment source for testing
//!
//! Deterministic stand-in for the network client: fixed comment list,
//! optional injected failures, and a call counter so tests can assert
//! that no retrieval happened.

use crate::client::{Comment, CommentSource, CommentStream};
use crate::error::{AnalyzerError, Result};
use crate::url::VideoId;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Where the mock should fail, if anywhere
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailureMode {
    None,
    /// Error before any comment is produced
    OnOpen,
    /// Error after yielding this many comments
    AfterComments(usize),
}

pub struct MockCommentSource {
    comments: Vec<Comment>,
    failure: FailureMode,
    calls: Arc<AtomicUsize>,
}

impl MockCommentSource {
    pub fn new(comments: Vec<Comment>) -> Self {
        Self {
            comments,
            failure: FailureMode::None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Build a source from bare comment texts, filling in synthetic
    /// authors and ids
    pub fn from_texts<S: AsRef<str>>(texts: &[S]) -> Self {
        let comments = texts
            .iter()
            .enumerate()
            .map(|(i, text)| Comment {
                id: format!("mock-comment-{i}"),
                text: text.as_ref().to_string(),
                author: format!("@viewer{i}"),
                published: "1 day ago".to_string(),
                like_count: 0,
                reply_count: 0,
                is_hearted: false,
                author_is_channel_owner: false,
                fetched_at: Utc::now(),
            })
            .collect();
        Self::new(comments)
    }

    /// Fail when the stream is opened
    pub fn failing() -> Self {
        Self {
            comments: Vec::new(),
            failure: FailureMode::OnOpen,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Fail mid-stream, after `n` comments have been produced
    pub fn failing_after(mut self, n: usize) -> Self {
        self.failure = FailureMode::AfterComments(n);
        self
    }

    /// How many times `stream_comments` was called
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CommentSource for MockCommentSource {
    async fn stream_comments(&self, _video: &VideoId) -> Result<CommentStream> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match self.failure {
            FailureMode::OnOpen => Err(AnalyzerError::Source(
                "mock source failure".to_string(),
            )),
            FailureMode::AfterComments(n) => {
                let mut items: Vec<Result<Comment>> = self
                    .comments
                    .iter()
                    .take(n)
                    .cloned()
                    .map(Ok)
                    .collect();
                items.push(Err(AnalyzerError::Source(
                    "mock source failure".to_string(),
                )));
                Ok(CommentStream::from_results(items))
            }
            FailureMode::None => Ok(CommentStream::from_results(
                self.comments.iter().cloned().map(Ok).collect(),
            )),
        }
    }
}
