//! InnerTube comment client
//!
//! Fetches comments the way the web player does: bootstrap from the watch
//! page (API key, client version, and the comment-section continuation
//! token embedded in the page), then page `POST /youtubei/v1/next`
//! following continuation tokens until the section is exhausted.

use crate::client::{Comment, CommentSource, CommentStream};
use crate::config::YoutubeConfig;
use crate::error::{AnalyzerError, Result};
use crate::url::VideoId;
use async_trait::async_trait;
use chrono::Utc;
use regex::Regex;
use reqwest::{header, Client};
use serde_json::{json, Value};
use std::sync::OnceLock;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

/// Fallback when the watch page does not expose its client version
const DEFAULT_CLIENT_VERSION: &str = "2.20240101.00.00";

/// Pre-consent cookies; without these EU requests get the consent
/// interstitial instead of the watch page
const CONSENT_COOKIE: &str = "CONSENT=YES+cb; SOCS=CAI";

/// Channel capacity between the pager task and the consumer
const PAGE_BUFFER: usize = 64;

/// Index of the "Newest first" entry in the comment sort menu
const SORT_NEWEST_FIRST: usize = 1;

/// Comment client backed by the youtubei endpoints
pub struct InnertubeClient {
    http: Client,
    config: YoutubeConfig,
}

/// Everything a paging session needs, lifted off the watch page
struct PageContext {
    api_key: String,
    client_version: String,
    continuation: String,
}

impl InnertubeClient {
    pub fn new(config: YoutubeConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT_LANGUAGE,
            header::HeaderValue::from_str(&config.accept_language)
                .map_err(|e| AnalyzerError::Config(format!("bad accept_language: {e}")))?,
        );
        headers.insert(header::COOKIE, header::HeaderValue::from_static(CONSENT_COOKIE));

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self { http, config })
    }

    /// Fetch the watch page and extract the paging context
    async fn bootstrap(&self, video: &VideoId) -> Result<PageContext> {
        let url = format!("{}/watch?v={}", self.config.base_url, video);
        debug!(%url, "fetching watch page");
        let html = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let api_key = extract_first(&html, api_key_regex())
            .ok_or_else(|| AnalyzerError::Source("watch page carries no API key".to_string()))?;
        let client_version = extract_first(&html, client_version_regex())
            .unwrap_or_else(|| DEFAULT_CLIENT_VERSION.to_string());
        let raw_initial = extract_first(&html, initial_data_regex()).ok_or_else(|| {
            AnalyzerError::Source("watch page carries no initial data".to_string())
        })?;
        let initial: Value = serde_json::from_str(&raw_initial)?;

        let continuation = find_comment_continuation(&initial).ok_or_else(|| {
            AnalyzerError::Source("comments are unavailable for this video".to_string())
        })?;

        Ok(PageContext {
            api_key,
            client_version,
            continuation,
        })
    }
}

#[async_trait]
impl CommentSource for InnertubeClient {
    async fn stream_comments(&self, video: &VideoId) -> Result<CommentStream> {
        let ctx = self.bootstrap(video).await?;
        let (tx, rx) = mpsc::channel(PAGE_BUFFER);

        let pager = Pager {
            http: self.http.clone(),
            base_url: self.config.base_url.clone(),
            sort_newest_first: self.config.sort_newest_first,
            ctx,
        };
        tokio::spawn(pager.run(tx));

        Ok(CommentStream::new(rx))
    }
}

/// Background task that pages comments into the stream channel.
///
/// Stops when the section is exhausted, a fetch fails, or the consumer
/// drops the stream.
struct Pager {
    http: Client,
    base_url: String,
    sort_newest_first: bool,
    ctx: PageContext,
}

impl Pager {
    async fn run(mut self, tx: mpsc::Sender<Result<Comment>>) {
        let mut sort_pending = self.sort_newest_first;
        loop {
            let page = match self.fetch_page().await {
                Ok(page) => page,
                Err(e) => {
                    let _ = tx.send(Err(e)).await;
                    return;
                }
            };

            // The first page carries the sort menu; switch to newest-first
            // once and refetch from the new continuation.
            if sort_pending {
                sort_pending = false;
                if let Some(token) = find_sort_token(&page, SORT_NEWEST_FIRST) {
                    debug!("switching comment order to newest-first");
                    self.ctx.continuation = token;
                    continue;
                }
            }

            let (comments, next) = parse_page(&page);
            debug!(count = comments.len(), has_next = next.is_some(), "comment page fetched");

            for comment in comments {
                if tx.send(Ok(comment)).await.is_err() {
                    // consumer hung up; stop paging
                    return;
                }
            }

            match next {
                Some(token) => self.ctx.continuation = token,
                None => return,
            }
        }
    }

    async fn fetch_page(&self) -> Result<Value> {
        let url = format!("{}/youtubei/v1/next?key={}", self.base_url, self.ctx.api_key);
        let body = json!({
            "context": {
                "client": {
                    "clientName": "WEB",
                    "clientVersion": self.ctx.client_version,
                    "hl": "en",
                }
            },
            "continuation": self.ctx.continuation,
        });

        let page = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(page)
    }
}

fn api_key_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#""INNERTUBE_API_KEY":"([^"]+)""#).unwrap())
}

fn client_version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#""INNERTUBE_CONTEXT_CLIENT_VERSION":"([^"]+)""#).unwrap())
}

fn initial_data_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)var ytInitialData\s*=\s*(\{.*?\});\s*</script>").unwrap())
}

fn extract_first(html: &str, re: &Regex) -> Option<String> {
    re.captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Continuation token for the comment section, from the watch page's
/// initial data. Prefers the section explicitly identified as the comment
/// item section; older layouts are covered by taking the first item
/// section that carries a continuation.
pub(crate) fn find_comment_continuation(initial: &Value) -> Option<String> {
    let sections = find_objects(initial, "itemSectionRenderer");

    for section in &sections {
        if section.get("sectionIdentifier").and_then(Value::as_str) == Some("comment-item-section")
        {
            if let Some(token) = first_continuation(section) {
                return Some(token);
            }
        }
    }
    sections.iter().find_map(|s| first_continuation(s))
}

fn first_continuation(section: &Value) -> Option<String> {
    find_objects(section, "continuationItemRenderer")
        .into_iter()
        .find_map(continuation_token)
}

fn continuation_token(renderer: &Value) -> Option<String> {
    find_objects(renderer, "continuationCommand")
        .into_iter()
        .find_map(|c| c.get("token").and_then(Value::as_str))
        .map(str::to_string)
}

/// Continuation token that re-sorts the section, from the sort menu on the
/// first comment page. `None` when the menu is missing or that order is
/// already selected.
pub(crate) fn find_sort_token(page: &Value, index: usize) -> Option<String> {
    let menu = find_objects(page, "sortFilterSubMenuRenderer").into_iter().next()?;
    let item = menu.get("subMenuItems")?.as_array()?.get(index)?;
    if item.get("selected").and_then(Value::as_bool) == Some(true) {
        return None;
    }
    continuation_token(item)
}

/// Decode one `next` response into comments plus the token for the
/// following page
pub(crate) fn parse_page(page: &Value) -> (Vec<Comment>, Option<String>) {
    let mut comments = Vec::new();
    let mut next = None;

    for action in find_objects(page, "appendContinuationItemsAction")
        .into_iter()
        .chain(find_objects(page, "reloadContinuationItemsAction"))
    {
        let Some(items) = action.get("continuationItems").and_then(Value::as_array) else {
            continue;
        };
        for item in items {
            if let Some(renderer) = item
                .get("commentThreadRenderer")
                .and_then(|t| t.get("comment"))
                .and_then(|c| c.get("commentRenderer"))
                .or_else(|| item.get("commentRenderer"))
            {
                if let Some(comment) = parse_comment(renderer) {
                    comments.push(comment);
                }
            } else if let Some(cont) = item.get("continuationItemRenderer") {
                if next.is_none() {
                    next = continuation_token(cont);
                }
            }
        }
    }

    (comments, next)
}

pub(crate) fn parse_comment(renderer: &Value) -> Option<Comment> {
    let id = renderer.get("commentId")?.as_str()?.to_string();
    let text = runs_text(renderer.get("contentText")?);

    let author = renderer.get("authorText").map(text_of).unwrap_or_default();
    let published = renderer
        .get("publishedTimeText")
        .map(text_of)
        .unwrap_or_default();
    let like_count = renderer
        .get("voteCount")
        .map(|v| parse_count(&text_of(v)))
        .unwrap_or(0);
    let reply_count = renderer
        .get("replyCount")
        .and_then(Value::as_u64)
        .unwrap_or(0);
    let is_hearted = find_objects(renderer, "isHearted")
        .first()
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    let author_is_channel_owner = renderer
        .get("authorIsChannelOwner")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    Some(Comment {
        id,
        text,
        author,
        published,
        like_count,
        reply_count,
        is_hearted,
        author_is_channel_owner,
        fetched_at: Utc::now(),
    })
}

/// Abbreviated display counts like "1.2K" -> 1200
pub(crate) fn parse_count(raw: &str) -> u64 {
    let cleaned = raw.trim().replace(',', "");
    if cleaned.is_empty() {
        return 0;
    }
    let (digits, multiplier) = match cleaned.chars().last() {
        Some('K') | Some('k') => (&cleaned[..cleaned.len() - 1], 1_000.0),
        Some('M') | Some('m') => (&cleaned[..cleaned.len() - 1], 1_000_000.0),
        Some('B') | Some('b') => (&cleaned[..cleaned.len() - 1], 1_000_000_000.0),
        _ => (cleaned.as_str(), 1.0),
    };
    digits
        .parse::<f64>()
        .map(|v| (v * multiplier).round() as u64)
        .unwrap_or(0)
}

fn text_of(value: &Value) -> String {
    if let Some(s) = value.get("simpleText").and_then(Value::as_str) {
        return s.to_string();
    }
    runs_text(value)
}

fn runs_text(value: &Value) -> String {
    value
        .get("runs")
        .and_then(Value::as_array)
        .map(|runs| {
            runs.iter()
                .filter_map(|r| r.get("text").and_then(Value::as_str))
                .collect::<String>()
        })
        .unwrap_or_default()
}

/// Collect every value stored under `key` anywhere in the tree
pub(crate) fn find_objects<'a>(value: &'a Value, key: &str) -> Vec<&'a Value> {
    let mut found = Vec::new();
    collect_objects(value, key, &mut found);
    found
}

fn collect_objects<'a>(value: &'a Value, key: &str, found: &mut Vec<&'a Value>) {
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                if k == key {
                    found.push(v);
                }
                collect_objects(v, key, found);
            }
        }
        Value::Array(items) => {
            for v in items {
                collect_objects(v, key, found);
            }
        }
        _ => {}
    }
}
