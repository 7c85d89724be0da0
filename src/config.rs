//! Configuration management

use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub youtube: YoutubeConfig,
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct YoutubeConfig {
    /// Web frontend base URL (watch pages and the youtubei endpoints)
    pub base_url: String,
    /// User agent sent with every request
    pub user_agent: String,
    /// Accept-Language header; comment text is returned as-is, but menu
    /// labels and relative timestamps follow this
    pub accept_language: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Page comments newest-first instead of the default top-comments order
    pub sort_newest_first: bool,
}

impl Default for YoutubeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.youtube.com".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            timeout_secs: 30,
            sort_newest_first: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Hard cap on how many comments one run may request
    pub max_sample_size: usize,
    /// Sample size used when the caller does not pass one
    pub default_sample_size: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_sample_size: 1000,
            default_sample_size: 100,
        }
    }
}

impl Config {
    /// Load configuration from file, with YT_SENTIMENT_* env overrides
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref().to_str().ok_or_else(|| {
            anyhow::anyhow!("config path is not valid UTF-8: {}", path.as_ref().display())
        })?;
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("YT_SENTIMENT"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        Ok(config)
    }

    /// Load from default locations, falling back to compiled-in defaults
    pub fn load_default() -> anyhow::Result<Self> {
        let paths = ["yt-sentiment.toml", "~/.config/yt-sentiment/config.toml"];

        for path in paths {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                return Self::load(expanded.as_ref());
            }
        }

        // No file found: defaults plus any env overrides
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix("YT_SENTIMENT"))
            .build()?;
        let config: Config = settings.try_deserialize()?;
        Ok(config)
    }
}
