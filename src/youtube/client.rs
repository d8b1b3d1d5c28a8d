//! Channel video fetcher for the YouTube Data API v3.
//!
//! Fetches either a live search of one channel or the bundled default videos
//! and normalizes both into [`VideoRecord`]s.

use crate::config::Config;
use crate::youtube::error::FetchError;
use crate::youtube::models::{ApiSearchResponse, VideoRecord};
use anyhow::{Context, Result};
use rand::Rng;
use rand::seq::SliceRandom;
use reqwest::{Client, Url};
use std::time::Duration;

/// Channel whose videos are searched.
pub const CHANNEL_ID: &str = "UCsT0YIqwnpJCM-mx7-gSA4Q";

/// `maxResults` sent with every search.
pub const SEARCH_MAX_RESULTS: u32 = 5;

/// Upper bound on the number of default videos returned.
pub const DEFAULT_VIDEOS_LIMIT: usize = 6;

/// Path of the default videos file relative to the static origin.
pub const DEFAULT_VIDEOS_PATH: &str = "/default-videos.json";

/// Options for a single fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Load the bundled default videos instead of searching
    pub use_default_videos: bool,
    /// Free-text search query; ignored when empty
    pub search_query: Option<String>,
}

impl RequestOptions {
    /// Options for the shuffled default videos.
    pub fn default_videos() -> Self {
        Self {
            use_default_videos: true,
            search_query: None,
        }
    }

    /// Options for a channel search with a query.
    pub fn search(query: impl Into<String>) -> Self {
        Self {
            use_default_videos: false,
            search_query: Some(query.into()),
        }
    }

    fn query(&self) -> Option<&str> {
        self.search_query.as_deref().filter(|q| !q.is_empty())
    }
}

/// Fetches and normalizes channel videos.
///
/// Holds no per-call state; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct VideoFetcher {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// Base URL for YouTube Data API
    api_base_url: String,
    /// Origin serving the default videos file
    static_base_url: String,
}

impl VideoFetcher {
    /// Create a new fetcher from configuration.
    ///
    /// # Arguments
    /// * `config` - Application configuration
    ///
    /// # Returns
    /// * `Result<VideoFetcher>` - New fetcher or error
    ///
    /// # Details
    /// An empty API key only produces a warning here. Searches are still
    /// sent and will be rejected by the API.
    pub fn new(config: &Config) -> Result<Self> {
        if config.api_key.is_empty() {
            tracing::warn!(
                "YouTube API key is empty. Set {} in your environment or .env file, or api_key in config.jsonc",
                crate::config::API_KEY_ENV
            );
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            static_base_url: config.static_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build the URL a fetch with these options would request.
    ///
    /// # Arguments
    /// * `options` - Request options
    ///
    /// # Returns
    /// * `Result<Url, FetchError>` - Default videos file or search URL
    pub fn request_url(&self, options: &RequestOptions) -> Result<Url, FetchError> {
        if options.use_default_videos {
            let url = format!("{}{}", self.static_base_url, DEFAULT_VIDEOS_PATH);
            return Url::parse(&url)
                .map_err(|e| FetchError::Unrecognized(format!("invalid static URL {url}: {e}")));
        }

        let max_results = SEARCH_MAX_RESULTS.to_string();
        let mut params = vec![
            ("part", "snippet"),
            ("channelId", CHANNEL_ID),
            ("type", "video"),
            ("key", self.api_key.as_str()),
            ("maxResults", max_results.as_str()),
            ("videoEmbeddable", "true"),
        ];
        if let Some(query) = options.query() {
            params.push(("q", query));
        }

        let url = format!("{}/search", self.api_base_url);
        Url::parse_with_params(&url, &params)
            .map_err(|e| FetchError::Unrecognized(format!("invalid API URL {url}: {e}")))
    }

    /// Fetch channel videos.
    ///
    /// # Arguments
    /// * `options` - Default videos or search, plus optional query
    ///
    /// # Returns
    /// * `Result<Vec<VideoRecord>, FetchError>` - Records or a single-message error
    ///
    /// # Details
    /// Search results keep API order. Default videos are shuffled and cut to
    /// at most [`DEFAULT_VIDEOS_LIMIT`]. One attempt, no retries.
    pub async fn fetch_channel_videos(
        &self,
        options: &RequestOptions,
    ) -> Result<Vec<VideoRecord>, FetchError> {
        let result = self.try_fetch(options).await;
        if let Err(FetchError::Unrecognized(detail)) = &result {
            tracing::warn!(%detail, "fetching channel videos failed");
        }
        result
    }

    async fn try_fetch(&self, options: &RequestOptions) -> Result<Vec<VideoRecord>, FetchError> {
        let url = self.request_url(options)?;
        tracing::debug!(
            default_videos = options.use_default_videos,
            path = url.path(),
            "fetching channel videos"
        );

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            tracing::debug!(%status, "API returned an error status");
            return Err(FetchError::from_error_body(&body));
        }

        let api_response: ApiSearchResponse = serde_json::from_slice(&body)
            .map_err(|e| FetchError::Unrecognized(format!("failed to parse response: {e}")))?;
        let videos = api_response.into_records();

        if options.use_default_videos {
            Ok(pick_default_videos(videos, &mut rand::rng()))
        } else {
            Ok(videos)
        }
    }
}

/// Shuffle default videos uniformly and keep at most [`DEFAULT_VIDEOS_LIMIT`].
///
/// # Arguments
/// * `videos` - Records from the default videos file
/// * `rng` - Random source
///
/// # Returns
/// * `Vec<VideoRecord>` - Shuffled, truncated records
pub fn pick_default_videos<R: Rng + ?Sized>(
    mut videos: Vec<VideoRecord>,
    rng: &mut R,
) -> Vec<VideoRecord> {
    videos.shuffle(rng);
    videos.truncate(DEFAULT_VIDEOS_LIMIT);
    videos
}
