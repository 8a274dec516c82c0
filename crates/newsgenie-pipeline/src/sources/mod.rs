//! Article sources: registry feeds and the optional keyed News API.

mod feed;
mod news_api;
mod text;

use std::time::Duration;

use futures::future::join_all;
use newsgenie_core::{Article, Category, SourceConfig, SourceRegistry};
use reqwest::Client;

pub use feed::parse_feed;
pub use news_api::NewsApiClient;

use crate::error::FeedError;

/// Per-source bounds applied while normalizing entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedLimits {
    /// Only the newest N entries of each source are kept.
    pub max_entries_per_source: usize,
    /// Summaries are cut to this many characters after HTML stripping.
    pub summary_max_chars: usize,
}

impl Default for FeedLimits {
    fn default() -> Self {
        Self {
            max_entries_per_source: 20,
            summary_max_chars: 500,
        }
    }
}

/// Fetches every registry source plus the optional News API.
pub struct FeedClient {
    client: Client,
    registry: SourceRegistry,
    news_api: Option<NewsApiClient>,
    limits: FeedLimits,
}

impl FeedClient {
    /// Creates a `FeedClient` with a per-request timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        registry: SourceRegistry,
        timeout_secs: u64,
        user_agent: &str,
        limits: FeedLimits,
    ) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            registry,
            news_api: None,
            limits,
        })
    }

    /// Attach the keyed News API source.
    #[must_use]
    pub fn with_news_api(mut self, news_api: NewsApiClient) -> Self {
        self.news_api = Some(news_api);
        self
    }

    #[must_use]
    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Fetch from every source concurrently and return all articles as one
    /// batch, before any deduplication.
    ///
    /// A failing source is logged and contributes nothing; the others are
    /// unaffected. Returns an empty `Vec` only if every source fails or is
    /// empty. Output order is News API first, then registry order.
    pub async fn fetch_all(&self, category: Option<Category>) -> Vec<Article> {
        let sources: Vec<&SourceConfig> = self.registry.for_category(category).collect();
        tracing::info!(count = sources.len(), ?category, "fetching feeds");

        let feeds = join_all(sources.iter().map(|source| self.fetch_source(source)));
        let (api_articles, feed_results) = tokio::join!(self.fetch_news_api(category), feeds);

        let mut articles = api_articles;
        for batch in feed_results {
            articles.extend(batch);
        }

        if articles.is_empty() {
            tracing::warn!("no articles fetched from any source");
        }
        articles
    }

    async fn fetch_news_api(&self, category: Option<Category>) -> Vec<Article> {
        match &self.news_api {
            Some(api) => api.top_headlines(category, self.limits).await,
            None => Vec::new(),
        }
    }

    async fn fetch_source(&self, source: &SourceConfig) -> Vec<Article> {
        match self.fetch_feed(source).await {
            Ok(articles) => {
                tracing::debug!(
                    source = %source.id,
                    count = articles.len(),
                    "collected feed articles"
                );
                articles
            }
            Err(e) => {
                tracing::warn!(
                    source = %source.id,
                    url = %source.url,
                    error = %e,
                    "feed fetch failed"
                );
                Vec::new()
            }
        }
    }

    /// Fetch and parse a single registry source. Single attempt, no retry.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] on network failure or timeout,
    /// [`FeedError::UnexpectedStatus`] on a non-2xx response, or
    /// [`FeedError::Parse`] if the body is not a feed.
    pub async fn fetch_feed(&self, source: &SourceConfig) -> Result<Vec<Article>, FeedError> {
        let response = self.client.get(&source.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::UnexpectedStatus {
                status: status.as_u16(),
                url: source.url.clone(),
            });
        }
        let body = response.bytes().await?;
        parse_feed(&body, source, self.limits)
    }
}
