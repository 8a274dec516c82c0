//! Keyed newsapi.org `top-headlines` source.

use std::time::Duration;

use newsgenie_core::{Article, Category};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use super::text::{clean_summary, parse_published, strip_html};
use super::FeedLimits;
use crate::error::FeedError;

/// Sources queried when no category filter applies. The API rejects
/// `sources` combined with `category`, so the two are never sent together.
const DEFAULT_SOURCES: &str = "bbc-news,cnn,the-verge,techcrunch,reuters,espn,bbc-sport";

/// Placeholder title the API returns for withdrawn articles.
const REMOVED_MARKER: &str = "[Removed]";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TopHeadlinesResponse {
    status: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsApiArticle {
    source: Option<NewsApiSource>,
    author: Option<String>,
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    url_to_image: Option<String>,
    published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsApiSource {
    name: Option<String>,
}

/// Client for the optional keyed News API.
///
/// Only constructed when an API key is configured. Every failure mode
/// (bad key, rate limit, server error, timeout, malformed body) collapses to
/// an empty result in [`NewsApiClient::top_headlines`].
pub struct NewsApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for NewsApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsApiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[redacted]")
            .finish_non_exhaustive()
    }
}

impl NewsApiClient {
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(
        api_key: &str,
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Fetch top headlines, optionally narrowed to a category.
    ///
    /// Never fails: errors are logged and produce an empty `Vec`.
    pub async fn top_headlines(&self, category: Option<Category>, limits: FeedLimits) -> Vec<Article> {
        match self.try_top_headlines(category, limits).await {
            Ok(articles) => articles,
            Err(FeedError::UnexpectedStatus { status, .. }) => {
                let reason = match StatusCode::from_u16(status) {
                    Ok(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => "authentication failed",
                    Ok(StatusCode::TOO_MANY_REQUESTS) => "rate limited",
                    Ok(s) if s.is_server_error() => "server error",
                    _ => "unexpected status",
                };
                tracing::warn!(source = "news_api", status, reason, "News API request rejected");
                Vec::new()
            }
            Err(FeedError::Http(e)) if e.is_timeout() => {
                tracing::warn!(source = "news_api", error = %e, "News API request timed out");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(source = "news_api", error = %e, "News API fetch failed");
                Vec::new()
            }
        }
    }

    async fn try_top_headlines(
        &self,
        category: Option<Category>,
        limits: FeedLimits,
    ) -> Result<Vec<Article>, FeedError> {
        let url = format!("{}/v2/top-headlines", self.base_url);
        let page_size = limits.max_entries_per_source.to_string();

        let mut query: Vec<(&str, &str)> = vec![("pageSize", page_size.as_str())];
        match category.and_then(api_category) {
            Some(api_cat) => {
                query.push(("category", api_cat));
                query.push(("country", "us"));
            }
            None => query.push(("sources", DEFAULT_SOURCES)),
        }

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .query(&query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let parsed: TopHeadlinesResponse =
            serde_json::from_str(&body).map_err(|e| FeedError::Deserialize {
                context: "News API top-headlines".to_string(),
                source: e,
            })?;

        if parsed.status != "ok" {
            return Err(FeedError::NewsApi {
                code: parsed.code.unwrap_or_else(|| "unknown".to_string()),
                message: parsed.message.unwrap_or_default(),
            });
        }

        let articles: Vec<Article> = parsed
            .articles
            .into_iter()
            .filter_map(|raw| convert_article(raw, limits.summary_max_chars))
            .take(limits.max_entries_per_source)
            .collect();

        tracing::debug!(source = "news_api", count = articles.len(), "collected News API articles");
        Ok(articles)
    }
}

/// Map a taxonomy category onto the API's fixed category vocabulary.
fn api_category(category: Category) -> Option<&'static str> {
    match category {
        Category::Business => Some("business"),
        Category::Entertainment => Some("entertainment"),
        Category::Health => Some("health"),
        Category::Science => Some("science"),
        Category::Sports => Some("sports"),
        Category::Technology => Some("technology"),
        Category::General => Some("general"),
        Category::Politics | Category::World => None,
    }
}

fn convert_article(raw: NewsApiArticle, summary_max_chars: usize) -> Option<Article> {
    let url = raw.url.filter(|u| !u.trim().is_empty())?;
    let title = raw
        .title
        .map(|t| strip_html(&t))
        .filter(|t| !t.is_empty() && t != REMOVED_MARKER)?;

    let source = raw
        .source
        .and_then(|s| s.name)
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| "News API".to_string());

    let summary = raw
        .description
        .map(|d| clean_summary(&d, summary_max_chars))
        .unwrap_or_default();

    Some(
        Article::new(url, title, source)
            .with_summary(summary)
            .with_published(raw.published_at.as_deref().and_then(parse_published))
            .with_author(raw.author.filter(|a| !a.trim().is_empty()))
            .with_image_url(raw.url_to_image.filter(|u| !u.trim().is_empty())),
    )
}
