//! Wiring from `AppConfig` to the pipeline, cache and assistant.

use std::sync::Arc;
use std::time::Duration;

use newsgenie_assistant::{GenerativeAdapter, HttpGenerator, Router, Session, TextGenerator};
use newsgenie_core::{AppConfig, Category};
use newsgenie_pipeline::{
    load_keyword_tables, Categorizer, CorpusCache, FeedClient, FeedLimits, KeywordTables,
    NewsApiClient, Pipeline,
};
use tokio::sync::OnceCell;

/// Printed once when no source produced any article.
pub(crate) const EMPTY_CORPUS_ADVISORY: &str = "No articles could be fetched from any source. \
Check your network connection, then run the command again (or type `refresh` in chat).";

pub(crate) struct App {
    config: AppConfig,
    cache: Arc<CorpusCache>,
    generator: OnceCell<Option<Arc<dyn TextGenerator>>>,
}

impl App {
    /// Load the registry and keyword tables and assemble the refresh chain.
    ///
    /// # Errors
    ///
    /// Returns an error if the source registry or taxonomy file is invalid or
    /// an HTTP client cannot be built.
    pub(crate) fn build(config: AppConfig, category: Option<Category>) -> anyhow::Result<Self> {
        let registry = newsgenie_core::load_sources(&config.sources_path)?;
        let tables = match &config.taxonomy_path {
            Some(path) => load_keyword_tables(path)?,
            None => KeywordTables::default(),
        };

        let limits = FeedLimits {
            max_entries_per_source: config.max_entries_per_source,
            summary_max_chars: config.summary_max_chars,
        };
        let mut feeds = FeedClient::new(
            registry,
            config.request_timeout_secs,
            &config.user_agent,
            limits,
        )?;
        match &config.news_api_key {
            Some(key) => {
                feeds = feeds.with_news_api(NewsApiClient::new(
                    key,
                    &config.news_api_base_url,
                    config.request_timeout_secs,
                    &config.user_agent,
                )?);
            }
            None => tracing::info!("NEWS_API_KEY not set; keyed source disabled"),
        }

        tracing::info!(
            sources = feeds.registry().sources.len(),
            ?category,
            "pipeline configured"
        );
        let pipeline = Pipeline::new(feeds, Categorizer::new(&tables), config.corpus_max)
            .with_category(category);
        let cache = Arc::new(CorpusCache::new(
            pipeline,
            Duration::from_secs(config.cache_ttl_secs),
        ));

        Ok(Self {
            config,
            cache,
            generator: OnceCell::new(),
        })
    }

    pub(crate) fn cache(&self) -> &CorpusCache {
        &self.cache
    }

    /// Connect to the text generator the first time it is needed.
    ///
    /// Initialization runs at most once per process; a failed connection is
    /// remembered as absent.
    async fn generator(&self) -> Option<Arc<dyn TextGenerator>> {
        self.generator
            .get_or_init(|| async {
                let url = self.config.generator_url.as_deref()?;
                match HttpGenerator::connect(url, self.config.generator_timeout_secs).await {
                    Ok(generator) => Some(Arc::new(generator) as Arc<dyn TextGenerator>),
                    Err(e) => {
                        tracing::warn!(error = %e, "text generator unavailable; using rule-based answers only");
                        None
                    }
                }
            })
            .await
            .clone()
    }

    /// A fresh conversation over the shared cache.
    pub(crate) async fn session(&self) -> Session {
        let adapter = self.generator().await.map(|handle| {
            GenerativeAdapter::new(Some(handle))
                .with_max_new_tokens(self.config.generator_max_new_tokens)
                .with_timeout(Duration::from_secs(self.config.generator_timeout_secs))
        });
        Session::new(Arc::clone(&self.cache), Router::new()).with_adapter(adapter)
    }
}
