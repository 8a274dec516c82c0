//! The published article corpus and its refresh cache.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use newsgenie_core::Article;
use tokio::sync::{Mutex, RwLock};

use crate::pipeline::Pipeline;

/// Enriched articles from one refresh cycle, newest first.
///
/// Immutable once built; a refresh produces a new `Corpus` instead of
/// editing this one.
#[derive(Debug, Clone)]
pub struct Corpus {
    articles: Vec<Article>,
    epoch: u64,
    built_at: DateTime<Utc>,
}

impl Corpus {
    /// Wrap articles that are already ordered and capped.
    #[must_use]
    pub fn new(articles: Vec<Article>, epoch: u64) -> Self {
        Self {
            articles,
            epoch,
            built_at: Utc::now(),
        }
    }

    /// Sort newest first (undated last, otherwise stable) and keep at most
    /// `max_articles`.
    #[must_use]
    pub fn from_articles(mut articles: Vec<Article>, epoch: u64, max_articles: usize) -> Self {
        articles.sort_by(Article::newest_first);
        articles.truncate(max_articles);
        Self::new(articles, epoch)
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new(), 0)
    }

    #[must_use]
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Refresh counter; increases by one per rebuilt corpus.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    #[must_use]
    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }
}

struct CachedCorpus {
    corpus: Arc<Corpus>,
    fetched_at: Instant,
}

/// Holds the current corpus and rebuilds it when it goes stale.
///
/// Readers get an `Arc` snapshot and never see a half-built corpus: a
/// refresh runs the whole pipeline first and only then swaps the pointer.
/// Refreshes are serialized so concurrent callers trigger one rebuild.
pub struct CorpusCache {
    pipeline: Pipeline,
    ttl: Duration,
    current: RwLock<Option<CachedCorpus>>,
    refresh_lock: Mutex<()>,
    epoch: AtomicU64,
}

impl CorpusCache {
    #[must_use]
    pub fn new(pipeline: Pipeline, ttl: Duration) -> Self {
        Self {
            pipeline,
            ttl,
            current: RwLock::new(None),
            refresh_lock: Mutex::new(()),
            epoch: AtomicU64::new(0),
        }
    }

    /// Current corpus, rebuilding first if it is missing or older than the TTL.
    pub async fn get(&self) -> Arc<Corpus> {
        if let Some(corpus) = self.fresh().await {
            return corpus;
        }

        let _guard = self.refresh_lock.lock().await;
        // Another caller may have rebuilt while we waited.
        if let Some(corpus) = self.fresh().await {
            return corpus;
        }
        self.rebuild().await
    }

    /// Rebuild now, regardless of age.
    pub async fn refresh(&self) -> Arc<Corpus> {
        let _guard = self.refresh_lock.lock().await;
        self.rebuild().await
    }

    /// Drop the cached corpus so the next [`CorpusCache::get`] rebuilds.
    pub async fn invalidate(&self) {
        *self.current.write().await = None;
        tracing::info!("corpus cache invalidated");
    }

    async fn fresh(&self) -> Option<Arc<Corpus>> {
        let current = self.current.read().await;
        current
            .as_ref()
            .filter(|cached| cached.fetched_at.elapsed() < self.ttl)
            .map(|cached| Arc::clone(&cached.corpus))
    }

    async fn rebuild(&self) -> Arc<Corpus> {
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        let corpus = Arc::new(self.pipeline.run(epoch).await);

        *self.current.write().await = Some(CachedCorpus {
            corpus: Arc::clone(&corpus),
            fetched_at: Instant::now(),
        });
        corpus
    }
}
