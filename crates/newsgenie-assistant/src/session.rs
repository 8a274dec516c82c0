//! Per-user conversation state.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use newsgenie_pipeline::{Corpus, CorpusCache};

use crate::generative::GenerativeAdapter;
use crate::router::Router;

/// One question and the reply it got.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub query: String,
    pub response: String,
    /// Epoch of the corpus the reply was computed from.
    pub corpus_epoch: u64,
    pub asked_at: DateTime<Utc>,
}

/// Conversation over a shared corpus cache.
///
/// History is append-only until [`Session::refresh`] clears it.
pub struct Session {
    cache: Arc<CorpusCache>,
    router: Router,
    adapter: Option<GenerativeAdapter>,
    history: Vec<Turn>,
}

impl Session {
    #[must_use]
    pub fn new(cache: Arc<CorpusCache>, router: Router) -> Self {
        Self {
            cache,
            router,
            adapter: None,
            history: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_adapter(mut self, adapter: Option<GenerativeAdapter>) -> Self {
        self.adapter = adapter;
        self
    }

    /// Answer `query` against the current corpus and record the turn.
    pub async fn ask(&mut self, query: &str) -> String {
        let corpus = self.cache.get().await;
        let response = self
            .router
            .resolve(query, &corpus, &self.history, self.adapter.as_ref())
            .await;

        self.history.push(Turn {
            query: query.to_string(),
            response: response.clone(),
            corpus_epoch: corpus.epoch(),
            asked_at: Utc::now(),
        });
        response
    }

    /// Drop the conversation and rebuild the corpus.
    ///
    /// Always reruns the pipeline, even when a rebuild was already under way.
    pub async fn refresh(&mut self) -> Arc<Corpus> {
        self.history.clear();
        self.cache.refresh().await
    }

    /// Current corpus without recording a turn.
    pub async fn corpus(&self) -> Arc<Corpus> {
        self.cache.get().await
    }

    #[must_use]
    pub fn history(&self) -> &[Turn] {
        &self.history
    }
}
