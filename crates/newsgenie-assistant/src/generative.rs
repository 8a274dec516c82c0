//! Best-effort generative answers over the corpus.

use std::sync::Arc;
use std::time::Duration;

use newsgenie_pipeline::Corpus;

use crate::generator::TextGenerator;

/// Articles rendered into the prompt context.
pub const CONTEXT_ARTICLES: usize = 10;
/// Character cap on the rendered context.
pub const MAX_CONTEXT_CHARS: usize = 1000;
pub const DEFAULT_MAX_NEW_TOKENS: u32 = 256;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Wraps an optional [`TextGenerator`] and reduces every failure to `None`.
///
/// An adapter built with [`GenerativeAdapter::absent`] never calls out and
/// always answers `None`.
#[derive(Clone)]
pub struct GenerativeAdapter {
    handle: Option<Arc<dyn TextGenerator>>,
    max_new_tokens: u32,
    timeout: Duration,
}

impl std::fmt::Debug for GenerativeAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerativeAdapter")
            .field("handle", &self.handle.as_ref().map(|h| h.name().to_string()))
            .field("max_new_tokens", &self.max_new_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GenerativeAdapter {
    #[must_use]
    pub fn new(handle: Option<Arc<dyn TextGenerator>>) -> Self {
        Self {
            handle,
            max_new_tokens: DEFAULT_MAX_NEW_TOKENS,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn absent() -> Self {
        Self::new(None)
    }

    #[must_use]
    pub fn with_max_new_tokens(mut self, max_new_tokens: u32) -> Self {
        self.max_new_tokens = max_new_tokens;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.handle.is_some()
    }

    /// Answer `query` from the corpus context, or `None` if the generator is
    /// absent, fails, times out or produces only whitespace.
    pub async fn generate(&self, query: &str, corpus: &Corpus) -> Option<String> {
        let handle = self.handle.as_ref()?;
        let prompt = build_prompt(query, &build_context(corpus, MAX_CONTEXT_CHARS));

        let result =
            tokio::time::timeout(self.timeout, handle.generate(&prompt, self.max_new_tokens)).await;
        match result {
            Ok(Ok(text)) => {
                let text = text.trim();
                if text.is_empty() {
                    tracing::warn!(generator = handle.name(), "generator returned empty output");
                    None
                } else {
                    Some(text.to_string())
                }
            }
            Ok(Err(e)) => {
                tracing::warn!(generator = handle.name(), error = %e, "generation failed");
                None
            }
            Err(_) => {
                tracing::warn!(
                    generator = handle.name(),
                    timeout_secs = self.timeout.as_secs(),
                    "generation timed out"
                );
                None
            }
        }
    }
}

/// Render the newest articles as `[Category] Title - Summary (Source)` lines,
/// cut to `max_chars` characters.
#[must_use]
pub fn build_context(corpus: &Corpus, max_chars: usize) -> String {
    let context = corpus
        .articles()
        .iter()
        .take(CONTEXT_ARTICLES)
        .map(|a| format!("[{}] {} - {} ({})", a.category(), a.title(), a.summary(), a.source()))
        .collect::<Vec<_>>()
        .join("\n");

    match context.char_indices().nth(max_chars) {
        Some((idx, _)) => context[..idx].to_string(),
        None => context,
    }
}

fn build_prompt(query: &str, context: &str) -> String {
    format!(
        "You are a helpful news assistant. Answer the user's question using only \
         the news articles below.\n\n\
         Available articles:\n{context}\n\n\
         User question: {query}\n\n\
         Give a short, factual answer:"
    )
}
