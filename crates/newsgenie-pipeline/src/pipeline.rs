//! Refresh pipeline orchestration.

use newsgenie_core::{Article, Category};

use crate::categorizer::Categorizer;
use crate::corpus::Corpus;
use crate::dedup::dedup;
use crate::scorer::analyze;
use crate::sources::FeedClient;

/// One fetch → dedup → enrich chain producing a [`Corpus`].
pub struct Pipeline {
    feeds: FeedClient,
    categorizer: Categorizer,
    corpus_max: usize,
    category: Option<Category>,
}

impl Pipeline {
    #[must_use]
    pub fn new(feeds: FeedClient, categorizer: Categorizer, corpus_max: usize) -> Self {
        Self {
            feeds,
            categorizer,
            corpus_max,
            category: None,
        }
    }

    /// Restrict fetching to sources relevant to `category`.
    #[must_use]
    pub fn with_category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    /// Run the full chain once.
    ///
    /// 1. Fetch every source concurrently and collect one batch.
    /// 2. Drop duplicates by URL and title key.
    /// 3. Assign a category, then a sentiment, to every survivor.
    /// 4. Sort newest first and cap at `corpus_max`.
    ///
    /// Source failures are logged inside the feed client. If every source
    /// fails the returned corpus is empty; callers surface that to the user.
    pub async fn run(&self, epoch: u64) -> Corpus {
        let fetched = self.feeds.fetch_all(self.category).await;
        let fetched_count = fetched.len();

        let unique = dedup(fetched);
        let unique_count = unique.len();

        let corpus = Corpus::from_articles(
            enrich(unique, &self.categorizer),
            epoch,
            self.corpus_max,
        );

        if corpus.is_empty() {
            tracing::warn!(epoch, "refresh produced an empty corpus");
        } else {
            tracing::info!(
                epoch,
                fetched = fetched_count,
                unique = unique_count,
                kept = corpus.len(),
                "corpus refreshed"
            );
        }
        corpus
    }
}

/// Categorize then score each article. Each article is independent.
#[must_use]
pub fn enrich(mut articles: Vec<Article>, categorizer: &Categorizer) -> Vec<Article> {
    for article in &mut articles {
        let category = categorizer.categorize(article);
        if !article.assign_category(category) {
            tracing::warn!(url = article.url(), "article already categorized; keeping existing value");
        }

        let sentiment = analyze(article);
        if !article.assign_sentiment(sentiment) {
            tracing::warn!(url = article.url(), "article already scored; keeping existing value");
        }
    }
    articles
}
