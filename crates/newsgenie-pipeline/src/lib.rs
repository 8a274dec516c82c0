//! Acquisition and enrichment pipeline for newsgenie.
//!
//! Fetches articles from the configured feeds and the optional keyed News API,
//! drops duplicates, assigns a category and a lexicon sentiment to each
//! article, and publishes the result as an immutable [`Corpus`]. Trend and
//! distribution helpers read a corpus without modifying it.

pub mod categorizer;
pub mod corpus;
pub mod dedup;
pub mod error;
pub mod pipeline;
pub mod scorer;
pub mod sources;
pub mod taxonomy;
pub mod trends;

pub use categorizer::Categorizer;
pub use corpus::{Corpus, CorpusCache};
pub use dedup::{dedup, title_key};
pub use error::FeedError;
pub use pipeline::{enrich, Pipeline};
pub use scorer::{analyze, analyze_text, sentiment_distribution, SentimentDistribution};
pub use sources::{FeedClient, FeedLimits, NewsApiClient};
pub use taxonomy::{load_keyword_tables, ExclusionRule, KeywordTables};
pub use trends::{
    category_breakdown, category_trends, daily_counts, source_distribution, trending,
};
