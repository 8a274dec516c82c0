//! Keyword trends and corpus distributions.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use newsgenie_core::{Article, Category};

/// Shortest word counted as a trend keyword.
pub const MIN_WORD_LEN: usize = 4;

/// How many sources [`source_distribution`] reports.
const TOP_SOURCES: usize = 10;

/// Words of at least [`MIN_WORD_LEN`] letters that carry no topical signal.
pub const STOPWORDS: &[&str] = &[
    "about", "after", "again", "against", "also", "amid", "been", "before", "being", "could",
    "does", "doing", "down", "during", "each", "find", "first", "from", "have", "having", "here",
    "into", "just", "last", "latest", "live", "more", "most", "much", "news", "over", "said",
    "says", "should", "some", "than", "that", "their", "them", "then", "there", "these", "they",
    "this", "those", "through", "today", "under", "update", "updates", "very", "watch", "week",
    "were", "what", "when", "where", "which", "while", "will", "with", "would", "year", "years",
    "your",
];

/// Count items and rank them by count, ties broken by first appearance.
fn rank_by_count<I>(items: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = String>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut first_seen: Vec<String> = Vec::new();

    for item in items {
        let count = counts.entry(item.clone()).or_insert(0);
        if *count == 0 {
            first_seen.push(item);
        }
        *count += 1;
    }

    let mut ranked: Vec<(String, usize)> = first_seen
        .into_iter()
        .map(|item| {
            let count = counts.get(&item).copied().unwrap_or_default();
            (item, count)
        })
        .collect();
    // Stable sort keeps first-seen order among equal counts.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

fn title_words(title: &str) -> impl Iterator<Item = String> + '_ {
    title
        .split(|c: char| !c.is_alphabetic())
        .filter(|w| w.chars().count() >= MIN_WORD_LEN)
        .map(str::to_lowercase)
        .filter(|w| !STOPWORDS.contains(&w.as_str()))
}

/// Most frequent title keywords across the corpus, highest count first.
///
/// Only titles are read. Returns an empty `Vec` for an empty corpus or when
/// no title has a qualifying word.
#[must_use]
pub fn trending(articles: &[Article], top_k: usize) -> Vec<(String, usize)> {
    let mut ranked = rank_by_count(articles.iter().flat_map(|a| title_words(a.title())));
    ranked.truncate(top_k);
    ranked
}

/// [`trending`] computed separately for each category, in taxonomy order.
///
/// Categories whose titles yield no keyword are omitted.
#[must_use]
pub fn category_trends(
    articles: &[Article],
    top_k: usize,
) -> Vec<(Category, Vec<(String, usize)>)> {
    Category::ALL
        .iter()
        .filter_map(|&category| {
            let titles = articles
                .iter()
                .filter(|a| a.category() == category)
                .flat_map(|a| title_words(a.title()));
            let mut ranked = rank_by_count(titles);
            ranked.truncate(top_k);
            (!ranked.is_empty()).then_some((category, ranked))
        })
        .collect()
}

/// Article count per source, top ten, highest first.
#[must_use]
pub fn source_distribution(articles: &[Article]) -> Vec<(String, usize)> {
    let sources = articles.iter().map(|a| {
        let source = a.source().trim();
        if source.is_empty() {
            "Unknown".to_string()
        } else {
            source.to_string()
        }
    });
    let mut ranked = rank_by_count(sources);
    ranked.truncate(TOP_SOURCES);
    ranked
}

/// Article count per category, in taxonomy order, omitting empty categories.
#[must_use]
pub fn category_breakdown(articles: &[Article]) -> Vec<(Category, usize)> {
    let mut counts: BTreeMap<Category, usize> = BTreeMap::new();
    for article in articles {
        *counts.entry(article.category()).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}

/// Article count per publication date, oldest date first. Undated articles
/// are not counted.
#[must_use]
pub fn daily_counts(articles: &[Article]) -> BTreeMap<NaiveDate, usize> {
    let mut counts = BTreeMap::new();
    for published in articles.iter().filter_map(Article::published) {
        *counts.entry(published.date_naive()).or_insert(0) += 1;
    }
    counts
}
