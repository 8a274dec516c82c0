//! Cross-source duplicate removal.

use std::collections::HashSet;

use newsgenie_core::Article;

/// Number of leading title words that make up the near-duplicate key.
pub const TITLE_KEY_WORDS: usize = 10;

/// Normalized near-duplicate key: the first [`TITLE_KEY_WORDS`] words of the
/// title, lowercased, punctuation removed.
///
/// Returns `None` for titles with no word characters; such titles never
/// collide with each other.
#[must_use]
pub fn title_key(title: &str) -> Option<String> {
    let words: Vec<String> = title
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_alphanumeric())
                .flat_map(char::to_lowercase)
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .take(TITLE_KEY_WORDS)
        .collect();

    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

/// Drop later articles that share a URL or a title key with an earlier one.
///
/// First occurrence wins and survivor order is preserved. Empty URLs and
/// empty title keys are never compared. Only survivors' keys are recorded,
/// so running the result through `dedup` again is a no-op.
#[must_use]
pub fn dedup(articles: Vec<Article>) -> Vec<Article> {
    let before = articles.len();
    let mut seen_urls: HashSet<String> = HashSet::new();
    let mut seen_titles: HashSet<String> = HashSet::new();

    let unique: Vec<Article> = articles
        .into_iter()
        .filter(|article| {
            let url = article.url().trim();
            let url_key = (!url.is_empty()).then(|| url.to_string());
            let title = title_key(article.title());

            let url_dup = url_key.as_ref().is_some_and(|u| seen_urls.contains(u));
            let title_dup = title.as_ref().is_some_and(|t| seen_titles.contains(t));
            if url_dup || title_dup {
                return false;
            }

            if let Some(u) = url_key {
                seen_urls.insert(u);
            }
            if let Some(t) = title {
                seen_titles.insert(t);
            }
            true
        })
        .collect();

    let removed = before - unique.len();
    tracing::debug!(before, kept = unique.len(), removed, "deduplicated articles");
    unique
}
