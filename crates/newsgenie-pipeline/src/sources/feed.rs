//! RSS / Atom / JSON Feed parsing via `feed-rs`.

use feed_rs::model::Entry;
use newsgenie_core::{Article, SourceConfig};

use super::text::{clean_summary, strip_html};
use super::FeedLimits;
use crate::error::FeedError;

/// Parse a feed body into articles for one registry source.
///
/// Entries are ordered newest first (undated last) and capped at
/// `limits.max_entries_per_source`. Entries without a link or a title are
/// skipped.
///
/// # Errors
///
/// Returns [`FeedError::Parse`] if the body is not a recognizable feed.
pub fn parse_feed(
    body: &[u8],
    source: &SourceConfig,
    limits: FeedLimits,
) -> Result<Vec<Article>, FeedError> {
    let feed = feed_rs::parser::parse(body).map_err(|e| FeedError::Parse {
        url: source.url.clone(),
        source: e,
    })?;

    let mut entries = feed.entries;
    entries.sort_by(|a, b| entry_time(b).cmp(&entry_time(a)));

    let articles = entries
        .into_iter()
        .filter_map(|entry| entry_to_article(entry, source, limits.summary_max_chars))
        .take(limits.max_entries_per_source)
        .collect();

    Ok(articles)
}

fn entry_time(entry: &Entry) -> Option<chrono::DateTime<chrono::Utc>> {
    entry.published.or(entry.updated)
}

fn entry_to_article(entry: Entry, source: &SourceConfig, summary_max_chars: usize) -> Option<Article> {
    let url = entry
        .links
        .iter()
        .map(|link| link.href.trim())
        .find(|href| !href.is_empty())?
        .to_string();

    let title = entry
        .title
        .as_ref()
        .map(|t| strip_html(&t.content))
        .filter(|t| !t.is_empty())?;

    let raw_summary = entry
        .summary
        .as_ref()
        .map(|t| t.content.as_str())
        .or_else(|| entry.content.as_ref().and_then(|c| c.body.as_deref()))
        .unwrap_or_default();
    let summary = clean_summary(raw_summary, summary_max_chars);

    let author = entry
        .authors
        .iter()
        .map(|person| person.name.trim())
        .find(|name| !name.is_empty())
        .map(str::to_string);

    let image_url = entry.media.iter().find_map(|media| {
        media
            .content
            .iter()
            .find_map(|content| content.url.as_ref().map(ToString::to_string))
            .or_else(|| media.thumbnails.first().map(|thumb| thumb.image.uri.clone()))
    });

    let published = entry_time(&entry);

    Some(
        Article::new(url, title, source.name.clone())
            .with_summary(summary)
            .with_published(published)
            .with_author(author)
            .with_image_url(image_url)
            .with_category_hint(source.category),
    )
}
