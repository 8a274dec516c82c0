//! Markdown-style rendering of article lists, trends and statistics.

use std::fmt::Write as _;

use newsgenie_core::{Article, Category, SentimentLabel};
use newsgenie_pipeline::SentimentDistribution;

/// Entries shown before a list is truncated.
pub const TOP_N: usize = 5;
/// Longest trend bar, drawn for the top keyword.
pub const MAX_BAR_LEN: usize = 20;
const SNIPPET_CHARS: usize = 150;
const BAR_CHAR: char = '█';

/// Numbered list of the first [`TOP_N`] articles under a bold heading.
///
/// A `_+K more_` footer is added only when articles were left out.
#[must_use]
pub fn article_list(heading: &str, articles: &[&Article]) -> String {
    let mut out = format!("**{heading}** ({})\n", count_label(articles.len()));

    for (i, article) in articles.iter().take(TOP_N).enumerate() {
        let _ = writeln!(
            out,
            "\n{}. **{}** — {} · {}",
            i + 1,
            article.title(),
            article.source(),
            article.category()
        );
        let snippet = snippet(article.summary());
        if !snippet.is_empty() {
            let _ = writeln!(out, "   {snippet}");
        }
    }

    if articles.len() > TOP_N {
        let _ = write!(out, "\n_+{} more_", articles.len() - TOP_N);
    }
    out.trim_end().to_string()
}

/// Ranked keywords with a bar whose length is proportional to the count.
#[must_use]
pub fn trend_list(heading: &str, trends: &[(String, usize)]) -> String {
    let max = trends.first().map_or(1, |(_, count)| (*count).max(1));
    let mut out = format!("**{heading}**\n");
    for (i, (word, count)) in trends.iter().enumerate() {
        let bar = BAR_CHAR.to_string().repeat(bar_len(*count, max));
        let _ = write!(out, "\n{}. **{word}** {bar} ({count})", i + 1);
    }
    out
}

fn bar_len(count: usize, max: usize) -> usize {
    ((count * MAX_BAR_LEN) / max).clamp(1, MAX_BAR_LEN)
}

/// Label counts with percentages of the total.
#[must_use]
pub fn sentiment_summary(scope: &str, dist: &SentimentDistribution) -> String {
    let total = dist.total();
    let mut out = format!("**Sentiment of {scope}** ({})\n", count_label(total));
    for label in [
        SentimentLabel::Positive,
        SentimentLabel::Neutral,
        SentimentLabel::Negative,
    ] {
        let count = dist.count(label);
        let _ = write!(out, "\n- {label}: {count} ({}%)", percent(count, total));
    }
    out
}

/// Corpus size, per-category counts and top sources.
#[must_use]
pub fn statistics(
    total: usize,
    categories: &[(Category, usize)],
    sources: &[(String, usize)],
) -> String {
    let mut out = format!("**News statistics** ({})\n\n_By category_", count_label(total));
    for (category, count) in categories {
        let _ = write!(out, "\n- {category}: {count}");
    }
    if !sources.is_empty() {
        out.push_str("\n\n_Top sources_");
        for (source, count) in sources {
            let _ = write!(out, "\n- {source}: {count}");
        }
    }
    out
}

fn count_label(n: usize) -> String {
    if n == 1 {
        "1 article".to_string()
    } else {
        format!("{n} articles")
    }
}

/// Whole-number percentage, rounded half up.
fn percent(part: usize, total: usize) -> usize {
    if total == 0 {
        0
    } else {
        (part * 100 + total / 2) / total
    }
}

fn snippet(summary: &str) -> String {
    let summary = summary.trim();
    if summary.chars().count() <= SNIPPET_CHARS {
        return summary.to_string();
    }
    let cut: String = summary.chars().take(SNIPPET_CHARS).collect();
    format!("{}...", cut.trim_end())
}
