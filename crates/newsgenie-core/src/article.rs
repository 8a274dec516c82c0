use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Closed topical taxonomy.
///
/// Declaration order is the tie-break priority used by the categorizer:
/// when two categories score equally, the one declared first wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Politics,
    World,
    Business,
    Technology,
    Science,
    Health,
    Sports,
    Entertainment,
    General,
}

/// Lowercase words that name a category in free text.
const CATEGORY_ALIASES: &[(&str, Category)] = &[
    ("politics", Category::Politics),
    ("political", Category::Politics),
    ("politic", Category::Politics),
    ("world", Category::World),
    ("international", Category::World),
    ("global", Category::World),
    ("business", Category::Business),
    ("economy", Category::Business),
    ("finance", Category::Business),
    ("markets", Category::Business),
    ("technology", Category::Technology),
    ("tech", Category::Technology),
    ("science", Category::Science),
    ("scientific", Category::Science),
    ("health", Category::Health),
    ("medical", Category::Health),
    ("sports", Category::Sports),
    ("sport", Category::Sports),
    ("entertainment", Category::Entertainment),
    ("movies", Category::Entertainment),
    ("celebrity", Category::Entertainment),
    ("general", Category::General),
];

impl Category {
    /// Every category, in tie-break priority order.
    pub const ALL: [Category; 9] = [
        Category::Politics,
        Category::World,
        Category::Business,
        Category::Technology,
        Category::Science,
        Category::Health,
        Category::Sports,
        Category::Entertainment,
        Category::General,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Politics => "Politics",
            Category::World => "World",
            Category::Business => "Business",
            Category::Technology => "Technology",
            Category::Science => "Science",
            Category::Health => "Health",
            Category::Sports => "Sports",
            Category::Entertainment => "Entertainment",
            Category::General => "General",
        }
    }

    /// Parse a single category name or alias, case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_lowercase();
        CATEGORY_ALIASES
            .iter()
            .find(|(alias, _)| *alias == lower)
            .map(|&(_, category)| category)
    }

    /// Find the first word in `text` that names a category.
    #[must_use]
    pub fn find_in(text: &str) -> Option<Self> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .find_map(Self::from_name)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Polarity strictly above this is positive.
    pub const POSITIVE_THRESHOLD: f32 = 0.1;
    /// Polarity strictly below this is negative.
    pub const NEGATIVE_THRESHOLD: f32 = -0.1;

    #[must_use]
    pub fn from_polarity(polarity: f32) -> Self {
        if polarity > Self::POSITIVE_THRESHOLD {
            SentimentLabel::Positive
        } else if polarity < Self::NEGATIVE_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Polarity in `[-1.0, 1.0]`, subjectivity in `[0.0, 1.0]`, and the derived label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub label: SentimentLabel,
    pub polarity: f32,
    pub subjectivity: f32,
}

impl Sentiment {
    pub const NEUTRAL: Sentiment = Sentiment {
        label: SentimentLabel::Neutral,
        polarity: 0.0,
        subjectivity: 0.0,
    };

    /// Build a sentiment from raw scores, clamping both into range.
    ///
    /// Non-finite inputs collapse to [`Sentiment::NEUTRAL`].
    #[must_use]
    pub fn new(polarity: f32, subjectivity: f32) -> Self {
        if !polarity.is_finite() || !subjectivity.is_finite() {
            return Self::NEUTRAL;
        }
        let polarity = polarity.clamp(-1.0, 1.0);
        Self {
            label: SentimentLabel::from_polarity(polarity),
            polarity,
            subjectivity: subjectivity.clamp(0.0, 1.0),
        }
    }
}

impl Default for Sentiment {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// One normalized news item.
///
/// Identity and content fields are fixed at construction. `category` and
/// `sentiment` start unset and accept exactly one assignment each.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    url: String,
    title: String,
    summary: String,
    source: String,
    published: Option<DateTime<Utc>>,
    image_url: Option<String>,
    author: Option<String>,
    category_hint: Option<Category>,
    category: Option<Category>,
    sentiment: Option<Sentiment>,
}

impl Article {
    #[must_use]
    pub fn new(url: impl Into<String>, title: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            summary: String::new(),
            source: source.into(),
            published: None,
            image_url: None,
            author: None,
            category_hint: None,
            category: None,
            sentiment: None,
        }
    }

    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    #[must_use]
    pub fn with_published(mut self, published: Option<DateTime<Utc>>) -> Self {
        self.published = published;
        self
    }

    #[must_use]
    pub fn with_image_url(mut self, image_url: Option<String>) -> Self {
        self.image_url = image_url;
        self
    }

    #[must_use]
    pub fn with_author(mut self, author: Option<String>) -> Self {
        self.author = author;
        self
    }

    #[must_use]
    pub fn with_category_hint(mut self, hint: Option<Category>) -> Self {
        self.category_hint = hint;
        self
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn published(&self) -> Option<DateTime<Utc>> {
        self.published
    }

    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    #[must_use]
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    #[must_use]
    pub fn category_hint(&self) -> Option<Category> {
        self.category_hint
    }

    /// Title and summary joined by a space, the text every scorer reads.
    #[must_use]
    pub fn text(&self) -> String {
        match (self.title.is_empty(), self.summary.is_empty()) {
            (false, false) => format!("{} {}", self.title, self.summary),
            (false, true) => self.title.clone(),
            (true, _) => self.summary.clone(),
        }
    }

    /// The assigned category, or [`Category::General`] before categorization.
    #[must_use]
    pub fn category(&self) -> Category {
        self.category.unwrap_or(Category::General)
    }

    #[must_use]
    pub fn is_categorized(&self) -> bool {
        self.category.is_some()
    }

    /// Set the category. Returns `false` and leaves the article untouched if
    /// a category was already assigned.
    pub fn assign_category(&mut self, category: Category) -> bool {
        if self.category.is_some() {
            return false;
        }
        self.category = Some(category);
        true
    }

    /// The assigned sentiment, or [`Sentiment::NEUTRAL`] before analysis.
    #[must_use]
    pub fn sentiment(&self) -> Sentiment {
        self.sentiment.unwrap_or_default()
    }

    /// Set the sentiment. Returns `false` if one was already assigned.
    pub fn assign_sentiment(&mut self, sentiment: Sentiment) -> bool {
        if self.sentiment.is_some() {
            return false;
        }
        self.sentiment = Some(sentiment);
        true
    }

    /// Ordering for newest-first sorts. Unknown publication times sort last.
    #[must_use]
    pub fn newest_first(a: &Article, b: &Article) -> Ordering {
        b.published.cmp(&a.published)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn category_order_matches_priority_list() {
        let mut sorted = Category::ALL;
        sorted.sort();
        assert_eq!(sorted, Category::ALL);
    }

    #[test]
    fn from_name_accepts_aliases_case_insensitively() {
        assert_eq!(Category::from_name("Tech"), Some(Category::Technology));
        assert_eq!(Category::from_name("SPORT"), Some(Category::Sports));
        assert_eq!(Category::from_name("weather"), None);
    }

    #[test]
    fn find_in_returns_first_named_category() {
        assert_eq!(
            Category::find_in("any technology or sports news?"),
            Some(Category::Technology)
        );
        assert_eq!(Category::find_in("nothing to see"), None);
    }

    #[test]
    fn sentiment_label_thresholds_are_exclusive() {
        assert_eq!(SentimentLabel::from_polarity(0.1), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_polarity(0.11), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_polarity(-0.1), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_polarity(-0.2), SentimentLabel::Negative);
    }

    #[test]
    fn sentiment_new_clamps_and_rejects_nan() {
        let s = Sentiment::new(3.0, -1.0);
        assert_eq!(s.polarity, 1.0);
        assert_eq!(s.subjectivity, 0.0);
        assert_eq!(s.label, SentimentLabel::Positive);
        assert_eq!(Sentiment::new(f32::NAN, 0.5), Sentiment::NEUTRAL);
    }

    #[test]
    fn category_assigned_only_once() {
        let mut article = Article::new("https://a.test/1", "Title", "Test");
        assert_eq!(article.category(), Category::General);
        assert!(article.assign_category(Category::Sports));
        assert!(!article.assign_category(Category::Politics));
        assert_eq!(article.category(), Category::Sports);
    }

    #[test]
    fn sentiment_assigned_only_once() {
        let mut article = Article::new("https://a.test/1", "Title", "Test");
        assert_eq!(article.sentiment(), Sentiment::NEUTRAL);
        assert!(article.assign_sentiment(Sentiment::new(0.5, 0.5)));
        assert!(!article.assign_sentiment(Sentiment::NEUTRAL));
        assert_eq!(article.sentiment().label, SentimentLabel::Positive);
    }

    #[test]
    fn newest_first_puts_unknown_dates_last() {
        let old = Article::new("https://a.test/old", "Old", "Test")
            .with_published(Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
        let new = Article::new("https://a.test/new", "New", "Test")
            .with_published(Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()));
        let unknown = Article::new("https://a.test/unknown", "Unknown", "Test");

        let mut articles = vec![unknown, old, new];
        articles.sort_by(Article::newest_first);
        let titles: Vec<&str> = articles.iter().map(Article::title).collect();
        assert_eq!(titles, ["New", "Old", "Unknown"]);
    }

    #[test]
    fn text_joins_title_and_summary() {
        let a = Article::new("u", "Title", "S").with_summary("Body");
        assert_eq!(a.text(), "Title Body");
        let b = Article::new("u", "", "S").with_summary("Body");
        assert_eq!(b.text(), "Body");
    }
}
