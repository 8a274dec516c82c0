//! Rule-based query routing.
//!
//! Queries are matched against an ordered rule table and the first match
//! answers. Queries no rule claims go to keyword search, then to the
//! generative adapter, then to a fixed fallback. A query that matches several
//! rules is always answered by the earliest one.

use newsgenie_core::{Article, Category};
use newsgenie_pipeline::trends::STOPWORDS;
use newsgenie_pipeline::{
    category_breakdown, category_trends, sentiment_distribution, source_distribution, trending,
    Corpus,
};
use regex::Regex;

use crate::format;
use crate::generative::GenerativeAdapter;
use crate::session::Turn;

/// Keywords shown by the trending rule.
const TRENDING_TOP_K: usize = 10;
/// Shortest query word used for keyword search.
const MIN_KEYWORD_LEN: usize = 4;

/// Conversational filler that would otherwise pass the keyword filter.
const QUERY_STOPWORDS: &[&str] = &[
    "anything", "articles", "give", "know", "please", "show", "stories", "story", "tell",
    "want",
];

const GREETING: &str = "Hello! I'm NewsGenie, your news assistant. Ask me for the top stories, \
what's trending, news by category or region, or the overall mood of today's news.";

const HELP: &str = "Here's what I can do:\n\
- **Top stories**: \"What are the top stories?\"\n\
- **Regional news**: \"Show me UK news\" or \"US news\"\n\
- **Categories**: \"Technology news\", \"Any sports updates?\"\n\
- **Trending topics**: \"What's trending?\"\n\
- **Sentiment**: \"What's the mood in business news?\"\n\
- **Statistics**: \"How many articles do you have?\"\n\
- **Search**: mention any topic, e.g. \"climate\" or \"elections\"\n\n\
Say `refresh` to fetch the latest articles.";

const FALLBACK: &str = "I'm not sure how to answer that. Try asking:\n\
- \"What are the top stories?\"\n\
- \"Show me UK news\"\n\
- \"What's trending?\"\n\
- \"Technology news\"\n\
- \"What's the sentiment in business news?\"";

/// Reply when the corpus has nothing to show.
pub const NO_DATA: &str =
    "No news articles are available right now. Say `refresh` to fetch the latest articles.";

/// A region with a fixed source allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Uk,
    Us,
}

impl Region {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Region::Uk => "UK",
            Region::Us => "US",
        }
    }

    /// Source display names, matched case-insensitively as whole words.
    #[must_use]
    pub fn sources(self) -> &'static [&'static str] {
        match self {
            Region::Uk => &[
                "bbc",
                "guardian",
                "sky",
                "financial times",
                "independent",
                "telegraph",
                "reuters uk",
            ],
            Region::Us => &[
                "cnn",
                "espn",
                "yahoo",
                "npr",
                "new york times",
                "washington post",
            ],
        }
    }

    fn includes(self, source: &str) -> bool {
        let tokens = words(source);
        self.sources().iter().any(|name| {
            let name = words(name);
            tokens.windows(name.len()).any(|window| window == name.as_slice())
        })
    }
}

/// What a query asks for, as decided by the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    Help,
    RegionNews(Region),
    Headlines,
    /// Trending keywords, narrowed to a category when the query names one.
    Trending(Option<Category>),
    /// Sentiment summary, narrowed to a category when the query names one.
    Sentiment(Option<Category>),
    Statistics,
    CategoryNews(Category),
}

#[derive(Debug, Clone, Copy)]
enum RuleKind {
    Greeting,
    Help,
    Region(Region),
    Headlines,
    Trending,
    Sentiment,
    Statistics,
}

struct Rule {
    kind: RuleKind,
    pattern: Regex,
}

/// Ordered intent rules plus the fallback chain.
pub struct Router {
    rules: Vec<Rule>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

fn rule(kind: RuleKind, pattern: &str) -> Rule {
    Rule {
        kind,
        pattern: Regex::new(pattern).expect("valid router regex"),
    }
}

impl Router {
    #[must_use]
    pub fn new() -> Self {
        let rules = vec![
            rule(
                RuleKind::Greeting,
                r"\b(hi|hello|hey|greetings|howdy)\b|\bgood (morning|afternoon|evening)\b",
            ),
            rule(
                RuleKind::Help,
                r"\bhelp\b|what can you do|\bcommands?\b|\bhow do i\b",
            ),
            rule(
                RuleKind::Region(Region::Uk),
                r"\buk\b|\bu\.k\.|\bbritish\b|\bbritain\b|\bengland\b",
            ),
            rule(
                RuleKind::Region(Region::Us),
                r"\bus news\b|\busa\b|\bu\.s\.|\bamerican?\b",
            ),
            rule(
                RuleKind::Headlines,
                r"\bheadlines?\b|\btop (stories|news)\b|\bbreaking news\b|what'?s happening|\btoday'?s news\b",
            ),
            rule(
                RuleKind::Trending,
                r"\btrend(ing|s)?\b|\bpopular\b|\bhot topics?\b|\bbuzz",
            ),
            rule(
                RuleKind::Sentiment,
                r"\bsentiment\b|\bmood\b|\btone\b|\bpositive\b|\bnegative\b|\boptimistic\b|\bpessimistic\b",
            ),
            rule(
                RuleKind::Statistics,
                r"\bhow many\b|\bcount\b|\bstats\b|\bstatistics\b|\bbreakdown\b|\bnumber of\b",
            ),
        ];
        Self { rules }
    }

    /// First intent whose rule matches the query, or `None` when the query
    /// needs keyword search or a fallback.
    #[must_use]
    pub fn classify(&self, query: &str) -> Option<Intent> {
        let normalized = normalize(query);

        let matched = self
            .rules
            .iter()
            .find(|rule| rule.pattern.is_match(&normalized))
            .map(|rule| match rule.kind {
                RuleKind::Greeting => Intent::Greeting,
                RuleKind::Help => Intent::Help,
                RuleKind::Region(region) => Intent::RegionNews(region),
                RuleKind::Headlines => Intent::Headlines,
                RuleKind::Trending => Intent::Trending(Category::find_in(&normalized)),
                RuleKind::Sentiment => Intent::Sentiment(Category::find_in(&normalized)),
                RuleKind::Statistics => Intent::Statistics,
            });

        matched.or_else(|| Category::find_in(&normalized).map(Intent::CategoryNews))
    }

    /// Answer a query. Always returns a displayable reply.
    pub async fn resolve(
        &self,
        query: &str,
        corpus: &Corpus,
        history: &[Turn],
        adapter: Option<&GenerativeAdapter>,
    ) -> String {
        let intent = self.classify(query);
        tracing::debug!(?intent, turns = history.len(), corpus = corpus.len(), "routing query");

        if let Some(intent) = intent {
            return answer(intent, corpus);
        }

        if let Some(found) = keyword_search(query, corpus) {
            return found;
        }

        if let Some(adapter) = adapter.filter(|a| a.is_enabled()) {
            if let Some(generated) = adapter.generate(query, corpus).await {
                return generated;
            }
            tracing::debug!("generative fallback produced nothing");
        }

        FALLBACK.to_string()
    }
}

fn normalize(query: &str) -> String {
    query.trim().replace('\u{2019}', "'").to_lowercase()
}

/// Lowercase alphanumeric runs of `text`.
fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn answer(intent: Intent, corpus: &Corpus) -> String {
    let articles = corpus.articles();
    match intent {
        Intent::Greeting => GREETING.to_string(),
        Intent::Help => HELP.to_string(),
        Intent::RegionNews(region) => {
            let matches: Vec<&Article> = articles
                .iter()
                .filter(|a| region.includes(a.source()))
                .collect();
            if matches.is_empty() {
                format!(
                    "No {} news is available right now. Say `refresh` to fetch the latest articles.",
                    region.label()
                )
            } else {
                format::article_list(&format!("{} news", region.label()), &matches)
            }
        }
        Intent::Headlines => {
            if articles.is_empty() {
                return NO_DATA.to_string();
            }
            let all: Vec<&Article> = articles.iter().collect();
            format::article_list("Top stories", &all)
        }
        Intent::Trending(None) => {
            let trends = trending(articles, TRENDING_TOP_K);
            if trends.is_empty() {
                NO_DATA.to_string()
            } else {
                format::trend_list("Trending topics", &trends)
            }
        }
        Intent::Trending(Some(category)) => {
            match category_trends(articles, TRENDING_TOP_K)
                .into_iter()
                .find(|(c, _)| *c == category)
            {
                Some((_, trends)) => {
                    format::trend_list(&format!("Trending in {category} news"), &trends)
                }
                None => format!(
                    "No {category} news is available right now. Say `refresh` to fetch the latest articles."
                ),
            }
        }
        Intent::Sentiment(category) => {
            let subset: Vec<&Article> = articles
                .iter()
                .filter(|a| category.is_none_or(|c| a.category() == c))
                .collect();
            if subset.is_empty() {
                return NO_DATA.to_string();
            }
            let scope = category.map_or_else(
                || "all news".to_string(),
                |c| format!("{c} news"),
            );
            format::sentiment_summary(&scope, &sentiment_distribution(subset))
        }
        Intent::Statistics => {
            if articles.is_empty() {
                return NO_DATA.to_string();
            }
            format::statistics(
                articles.len(),
                &category_breakdown(articles),
                &source_distribution(articles),
            )
        }
        Intent::CategoryNews(category) => {
            let matches: Vec<&Article> = articles
                .iter()
                .filter(|a| a.category() == category)
                .collect();
            if matches.is_empty() {
                format!(
                    "No {category} news is available right now. Say `refresh` to fetch the latest articles."
                )
            } else {
                format::article_list(&format!("{category} news"), &matches)
            }
        }
    }
}

/// Query words worth searching for, in query order without repeats.
///
/// Apostrophes split words, so a possessive like "trump's" searches for
/// "trump".
fn keywords(query: &str) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    for word in normalize(query).split(|c: char| !c.is_alphanumeric()) {
        if word.chars().count() < MIN_KEYWORD_LEN
            || STOPWORDS.contains(&word)
            || QUERY_STOPWORDS.contains(&word)
        {
            continue;
        }
        if !words.iter().any(|w| w == word) {
            words.push(word.to_string());
        }
    }
    words
}

/// Articles containing any query keyword, most keywords first. `None` when
/// the query has no keywords or nothing matches.
fn keyword_search(query: &str, corpus: &Corpus) -> Option<String> {
    let keywords = keywords(query);
    if keywords.is_empty() {
        return None;
    }

    let mut hits: Vec<(usize, &Article)> = corpus
        .articles()
        .iter()
        .filter_map(|article| {
            let text = article.text().to_lowercase();
            let matched = keywords.iter().filter(|k| text.contains(k.as_str())).count();
            (matched > 0).then_some((matched, article))
        })
        .collect();
    if hits.is_empty() {
        tracing::debug!(?keywords, "keyword search found nothing");
        return None;
    }
    // Stable: equal match counts keep corpus (newest-first) order.
    hits.sort_by(|a, b| b.0.cmp(&a.0));

    let matches: Vec<&Article> = hits.into_iter().map(|(_, article)| article).collect();
    Some(format::article_list(
        &format!("Results for \"{}\"", keywords.join(" ")),
        &matches,
    ))
}

#[cfg(test)]
#[path = "router_test.rs"]
mod tests;
