//! Keyword-scoring categorizer with exclusion overrides.
//!
//! Two pure passes: [`Categorizer::scores`] sums weighted keyword hits per
//! category, then [`Categorizer::forced_category`] checks the ordered
//! exclusion rules, which override whatever the scores say.

use std::collections::BTreeMap;

use newsgenie_core::{Article, Category};

use crate::taxonomy::{ExclusionRule, KeywordTables};

/// Title hits count this many times a summary hit.
const TITLE_MULTIPLIER: u32 = 3;

/// A keyword or phrase pre-split into lowercase tokens.
type Phrase = Vec<String>;

struct CompiledRule {
    any_of: Vec<Phrase>,
    with_any_of: Vec<Phrase>,
    forces: Category,
}

/// Assigns exactly one [`Category`] per article. Never fails.
pub struct Categorizer {
    keywords: Vec<(Category, Vec<(Phrase, u32)>)>,
    rules: Vec<CompiledRule>,
    source_hint_bonus: u32,
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::new(&KeywordTables::default())
    }
}

impl Categorizer {
    #[must_use]
    pub fn new(tables: &KeywordTables) -> Self {
        let keywords = tables
            .categories
            .iter()
            .map(|entry| {
                let compiled = entry
                    .keywords
                    .iter()
                    .map(|kw| (tokenize(&kw.term), kw.weight))
                    .filter(|(phrase, weight)| !phrase.is_empty() && *weight > 0)
                    .collect();
                (entry.category, compiled)
            })
            .collect();

        let rules = tables.exclusion_rules.iter().map(compile_rule).collect();

        Self {
            keywords,
            rules,
            source_hint_bonus: tables.source_hint_bonus,
        }
    }

    /// Pick the article's category.
    ///
    /// Exclusion rules win outright. Otherwise the highest score wins, ties
    /// going to the category declared first in [`Category`]. Articles with
    /// no text or no positive score are [`Category::General`].
    #[must_use]
    pub fn categorize(&self, article: &Article) -> Category {
        let title = tokenize(article.title());
        let summary = tokenize(article.summary());

        if title.is_empty() && summary.is_empty() {
            tracing::debug!(url = article.url(), "article has no text; defaulting to General");
            return Category::General;
        }

        let all: Vec<String> = title.iter().chain(&summary).cloned().collect();
        if let Some(forced) = self.forced_category(&all) {
            return forced;
        }

        let scores = self.score_tokens(&title, &summary, article.category_hint());
        select_category(&scores)
    }

    /// Per-category scores for an article, only categories scoring above zero.
    #[must_use]
    pub fn scores(&self, article: &Article) -> BTreeMap<Category, u32> {
        self.score_tokens(
            &tokenize(article.title()),
            &tokenize(article.summary()),
            article.category_hint(),
        )
    }

    /// The category forced by the first matching exclusion rule, if any.
    #[must_use]
    pub fn forced_category(&self, tokens: &[String]) -> Option<Category> {
        self.rules
            .iter()
            .find(|rule| {
                let primary = rule.any_of.iter().any(|p| contains_phrase(tokens, p));
                let secondary = rule.with_any_of.is_empty()
                    || rule.with_any_of.iter().any(|p| contains_phrase(tokens, p));
                primary && secondary
            })
            .map(|rule| rule.forces)
    }

    fn score_tokens(
        &self,
        title: &[String],
        summary: &[String],
        hint: Option<Category>,
    ) -> BTreeMap<Category, u32> {
        let mut scores = BTreeMap::new();

        for (category, phrases) in &self.keywords {
            let score: u32 = phrases
                .iter()
                .map(|(phrase, weight)| {
                    if contains_phrase(title, phrase) {
                        weight * TITLE_MULTIPLIER
                    } else if contains_phrase(summary, phrase) {
                        *weight
                    } else {
                        0
                    }
                })
                .sum();
            if score > 0 {
                *scores.entry(*category).or_insert(0) += score;
            }
        }

        if let Some(hint) = hint {
            if self.source_hint_bonus > 0 {
                *scores.entry(hint).or_insert(0) += self.source_hint_bonus;
            }
        }

        scores
    }
}

/// Highest score wins; `BTreeMap` iterates in priority order, so only a
/// strictly greater score displaces an earlier category.
fn select_category(scores: &BTreeMap<Category, u32>) -> Category {
    let mut best: Option<(Category, u32)> = None;
    for (&category, &score) in scores {
        if score == 0 {
            continue;
        }
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((category, score)),
        }
    }
    best.map_or(Category::General, |(category, _)| category)
}

fn compile_rule(rule: &ExclusionRule) -> CompiledRule {
    let compile = |terms: &[String]| -> Vec<Phrase> {
        terms
            .iter()
            .map(|t| tokenize(t))
            .filter(|p| !p.is_empty())
            .collect()
    };
    CompiledRule {
        any_of: compile(&rule.any_of),
        with_any_of: compile(&rule.with_any_of),
        forces: rule.forces,
    }
}

/// Lowercase alphanumeric word tokens.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn contains_phrase(tokens: &[String], phrase: &[String]) -> bool {
    !phrase.is_empty()
        && phrase.len() <= tokens.len()
        && tokens.windows(phrase.len()).any(|window| window == phrase)
}
