//! Keyword tables and exclusion rules that drive the categorizer.
//!
//! The built-in tables are tuning data. A YAML file with the same shape can
//! replace them wholesale (see [`load_keyword_tables`]).

use std::path::Path;

use newsgenie_core::{Category, ConfigError};
use serde::{Deserialize, Serialize};

/// Score bonus a source's category hint adds to that category.
const DEFAULT_SOURCE_HINT_BONUS: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedKeyword {
    /// Word or space-separated phrase, matched on word boundaries.
    pub term: String,
    #[serde(default = "default_weight")]
    pub weight: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryKeywords {
    pub category: Category,
    pub keywords: Vec<WeightedKeyword>,
}

/// Forces `forces` when any `any_of` term is present and, if `with_any_of`
/// is non-empty, at least one of those terms is present too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionRule {
    pub any_of: Vec<String>,
    #[serde(default)]
    pub with_any_of: Vec<String>,
    pub forces: Category,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordTables {
    pub categories: Vec<CategoryKeywords>,
    /// Evaluated in order; the first matching rule wins.
    #[serde(default)]
    pub exclusion_rules: Vec<ExclusionRule>,
    #[serde(default = "default_source_hint_bonus")]
    pub source_hint_bonus: u32,
}

fn default_weight() -> u32 {
    1
}

fn default_source_hint_bonus() -> u32 {
    DEFAULT_SOURCE_HINT_BONUS
}

const POLITICS: &[(&str, u32)] = &[
    ("election", 3),
    ("parliament", 3),
    ("senate", 3),
    ("congress", 3),
    ("lawmakers", 3),
    ("prime minister", 3),
    ("white house", 3),
    ("democrat", 3),
    ("democrats", 3),
    ("republican", 3),
    ("republicans", 3),
    ("referendum", 3),
    ("minister", 2),
    ("president", 2),
    ("government", 2),
    ("campaign", 2),
    ("vote", 2),
    ("voters", 2),
    ("legislation", 2),
    ("supreme court", 2),
    ("policy", 1),
    ("party", 1),
];

const WORLD: &[(&str, u32)] = &[
    ("united nations", 3),
    ("ceasefire", 3),
    ("war", 2),
    ("ukraine", 2),
    ("russia", 2),
    ("gaza", 2),
    ("israel", 2),
    ("refugees", 2),
    ("diplomat", 2),
    ("diplomats", 2),
    ("embassy", 2),
    ("conflict", 2),
    ("international", 1),
    ("foreign", 1),
    ("border", 1),
    ("summit", 1),
    ("china", 1),
];

const BUSINESS: &[(&str, u32)] = &[
    ("earnings", 3),
    ("inflation", 3),
    ("interest rate", 3),
    ("interest rates", 3),
    ("merger", 3),
    ("stock market", 3),
    ("market", 2),
    ("stocks", 2),
    ("shares", 2),
    ("revenue", 2),
    ("profit", 2),
    ("economy", 2),
    ("bank", 2),
    ("investors", 2),
    ("acquisition", 2),
    ("ceo", 2),
    ("tariffs", 2),
    ("company", 1),
    ("companies", 1),
    ("retail", 1),
    ("trade", 1),
];

const TECHNOLOGY: &[(&str, u32)] = &[
    ("software", 3),
    ("ai", 3),
    ("artificial intelligence", 3),
    ("smartphone", 3),
    ("iphone", 3),
    ("android", 3),
    ("semiconductor", 3),
    ("cybersecurity", 3),
    ("openai", 3),
    ("technology", 2),
    ("tech", 2),
    ("google", 2),
    ("microsoft", 2),
    ("chip", 2),
    ("chips", 2),
    ("hackers", 2),
    ("robot", 2),
    ("internet", 2),
    ("computer", 2),
    ("gadget", 2),
    ("app", 1),
    ("apple", 1),
    ("startup", 1),
];

const SCIENCE: &[(&str, u32)] = &[
    ("scientists", 3),
    ("nasa", 3),
    ("fossil", 3),
    ("astronomers", 3),
    ("physics", 3),
    ("telescope", 3),
    ("science", 2),
    ("researchers", 2),
    ("space", 2),
    ("planet", 2),
    ("climate", 2),
    ("species", 2),
    ("experiment", 2),
    ("research", 1),
    ("study", 1),
    ("discovery", 1),
];

const HEALTH: &[(&str, u32)] = &[
    ("cancer", 3),
    ("vaccine", 3),
    ("covid", 3),
    ("mental health", 3),
    ("nhs", 3),
    ("obesity", 3),
    ("health", 2),
    ("hospital", 2),
    ("doctors", 2),
    ("patients", 2),
    ("disease", 2),
    ("virus", 2),
    ("medical", 2),
    ("treatment", 2),
    ("outbreak", 2),
    ("diet", 2),
    ("drug", 1),
];

const SPORTS: &[(&str, u32)] = &[
    ("football", 3),
    ("soccer", 3),
    ("basketball", 3),
    ("tennis", 3),
    ("cricket", 3),
    ("golf", 3),
    ("nba", 3),
    ("nfl", 3),
    ("premier league", 3),
    ("olympics", 3),
    ("world cup", 3),
    ("match", 2),
    ("championship", 2),
    ("tournament", 2),
    ("coach", 2),
    ("player", 2),
    ("players", 2),
    ("league", 2),
    ("goal", 1),
    ("season", 1),
    ("team", 1),
];

const ENTERTAINMENT: &[(&str, u32)] = &[
    ("movie", 3),
    ("movies", 3),
    ("actor", 3),
    ("actress", 3),
    ("album", 3),
    ("singer", 3),
    ("celebrity", 3),
    ("hollywood", 3),
    ("box office", 3),
    ("oscar", 3),
    ("oscars", 3),
    ("grammy", 3),
    ("film", 2),
    ("music", 2),
    ("netflix", 2),
    ("tv", 2),
    ("television", 2),
    ("concert", 2),
    ("series", 1),
    ("festival", 1),
    ("streaming", 1),
];

const POLITICAL_UNREST: &[&str] = &[
    "protest",
    "protests",
    "protesters",
    "demonstration",
    "demonstrators",
    "election",
    "elections",
    "ballot",
    "referendum",
    "activist",
    "activists",
];

const LABOR_ACTION: &[&str] = &["strike", "strikes", "walkout"];
const LABOR_PARTIES: &[&str] = &["union", "unions", "workers", "employees"];

fn keywords(table: &[(&str, u32)]) -> Vec<WeightedKeyword> {
    table
        .iter()
        .map(|&(term, weight)| WeightedKeyword {
            term: term.to_string(),
            weight,
        })
        .collect()
}

fn terms(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| (*t).to_string()).collect()
}

impl Default for KeywordTables {
    fn default() -> Self {
        let categories = [
            (Category::Politics, POLITICS),
            (Category::World, WORLD),
            (Category::Business, BUSINESS),
            (Category::Technology, TECHNOLOGY),
            (Category::Science, SCIENCE),
            (Category::Health, HEALTH),
            (Category::Sports, SPORTS),
            (Category::Entertainment, ENTERTAINMENT),
        ]
        .into_iter()
        .map(|(category, table)| CategoryKeywords {
            category,
            keywords: keywords(table),
        })
        .collect();

        let exclusion_rules = vec![
            ExclusionRule {
                any_of: terms(POLITICAL_UNREST),
                with_any_of: Vec::new(),
                forces: Category::Politics,
            },
            ExclusionRule {
                any_of: terms(LABOR_ACTION),
                with_any_of: terms(LABOR_PARTIES),
                forces: Category::Business,
            },
        ];

        Self {
            categories,
            exclusion_rules,
            source_hint_bonus: DEFAULT_SOURCE_HINT_BONUS,
        }
    }
}

/// Load keyword tables from a YAML file, replacing the built-in defaults.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or parsed, or if it
/// defines no keywords at all.
pub fn load_keyword_tables(path: &Path) -> Result<KeywordTables, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    let tables: KeywordTables =
        serde_yaml::from_str(&content).map_err(|e| ConfigError::FileParse {
            path: path.display().to_string(),
            source: e,
        })?;

    if tables.categories.iter().all(|c| c.keywords.is_empty()) {
        return Err(ConfigError::Validation(format!(
            "{} defines no category keywords",
            path.display()
        )));
    }
    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_category_but_general() {
        let tables = KeywordTables::default();
        let covered: Vec<Category> = tables.categories.iter().map(|c| c.category).collect();
        let expected: Vec<Category> = Category::ALL
            .into_iter()
            .filter(|c| *c != Category::General)
            .collect();
        assert_eq!(covered, expected);
        assert!(tables.categories.iter().all(|c| !c.keywords.is_empty()));
    }

    #[test]
    fn yaml_tables_fill_in_default_weight() {
        let yaml = r"
categories:
  - category: Sports
    keywords:
      - term: curling
      - term: bonspiel
        weight: 3
exclusion_rules:
  - any_of: [coup]
    forces: Politics
";
        let tables: KeywordTables = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(tables.categories[0].keywords[0].weight, 1);
        assert_eq!(tables.categories[0].keywords[1].weight, 3);
        assert!(tables.exclusion_rules[0].with_any_of.is_empty());
        assert_eq!(tables.source_hint_bonus, DEFAULT_SOURCE_HINT_BONUS);
    }

    #[test]
    fn load_keyword_tables_reports_missing_file() {
        let err = load_keyword_tables(Path::new("/nonexistent/taxonomy.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileIo { .. }));
    }
}
