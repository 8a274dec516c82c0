use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Category, ConfigError};

/// One feed in the source registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Stable identifier used in logs, e.g. `bbc-news`.
    pub id: String,
    /// Display name stamped on every article from this feed.
    pub name: String,
    /// RSS, Atom, or JSON Feed location.
    pub url: String,
    /// Topical hint for the categorizer; also used to skip feeds when a
    /// category filter is requested.
    #[serde(default)]
    pub category: Option<Category>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRegistry {
    pub sources: Vec<SourceConfig>,
}

impl SourceRegistry {
    /// Sources to fetch for an optional category filter.
    ///
    /// Feeds without a hint are always included.
    pub fn for_category(&self, category: Option<Category>) -> impl Iterator<Item = &SourceConfig> {
        self.sources.iter().filter(move |source| match (category, source.category) {
            (Some(wanted), Some(hint)) => wanted == hint,
            _ => true,
        })
    }
}

/// Load and validate the source registry from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_sources(path: &Path) -> Result<SourceRegistry, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let registry: SourceRegistry =
        serde_yaml::from_str(&content).map_err(|e| ConfigError::FileParse {
            path: path.display().to_string(),
            source: e,
        })?;

    validate_sources(&registry)?;

    Ok(registry)
}

/// Parse and validate a registry from an in-memory YAML document.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_sources(yaml: &str) -> Result<SourceRegistry, ConfigError> {
    let registry: SourceRegistry =
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::FileParse {
            path: "<inline>".to_string(),
            source: e,
        })?;
    validate_sources(&registry)?;
    Ok(registry)
}

fn validate_sources(registry: &SourceRegistry) -> Result<(), ConfigError> {
    if registry.sources.is_empty() {
        return Err(ConfigError::Validation(
            "source registry must list at least one source".to_string(),
        ));
    }

    let mut seen_ids = HashSet::new();

    for source in &registry.sources {
        if source.id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "source id must be non-empty".to_string(),
            ));
        }

        if source.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "source '{}' has an empty name",
                source.id
            )));
        }

        if !(source.url.starts_with("https://") || source.url.starts_with("http://")) {
            return Err(ConfigError::Validation(format!(
                "source '{}' has non-http url '{}'",
                source.id, source.url
            )));
        }

        if !seen_ids.insert(source.id.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate source id: '{}'",
                source.id
            )));
        }
    }

    Ok(())
}
