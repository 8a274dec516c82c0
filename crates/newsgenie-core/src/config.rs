use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build configuration from an env-var lookup function so tests can feed a
/// plain `HashMap` instead of mutating the process environment.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Set-but-blank counts as unset for optional values.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_positive_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        match raw.parse::<usize>() {
            Ok(0) => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be greater than zero".to_string(),
            }),
            Ok(n) => Ok(n),
            Err(e) => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
        }
    };

    let sources_path = PathBuf::from(or_default(
        "NEWSGENIE_SOURCES_PATH",
        "./config/sources.yaml",
    ));
    let taxonomy_path = optional("NEWSGENIE_TAXONOMY_PATH").map(PathBuf::from);
    let log_level = or_default("NEWSGENIE_LOG_LEVEL", "info");

    let news_api_key = optional("NEWS_API_KEY");
    let news_api_base_url = or_default("NEWS_API_BASE_URL", "https://newsapi.org")
        .trim_end_matches('/')
        .to_string();

    let request_timeout_secs = parse_u64("NEWSGENIE_REQUEST_TIMEOUT_SECS", "10")?;
    let user_agent = or_default("NEWSGENIE_USER_AGENT", "newsgenie/0.1 (news-aggregator)");
    let max_entries_per_source = parse_positive_usize("NEWSGENIE_MAX_ENTRIES_PER_SOURCE", "20")?;
    let summary_max_chars = parse_positive_usize("NEWSGENIE_SUMMARY_MAX_CHARS", "500")?;
    let corpus_max = parse_positive_usize("NEWSGENIE_CORPUS_MAX", "100")?;
    let cache_ttl_secs = parse_u64("NEWSGENIE_CACHE_TTL_SECS", "300")?;

    let generator_url = optional("NEWSGENIE_GENERATOR_URL")
        .map(|url| url.trim_end_matches('/').to_string());
    let generator_timeout_secs = parse_u64("NEWSGENIE_GENERATOR_TIMEOUT_SECS", "20")?;
    let generator_max_new_tokens = parse_u32("NEWSGENIE_GENERATOR_MAX_NEW_TOKENS", "256")?;

    Ok(AppConfig {
        sources_path,
        taxonomy_path,
        log_level,
        news_api_key,
        news_api_base_url,
        request_timeout_secs,
        user_agent,
        max_entries_per_source,
        summary_max_chars,
        corpus_max,
        cache_ttl_secs,
        generator_url,
        generator_timeout_secs,
        generator_max_new_tokens,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
