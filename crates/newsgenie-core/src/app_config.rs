use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub sources_path: PathBuf,
    pub taxonomy_path: Option<PathBuf>,
    pub log_level: String,
    pub news_api_key: Option<String>,
    pub news_api_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_entries_per_source: usize,
    pub summary_max_chars: usize,
    pub corpus_max: usize,
    pub cache_ttl_secs: u64,
    pub generator_url: Option<String>,
    pub generator_timeout_secs: u64,
    pub generator_max_new_tokens: u32,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("sources_path", &self.sources_path)
            .field("taxonomy_path", &self.taxonomy_path)
            .field("log_level", &self.log_level)
            .field(
                "news_api_key",
                &self.news_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("news_api_base_url", &self.news_api_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_entries_per_source", &self.max_entries_per_source)
            .field("summary_max_chars", &self.summary_max_chars)
            .field("corpus_max", &self.corpus_max)
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .field("generator_url", &self.generator_url)
            .field("generator_timeout_secs", &self.generator_timeout_secs)
            .field("generator_max_new_tokens", &self.generator_max_new_tokens)
            .finish()
    }
}
