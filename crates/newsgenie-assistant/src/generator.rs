//! Text-generation capability and its HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::GeneratorError;

/// Anything that can complete a prompt.
///
/// Implementations decode greedily; the adapter relies on the same prompt
/// producing the same answer.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Complete `prompt`, producing at most `max_new_tokens` tokens.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError`] on transport failure, a non-2xx status or
    /// an unparseable response.
    async fn generate(&self, prompt: &str, max_new_tokens: u32) -> Result<String, GeneratorError>;
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    inputs: &'a str,
    parameters: GenerateParameters,
}

#[derive(Serialize)]
struct GenerateParameters {
    max_new_tokens: u32,
    do_sample: bool,
}

#[derive(Deserialize)]
struct Generation {
    generated_text: String,
}

/// Servers answer with either one object or a one-element array.
#[derive(Deserialize)]
#[serde(untagged)]
enum GenerateResponse {
    Single(Generation),
    Batch(Vec<Generation>),
}

impl GenerateResponse {
    fn into_text(self) -> String {
        match self {
            Self::Single(generation) => generation.generated_text,
            Self::Batch(generations) => generations
                .into_iter()
                .next()
                .map(|g| g.generated_text)
                .unwrap_or_default(),
        }
    }
}

/// Client for a text-generation-inference style server.
pub struct HttpGenerator {
    client: Client,
    base_url: String,
}

impl std::fmt::Debug for HttpGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGenerator")
            .field("client", &"<reqwest::Client>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl HttpGenerator {
    /// Build a client without contacting the server.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Http`] if the `reqwest::Client` cannot be
    /// constructed.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, GeneratorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build a client and check `GET /health` once.
    ///
    /// This is the expensive initialization step; callers run it once per
    /// process and keep the result.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Unavailable`] if the server does not answer
    /// the health check with a 2xx status.
    pub async fn connect(base_url: &str, timeout_secs: u64) -> Result<Self, GeneratorError> {
        let generator = Self::new(base_url, timeout_secs)?;
        let health_url = format!("{}/health", generator.base_url);

        let unavailable = |reason: String| GeneratorError::Unavailable {
            url: generator.base_url.clone(),
            reason,
        };
        let response = generator
            .client
            .get(&health_url)
            .send()
            .await
            .map_err(|e| unavailable(e.to_string()))?;
        if !response.status().is_success() {
            return Err(unavailable(format!("health check returned {}", response.status())));
        }

        tracing::info!(url = %generator.base_url, "text generator connected");
        Ok(generator)
    }
}

#[async_trait]
impl TextGenerator for HttpGenerator {
    fn name(&self) -> &str {
        "http"
    }

    async fn generate(&self, prompt: &str, max_new_tokens: u32) -> Result<String, GeneratorError> {
        let request = GenerateRequest {
            inputs: prompt,
            parameters: GenerateParameters {
                max_new_tokens,
                do_sample: false,
            },
        };

        let response = self
            .client
            .post(format!("{}/generate", self.base_url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeneratorError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let parsed: GenerateResponse =
            serde_json::from_slice(&body).map_err(GeneratorError::Deserialize)?;
        Ok(parsed.into_text())
    }
}
