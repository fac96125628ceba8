//! Text analysis capability
//!
//! Keyword extraction and search tokenization are delegated to an external
//! analysis API. Stored keywords and query-time tokens must come from the
//! same tokenizer, so both operations share one [`TextAnalyzer`]
//! implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::TextAnalysisConfig;
use crate::utils::errors::{EventForgeError, Result};

/// External text analysis contract
#[async_trait]
pub trait TextAnalyzer: Send + Sync {
    /// Extract a keyword set from free text
    async fn extract_keywords(&self, text: &str) -> Result<Vec<String>>;

    /// Tokenize a search phrase into search terms
    async fn tokenize(&self, phrase: &str) -> Result<Vec<String>>;
}

#[derive(Debug, Serialize)]
struct AnalysisRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct KeywordsResponse {
    keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TokensResponse {
    tokens: Vec<String>,
}

/// Text analyzer backed by the external analysis HTTP API
#[derive(Debug, Clone)]
pub struct HttpTextAnalyzer {
    client: Client,
    config: TextAnalysisConfig,
}

impl HttpTextAnalyzer {
    /// Create a new HttpTextAnalyzer instance
    pub fn new(config: TextAnalysisConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("eventforge/1.0")
            .build()
            .map_err(EventForgeError::Http)?;

        Ok(Self { client, config })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl TextAnalyzer for HttpTextAnalyzer {
    async fn extract_keywords(&self, text: &str) -> Result<Vec<String>> {
        debug!(length = text.len(), "Requesting keyword extraction");

        let response = self
            .client
            .post(self.endpoint("keywords"))
            .json(&AnalysisRequest { text })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(EventForgeError::TextAnalysis(format!(
                "keyword extraction failed with status {}",
                response.status()
            )));
        }

        let body: KeywordsResponse = response.json().await?;
        Ok(body.keywords)
    }

    async fn tokenize(&self, phrase: &str) -> Result<Vec<String>> {
        debug!(phrase = phrase, "Requesting search tokenization");

        let response = self
            .client
            .post(self.endpoint("tokenize"))
            .json(&AnalysisRequest { text: phrase })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(EventForgeError::TextAnalysis(format!(
                "tokenization failed with status {}",
                response.status()
            )));
        }

        let body: TokensResponse = response.json().await?;
        Ok(body.tokens)
    }
}
