//! Gemini generateContent client
//!
//! Single-shot text generation: one user turn, one text part, no tools,
//! no system instruction.

use async_trait::async_trait;
use reqwest::{Client, Proxy, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use super::{Oracle, OracleError};
use crate::config::{OracleConfig, ProxySetting};

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

pub struct GeminiOracle {
    client: Client,
    /// Endpoint without credentials, safe to log
    endpoint: Url,
    /// Endpoint with `?key=` attached
    request_url: Url,
}

impl GeminiOracle {
    pub fn new(config: &OracleConfig) -> Result<Self, OracleError> {
        let endpoint = Url::parse(&format!(
            "{}/models/{}:generateContent",
            config.api_base.trim_end_matches('/'),
            config.model
        ))?;

        let mut request_url = endpoint.clone();
        request_url
            .query_pairs_mut()
            .append_pair("key", &config.api_key);

        let mut builder = Client::builder().timeout(config.timeout);
        builder = match &config.proxy {
            ProxySetting::System => builder,
            ProxySetting::Disabled => builder.no_proxy(),
            ProxySetting::Url(proxy) => {
                builder.proxy(Proxy::all(proxy).map_err(OracleError::Transport)?)
            }
        };
        let client = builder.build().map_err(OracleError::Transport)?;

        Ok(Self {
            client,
            endpoint,
            request_url,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

// ============================================================================
// API Types
// ============================================================================

#[derive(Serialize, Debug)]
struct GenerateContentRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Serialize, Debug)]
struct GeminiContent {
    parts: Vec<GeminiTextPart>,
}

#[derive(Serialize, Debug)]
struct GeminiTextPart {
    text: String,
}

impl GenerateContentRequest {
    fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![GeminiContent {
                parts: vec![GeminiTextPart {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

#[derive(Deserialize, Debug)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Option<Vec<GeminiCandidate>>,
}

#[derive(Deserialize, Debug)]
struct GeminiCandidate {
    content: Option<GeminiContentResponse>,
}

#[derive(Deserialize, Debug)]
struct GeminiContentResponse {
    #[serde(default)]
    parts: Vec<GeminiPartResponse>,
}

#[derive(Deserialize, Debug)]
struct GeminiPartResponse {
    text: Option<String>,
}

/// Pull the first candidate's first text part out of a 200 body.
fn extract_text(body: &str) -> Result<String, OracleError> {
    let response: GenerateContentResponse =
        serde_json::from_str(body).map_err(|e| OracleError::Malformed(e.to_string()))?;

    let candidate = response
        .candidates
        .and_then(|c| c.into_iter().next())
        .ok_or(OracleError::NoCandidates)?;

    candidate
        .content
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .map(|t| t.trim().to_string())
        .ok_or_else(|| OracleError::Malformed("first candidate has no text part".to_string()))
}

#[async_trait]
impl Oracle for GeminiOracle {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String, OracleError> {
        let payload = GenerateContentRequest::from_prompt(prompt);

        debug!("POST {}", self.endpoint);
        // without_url: reqwest puts the full URL, key included, into its error text
        let response = self
            .client
            .post(self.request_url.clone())
            .json(&payload)
            .send()
            .await
            .map_err(|e| OracleError::Transport(e.without_url()))?;

        let status = response.status();
        info!("Response status: {}", status);

        let body = response
            .text()
            .await
            .map_err(|e| OracleError::Transport(e.without_url()))?;

        if status != StatusCode::OK {
            warn!("API error: {} - {}", status.as_u16(), body);
            return Err(OracleError::Http {
                status: status.as_u16(),
                body,
            });
        }

        debug!("API response: {}", body);
        extract_text(&body)
    }
}
