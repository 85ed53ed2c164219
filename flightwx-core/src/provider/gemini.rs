use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    Config,
    error::ProviderError,
    http::{client_with_timeout, truncate_body},
    provider::{build_prompt, parse_route_response},
};

use super::RouteSuggester;

/// Route suggester backed by the Gemini `generateContent` API.
#[derive(Debug, Clone)]
pub struct GeminiRouteSuggester {
    api_key: Option<String>,
    model: String,
    base_url: String,
    http: Client,
}

impl GeminiRouteSuggester {
    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        Ok(Self {
            api_key: config.api_key().map(str::to_owned),
            model: config.route_provider.model.clone(),
            base_url: config.route_provider.base_url.trim_end_matches('/').to_string(),
            http: client_with_timeout(config.http.timeout())?,
        })
    }

    async fn generate(&self, api_key: &str, prompt: String) -> Result<String, ProviderError> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model);
        let body =
            GenerateRequest { contents: vec![Content { parts: vec![Part { text: prompt }] }] };

        debug!(model = %self.model, "requesting route suggestion");

        let res = self
            .http
            .post(&url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(ProviderError::Status { status, body: truncate_body(&body) });
        }

        let parsed: GenerateResponse = serde_json::from_str(&body).map_err(|e| {
            ProviderError::MalformedResponse(format!("invalid generateContent JSON: {e}"))
        })?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content.parts.into_iter().filter_map(|part| part.text).collect::<String>()
            })
            .ok_or_else(|| {
                ProviderError::MalformedResponse("response contained no candidates".to_string())
            })
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[async_trait]
impl RouteSuggester for GeminiRouteSuggester {
    async fn suggest(&self, origin: &str, destination: &str) -> Result<Vec<String>, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::MissingApiKey)?;

        let text = self
            .generate(api_key, build_prompt(origin, destination))
            .await
            .inspect_err(|e| warn!(%origin, %destination, error = %e, "route suggestion failed"))?;

        let cities = parse_route_response(&text);
        debug!(%origin, %destination, count = cities.len(), "route suggestion parsed");
        Ok(cities)
    }
}
