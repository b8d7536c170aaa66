//! HTTP client for the course API

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::models::{ChapterAudio, Health, McqResponse, Page, Question, Unit, UnitId};

/// Course API client
///
/// One instance is shared by every view; each call is a single GET with no
/// retry.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// HTTP client
    client: Client,
    /// Base URL without trailing slash
    base_url: String,
}

impl ApiClient {
    /// Create a client for the API rooted at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(base_url)?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /units`
    pub async fn units(&self) -> Result<Vec<Unit>, ApiError> {
        self.get_json("units").await
    }

    /// `GET /unit-pages/{id}`
    pub async fn unit_pages(&self, unit_id: UnitId) -> Result<Vec<Page>, ApiError> {
        self.get_json(&format!("unit-pages/{}", unit_id)).await
    }

    /// `GET /generate-mcq/{id}`
    ///
    /// The status code is not checked: the server reports generation failures
    /// as a JSON body without `mcqs`, which maps to
    /// [`ApiError::MissingQuestions`].
    pub async fn generate_mcq(&self, unit_id: UnitId) -> Result<Vec<Question>, ApiError> {
        let url = self.endpoint(&format!("generate-mcq/{}", unit_id));
        tracing::debug!(%url, "GET");
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "quiz generation failed");
        }
        parse_mcq_body(&body)
    }

    /// `GET /chapter-audio/{id}`
    pub async fn chapter_audio(&self, unit_id: UnitId) -> Result<ChapterAudio, ApiError> {
        self.get_json(&format!("chapter-audio/{}", unit_id)).await
    }

    /// `GET /health`
    pub async fn health(&self) -> Result<Health, ApiError> {
        self.get_json("health").await
    }

    /// Full URL for a path relative to the base
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path);
        tracing::debug!(%url, "GET");
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::ApiError { status: status.as_u16(), message });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Decode a `/generate-mcq` body into its questions
pub fn parse_mcq_body(body: &str) -> Result<Vec<Question>, ApiError> {
    let response: McqResponse = serde_json::from_str(body)?;
    match response.mcqs {
        Some(mcqs) => Ok(mcqs),
        None => Err(ApiError::MissingQuestions {
            detail: response.detail.map(|d| match d {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            }),
        }),
    }
}

fn normalize_base_url(base_url: &str) -> Result<String, ApiError> {
    let trimmed = base_url.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
    }
    Ok(trimmed.to_string())
}
