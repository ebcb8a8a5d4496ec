use futures_util::stream::{BoxStream, StreamExt};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};
use crate::events::StreamEvent;
use crate::stream::ingest;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Customer profile the synthetic generator conditions on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub age: u32,
    pub gender: String,
    pub household_size: u32,
    /// Annual income
    pub income: f64,
    pub zipcode: String,
}

impl CustomerProfile {
    /// Every field is required by the generator.
    pub fn validate(&self) -> Result<()> {
        if self.age == 0 {
            return Err(IngestError::InvalidProfile("age must be positive".into()));
        }
        if self.gender.trim().is_empty() {
            return Err(IngestError::InvalidProfile("gender is required".into()));
        }
        if self.household_size == 0 {
            return Err(IngestError::InvalidProfile("household size must be positive".into()));
        }
        if !self.income.is_finite() || self.income < 0.0 {
            return Err(IngestError::InvalidProfile("income must be a non-negative number".into()));
        }
        if self.zipcode.trim().is_empty() {
            return Err(IngestError::InvalidProfile("zipcode is required".into()));
        }
        Ok(())
    }
}

/// HTTP client for the synthetic transaction generator
#[derive(Debug, Clone)]
pub struct GenerationClient {
    http: reqwest::Client,
    base_url: String,
}

impl GenerationClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn generate_url(&self) -> String {
        format!("{}/generate", self.base_url)
    }

    /// Start a generation run and return its event stream.
    ///
    /// Connection failures and non-success responses fail here; once the
    /// stream is returned, problems arrive as `StreamEvent::Error`.
    pub async fn generate(
        &self,
        profile: &CustomerProfile,
    ) -> Result<BoxStream<'static, StreamEvent>> {
        profile.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("text/event-stream"));

        let url = self.generate_url();
        tracing::debug!(%url, zipcode = %profile.zipcode, "starting generation");

        let resp = self
            .http
            .post(&url)
            .headers(headers)
            .json(profile)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(IngestError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(ingest(Box::pin(resp.bytes_stream())).boxed())
    }
}
