use std::collections::BTreeMap;
use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use quiz_core::model::{FinalProfile, PartKey, PartResult};

use crate::backend::ScoringBackend;
use crate::error::{ApiConfigError, SyncError};

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Where to reach the scoring backend.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Validate and normalize a base URL.
    ///
    /// # Errors
    ///
    /// Returns `ApiConfigError::InvalidBaseUrl` if the value does not parse
    /// as an absolute URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiConfigError> {
        let raw = base_url.into();
        Url::parse(&raw).map_err(|source| ApiConfigError::InvalidBaseUrl {
            raw: raw.clone(),
            source,
        })?;
        Ok(Self {
            base_url: raw.trim_end_matches('/').to_string(),
        })
    }

    /// Read the base URL from `QUIZ_API_URL`, falling back to the default
    /// local backend address.
    ///
    /// # Errors
    ///
    /// Returns `ApiConfigError::InvalidBaseUrl` if the variable is set but
    /// not a valid URL.
    pub fn from_env() -> Result<Self, ApiConfigError> {
        let raw = env::var("QUIZ_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        Self::new(raw)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// JSON-over-HTTP scoring backend.
#[derive(Clone)]
pub struct HttpScoringBackend {
    client: Client,
    config: ApiConfig,
}

impl HttpScoringBackend {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url())
    }

    async fn post<Req: Serialize, Resp: Default + for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        payload: &Req,
    ) -> Result<Resp, SyncError> {
        let response = self
            .client
            .post(self.endpoint(path))
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Prefer the server's error string; fall back to status + text.
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| {
                    format!(
                        "{} {}",
                        status.as_u16(),
                        status.canonical_reason().unwrap_or("request failed")
                    )
                });
            return Err(SyncError::Rejected { message });
        }

        // A success response with an unparseable body counts as an empty
        // result object, not a failure.
        Ok(response.json::<Resp>().await.unwrap_or_default())
    }
}

#[async_trait]
impl ScoringBackend for HttpScoringBackend {
    async fn submit_part(
        &self,
        part: &PartKey,
        answers: &[String],
    ) -> Result<PartResult, SyncError> {
        let payload = SubmitPartRequest { part, answers };
        self.post("api/submit_part", &payload).await
    }

    async fn final_profile(
        &self,
        answers_by_part: &BTreeMap<PartKey, Vec<String>>,
    ) -> Result<FinalProfile, SyncError> {
        let payload = FinalResultRequest { answers_by_part };
        self.post("api/final_result", &payload).await
    }
}

#[derive(Debug, Serialize)]
struct SubmitPartRequest<'a> {
    part: &'a PartKey,
    answers: &'a [String],
}

#[derive(Debug, Serialize)]
struct FinalResultRequest<'a> {
    answers_by_part: &'a BTreeMap<PartKey, Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}
