use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::SubmissionPayload;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientSettings;

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("invalid analysis endpoint '{endpoint}': {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },
    #[error("analysis request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("analysis endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed analysis response: {0}")]
    MalformedResponse(String),
    #[error("analysis endpoint is not configured")]
    Unavailable,
}

/// Carries one payload to the analysis service and hands back the rendered
/// content as an opaque string.
#[async_trait]
pub trait AnalysisTransport: Send + Sync {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<String, SubmissionError>;
}

pub struct MissingAnalysisTransport;

#[async_trait]
impl AnalysisTransport for MissingAnalysisTransport {
    async fn submit(&self, _payload: &SubmissionPayload) -> Result<String, SubmissionError> {
        Err(SubmissionError::Unavailable)
    }
}

pub struct HttpAnalysisTransport {
    http: Client,
    endpoint: Url,
}

impl HttpAnalysisTransport {
    pub fn new(settings: &ClientSettings) -> Result<Self, SubmissionError> {
        let endpoint = settings.endpoint()?;
        let http = Client::builder()
            .timeout(settings.request_timeout())
            .build()?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl AnalysisTransport for HttpAnalysisTransport {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<String, SubmissionError> {
        debug!(endpoint = %self.endpoint, "posting reaction payload");
        let res = self
            .http
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "analysis endpoint rejected reaction");
            return Err(SubmissionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = res.bytes().await?;
        String::from_utf8(bytes.to_vec()).map_err(|err| {
            SubmissionError::MalformedResponse(format!("response body is not UTF-8: {err}"))
        })
    }
}

#[cfg(test)]
#[path = "tests/submission_tests.rs"]
mod tests;
