use std::time::Duration;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::SentimentLabel,
    error::PredictErrorBody,
    protocol::{PredictRequest, PredictResponse, PREDICT_PATH},
};
use tracing::debug;
use url::Url;

use crate::error::SubmissionError;

/// Boundary to the remote inference service. One call is one request; no retries.
#[async_trait]
pub trait PredictionTransport: Send + Sync {
    async fn predict(&self, request: &PredictRequest) -> Result<SentimentLabel, SubmissionError>;
}

pub struct HttpPredictionTransport {
    http: Client,
    endpoint: Url,
    timeout: Option<Duration>,
}

impl HttpPredictionTransport {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Ok(Self {
            http: Client::new(),
            endpoint: predict_endpoint(base_url)?,
            timeout: None,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn classify_request_error(&self, err: reqwest::Error) -> SubmissionError {
        if err.is_timeout() {
            return SubmissionError::Timeout(self.timeout.unwrap_or_default());
        }
        SubmissionError::Transport(err.to_string())
    }
}

#[async_trait]
impl PredictionTransport for HttpPredictionTransport {
    async fn predict(&self, request: &PredictRequest) -> Result<SentimentLabel, SubmissionError> {
        let mut builder = self.http.post(self.endpoint.clone()).json(request);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder
            .send()
            .await
            .map_err(|err| self.classify_request_error(err))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| self.classify_request_error(err))?;
        debug!(
            status = status.as_u16(),
            bytes = body.len(),
            "prediction response received"
        );

        if status.is_success() {
            let parsed: PredictResponse = serde_json::from_slice(&body)
                .map_err(|err| SubmissionError::MalformedResponse(err.to_string()))?;
            return Ok(parsed.sentiment);
        }

        let message = serde_json::from_slice::<PredictErrorBody>(&body)
            .ok()
            .and_then(|body| body.message().map(str::to_string));
        Err(SubmissionError::Application {
            status: status.as_u16(),
            message,
        })
    }
}

fn predict_endpoint(base_url: &str) -> anyhow::Result<Url> {
    let base = base_url.trim().trim_end_matches('/');
    if base.is_empty() {
        return Err(anyhow!("prediction service url must not be empty"));
    }

    let parsed =
        Url::parse(base).with_context(|| format!("invalid prediction service url '{base_url}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(anyhow!(
            "prediction service url '{base_url}' must use http or https"
        ));
    }

    Url::parse(&format!("{base}{PREDICT_PATH}"))
        .with_context(|| format!("failed to build predict endpoint from '{base_url}'"))
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
