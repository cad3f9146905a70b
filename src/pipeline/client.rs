//! HTTP dispatch of a trigger to the vectorization service.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, instrument};

use crate::{error::TriggerError, pipeline::request::TriggerRequest};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Status and body of the single response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerResult {
    pub status_code: u16,
    pub body: String,
}

impl TriggerResult {
    pub fn succeeded(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Thin wrapper over a `reqwest::Client` configured for the service.
#[derive(Debug, Clone)]
pub struct VectorizationClient {
    http: Client,
}

impl VectorizationClient {
    pub fn new() -> Result<Self, TriggerError> {
        let http = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(REQUEST_TIMEOUT)
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(|err| TriggerError::validation(format!("building HTTP client: {err}")))?;
        Ok(Self { http })
    }

    /// POST the request once. Non-2xx responses are returned, not raised.
    #[instrument(skip_all, fields(endpoint = %request.endpoint, job_id = %request.job_id))]
    pub async fn trigger(&self, request: &TriggerRequest) -> Result<TriggerResult, TriggerError> {
        let connection = |source| TriggerError::Connection {
            endpoint: request.endpoint.to_string(),
            source,
        };
        let resp = self
            .http
            .post(request.endpoint.clone())
            .json(&request.body())
            .send()
            .await
            .map_err(connection)?;
        let status_code = resp.status().as_u16();
        let body = resp.text().await.map_err(connection)?;
        debug!(status_code, bytes = body.len(), "received response");
        Ok(TriggerResult { status_code, body })
    }
}
