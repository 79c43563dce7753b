//! HTTP gateway client.
//!
//! The gateway exposes four endpoints: a worker health probe, a
//! worker-backed structured search, and the two halves of the remote
//! flow (unstructured search, then structuring). `Gateway` is the seam
//! that lets the transport selector be tested without a live server.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use moviepipe_core::Movie;
use moviepipe_protocol::MovieList;

use crate::error::{ClientError, ClientResult};
use crate::selector::SearchParams;

/// How long a health probe may take before the worker counts as down.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// How long a search may take. The remote flow calls out to a slow
/// upstream, so this is generous.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Gateway operations the client depends on.
pub trait Gateway: Send + Sync {
    /// Probes worker availability. Any failure, including a timeout,
    /// reads as unavailable.
    fn probe_health(&self) -> impl Future<Output = bool> + Send;

    /// Structured search served by the local worker.
    fn search_pipe(&self, params: &SearchParams)
    -> impl Future<Output = ClientResult<Vec<Movie>>> + Send;

    /// Remote flow, step one: fetch unstructured movie text.
    fn search_unstructured(
        &self,
        params: &SearchParams,
    ) -> impl Future<Output = ClientResult<String>> + Send;

    /// Remote flow, step two: structure the fetched text into records.
    fn structure(&self, text: &str) -> impl Future<Output = ClientResult<Vec<Movie>>> + Send;
}

/// `Gateway` implementation over the gateway's REST surface.
pub struct HttpGateway {
    http: reqwest::Client,
    base_url: String,
    probe_timeout: Duration,
    request_timeout: Duration,
}

impl HttpGateway {
    /// Creates a gateway client for the given base URL.
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build http client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }

    /// Sets the health probe timeout.
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Sets the search request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turns a non-success response into a `Gateway` error carrying the
    /// body verbatim, falling back to a status line when the body is empty.
    async fn fail(response: reqwest::Response) -> ClientError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if body.trim().is_empty() {
            ClientError::Gateway(format!("gateway returned {status}"))
        } else {
            ClientError::Gateway(body)
        }
    }
}

impl Gateway for HttpGateway {
    async fn probe_health(&self) -> bool {
        let result = self
            .http
            .get(self.url("/health-pipe"))
            .timeout(self.probe_timeout)
            .send()
            .await;

        match result {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(error = %e, "Health probe failed");
                false
            }
        }
    }

    async fn search_pipe(&self, params: &SearchParams) -> ClientResult<Vec<Movie>> {
        let response = self
            .http
            .get(self.url("/search-pipe"))
            .query(&[
                ("amount", params.amount.to_string()),
                ("genre", params.genre.clone()),
                ("range", params.range.to_string()),
            ])
            .timeout(self.request_timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }

        let list: MovieList = response.json().await?;
        Ok(list.movies)
    }

    async fn search_unstructured(&self, params: &SearchParams) -> ClientResult<String> {
        let response = self
            .http
            .get(self.url("/search"))
            .query(&[
                ("amount", params.amount.to_string()),
                ("genre", params.genre.clone()),
                ("range", params.range.to_string()),
            ])
            .timeout(self.request_timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }

        Ok(response.text().await?)
    }

    async fn structure(&self, text: &str) -> ClientResult<Vec<Movie>> {
        let response = self
            .http
            .post(self.url("/structure"))
            .header(CONTENT_TYPE, "text/plain")
            .body(text.to_string())
            .timeout(self.request_timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::fail(response).await);
        }

        let list: MovieList = response.json().await?;
        Ok(list.movies)
    }
}
