//! Registry client: submits documents through the shared admission gate

use std::sync::Arc;
use std::time::Duration;

use markgate::RateGate;
use reqwest::StatusCode;
use tracing::debug;

use crate::document::Document;
use crate::error::Result;
use crate::payload::SubmissionPayload;
use crate::token::generate_token;

/// Default registry endpoint.
const DEFAULT_BASE_URL: &str = "https://ismp.crpt.ru";

/// Create-document endpoint path.
const CREATE_DOCUMENT_PATH: &str = "/api/v3/lk/documents/create";

/// Default admissions per window.
const DEFAULT_LIMIT: i64 = 100;

/// Default window duration.
const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

/// Default HTTP request timeout.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Builder for creating a [`RegistryClient`]
pub struct RegistryClientBuilder {
    base_url: String,
    token: Option<String>,
    window: Duration,
    limit: i64,
    request_timeout: Duration,
}

impl Default for RegistryClientBuilder {
    fn default() -> Self {
        RegistryClientBuilder {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            window: DEFAULT_WINDOW,
            limit: DEFAULT_LIMIT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl RegistryClientBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the registry base URL (for testing against a local server).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the bearer token. A random token is generated when unset.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the rate window duration.
    pub fn window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// Set the maximum number of submissions per window.
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    /// Set the HTTP request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Build the client, constructing its shared admission gate.
    pub fn build(self) -> Result<RegistryClient> {
        let gate = Arc::new(RateGate::new(self.window, self.limit)?);
        let http = reqwest::Client::builder()
            .timeout(self.request_timeout)
            .build()?;

        Ok(RegistryClient {
            http,
            base_url: self.base_url,
            token: self.token.unwrap_or_else(generate_token),
            gate,
        })
    }
}

/// Client for the registry's create-document endpoint
///
/// Cloning is cheap; clones share the same admission gate, so the configured
/// quota holds across all of them.
#[derive(Clone)]
pub struct RegistryClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    gate: Arc<RateGate>,
}

impl RegistryClient {
    /// Create a client with the default configuration: 100 submissions per
    /// minute against the production registry, with a generated token.
    pub fn new() -> Result<Self> {
        RegistryClientBuilder::new().build()
    }

    /// Create a builder for custom configuration.
    pub fn builder() -> RegistryClientBuilder {
        RegistryClientBuilder::new()
    }

    /// The admission gate shared by all submissions through this client.
    pub fn gate(&self) -> &RateGate {
        &self.gate
    }

    /// Submit a document for the given product group.
    ///
    /// Waits on the admission gate first, so the call may block until the
    /// current rate window rolls over. Any HTTP response from the registry is
    /// returned as a [`SubmissionReceipt`]; only transport failures and gate
    /// cancellation are errors.
    pub async fn create_document(
        &self,
        document: &Document,
        product_group: &str,
        signature: &str,
    ) -> Result<SubmissionReceipt> {
        self.gate.admit().await?;

        let payload = SubmissionPayload::build(document, product_group, signature)?;
        let url = format!("{}{}", self.base_url, CREATE_DOCUMENT_PATH);
        debug!(product_group, "submitting document to registry");

        let response = self
            .http
            .post(&url)
            .query(&[("pg", product_group)])
            .bearer_auth(&self.token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(status = %status, "registry responded");

        Ok(SubmissionReceipt { status, body })
    }
}

/// Outcome of a submission that reached the registry.
#[derive(Debug, Clone)]
pub struct SubmissionReceipt {
    /// HTTP status returned by the registry.
    pub status: StatusCode,
    /// Raw response body.
    pub body: String,
}

impl SubmissionReceipt {
    /// Whether the registry accepted the submission (2xx status).
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}
