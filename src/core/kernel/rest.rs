use crate::core::errors::ExchangeError;
use crate::core::types::HttpRequest;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{instrument, trace};

/// Transport trait for sending prepared requests
///
/// Implementations perform exactly one HTTP call per request and return the
/// parsed response body unmodified. They never retry and never interpret
/// exchange error codes.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and return the response body as JSON
    ///
    /// # Arguments
    /// * `request` - Method, full URL, headers and body, already signed
    ///
    /// # Returns
    /// The response body as a JSON value, whatever the HTTP status
    async fn execute(&self, request: HttpRequest) -> Result<Value, ExchangeError>;
}

/// Configuration for the REST transport
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string to include in requests
    pub user_agent: String,
}

impl Default for RestClientConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: format!("cexsign/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl RestClientConfig {
    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Set the user agent string
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

/// Builder for creating [`ReqwestTransport`] instances
#[derive(Debug, Default)]
pub struct RestClientBuilder {
    config: RestClientConfig,
}

impl RestClientBuilder {
    pub fn new(config: RestClientConfig) -> Self {
        Self { config }
    }

    /// Build the transport
    pub fn build(self) -> Result<ReqwestTransport, ExchangeError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(self.config.timeout_seconds))
            .user_agent(&self.config.user_agent)
            .build()
            .map_err(|e| {
                ExchangeError::TransportFailure(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(ReqwestTransport {
            client,
            config: self.config,
        })
    }
}

/// Implementation of [`Transport`] using reqwest
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: Client,
    config: RestClientConfig,
}

impl ReqwestTransport {
    /// Transport with the default timeout and user agent
    pub fn new() -> Result<Self, ExchangeError> {
        RestClientBuilder::default().build()
    }

    pub fn config(&self) -> &RestClientConfig {
        &self.config
    }

    /// Parse a response body, keeping non-JSON bodies as a raw string
    fn parse_body(text: String) -> Value {
        match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(_) => Value::String(text),
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn execute(&self, request: HttpRequest) -> Result<Value, ExchangeError> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let mut builder = self.client.request(method, &url);

        for (key, value) in &headers {
            builder = builder.header(key, value);
        }

        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        trace!(status = %status, "Response body: {}", text);

        Ok(Self::parse_body(text))
    }
}
