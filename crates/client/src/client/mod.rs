//! HTTP client for the hosted SparkReceipt backend.

pub mod functions;
pub mod records;
pub mod storage;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// HTTP client for the record, storage and function endpoints.
#[derive(Debug, Clone)]
pub struct SparkReceiptClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl SparkReceiptClient {
    /// Create a new client; every request carries the configured credentials.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert("apikey", header_value(&config.api_key)?);
        headers.insert(
            AUTHORIZATION,
            header_value(&format!("Bearer {}", config.bearer_token()))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client, config })
    }

    /// Create from environment (see [`ClientConfig::from_env`]).
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Get the base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.config.base_url.as_str().trim_end_matches('/')
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Handle error responses.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
        resource: &str,
    ) -> Result<T> {
        let response = self.check_status(response, resource).await?;
        response.json().await.map_err(ClientError::from)
    }

    /// Handle responses whose body is not needed.
    async fn handle_empty_response(
        &self,
        response: reqwest::Response,
        resource: &str,
    ) -> Result<()> {
        self.check_status(response, resource).await.map(|_| ())
    }

    async fn check_status(
        &self,
        response: reqwest::Response,
        resource: &str,
    ) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else if status.as_u16() == 404 {
            Err(ClientError::NotFound {
                resource: resource.to_string(),
            })
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::debug!(
                status = status.as_u16(),
                %resource,
                %message,
                "Backend rejected request"
            );
            Err(ClientError::ServerError {
                status: status.as_u16(),
                message,
            })
        }
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| ClientError::Config("credential contains invalid header characters".into()))
}
