//! Client configuration.

use std::time::Duration;

use url::Url;

use crate::error::{ClientError, Result};

/// Bucket receipt images are uploaded to unless configured otherwise.
pub const DEFAULT_RECEIPTS_BUCKET: &str = "receipts";

/// Request timeout unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the hosted backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub api_key: String,
    /// Signed-in user's token; the anonymous key is sent when absent.
    pub access_token: Option<String>,
    pub receipts_bucket: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            base_url,
            api_key: api_key.into(),
            access_token: None,
            receipts_bucket: DEFAULT_RECEIPTS_BUCKET.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_receipts_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.receipts_bucket = bucket.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SPARKRECEIPT_URL`: Backend base URL (required)
    /// - `SPARKRECEIPT_API_KEY`: Project API key (required)
    /// - `SPARKRECEIPT_ACCESS_TOKEN`: User access token (optional)
    /// - `SPARKRECEIPT_RECEIPTS_BUCKET`: Storage bucket for receipt images (default: `receipts`)
    /// - `SPARKRECEIPT_TIMEOUT_SECONDS`: Request timeout in seconds (default: 30)
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when a required variable is missing or
    /// the URL does not parse.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| ClientError::Config(format!("{key} is not set")))
        };

        let base_url = parse_base_url(&required("SPARKRECEIPT_URL")?)?;
        let api_key = required("SPARKRECEIPT_API_KEY")?;

        let access_token = lookup("SPARKRECEIPT_ACCESS_TOKEN").filter(|t| !t.trim().is_empty());

        let receipts_bucket = lookup("SPARKRECEIPT_RECEIPTS_BUCKET")
            .filter(|b| !b.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_RECEIPTS_BUCKET.to_string());

        let timeout = lookup("SPARKRECEIPT_TIMEOUT_SECONDS")
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        Ok(Self {
            base_url,
            api_key,
            access_token,
            receipts_bucket,
            timeout,
        })
    }

    /// Token sent as the bearer credential.
    pub fn bearer_token(&self) -> &str {
        self.access_token.as_deref().unwrap_or(&self.api_key)
    }
}

/// Parses a base URL, dropping any trailing slash.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    Url::parse(raw.trim_end_matches('/'))
        .map_err(|e| ClientError::Config(format!("invalid base URL {raw:?}: {e}")))
}
