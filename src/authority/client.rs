//! Authority HTTP client with timeout and error handling.
//!
//! # Responsibilities
//! - Call the authority's validation endpoint with the bearer token
//! - Bound every call with the configured timeout
//! - Collapse every failure into `ValidationFailed`

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use thiserror::Error;
use tokio::time::timeout;

use crate::authority::types::{UserInfo, ValidationFailed};
use crate::authority::TokenValidator;
use crate::config::AuthorityConfig;

/// The authority client could not be set up at startup.
#[derive(Debug, Error)]
pub enum AuthorityInitError {
    #[error("invalid authority validation URL '{url}': {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build authority HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Validates tokens against the remote authentication service.
#[derive(Clone)]
pub struct AuthorityClient {
    http: reqwest::Client,
    validate_url: url::Url,
    timeout_duration: Duration,
}

impl AuthorityClient {
    /// Build a client from configuration.
    ///
    /// `validate_path` is appended to `base_url`, so a context path on the
    /// base (e.g. "http://auth:9000/auth-svc") is kept.
    pub fn new(config: &AuthorityConfig) -> Result<Self, AuthorityInitError> {
        let timeout_duration = Duration::from_millis(config.timeout_ms);

        let joined = format!(
            "{}/{}",
            config.base_url.trim_end_matches('/'),
            config.validate_path.trim_start_matches('/')
        );
        let validate_url: url::Url = joined.parse().map_err(|source| AuthorityInitError::Url {
            url: joined.clone(),
            source,
        })?;

        let http = reqwest::Client::builder()
            .timeout(timeout_duration)
            .build()
            .map_err(AuthorityInitError::Client)?;

        tracing::info!(
            validate_url = %validate_url,
            timeout_ms = config.timeout_ms,
            "Authority client initialized"
        );

        Ok(Self {
            http,
            validate_url,
            timeout_duration,
        })
    }

    pub fn validate_url(&self) -> &url::Url {
        &self.validate_url
    }

    async fn call(&self, token: &str) -> Result<Option<UserInfo>, ValidationFailed> {
        let response = self
            .http
            .get(self.validate_url.clone())
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .send()
            .await
            .map_err(|e| ValidationFailed::new(format!("request error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ValidationFailed::new(format!("authority returned {}", status)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ValidationFailed::new(format!("body read error: {}", e)))?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        serde_json::from_slice::<Option<UserInfo>>(&body)
            .map_err(|e| ValidationFailed::new(format!("malformed response: {}", e)))
    }
}

impl TokenValidator for AuthorityClient {
    async fn validate(&self, token: &str) -> Result<Option<UserInfo>, ValidationFailed> {
        match timeout(self.timeout_duration, self.call(token)).await {
            Ok(result) => result,
            Err(_) => Err(ValidationFailed::new(format!(
                "timed out after {} ms",
                self.timeout_duration.as_millis()
            ))),
        }
    }
}
