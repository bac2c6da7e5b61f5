use std::time::Duration;

use parcel_track::{Action, Gateway, Outcome, Payload};
use url::Url;

/// Errors building an `HttpGateway`.
#[derive(Debug, thiserror::Error)]
pub enum HttpGatewayError {
    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Configuration for the backend the page talks to.
#[derive(Debug, Clone)]
pub struct HttpGatewayConfig {
    pub base_url: String,
    /// Upper bound on a single request. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Session cookie forwarded as-is, e.g. `session=abc123`.
    pub session_cookie: Option<String>,
}

impl HttpGatewayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
            session_cookie: None,
        }
    }
}

/// Sends each action as one form-encoded POST to its backend route.
pub struct HttpGateway {
    base: Url,
    session_cookie: Option<String>,
    client: reqwest::Client,
}

impl HttpGateway {
    pub fn new(config: HttpGatewayConfig) -> Result<Self, HttpGatewayError> {
        let mut base = Url::parse(&config.base_url).map_err(|e| HttpGatewayError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        // Routes are relative, so the base must act as a directory.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut builder = reqwest::Client::builder().user_agent("parcel-track");
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| HttpGatewayError::Client(e.to_string()))?;

        Ok(Self {
            base,
            session_cookie: config.session_cookie,
            client,
        })
    }

    fn url_for(&self, action: Action) -> Result<Url, url::ParseError> {
        self.base.join(action.route())
    }

    fn build_request(&self, url: Url, payload: &Payload) -> reqwest::RequestBuilder {
        let mut req = self
            .client
            .post(url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(payload.encode());

        if let Some(cookie) = &self.session_cookie {
            req = req.header("Cookie", cookie);
        }

        req
    }
}

#[async_trait::async_trait]
impl Gateway for HttpGateway {
    async fn submit(&self, action: Action, payload: &Payload) -> Outcome {
        let url = match self.url_for(action) {
            Ok(url) => url,
            Err(e) => return Outcome::transport_failure(format!("bad route: {e}")),
        };

        let response = match self.build_request(url, payload).send().await {
            Ok(response) => response,
            Err(e) => {
                let kind = if e.is_timeout() { "timed out" } else { "failed" };
                tracing::warn!(%action, error = %e, "request {kind}");
                return Outcome::transport_failure(e.to_string());
            }
        };

        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => {
                tracing::debug!(%action, status, "response received");
                Outcome::new(status, body)
            }
            Err(e) => {
                tracing::warn!(%action, status, error = %e, "failed to read response body");
                Outcome::transport_failure(e.to_string())
            }
        }
    }
}
