use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use url::Url;

use crate::interpret::interpret_response;
use crate::{EngineError, SummarizeError};

/// Path of the summarize endpoint, relative to the server base URL.
pub const SUMMARIZE_PATH: &str = "api/summarize";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub server_url: String,
    pub connect_timeout: Duration,
    /// Whole-request deadline. `None` waits for as long as the server takes.
    pub request_timeout: Option<Duration>,
    pub max_response_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            max_response_bytes: 5 * 1024 * 1024,
        }
    }
}

impl ClientSettings {
    /// Resolves the summarize endpoint under `server_url`, keeping any path prefix.
    pub fn endpoint(&self) -> Result<Url, EngineError> {
        let invalid = |reason: String| EngineError::InvalidEndpoint {
            url: self.server_url.clone(),
            reason,
        };
        let mut base = Url::parse(self.server_url.trim()).map_err(|err| invalid(err.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", base.scheme())));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(SUMMARIZE_PATH)
            .map_err(|err| invalid(err.to_string()))
    }
}

#[derive(Debug, Serialize)]
struct SummarizeRequest<'a> {
    url: &'a str,
}

#[async_trait::async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, url: &str) -> Result<String, SummarizeError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestSummarizer {
    client: reqwest::Client,
    endpoint: Url,
    max_response_bytes: u64,
}

impl ReqwestSummarizer {
    pub fn new(settings: ClientSettings) -> Result<Self, EngineError> {
        let endpoint = settings.endpoint()?;
        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| EngineError::Client(err.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            max_response_bytes: settings.max_response_bytes,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl Summarizer for ReqwestSummarizer {
    async fn summarize(&self, url: &str) -> Result<String, SummarizeError> {
        let body = serde_json::to_vec(&SummarizeRequest { url })
            .map_err(|err| SummarizeError::Transport(err.to_string()))?;

        let response = self
            .client
            .post(self.endpoint.as_str())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        if let Some(content_len) = response.content_length() {
            if content_len > self.max_response_bytes {
                return Err(SummarizeError::TooLarge {
                    max_bytes: self.max_response_bytes,
                });
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            if bytes.len() as u64 + chunk.len() as u64 > self.max_response_bytes {
                return Err(SummarizeError::TooLarge {
                    max_bytes: self.max_response_bytes,
                });
            }
            bytes.extend_from_slice(&chunk);
        }

        interpret_response(status, content_type.as_deref(), &bytes)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> SummarizeError {
    if err.is_timeout() {
        return SummarizeError::Transport(format!("Request timed out: {err}"));
    }
    SummarizeError::Transport(err.to_string())
}
