use std::time::Duration;

use futures_util::StreamExt;
use genie_logging::genie_debug;
use serde::Serialize;

use crate::types::QueryReply;
use crate::{AgentResponse, FailureKind, GatewayError};

#[derive(Debug, Clone)]
pub struct GatewaySettings {
    /// Path appended to the configured endpoint.
    pub query_path: String,
    pub connect_timeout: Duration,
    /// Whole-request timeout. Generation is slow, so this is generous.
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            query_path: "/agent/query".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Boundary to the remote agent: one prompt in, one response out.
#[async_trait::async_trait]
pub trait AgentGateway: Send + Sync {
    async fn send(&self, endpoint: &str, prompt: &str) -> Result<AgentResponse, GatewayError>;
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    prompt: &'a str,
}

#[derive(Debug, Clone)]
pub struct ReqwestGateway {
    settings: GatewaySettings,
    client: reqwest::Client,
}

impl ReqwestGateway {
    pub fn new(settings: GatewaySettings) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| GatewayError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &GatewaySettings {
        &self.settings
    }

    fn query_url(&self, endpoint: &str) -> Result<reqwest::Url, GatewayError> {
        let url = format!(
            "{}/{}",
            endpoint.trim().trim_end_matches('/'),
            self.settings.query_path.trim_start_matches('/')
        );
        reqwest::Url::parse(&url)
            .map_err(|err| GatewayError::new(FailureKind::InvalidEndpoint, err.to_string()))
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, GatewayError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, Some(content_len)));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, Some(next_len)));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl AgentGateway for ReqwestGateway {
    async fn send(&self, endpoint: &str, prompt: &str) -> Result<AgentResponse, GatewayError> {
        let url = self.query_url(endpoint)?;
        genie_debug!("POST {} prompt_len={}", url, prompt.len());

        let response = self
            .client
            .post(url)
            .json(&QueryRequest { prompt })
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.canonical_reason().unwrap_or("unknown status"),
            ));
        }

        let body = self.read_body(response).await?;
        let reply: QueryReply = serde_json::from_slice(&body)
            .map_err(|err| GatewayError::new(FailureKind::MalformedBody, err.to_string()))?;
        Ok(reply.into())
    }
}

fn too_large(max_bytes: u64, actual: Option<u64>) -> GatewayError {
    GatewayError::new(
        FailureKind::TooLarge { max_bytes, actual },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        return GatewayError::new(FailureKind::Timeout, err.to_string());
    }
    GatewayError::new(FailureKind::Network, err.to_string())
}
