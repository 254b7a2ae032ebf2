use std::fmt;

use serde::Deserialize;

pub type TurnId = u64;

/// Status value the agent service uses for a good answer.
pub const SUCCESS_STATUS: &str = "success";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentStatus {
    Success,
    /// Any status other than `success`, verbatim.
    Failure(String),
}

/// Decoded reply of the agent service. Consumed once by the turn pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentResponse {
    pub status: AgentStatus,
    pub raw_text: String,
}

impl AgentResponse {
    /// Response text for a successful answer; any other status becomes an error.
    pub fn into_text(self) -> Result<String, GatewayError> {
        match self.status {
            AgentStatus::Success => Ok(self.raw_text),
            AgentStatus::Failure(status) => Err(GatewayError::new(
                FailureKind::AgentStatus(status),
                "Agent responded with error status",
            )),
        }
    }
}

/// Wire shape of `POST /agent/query` replies.
#[derive(Debug, Deserialize)]
pub(crate) struct QueryReply {
    status: String,
    #[serde(default)]
    response: Option<String>,
}

impl From<QueryReply> for AgentResponse {
    fn from(reply: QueryReply) -> Self {
        let status = if reply.status == SUCCESS_STATUS {
            AgentStatus::Success
        } else {
            AgentStatus::Failure(reply.status)
        };
        Self {
            status,
            raw_text: reply.response.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    TurnCompleted {
        turn_id: TurnId,
        result: Result<String, GatewayError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} ({message})")]
pub struct GatewayError {
    pub kind: FailureKind,
    pub message: String,
}

impl GatewayError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    MalformedBody,
    AgentStatus(String),
    EngineUnavailable,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::HttpStatus(code) => write!(f, "HTTP error, status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::MalformedBody => write!(f, "malformed response body"),
            FailureKind::AgentStatus(status) => write!(f, "agent status {status:?}"),
            FailureKind::EngineUnavailable => write!(f, "engine unavailable"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
