use std::fmt;

pub type RequestId = u64;

/// Shown when a failure carries no usable message of its own.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    SummaryCompleted {
        request_id: RequestId,
        result: Result<String, SummarizeError>,
    },
}

/// Why a summarize request did not produce a summary.
///
/// `Display` yields the text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SummarizeError {
    /// Non-2xx with a JSON body; `message` is the `detail` field or a fallback.
    #[error("{message}")]
    Backend { status: u16, message: String },
    /// Non-2xx with any other body; `excerpt` is its first 200 characters.
    #[error("Server Error ({status}): {excerpt}")]
    ServerError { status: u16, excerpt: String },
    /// The request never completed.
    #[error("{0}")]
    Transport(String),
    /// A 2xx body that is not `{"summary": "..."}`.
    #[error("Invalid response from server: {0}")]
    MalformedResponse(String),
    #[error("Response too large (limit {max_bytes} bytes)")]
    TooLarge { max_bytes: u64 },
}

impl SummarizeError {
    /// Display text. Only a transport failure without a message gets the
    /// generic fallback; backend text is passed through untouched.
    pub fn user_message(&self) -> String {
        match self {
            SummarizeError::Transport(message) if message.trim().is_empty() => {
                GENERIC_ERROR_MESSAGE.to_string()
            }
            _ => self.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            SummarizeError::Backend { status, .. } | SummarizeError::ServerError { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            SummarizeError::Backend { .. } => FailureKind::Structured,
            SummarizeError::ServerError { .. } => FailureKind::Unstructured,
            SummarizeError::Transport(_) | SummarizeError::TooLarge { .. } => FailureKind::Transport,
            SummarizeError::MalformedResponse(_) => FailureKind::Parse,
        }
    }
}

/// Coarse failure class, used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Structured,
    Unstructured,
    Transport,
    Parse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Structured => write!(f, "structured backend error"),
            FailureKind::Unstructured => write!(f, "unstructured backend error"),
            FailureKind::Transport => write!(f, "transport error"),
            FailureKind::Parse => write!(f, "parse error"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid server address {url}: {reason}")]
    InvalidEndpoint { url: String, reason: String },
    #[error("failed to build http client: {0}")]
    Client(String),
    #[error("failed to start engine: {0}")]
    Runtime(#[from] std::io::Error),
}
