//! Digest engine: request dispatch, response interpretation and background execution.
mod client;
mod engine;
mod interpret;
mod types;

pub use client::{ClientSettings, ReqwestSummarizer, Summarizer, SUMMARIZE_PATH};
pub use engine::EngineHandle;
pub use interpret::{
    interpret_response, is_json_content_type, ERROR_EXCERPT_CHARS, STRUCTURED_ERROR_FALLBACK,
};
pub use types::{
    EngineError, EngineEvent, FailureKind, RequestId, SummarizeError, GENERIC_ERROR_MESSAGE,
};
