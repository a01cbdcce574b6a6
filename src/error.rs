use std::path::PathBuf;
use thiserror::Error;

/// Pipeline failures. Every variant maps to exit status 2, and the
/// `Display` string is emitted verbatim as the `report_markdown` of the
/// error result, so the editor shows it to the user unchanged.
#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("ERROR: file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("ERROR: failed reading file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("ERROR: OPENAI_API_KEY not set and not in mock mode.")]
    MissingApiKey,

    #[error("ERROR: HTTP client unavailable: {0}. Reinstall saca-review with its default rustls backend.")]
    ClientUnavailable(#[source] reqwest::Error),

    #[error("ERROR during OpenAI call: {0}")]
    Completion(#[from] CompletionError),
}

#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("OpenAI API returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("response contained no choices")]
    EmptyChoices,

    #[error("model output was not the expected JSON object: {0}")]
    MalformedBody(String),
}
