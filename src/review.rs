use std::env;
use std::path::Path;

use tracing::{debug, error, info};

use crate::cli::Cli;
use crate::error::ReviewError;
use crate::openai::{OpenAiClient, DEFAULT_BASE_URL};
use crate::prompt::{self, MOCK_REPORT, MOCK_REVISION_MARKER};
use crate::result::ReviewResult;

/// Exit status for any operational failure (missing file, credential,
/// capability, remote error). Success is 0 even when the review itself
/// reports problems in the target file.
pub const EXIT_FAILURE: i32 = 2;

/// Run the whole pipeline once and return the process exit code. Exactly
/// one JSON line lands on stdout on every path, success or failure.
pub async fn execute(args: Cli) -> anyhow::Result<i32> {
    info!("Starting saca-review");
    info!("Model: {}", args.model);
    info!("Target file: {}", args.file.display());

    let api_key = env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty());
    let mock_mode = env::var("SACA_MOCK").is_ok_and(|v| v == "1");
    info!("OPENAI_API_KEY set? {}", api_key.is_some());
    info!("SACA_MOCK mode? {mock_mode}");

    let (result, code) = match run(&args, api_key, mock_mode).await {
        Ok(result) => (result, 0),
        Err(e) => {
            error!("{e}");
            (ReviewResult::error(e.to_string()), EXIT_FAILURE)
        }
    };

    println!("{}", result.to_json_line()?);
    Ok(code)
}

async fn run(
    args: &Cli,
    api_key: Option<String>,
    mock_mode: bool,
) -> Result<ReviewResult, ReviewError> {
    // Existence check comes first: a missing file fails even in mock mode.
    if !args.file.exists() {
        return Err(ReviewError::FileNotFound(args.file.clone()));
    }

    let code = read_lossy(&args.file)?;
    info!("Read {} chars from {}", code.chars().count(), args.file.display());

    if mock_mode {
        info!("Returning mock review + revision (no API call).");
        return Ok(mock_result(&code));
    }

    let api_key = api_key.ok_or(ReviewError::MissingApiKey)?;

    let base_url =
        env::var("SACA_OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let client = OpenAiClient::new(api_key, base_url).map_err(ReviewError::ClientUnavailable)?;

    let user_message = prompt::build_user_message(&args.file, &code);
    info!("Sending request to OpenAI...");
    let raw = client.complete(&args.model, &user_message).await?;
    info!("Received response from OpenAI.");
    debug!("Raw model output: {raw}");

    let result = ReviewResult::from_model_output(&raw)?;
    info!(
        "Parsed JSON: report length={}, revised_code? {}",
        result.report_markdown.len(),
        result.revised_code.is_some()
    );
    Ok(result)
}

/// Read the file as text, substituting replacement characters for invalid
/// UTF-8 rather than failing.
fn read_lossy(path: &Path) -> Result<String, ReviewError> {
    let bytes = std::fs::read(path).map_err(ReviewError::ReadFile)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Deterministic stand-in for the remote call, keyed off `SACA_MOCK=1`.
fn mock_result(code: &str) -> ReviewResult {
    ReviewResult {
        report_markdown: MOCK_REPORT.to_string(),
        revised_code: Some(format!("{MOCK_REVISION_MARKER}{code}")),
    }
}
