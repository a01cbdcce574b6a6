use crate::error::CompletionError;
use serde::{Deserialize, Serialize};

/// The sole machine-readable artifact of a run, printed as one JSON line on
/// stdout. `revised_code: null` means "no revision proposed" and callers
/// depend on that distinction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewResult {
    pub report_markdown: String,
    pub revised_code: Option<String>,
}

impl ReviewResult {
    /// Uniform failure shape: the message as the report, no revision.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            report_markdown: message.into(),
            revised_code: None,
        }
    }

    /// Parse the model's output into a result.
    ///
    /// `report_markdown` defaults to the empty string when absent. A missing,
    /// null, non-string, or empty `revised_code` collapses to `None`.
    pub fn from_model_output(raw: &str) -> Result<Self, CompletionError> {
        let json = extract_json(raw).ok_or_else(|| {
            let cause = serde_json::from_str::<serde_json::Value>(raw.trim())
                .err()
                .map(|e| e.to_string())
                .unwrap_or_else(|| "expected a JSON object".to_string());
            CompletionError::MalformedBody(cause)
        })?;

        let value: serde_json::Value =
            serde_json::from_str(&json).map_err(|e| CompletionError::MalformedBody(e.to_string()))?;

        let report_markdown = value
            .get("report_markdown")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        let revised_code = value
            .get("revised_code")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(Self {
            report_markdown,
            revised_code,
        })
    }

    /// The one-line stdout representation.
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Extract a JSON object from model output that might not be bare JSON
/// despite the json_object response format (fenced in markdown, or padded
/// with prose). Anything the strict parser accepts passes through unchanged.
fn extract_json(s: &str) -> Option<String> {
    // First try: the whole string is valid JSON
    if s.trim().starts_with('{') && serde_json::from_str::<serde_json::Value>(s.trim()).is_ok() {
        return Some(s.trim().to_string());
    }

    // Second try: extract from markdown code block
    let re = regex::Regex::new(r"```(?:json)?\s*\n?([\s\S]*?)\n?```").ok()?;
    for cap in re.captures_iter(s) {
        let potential_json = cap.get(1)?.as_str().trim();
        if serde_json::from_str::<serde_json::Value>(potential_json).is_ok() {
            return Some(potential_json.to_string());
        }
    }

    // Third try: find JSON object pattern
    let brace_start = s.find('{')?;
    let mut depth = 0;
    let mut end = brace_start;

    for (i, c) in s[brace_start..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    end = brace_start + i + 1;
                    break;
                }
            }
            _ => {}
        }
    }

    if depth == 0 && end > brace_start {
        let potential_json = &s[brace_start..end];
        if serde_json::from_str::<serde_json::Value>(potential_json).is_ok() {
            return Some(potential_json.to_string());
        }
    }

    None
}
