use std::path::Path;

/// System prompt sent with every review request. The response contract
/// (`report_markdown` / `revised_code`) is embedded here; the runner parses
/// the model output against exactly this shape.
pub const REPORT_PROMPT: &str = r#"You are a meticulous senior code reviewer.
Task: return a concise Markdown review and an optional complete revised file.
Output MUST be valid JSON with keys:
 - report_markdown: string (always present)
 - revised_code: string or null (full file content if you propose edits)

Guidelines:
1) Summary - one paragraph.
2) Issues - bullet list with severity (High/Med/Low).
3) Suggested Improvements - bullets with code pointers.
If you propose substantial changes, include 'revised_code' as the entire corrected file.
Preserve language and style. Do not invent APIs. If no change is needed, set revised_code to null.
"#;

/// Fixed report returned in mock mode.
pub const MOCK_REPORT: &str =
    "### MOCK Review\n- This is a mock review, no API call.\n- Demonstrates logging + diff flow.";

/// Line prepended to the original file contents as the mock revision.
pub const MOCK_REVISION_MARKER: &str = "// MOCK REVISION ADDED BY saca-review\n";

/// Build the user message: the filename plus the file contents fenced as a
/// code block tagged with the file's extension (sans leading dot).
pub fn build_user_message(path: &Path, code: &str) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    let lang = path
        .extension()
        .map(|e| e.to_string_lossy())
        .unwrap_or_default();
    format!("Filename: {name}\n\n```{lang}\n{code}\n```")
}
