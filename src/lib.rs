//! Review runner invoked by the SACA editor integration: reads one source
//! file, obtains a Markdown review (and optionally a full revised file) from
//! an OpenAI-style chat-completion endpoint, and prints a single JSON line
//! on stdout. All diagnostics go to stderr.

pub mod cli;
pub mod error;
pub mod openai;
pub mod prompt;
pub mod result;
pub mod review;
