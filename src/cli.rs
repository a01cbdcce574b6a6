use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Parser, Clone)]
#[command(name = "saca-review")]
#[command(
    author,
    version,
    about = "Review one source file with an OpenAI-style model and print the result as JSON"
)]
pub struct Cli {
    /// Path to the source file to review
    pub file: PathBuf,

    /// Remote model identifier
    #[arg(long, env = "SACA_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Force JSON output (kept for the editor integration; output is always JSON)
    #[arg(long)]
    pub json: bool,

    /// Enable verbose/debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
