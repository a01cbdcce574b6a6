use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use saca_review::cli::Cli;
use saca_review::review;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Diagnostics go to stderr; stdout carries only the JSON result line.
    let filter = if cli.verbose {
        EnvFilter::new("saca_review=debug")
    } else {
        EnvFilter::new("saca_review=info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let code = review::execute(cli).await?;
    std::process::exit(code);
}
