//! SurfSensei - AI surf session advisor.
//!
//! Takes a planned session (spots, swell, wind, tide, surfer profile),
//! asks Gemini for a spot, board and strategy recommendation, and learns
//! from the user's corrections over time.
//!
//! Architecture:
//! - `shell` composes prompt assembly, the model client, response parsing
//!   and the feedback store behind the user actions
//! - The CLI runs those actions directly; `serve` exposes them to a local
//!   single-page form over HTTP
//! - Feedback history lives in a JSON file under `~/.surfsensei`

mod autofill;
mod cli;
mod config;
mod error;
mod gemini;
mod models;
mod parser;
mod prompt;
mod server;
mod shell;
mod store;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{execute, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    execute(cli).await
}
