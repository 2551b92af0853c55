//! tetsuocode: launches the AI coding assistant web app for a workspace.
//!
//! Resolves the workspace, merges credentials from the command line, the
//! environment and `.tetsuorc`, then serves the app and opens a browser.

use std::process::ExitCode;
use tetsuocode::{cli::Cli, launcher};
use tracing::Level;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let args: Cli = argh::from_env();
    match launcher::run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
