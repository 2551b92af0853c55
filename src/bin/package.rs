//! Builds the standalone tetsuocode executable.

use std::process::ExitCode;
use tetsuocode::package::Bundle;
use tracing::Level;

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let bundle = Bundle::from_source_tree();
    match bundle.run() {
        Ok(executable) => {
            tracing::info!("Packaged {}", executable.display());
            println!(
                "\nBuild complete! Executable is in {}",
                bundle.dist_dir().display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
