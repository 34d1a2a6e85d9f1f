//! release_collector - publishes a .NET project for several runtimes.
//!
//! Runs `dotnet publish` per runtime identifier and build mode and collects
//! the artifacts into `bin/<version>/`.

use release_collector::cli;
use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            cli::EXIT_FATAL
        }
    };

    process::exit(exit_code);
}
