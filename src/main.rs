// src/main.rs
// =============================================================================
// This is the entry point of the page-loader CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (RUST_LOG=page_loader=debug shows every request and write)
// 3. Load the page, printing download progress as it goes
// 4. Print the saved page path (exit 0) or the error (exit 1)
//
// Rust concepts used:
// - async/await: the page and its resources are fetched over the network
// - Result<T, E> with anyhow: any error bubbles up to main with `?`
// - Channels: download progress is sent to a separate printing task
// =============================================================================

// Module declarations - the CLI definition lives next to main
mod cli;           // src/cli.rs - command-line parsing

use anyhow::{Context, Result};
use clap::Parser;  // Parser trait enables the parse() method
use std::path::PathBuf;

use cli::Cli;
use page_loader::progress;  // progress events + the reporter task
use page_loader::PageLoader;

// The #[tokio::main] attribute transforms our async main into a real main function
// It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    init_logging();

    // Run the loader and turn the outcome into an exit code
    let exit_code = match run().await {
        Ok(html_path) => {
            println!("Page was successfully downloaded into {}", html_path.display());
            0
        }
        Err(e) => {
            // {:#} prints the whole cause chain on one line
            eprintln!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

// The main application logic
//
// Returns:
//   Ok(path) = the page was saved at `path`
//   Err      = any failure (bad address, network, HTTP status, disk)
async fn run() -> Result<PathBuf> {
    // Parse command-line arguments into our Cli struct
    // This also handles --help and -v/--version
    let cli = Cli::parse();
    let output_dir = cli
        .output_dir()
        .context("could not determine the current directory")?;

    // Progress lines are printed by their own task so downloads never wait on stdout
    let (tx, rx) = progress::channel();
    let reporter = progress::spawn_reporter(rx);

    let result = PageLoader::new(output_dir)
        .with_progress(tx)
        .load(&cli.address)
        .await;

    // The loader dropped its sender, so this returns once output is flushed.
    // A crashed reporter only loses progress lines; the load result stands.
    if let Err(e) = reporter.await {
        tracing::warn!("progress reporter stopped unexpectedly: {}", e);
    }

    Ok(result?)
}

// Sets up tracing output on stderr
//
// RUST_LOG controls the filter; without it only warnings are shown.
// Example: RUST_LOG=page_loader::http=debug shows every GET
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is cli a module of main and not of the library?
//    - Argument parsing is only needed by the binary
//    - The library (src/lib.rs) can be used from tests or other programs
//      without dragging clap's types along
//
// 2. What does Ok(result?) do?
//    - `?` converts PageLoaderError into anyhow::Error and returns early on failure
//    - On success we wrap the path back in Ok
//
// 3. Why await the reporter after the load?
//    - Progress lines are printed on another task
//    - Waiting for it makes sure every line is out before the final message
//
// 4. Why std::process::exit?
//    - main() itself returns (), so the exit code has to be set explicitly
// -----------------------------------------------------------------------------
