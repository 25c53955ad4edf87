// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
//   page-loader https://example.com/blog/page1 --output ./saved
//
// We use clap's "derive" API: the CLI is a plain struct and the #[...]
// attributes describe how each field is parsed.
//
// Rust concepts:
// - Structs: the parsed arguments live in one struct
// - Option<T>: the output directory may or may not be given
// - Derive macros: clap generates the parsing code for us
// =============================================================================

use std::path::PathBuf;

use clap::Parser;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to generate the parsing code.
// disable_version_flag turns off clap's built-in -V so we can use -v instead.
#[derive(Parser, Debug)]
#[command(
    name = "page-loader",
    version,
    disable_version_flag = true,
    about = "Downloads a page to your local machine with provided path",
    long_about = "page-loader saves a web page together with its images, stylesheets and scripts. \
                  References in the saved page are rewritten to point at the local copies."
)]
pub struct Cli {
    /// Address of the page to download (e.g., https://example.com/blog)
    ///
    /// This is a positional argument (required, no flag needed)
    pub address: String,

    /// Output directory (default: current directory)
    ///
    /// -o / --output; when missing we save into the directory we were run from
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print version
    ///
    /// ArgAction::Version prints the version and exits, so the value is never read
    #[allow(dead_code)]
    #[arg(short = 'v', long, action = clap::ArgAction::Version)]
    version: Option<bool>,
}

impl Cli {
    // Returns the directory to save into
    //
    // Returns: the --output path if given, otherwise the current directory
    // (which can fail, e.g. if the directory was deleted under us)
    pub fn output_dir(&self) -> std::io::Result<PathBuf> {
        match &self.output {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir(),
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why PathBuf instead of String for --output?
//    - PathBuf is the owned path type; it handles OS-specific separators
//    - clap knows how to parse it directly from the argument
//
// 2. Why a custom version flag?
//    - clap's default is -V; the -v short flag needs the built-in one disabled
//    - `version` in #[command(...)] still pulls the version from Cargo.toml
//
// 3. What does try_parse_from do (see tests)?
//    - Same as parse(), but takes the arguments explicitly and returns a
//      Result instead of exiting, which makes it testable
// -----------------------------------------------------------------------------
