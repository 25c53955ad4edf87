// src/error.rs
// =============================================================================
// Error types for the page loader.
//
// Two layers:
// - LoadError: what went wrong (bad address, network, HTTP status, disk)
// - PageLoaderError: LoadError plus the stage of the run it happened in.
//   This is the one error type callers of the library ever see.
// =============================================================================

use std::fmt;
use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// The stages of a page load, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ParseAddress,
    FetchPage,
    ExtractAndRewrite,
    CreateResourcesDir,
    WritePage,
    DownloadAndSaveResources,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Stage::ParseAddress => "parse address",
            Stage::FetchPage => "fetch page",
            Stage::ExtractAndRewrite => "rewrite page links",
            Stage::CreateResourcesDir => "create resources directory",
            Stage::WritePage => "write page",
            Stage::DownloadAndSaveResources => "download resources",
            Stage::Done => "finish",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("request to {url} failed")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with HTTP {status}")]
    HttpStatus { url: String, status: StatusCode },

    #[error("filesystem error at {}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    pub(crate) fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::Filesystem {
            path: path.into(),
            source,
        }
    }
}

/// The single error type surfaced by [`crate::PageLoader`].
#[derive(Debug, Error)]
#[error("failed to {stage}")]
pub struct PageLoaderError {
    pub stage: Stage,
    #[source]
    pub source: LoadError,
}

impl PageLoaderError {
    pub fn new(stage: Stage, source: LoadError) -> Self {
        Self { stage, source }
    }

    /// The underlying failure, for matching on the error category.
    pub fn kind(&self) -> &LoadError {
        &self.source
    }
}
