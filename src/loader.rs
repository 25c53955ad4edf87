// src/loader.rs
// =============================================================================
// Runs one page load from start to finish:
//
//   parse address -> fetch page -> rewrite links -> create resources dir -> write page
//                 -> download resources -> done
//
// Stages run strictly one after another; only the resource downloads run
// concurrently. The first failure stops the run and is reported together
// with the stage it happened in. Files already written stay on disk.
// =============================================================================

use std::path::{Path, PathBuf};

use reqwest::Client;
use tracing::{debug, info};

use crate::download::save_all;
use crate::error::{LoadError, PageLoaderError, Stage};
use crate::fetch::fetch_text;
use crate::layout::{derive_layout, PageAddress};
use crate::progress::ProgressSender;
use crate::rewrite::extract_and_rewrite;

/// Saves pages into one output directory.
#[derive(Debug, Clone)]
pub struct PageLoader {
    client: Client,
    output_dir: PathBuf,
    progress: Option<ProgressSender>,
}

impl PageLoader {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self::with_client(Client::new(), output_dir)
    }

    pub fn with_client(client: Client, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            output_dir: output_dir.into(),
            progress: None,
        }
    }

    /// Sends a progress event for every resource download.
    pub fn with_progress(mut self, progress: ProgressSender) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Loads the page at `address` and returns the path of the saved HTML file.
    pub async fn load(&self, address: &str) -> Result<PathBuf, PageLoaderError> {
        let page = PageAddress::parse(address)
            .map_err(|e| PageLoaderError::new(Stage::ParseAddress, e))?;
        let layout = derive_layout(&page, &self.output_dir);

        let mut stage = Stage::FetchPage;
        let fail = |stage: Stage| move |e: LoadError| PageLoaderError::new(stage, e);

        debug!(stage = %stage, "loading {}", page);
        let markup = fetch_text(&self.client, page.url().as_str())
            .await
            .map_err(fail(stage))?;

        stage = Stage::ExtractAndRewrite;
        debug!(stage = %stage, "rewriting links of {}", page);
        let (document, resources) =
            extract_and_rewrite(&markup, &page, &layout.relative_dir_path);

        stage = Stage::CreateResourcesDir;
        create_resources_dir(&layout.resources_path)
            .await
            .map_err(fail(stage))?;

        stage = Stage::WritePage;
        write_page(&layout.html_path, document.into_string())
            .await
            .map_err(fail(stage))?;

        stage = Stage::DownloadAndSaveResources;
        debug!(stage = %stage, "downloading {} resource(s)", resources.len());
        save_all(
            &self.client,
            resources,
            &page,
            &layout.resources_path,
            self.progress.as_ref(),
        )
        .await
        .map_err(fail(stage))?;
        debug!(target: "page_loader::fs", "resources saved to {}", layout.resources_path.display());

        stage = Stage::Done;
        info!(stage = %stage, "saved {} to {}", page, layout.html_path.display());
        Ok(layout.html_path)
    }
}

/// Loads one page into `output_dir` with a default client and no progress output.
pub async fn load_page(address: &str, output_dir: &Path) -> Result<PathBuf, PageLoaderError> {
    PageLoader::new(output_dir).load(address).await
}

// Not create_dir_all: an existing directory is an error
async fn create_resources_dir(path: &Path) -> Result<(), LoadError> {
    tokio::fs::create_dir(path)
        .await
        .map_err(|e| LoadError::filesystem(path, e))?;
    debug!(target: "page_loader::fs", "resources directory created at {}", path.display());
    Ok(())
}

async fn write_page(path: &Path, html: String) -> Result<(), LoadError> {
    tokio::fs::write(path, html)
        .await
        .map_err(|e| LoadError::filesystem(path, e))?;
    debug!(target: "page_loader::fs", "html page saved at {}", path.display());
    Ok(())
}
