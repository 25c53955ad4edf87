// src/download.rs
// =============================================================================
// Downloads every collected resource and writes it into the resources
// directory.
//
// All downloads start at once (no concurrency cap, no retries). The whole
// batch fails as soon as one download or write fails. The resources directory
// must already exist; the loader creates it before calling save_all.
// =============================================================================

use std::path::Path;

use futures::future::try_join_all;
use reqwest::Client;
use tracing::debug;

use crate::error::LoadError;
use crate::fetch::fetch_bytes;
use crate::layout::PageAddress;
use crate::progress::{DownloadTask, ProgressEvent, ProgressSender};
use crate::rewrite::ResourceLink;

/// Fetches each resource relative to `page` and saves it as
/// `resources_path/<local_path>`.
pub async fn save_all(
    client: &Client,
    resources: Vec<ResourceLink>,
    page: &PageAddress,
    resources_path: &Path,
    progress: Option<&ProgressSender>,
) -> Result<(), LoadError> {
    let downloads = resources
        .iter()
        .map(|link| save_resource(client, link, page, resources_path, progress));

    try_join_all(downloads).await?;
    Ok(())
}

async fn save_resource(
    client: &Client,
    link: &ResourceLink,
    page: &PageAddress,
    resources_path: &Path,
    progress: Option<&ProgressSender>,
) -> Result<(), LoadError> {
    let url = page.resolve(&link.remote_path)?;
    let task = DownloadTask::new(url.as_str());
    report(progress, ProgressEvent::Started(task.clone()));

    let target = resources_path.join(&link.local_path);
    let result = download_to(client, url.as_str(), &target).await;

    match &result {
        Ok(()) => {
            debug!(
                target: "page_loader::fs",
                "resource {} saved at {}", link.remote_path, target.display()
            );
            report(progress, ProgressEvent::Finished(task));
        }
        Err(e) => report(progress, ProgressEvent::Failed(task, e.to_string())),
    }

    result
}

async fn download_to(client: &Client, url: &str, target: &Path) -> Result<(), LoadError> {
    let body = fetch_bytes(client, url).await?;
    tokio::fs::write(target, body)
        .await
        .map_err(|e| LoadError::filesystem(target, e))
}

// A closed reporter is not our problem
fn report(progress: Option<&ProgressSender>, event: ProgressEvent) {
    if let Some(sender) = progress {
        let _ = sender.send(event);
    }
}
