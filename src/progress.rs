// src/progress.rs
// =============================================================================
// Progress reporting for resource downloads.
//
// Download futures push events into an unbounded channel; a separate tokio
// task drains the channel and prints one line per event. The downloads never
// wait on the reporter and never look at what it does, so a slow or closed
// reporter can't change whether a run succeeds.
// =============================================================================

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// A download as shown to the user. The title is the resolved resource URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    pub title: String,
}

impl DownloadTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    Started(DownloadTask),
    Finished(DownloadTask),
    /// The task and a short description of what went wrong
    Failed(DownloadTask, String),
}

pub type ProgressSender = UnboundedSender<ProgressEvent>;

pub fn channel() -> (ProgressSender, UnboundedReceiver<ProgressEvent>) {
    mpsc::unbounded_channel()
}

/// What the reporter saw by the time the channel closed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSummary {
    pub started: usize,
    pub finished: usize,
    pub failed: usize,
}

/// Spawns the reporter task. It ends once every sender has been dropped.
pub fn spawn_reporter(mut events: UnboundedReceiver<ProgressEvent>) -> JoinHandle<ProgressSummary> {
    tokio::spawn(async move {
        let mut summary = ProgressSummary::default();

        while let Some(event) = events.recv().await {
            match event {
                ProgressEvent::Started(task) => {
                    summary.started += 1;
                    println!("  ⬇️  {}", task.title);
                }
                ProgressEvent::Finished(task) => {
                    summary.finished += 1;
                    println!("  ✅ {}", task.title);
                }
                ProgressEvent::Failed(task, reason) => {
                    summary.failed += 1;
                    println!("  ❌ {} ({})", task.title, reason);
                }
            }
        }

        summary
    })
}
