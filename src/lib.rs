// src/lib.rs
// =============================================================================
// page_loader: save a web page for offline viewing.
//
// The page is fetched, its <img>, <link> and <script> references are pointed
// at local copies, and those copies are downloaded next to the saved page.
//
// Modules, in the order a load uses them:
// - layout: slugs and on-disk names derived from the page address
// - fetch: HTTP GETs
// - rewrite: finds resources in the page and rewrites their references
// - download: fetches and writes every resource concurrently
// - progress: download progress events and the task that prints them
// - loader: runs the whole thing stage by stage
// - error: error types
// =============================================================================

pub mod download;
pub mod error;
pub mod fetch;
pub mod layout;
pub mod loader;
pub mod progress;
pub mod rewrite;

pub use error::{LoadError, PageLoaderError, Stage};
pub use layout::{derive_layout, slugify, LocalLayout, PageAddress};
pub use loader::{load_page, PageLoader};
pub use rewrite::{extract_and_rewrite, ResourceLink, ResourceTag, RewrittenDocument};
