// src/layout.rs
// =============================================================================
// Turns a page address into local file names.
//
// For https://example.com/blog/page1 saved into /out we get:
//   /out/example-com-blog-page1.html    <- the rewritten page
//   /out/example-com-blog-page1_files/  <- its images, styles and scripts
//
// Everything here is pure string/path work, no I/O.
// =============================================================================

use std::fmt;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::error::LoadError;

static NON_ALNUM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9]+").unwrap());

/// Suffix appended to the page slug to name the resources directory.
const RESOURCES_DIR_SUFFIX: &str = "_files";

/// Replaces every run of non-alphanumeric characters with a single `-`
/// and strips separators from both ends.
///
/// "example.com/blog/page1" -> "example-com-blog-page1"
/// "/assets/logo.png"       -> "assets-logo-png"
pub fn slugify(input: &str) -> String {
    NON_ALNUM_RE
        .replace_all(input, "-")
        .trim_matches('-')
        .to_string()
}

/// A validated http(s) page address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageAddress(Url);

impl PageAddress {
    /// Parses user input into a page address.
    ///
    /// Input without a scheme ("example.com/page") is treated as https.
    pub fn parse(input: &str) -> Result<Self, LoadError> {
        let trimmed = input.trim();
        let candidate = if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("https://{}", trimmed)
        };

        let invalid = |reason: String| LoadError::InvalidAddress {
            address: input.to_string(),
            reason,
        };

        let url = Url::parse(&candidate).map_err(|e| invalid(e.to_string()))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }
        if url.host_str().is_none() {
            return Err(invalid("missing host".to_string()));
        }

        Ok(PageAddress(url))
    }

    pub fn url(&self) -> &Url {
        &self.0
    }

    /// The path component, e.g. "/blog/page1".
    pub fn path(&self) -> &str {
        self.0.path()
    }

    /// Host (with port, when one is given) followed by the path.
    fn host_and_path(&self) -> String {
        let host = self.0.host_str().unwrap_or_default();
        match self.0.port() {
            Some(port) => format!("{}:{}{}", host, port, self.0.path()),
            None => format!("{}{}", host, self.0.path()),
        }
    }

    /// Resolves a (possibly relative) reference found on this page.
    pub fn resolve(&self, reference: &str) -> Result<Url, LoadError> {
        self.0
            .join(reference)
            .map_err(|e| LoadError::InvalidAddress {
                address: reference.to_string(),
                reason: e.to_string(),
            })
    }
}

impl fmt::Display for PageAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// Where a page and its resources end up on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalLayout {
    /// Full path of the saved page.
    pub html_path: PathBuf,
    /// Full path of the resources directory.
    pub resources_path: PathBuf,
    /// Resources directory relative to the page, used in rewritten links.
    pub relative_dir_path: String,
}

pub fn derive_layout(address: &PageAddress, output_dir: &Path) -> LocalLayout {
    let slug = slugify(&address.host_and_path());
    let relative_dir_path = format!("{}{}", slug, RESOURCES_DIR_SUFFIX);

    LocalLayout {
        html_path: output_dir.join(format!("{}.html", slug)),
        resources_path: output_dir.join(&relative_dir_path),
        relative_dir_path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_collapses_runs() {
        assert_eq!(slugify("example.com/blog/page1"), "example-com-blog-page1");
        assert_eq!(slugify("/assets/logo.png"), "assets-logo-png");
        assert_eq!(slugify("a--b__c"), "a-b-c");
        assert_eq!(slugify("/"), "");
    }

    #[test]
    fn test_layout_for_blog_page() {
        let address = PageAddress::parse("https://example.com/blog/page1").unwrap();
        let layout = derive_layout(&address, Path::new("/tmp/out"));

        assert_eq!(layout.html_path, PathBuf::from("/tmp/out/example-com-blog-page1.html"));
        assert_eq!(
            layout.resources_path,
            PathBuf::from("/tmp/out/example-com-blog-page1_files")
        );
        assert_eq!(layout.relative_dir_path, "example-com-blog-page1_files");
    }

    #[test]
    fn test_layout_trims_trailing_slash() {
        let address = PageAddress::parse("https://example.com/docs/").unwrap();
        let layout = derive_layout(&address, Path::new("out"));
        assert_eq!(layout.html_path, PathBuf::from("out/example-com-docs.html"));
    }

    #[test]
    fn test_layout_keeps_port() {
        let address = PageAddress::parse("http://127.0.0.1:8080/index").unwrap();
        let layout = derive_layout(&address, Path::new("out"));
        assert_eq!(layout.relative_dir_path, "127-0-0-1-8080-index_files");
    }

    #[test]
    fn test_layout_is_deterministic() {
        let address = PageAddress::parse("https://example.com/a/b?x=1").unwrap();
        let first = derive_layout(&address, Path::new("/srv"));
        let second = derive_layout(&address, Path::new("/srv"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_adds_missing_scheme() {
        let address = PageAddress::parse("example.com/page").unwrap();
        assert_eq!(address.to_string(), "https://example.com/page");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            PageAddress::parse("http://"),
            Err(LoadError::InvalidAddress { .. })
        ));
        assert!(matches!(
            PageAddress::parse("ftp://example.com/file"),
            Err(LoadError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn test_resolve_against_page() {
        let address = PageAddress::parse("https://example.com/blog/page1").unwrap();
        assert_eq!(
            address.resolve("/assets/logo.png").unwrap().as_str(),
            "https://example.com/assets/logo.png"
        );
        assert_eq!(
            address.resolve("style.css").unwrap().as_str(),
            "https://example.com/blog/style.css"
        );
    }
}
