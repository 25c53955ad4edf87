// src/rewrite.rs
// =============================================================================
// Finds the resources a page needs and points them at local copies.
//
// We use the `scraper` crate to parse the page into a tree, then walk three
// kinds of references:
//   <img src="...">  <link href="...">  <script src="...">
//
// For each one that lives on the same site we:
// 1. Work out a local file name (slug of the reference)
// 2. Rewrite the attribute in the tree to "<slug>_files/<local name>"
// 3. Remember (remote path, local name) so the downloader can fetch it
//
// Nothing here touches the network or the disk.
//
// Rust concepts:
// - Enums with methods: ResourceTag knows its element and attribute names
// - Borrowing: we collect matches first, then mutate the tree
// - Iterators: filter_map + collect to pick out the references we want
// =============================================================================

use scraper::node::{Element, Node};
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use crate::layout::{slugify, PageAddress};

/// The kinds of elements whose references get downloaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceTag {
    Image,
    Stylesheet,
    Script,
}

impl ResourceTag {
    /// Scan order. Resource links come out grouped in this order.
    pub const ALL: [ResourceTag; 3] = [
        ResourceTag::Image,
        ResourceTag::Stylesheet,
        ResourceTag::Script,
    ];

    pub fn element(self) -> &'static str {
        match self {
            ResourceTag::Image => "img",
            ResourceTag::Stylesheet => "link",
            ResourceTag::Script => "script",
        }
    }

    /// The attribute holding the reference.
    pub fn attribute(self) -> &'static str {
        match self {
            ResourceTag::Image | ResourceTag::Script => "src",
            ResourceTag::Stylesheet => "href",
        }
    }

    // e.g. "img[src]". Built from constants, so parsing can't fail
    fn selector(self) -> Selector {
        let css = format!("{}[{}]", self.element(), self.attribute());
        Selector::parse(&css).unwrap()
    }
}

/// One reference that still has to be downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLink {
    pub tag: ResourceTag,
    /// The attribute value as it appeared in the page.
    pub remote_path: String,
    /// File name inside the resources directory.
    pub local_path: String,
}

/// The page markup after rewriting, ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenDocument(String);

impl RewrittenDocument {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Rewrites resource references in `markup` and returns the new markup
/// together with the resources to fetch.
///
/// Links come out grouped by tag (images, stylesheets, scripts) and in
/// document order within each group.
//
// Parameters:
//   markup: the page HTML as fetched
//   page: the page address (for spotting self-references)
//   relative_dir_path: resources directory name, e.g. "example-com-blog_files"
//
// Returns: (rewritten HTML, resources still to download)
//
// Example:
//   markup = "<img src='/assets/logo.png'>"
//   page = "https://example.com/blog/page1"
//   result = img src "example-com-blog-page1_files/assets-logo-png",
//            links = [{ Image, "/assets/logo.png", "assets-logo-png" }]
pub fn extract_and_rewrite(
    markup: &str,
    page: &PageAddress,
    relative_dir_path: &str,
) -> (RewrittenDocument, Vec<ResourceLink>) {
    let mut document = Html::parse_document(markup);
    debug!(target: "page_loader::dom", "loaded {} as DOM", page);

    let mut links = Vec::new();

    for tag in ResourceTag::ALL {
        let attribute = tag.attribute();
        let selector = tag.selector();

        // Collect first: the tree can't be mutated while select() borrows it
        let matches: Vec<_> = document
            .select(&selector)
            .filter_map(|element| {
                let value = element.value().attr(attribute)?;
                is_downloadable(value).then(|| (element.id(), value.to_string()))
            })
            .collect();

        for (id, remote_path) in matches {
            let new_value = if is_self_reference(page, &remote_path) {
                debug!(target: "page_loader::dom", "replace {} with {}", attribute, page);
                page.url().to_string()
            } else {
                let local_path = slugify(&remote_path);
                let rewritten = format!("{}/{}", relative_dir_path, local_path);
                debug!(
                    target: "page_loader::dom",
                    "replace URI path {} with local path {}", remote_path, rewritten
                );
                links.push(ResourceLink {
                    tag,
                    remote_path,
                    local_path,
                });
                rewritten
            };

            if let Some(mut node) = document.tree.get_mut(id) {
                if let Node::Element(element) = node.value() {
                    set_attribute(element, attribute, &new_value);
                }
            }
        }
    }

    (RewrittenDocument(document.html()), links)
}

// Same-site references only. We skip:
// - anything starting with "http" (absolute links to this or another site)
// - fragments ("#top")
// - protocol-relative links ("//cdn.example.com/app.js")
// - other schemes (data:, blob:, ...) which can't be fetched with a GET
fn is_downloadable(value: &str) -> bool {
    !(value.is_empty()
        || value.starts_with("http")
        || value.starts_with('#')
        || value.starts_with("//")
        || Url::parse(value).is_ok())
}

// Does this reference point back at the page itself?
//
// Compares the raw value first, then the resolved path, since Url::path()
// is percent-encoded and pages often link to themselves unencoded
// ("/блог" vs "/%D0%B1%D0%BB%D0%BE%D0%B3").
//
// Example (page = https://example.com/blog/page1):
//   "/blog/page1"     -> true
//   "/blog/page1?v=2" -> false (different query, different document)
//   "/blog/other"     -> false
fn is_self_reference(page: &PageAddress, value: &str) -> bool {
    if value == page.path() {
        return true;
    }
    match page.resolve(value) {
        Ok(resolved) => {
            resolved.path() == page.path()
                && resolved.query() == page.url().query()
                && resolved.fragment().is_none()
        }
        Err(_) => false,
    }
}

// Overwrites one attribute value on an element in the parse tree
fn set_attribute(element: &mut Element, attribute: &str, new_value: &str) {
    for (name, value) in element.attrs.iter_mut() {
        if &*name.local == attribute {
            *value = new_value.into();
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why collect the matches before rewriting?
//    - document.select() borrows the document immutably
//    - Changing an attribute needs a mutable borrow
//    - Rust won't allow both at once, so we first copy out (node id, value)
//      pairs and then mutate each node by id
//
// 2. What is document.tree?
//    - scraper keeps the parsed page in an ego_tree::Tree
//    - tree.get_mut(id) gives us a mutable handle to one node
//
// 3. Why does a reference show up twice in the links?
//    - Each element is its own occurrence; two <img> tags with the same src
//      produce two links with the same local file (the second write wins)
// -----------------------------------------------------------------------------
