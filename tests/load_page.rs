// tests/load_page.rs
// End-to-end: save a page from a local HTTP server through the public API.

use page_loader::{derive_layout, load_page, LoadError, PageAddress, Stage};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn serve_bytes(server: &MockServer, at: &str, status: u16, body: &[u8]) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(status).set_body_bytes(body.to_vec()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn saves_page_and_logo() {
    let server = MockServer::start().await;
    let logo = [0x89u8, b'P', b'N', b'G', 0, 1, 2, 3];
    serve_bytes(
        &server,
        "/blog/page1",
        200,
        br#"<html><body><img src="/assets/logo.png"></body></html>"#,
    )
    .await;
    serve_bytes(&server, "/assets/logo.png", 200, &logo).await;

    let out = tempfile::tempdir().unwrap();
    let address = format!("{}/blog/page1", server.uri());
    let layout = derive_layout(&PageAddress::parse(&address).unwrap(), out.path());
    assert!(layout.relative_dir_path.ends_with("-blog-page1_files"));

    let html_path = load_page(&address, out.path()).await.unwrap();
    assert_eq!(html_path, layout.html_path);

    let html = std::fs::read_to_string(&html_path).unwrap();
    let expected_src = format!("src=\"{}/assets-logo-png\"", layout.relative_dir_path);
    assert!(html.contains(&expected_src), "{}", html);

    let saved = std::fs::read(layout.resources_path.join("assets-logo-png")).unwrap();
    assert_eq!(saved, logo);
}

#[tokio::test]
async fn one_failing_resource_fails_the_run() {
    let server = MockServer::start().await;
    serve_bytes(
        &server,
        "/",
        200,
        br#"<img src="/a.png"><img src="/b.png"><script src="/c.js"></script>"#,
    )
    .await;
    serve_bytes(&server, "/a.png", 200, b"a").await;
    serve_bytes(&server, "/b.png", 503, b"").await;
    serve_bytes(&server, "/c.js", 200, b"c").await;

    let out = tempfile::tempdir().unwrap();
    let err = load_page(&server.uri(), out.path()).await.unwrap_err();

    assert_eq!(err.stage, Stage::DownloadAndSaveResources);
    match err.kind() {
        LoadError::HttpStatus { url, status } => {
            assert!(url.ends_with("/b.png"));
            assert_eq!(status.as_u16(), 503);
        }
        other => panic!("expected HttpStatus, got {:?}", other),
    }
}
