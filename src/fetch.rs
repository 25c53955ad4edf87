// src/fetch.rs
// =============================================================================
// Plain HTTP GETs for the page and its resources.
//
// One request per call: no retries, no timeout, and redirects are whatever
// reqwest does by default. Failures are turned into LoadError right here so
// the rest of the crate never sees a raw reqwest::Error.
// =============================================================================

use reqwest::{Client, Response};
use tracing::debug;

use crate::error::LoadError;

/// Fetches a URL and decodes the body as text (used for the page itself).
pub async fn fetch_text(client: &Client, url: &str) -> Result<String, LoadError> {
    let response = get(client, url).await?;
    response.text().await.map_err(|source| LoadError::Network {
        url: url.to_string(),
        source,
    })
}

/// Fetches a URL and returns the raw body (used for images, scripts, styles).
pub async fn fetch_bytes(client: &Client, url: &str) -> Result<Vec<u8>, LoadError> {
    let response = get(client, url).await?;
    let body = response.bytes().await.map_err(|source| LoadError::Network {
        url: url.to_string(),
        source,
    })?;
    Ok(body.to_vec())
}

async fn get(client: &Client, url: &str) -> Result<Response, LoadError> {
    debug!(target: "page_loader::http", "GET {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| LoadError::Network {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    debug!(target: "page_loader::http", "{} -> {}", url, status);

    if !status.is_success() {
        return Err(LoadError::HttpStatus {
            url: url.to_string(),
            status,
        });
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_text_ok() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let client = Client::new();
        let body = fetch_text(&client, &format!("{}/page", server.uri()))
            .await
            .unwrap();
        assert_eq!(body, "<html></html>");
    }

    #[tokio::test]
    async fn test_fetch_bytes_keeps_binary_body() {
        let server = MockServer::start().await;
        let png = vec![0x89, b'P', b'N', b'G', 0x00, 0xff];
        Mock::given(method("GET"))
            .and(path("/logo.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(png.clone()))
            .mount(&server)
            .await;

        let client = Client::new();
        let body = fetch_bytes(&client, &format!("{}/logo.png", server.uri()))
            .await
            .unwrap();
        assert_eq!(body, png);
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = Client::new();
        let err = fetch_text(&client, &format!("{}/missing", server.uri()))
            .await
            .unwrap_err();
        match err {
            LoadError::HttpStatus { status, .. } => assert_eq!(status.as_u16(), 404),
            other => panic!("expected HttpStatus, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_connection_failure_is_network_error() {
        // Grab a free port, then close it so the connection is refused
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();

        let client = Client::new();
        let err = fetch_bytes(&client, &format!("http://127.0.0.1:{}/", port))
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Network { .. }));
    }
}
