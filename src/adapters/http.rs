use crate::core::{ConfigProvider, Fetcher};
use crate::utils::error::{DashboardError, Result};
use crate::utils::validation::{validate_route_prefix, validate_url};
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_API_PREFIX: &str = "/devportal/api";

/// Fetches portal resources over HTTP from `<base_url><api_prefix><path>`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    root: String,
}

impl HttpFetcher {
    pub fn new(base_url: &str, api_prefix: &str) -> Result<Self> {
        Self::build(base_url, api_prefix, None)
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::build(
            config.base_url(),
            config.api_prefix(),
            config.timeout_seconds(),
        )
    }

    fn build(base_url: &str, api_prefix: &str, timeout_seconds: Option<u64>) -> Result<Self> {
        validate_url("base_url", base_url)?;
        validate_route_prefix("api_prefix", api_prefix)?;

        let mut builder = Client::builder();
        if let Some(seconds) = timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder.build().map_err(|e| DashboardError::ConfigError {
            message: format!("Failed to build HTTP client: {}", e),
        })?;

        let prefix = api_prefix.trim_end_matches('/');
        Ok(Self {
            client,
            root: format!("{}{}", base_url.trim_end_matches('/'), prefix),
        })
    }

    pub fn url_for(&self, path: &str) -> Result<String> {
        let invalid = |reason: &str| DashboardError::InvalidPath {
            path: path.to_string(),
            reason: reason.to_string(),
        };

        if !path.starts_with('/') || path.len() < 2 {
            return Err(invalid("must be a non-empty path starting with '/'"));
        }
        if path.contains("..") || path.contains("//") || path.contains('\\') {
            return Err(invalid("must stay under the API prefix"));
        }
        if path.contains(['?', '#']) || path.contains("://") {
            return Err(invalid("must be a plain path"));
        }

        Ok(format!("{}{}", self.root, path))
    }
}

#[async_trait::async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, path: &str) -> Result<serde_json::Value> {
        let url = self.url_for(path)?;

        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        tracing::debug!("{} -> {}", url, status);
        if !status.is_success() {
            return Err(DashboardError::request(status));
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn test_url_for_joins_base_prefix_and_path() {
        let fetcher = HttpFetcher::new("http://localhost:8080/", DEFAULT_API_PREFIX).unwrap();
        assert_eq!(
            fetcher.url_for("/products").unwrap(),
            "http://localhost:8080/devportal/api/products"
        );

        let bare = HttpFetcher::new("http://localhost:8080", "/").unwrap();
        assert_eq!(bare.url_for("/usage").unwrap(), "http://localhost:8080/usage");
    }

    #[test]
    fn test_url_for_rejects_paths_outside_prefix() {
        let fetcher = HttpFetcher::new("http://localhost:8080", DEFAULT_API_PREFIX).unwrap();

        for path in ["products", "/", "/../admin", "//evil.example", "/a?b=1", "/a#x", ""] {
            let err = fetcher.url_for(path).unwrap_err();
            assert!(
                matches!(err, DashboardError::InvalidPath { .. }),
                "{} should be rejected",
                path
            );
        }
    }

    #[test]
    fn test_invalid_configuration_is_rejected() {
        assert!(HttpFetcher::new("not a url", DEFAULT_API_PREFIX).is_err());
        assert!(HttpFetcher::new("ftp://host", DEFAULT_API_PREFIX).is_err());
        assert!(HttpFetcher::new("http://host", "api").is_err());
    }

    #[tokio::test]
    async fn test_fetch_returns_parsed_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/devportal/api/products");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!([{"name": "Payments", "slug": "pay"}]));
        });

        let fetcher = HttpFetcher::new(&server.base_url(), DEFAULT_API_PREFIX).unwrap();
        let body = fetcher.fetch("/products").await.unwrap();

        mock.assert();
        assert_eq!(body, json!([{"name": "Payments", "slug": "pay"}]));
    }

    #[tokio::test]
    async fn test_non_success_status_is_request_error() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/devportal/api/apis");
            then.status(503);
        });

        let fetcher = HttpFetcher::new(&server.base_url(), DEFAULT_API_PREFIX).unwrap();
        let err = fetcher.fetch("/apis").await.unwrap_err();

        mock.assert_hits(1);
        assert!(matches!(err, DashboardError::Request { .. }));
        assert_eq!(err.to_string(), "Service Unavailable");
    }

    #[tokio::test]
    async fn test_undecodable_body_is_transport_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/devportal/api/usage");
            then.status(200).body("<html>not json</html>");
        });

        let fetcher = HttpFetcher::new(&server.base_url(), DEFAULT_API_PREFIX).unwrap();
        let err = fetcher.fetch("/usage").await.unwrap_err();

        assert!(matches!(err, DashboardError::Transport(_)));
        assert!(err.is_fetch_failure());
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        // Port 9 (discard) is not expected to have an HTTP listener.
        let fetcher = HttpFetcher::new("http://127.0.0.1:9", DEFAULT_API_PREFIX).unwrap();
        let err = fetcher.fetch("/products").await.unwrap_err();

        assert!(matches!(err, DashboardError::Transport(_)));
    }
}
