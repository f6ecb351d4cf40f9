//! Main ArtworksClient

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use url::Url;

use crate::api::PageSource;
use crate::api::query::Page;
use crate::api::query::PageRequest;
use crate::api::query::page_url;
use crate::error::ApiError;
use crate::error::Error;

/// Client for the paged artwork service.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across tasks safely. It never retries: one call is one HTTP request.
///
/// # Example
///
/// ```ignore
/// use artworks_lib::ArtworksClient;
/// use artworks_lib::api::query::{Filters, PageRequest};
///
/// let client = ArtworksClient::builder()
///     .url("https://api.artic.edu/api/v1/artworks")
///     .build()?;
///
/// let page = client.fetch_page(&PageRequest::new(0, 12, Filters::new())?).await?;
/// println!("{} artworks in total", page.total_count());
/// ```
#[derive(Clone)]
pub struct ArtworksClient {
    inner: Arc<ArtworksClientInner>,
}

struct ArtworksClientInner {
    base_url: Url,
    http_client: Client,
    timeout: Option<Duration>,
}

impl ArtworksClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> ArtworksClientBuilder<Missing> {
        ArtworksClientBuilder::new()
    }

    /// Returns the base URL of the service.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Returns the URL used to fetch the given 1-based page.
    pub fn page_url(&self, page_number: usize) -> Url {
        page_url(&self.inner.base_url, page_number)
    }

    /// Fetches one page of artworks.
    ///
    /// Issues a single `GET <base>?page=<n>` where `n` is
    /// [`PageRequest::page_number`]. Filters are not sent; the service only
    /// understands the page number.
    pub async fn fetch_page(&self, request: &PageRequest) -> Result<Page, Error> {
        let url = self.page_url(request.page_number());
        debug!("GET {}", url);

        let mut builder = self.inner.http_client.get(url);
        if let Some(timeout) = self.inner.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                body
            };
            return Err(ApiError::http(status.as_u16(), message).into());
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        let page = Page::from_json(&body)?;
        debug!(
            "Page {} loaded: {} records, {} total",
            request.page_number(),
            page.len(),
            page.total_count()
        );
        Ok(page)
    }

    fn transport_error(&self, err: reqwest::Error) -> ApiError {
        match self.inner.timeout {
            Some(timeout) if err.is_timeout() => ApiError::Timeout(timeout),
            _ => ApiError::Network(err),
        }
    }
}

#[async_trait]
impl PageSource for ArtworksClient {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Page, Error> {
        ArtworksClient::fetch_page(self, request).await
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing an [`ArtworksClient`].
///
/// Uses the typestate pattern to ensure the base URL is set at compile time.
///
/// # Example
///
/// ```ignore
/// let client = ArtworksClient::builder()
///     .url("https://api.artic.edu/api/v1/artworks")
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// ```
pub struct ArtworksClientBuilder<U> {
    url: U,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl ArtworksClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }

    /// Sets the service base URL.
    pub fn url(self, url: impl Into<String>) -> ArtworksClientBuilder<Set<String>> {
        ArtworksClientBuilder {
            url: Set(url.into()),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl Default for ArtworksClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> ArtworksClientBuilder<U> {
    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client, e.g. one with proxies or TLS configured.
    ///
    /// The connect timeout is ignored when a client is given.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl ArtworksClientBuilder<Set<String>> {
    /// Builds the [`ArtworksClient`].
    ///
    /// Fails with [`ApiError::InvalidUrl`] if the URL does not parse or is not
    /// `http`/`https`.
    pub fn build(self) -> Result<ArtworksClient, Error> {
        let base_url = parse_base_url(&self.url.0)?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build().map_err(ApiError::from)?
            }
        };

        Ok(ArtworksClient {
            inner: Arc::new(ArtworksClientInner {
                base_url,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let url = Url::parse(raw.trim()).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ApiError::InvalidUrl(format!(
            "{}: unsupported scheme '{}'",
            raw, scheme
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_page_url() {
        let client = ArtworksClient::builder()
            .url("https://api.artic.edu/api/v1/artworks")
            .build()
            .unwrap();
        assert_eq!(
            client.page_url(2).as_str(),
            "https://api.artic.edu/api/v1/artworks?page=2"
        );
    }

    #[test]
    fn test_invalid_url() {
        let err = ArtworksClient::builder().url("not a url").build().err().unwrap();
        assert!(matches!(err, Error::Api(ApiError::InvalidUrl(_))));

        let err = ArtworksClient::builder()
            .url("ftp://example.com/artworks")
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, Error::Api(ApiError::InvalidUrl(_))));
    }
}
