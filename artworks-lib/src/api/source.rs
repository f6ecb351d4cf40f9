//! Page source abstraction.

use async_trait::async_trait;

use crate::api::query::Page;
use crate::api::query::PageRequest;
use crate::error::Error;
use crate::model::Artwork;

/// Anything that can serve pages of artworks.
///
/// [`ArtworksClient`](crate::ArtworksClient) implements this against the
/// remote service. The browser only depends on this trait, so tests and
/// offline front-ends can swap in their own source.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use artworks_lib::api::PageSource;
/// use artworks_lib::api::query::{Page, PageRequest};
/// use artworks_lib::error::Error;
///
/// struct EmptySource;
///
/// #[async_trait]
/// impl PageSource for EmptySource {
///     async fn fetch_page(&self, _request: &PageRequest) -> Result<Page, Error> {
///         Ok(Page::new(Vec::new(), 0))
///     }
/// }
/// ```
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches exactly one page for the request.
    async fn fetch_page(&self, request: &PageRequest) -> Result<Page, Error>;
}

/// A page source backed by an in-memory list of artworks.
///
/// Pages are cut by page number the same way the remote service does, so
/// the last page may be short. Useful for testing.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    artworks: Vec<Artwork>,
}

impl MemorySource {
    /// Creates a source serving the given artworks in order.
    pub fn new(artworks: Vec<Artwork>) -> Self {
        Self { artworks }
    }
}

#[async_trait]
impl PageSource for MemorySource {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Page, Error> {
        let start = (request.page_number() - 1) * request.page_size();
        let records = self
            .artworks
            .iter()
            .skip(start)
            .take(request.page_size())
            .cloned()
            .collect();
        Ok(Page::new(records, self.artworks.len()))
    }
}
