//! Error types

mod api;

pub use api::*;

/// Top-level error type for the artworks library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failure while fetching or decoding a page.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A page request was built with a zero page size.
    #[error("Invalid page size: must be greater than zero")]
    InvalidPageSize,
}
