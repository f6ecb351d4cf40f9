//! Page requests, filters and page results.
//!
//! # Shared Types
//!
//! - [`PageRequest`] - Which page to fetch and which filters are active
//! - [`Filters`] - Per-column "contains" filters
//! - [`Page`] - One page of records plus the server-reported total

mod filter;
mod page;
mod request;
mod url;

pub use filter::FilterField;
pub use filter::Filters;
pub use page::Page;
pub use request::DEFAULT_PAGE_SIZE;
pub use request::PageRequest;
pub use self::url::page_url;
