//! Page request construction.

use std::num::NonZeroUsize;

use serde::Serialize;

use crate::error::Error;

use super::Filters;

/// Number of records per page shown by the artwork table.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Describes which page to load.
///
/// The service is 1-indexed by page number; the table thinks in row offsets.
/// [`page_number`](Self::page_number) converts between the two.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    offset: usize,
    page_size: NonZeroUsize,
    filters: Filters,
}

impl PageRequest {
    /// Creates a request for the page containing row `offset`.
    ///
    /// Returns [`Error::InvalidPageSize`] if `page_size` is zero.
    pub fn new(offset: usize, page_size: usize, filters: Filters) -> Result<Self, Error> {
        let page_size = NonZeroUsize::new(page_size).ok_or(Error::InvalidPageSize)?;
        Ok(Self::with_page_size(offset, page_size, filters))
    }

    pub(crate) fn with_page_size(offset: usize, page_size: NonZeroUsize, filters: Filters) -> Self {
        Self {
            offset,
            page_size,
            filters,
        }
    }

    /// Row offset of the first record on the page.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of records per page.
    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }

    /// Active column filters.
    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    /// 1-based page number sent to the service: `offset / page_size + 1`.
    pub fn page_number(&self) -> usize {
        self.offset / self.page_size.get() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_number() {
        let cases = [(0, 12, 1), (11, 12, 1), (12, 12, 2), (24, 12, 3), (25, 12, 3), (7, 1, 8)];
        for (offset, size, expected) in cases {
            let request = PageRequest::new(offset, size, Filters::new()).unwrap();
            assert_eq!(request.page_number(), expected, "offset {} size {}", offset, size);
        }
    }

    #[test]
    fn test_zero_page_size_rejected() {
        assert!(matches!(
            PageRequest::new(0, 0, Filters::new()),
            Err(Error::InvalidPageSize)
        ));
    }
}
