//! Browser state record.

use std::num::NonZeroUsize;

use serde::Serialize;

use crate::api::query::Filters;
use crate::api::query::PageRequest;
use crate::model::Artwork;

use super::Selection;

/// Everything the artwork table displays, in one serializable record.
///
/// Fields are read-only from outside; [`ArtworkBrowser`](super::ArtworkBrowser)
/// is the only writer.
#[derive(Debug, Clone, Serialize)]
pub struct BrowserState {
    pub(super) offset: usize,
    pub(super) page_size: NonZeroUsize,
    pub(super) filters: Filters,
    pub(super) records: Vec<Artwork>,
    pub(super) total_count: usize,
    pub(super) selection: Selection,
    pub(super) loading: bool,
    /// Sequence number of the most recently issued request.
    pub(super) latest_seq: u64,
}

impl BrowserState {
    pub(super) fn new(page_size: NonZeroUsize) -> Self {
        Self {
            offset: 0,
            page_size,
            filters: Filters::new(),
            records: Vec::new(),
            total_count: 0,
            selection: Selection::new(),
            loading: false,
            latest_seq: 0,
        }
    }

    /// Row offset of the current page.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Records per page.
    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }

    /// Active column filters.
    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    /// Records of the currently loaded page, unfiltered.
    pub fn records(&self) -> &[Artwork] {
        &self.records
    }

    /// Records of the current page that pass the active filters, in page order.
    pub fn visible_records(&self) -> impl Iterator<Item = &Artwork> {
        self.records.iter().filter(|a| self.filters.matches(a))
    }

    /// Total record count reported by the service.
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Whether a fetch is in flight.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Sequence number of the most recently issued request.
    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    /// 1-based number of the current page.
    pub fn current_page(&self) -> usize {
        self.offset / self.page_size.get() + 1
    }

    /// Number of pages, never less than one.
    pub fn page_count(&self) -> usize {
        self.total_count.div_ceil(self.page_size.get()).max(1)
    }

    /// Offset of the first row on the last page.
    pub fn last_page_offset(&self) -> usize {
        (self.page_count() - 1) * self.page_size.get()
    }

    /// Offset of the next page, if there is one.
    pub fn next_offset(&self) -> Option<usize> {
        let next = self.offset + self.page_size.get();
        (next < self.total_count).then_some(next)
    }

    /// Offset of the previous page, if there is one.
    pub fn prev_offset(&self) -> Option<usize> {
        (self.offset > 0).then(|| self.offset.saturating_sub(self.page_size.get()))
    }

    /// Builds the request for the current window and filters.
    pub fn request(&self) -> PageRequest {
        PageRequest::with_page_size(self.offset, self.page_size, self.filters.clone())
    }
}
