//! Lazy pagination and selection for the artwork table.
//!
//! [`ArtworkBrowser`] owns a [`BrowserState`] and changes it only through the
//! operations below. Loading is split in two so the request shape can be
//! tested without a network:
//!
//! - [`ArtworkBrowser::begin_load`] marks the state as loading and hands out a
//!   [`PendingLoad`] tagged with a sequence number
//! - [`ArtworkBrowser::complete_load`] applies the result, unless a newer
//!   request has been issued in the meantime
//!
//! # Example
//!
//! ```ignore
//! let mut browser = ArtworkBrowser::new();
//! browser.load_page(&client).await;
//!
//! browser.on_select_all_toggle(true);
//! let pending = browser.on_page_change(12, 12).unwrap();
//! let result = client.fetch_page(&pending.request).await;
//! browser.complete_load(pending.seq, result);
//! ```

mod selection;
mod state;

pub use selection::Selection;
pub use state::BrowserState;

use std::num::NonZeroUsize;

use log::debug;
use log::error;
use log::warn;

use crate::api::PageSource;
use crate::api::query::DEFAULT_PAGE_SIZE;
use crate::api::query::Filters;
use crate::api::query::Page;
use crate::api::query::PageRequest;
use crate::error::Error;
use crate::model::Artwork;
use crate::model::ArtworkId;

/// A request that has been issued but not yet completed.
///
/// Issuing it made every earlier request stale. Pass it to
/// [`ArtworkBrowser::run_load`], or fetch `request` yourself and hand the
/// result to [`ArtworkBrowser::complete_load`].
#[must_use = "the browser stays loading until this request is completed"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLoad {
    /// Sequence number to hand back to [`ArtworkBrowser::complete_load`].
    pub seq: u64,
    /// The page to fetch.
    pub request: PageRequest,
}

/// What [`ArtworkBrowser::complete_load`] did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The page replaced the displayed records.
    Applied,
    /// The fetch failed; the error was logged and the state kept as it was.
    Failed,
    /// A newer request was issued after this one; the result was discarded.
    Stale,
}

/// State container behind the artwork table.
#[derive(Debug, Clone)]
pub struct ArtworkBrowser {
    state: BrowserState,
}

impl Default for ArtworkBrowser {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtworkBrowser {
    /// Creates a browser on page 1 with [`DEFAULT_PAGE_SIZE`] rows per page.
    pub fn new() -> Self {
        let page_size = NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN);
        Self::with_page_size(page_size)
    }

    /// Creates a browser on page 1 with a custom page size.
    pub fn with_page_size(page_size: NonZeroUsize) -> Self {
        Self {
            state: BrowserState::new(page_size),
        }
    }

    /// Read access to the full state.
    pub fn state(&self) -> &BrowserState {
        &self.state
    }

    /// The request the current window and filters map to.
    pub fn next_request(&self) -> PageRequest {
        self.state.request()
    }

    // -------------------------------------------------------------------------
    // Loading
    // -------------------------------------------------------------------------

    /// Marks the browser as loading and issues a new sequence number.
    ///
    /// Any request issued earlier becomes stale.
    pub fn begin_load(&mut self) -> PendingLoad {
        self.state.latest_seq += 1;
        self.state.loading = true;

        let request = self.state.request();
        debug!(
            "Loading page {} (offset {}, seq {})",
            request.page_number(),
            request.offset(),
            self.state.latest_seq
        );

        PendingLoad {
            seq: self.state.latest_seq,
            request,
        }
    }

    /// Applies the result of a request issued by [`begin_load`](Self::begin_load).
    ///
    /// - stale results are dropped without touching any state
    /// - failures are logged and swallowed; rows, total and selection stay
    /// - successes replace the rows and the total count
    ///
    /// The selection is never changed here.
    pub fn complete_load(&mut self, seq: u64, result: Result<Page, Error>) -> LoadOutcome {
        if seq != self.state.latest_seq {
            debug!(
                "Discarding stale page response (seq {}, latest {})",
                seq, self.state.latest_seq
            );
            return LoadOutcome::Stale;
        }

        self.state.loading = false;

        match result {
            Ok(page) => {
                self.state.total_count = page.total_count();
                self.state.records = page.into_records();
                debug!(
                    "Applied page {}: {} records of {}",
                    self.state.current_page(),
                    self.state.records.len(),
                    self.state.total_count
                );
                LoadOutcome::Applied
            }
            Err(e) => {
                error!("Error loading data: {}", e);
                LoadOutcome::Failed
            }
        }
    }

    /// Fetches the current page from `source` and applies it.
    ///
    /// Issues exactly one call to [`PageSource::fetch_page`].
    pub async fn load_page<S>(&mut self, source: &S) -> LoadOutcome
    where
        S: PageSource + ?Sized,
    {
        let pending = self.begin_load();
        self.run_load(source, pending).await
    }

    /// Fetches an already issued request from `source` and applies it.
    pub async fn run_load<S>(&mut self, source: &S, pending: PendingLoad) -> LoadOutcome
    where
        S: PageSource + ?Sized,
    {
        let result = source.fetch_page(&pending.request).await;
        self.complete_load(pending.seq, result)
    }

    // -------------------------------------------------------------------------
    // Pagination and filters
    // -------------------------------------------------------------------------

    /// Moves the page window and issues a load. Selection is untouched.
    ///
    /// Returns `None` and changes nothing if `page_size` is zero.
    #[must_use = "the returned load must be run or completed"]
    pub fn on_page_change(&mut self, offset: usize, page_size: usize) -> Option<PendingLoad> {
        let Some(page_size) = NonZeroUsize::new(page_size) else {
            warn!("Ignoring page change with zero page size");
            return None;
        };

        self.state.offset = offset;
        self.state.page_size = page_size;
        Some(self.begin_load())
    }

    /// Replaces the filters, returns to the first page and issues a load.
    ///
    /// Selection is untouched, including rows the new filters hide.
    #[must_use = "the returned load must be run or completed"]
    pub fn on_filter_change(&mut self, filters: Filters) -> PendingLoad {
        self.state.filters = filters;
        self.state.offset = 0;
        self.begin_load()
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Accepts the table's reported selection verbatim.
    pub fn on_row_selection_change(&mut self, selected: impl IntoIterator<Item = Artwork>) {
        self.state.selection.replace(selected);
        self.state
            .selection
            .recompute_select_all(self.state.total_count);
    }

    /// Toggles one row of the current page.
    ///
    /// Builds "current selection plus or minus this row" and feeds it through
    /// [`on_row_selection_change`](Self::on_row_selection_change). Returns
    /// `false` if the id is neither selected nor on the current page.
    pub fn toggle_row(&mut self, id: ArtworkId) -> bool {
        let current = self.state.selection.iter().cloned();

        let next: Vec<Artwork> = if self.state.selection.contains(id) {
            current.filter(|a| a.id != Some(id)).collect()
        } else if let Some(row) = self.state.records.iter().find(|a| a.id == Some(id)) {
            current.chain(std::iter::once(row.clone())).collect()
        } else {
            return false;
        };

        self.on_row_selection_change(next);
        true
    }

    /// Handles the header checkbox.
    ///
    /// Checking selects the visible rows of the current page only; records on
    /// other pages are not resident and cannot be selected, nor can rows
    /// without an id. Unchecking clears the whole selection.
    pub fn on_select_all_toggle(&mut self, checked: bool) {
        if checked {
            let visible: Vec<Artwork> = self.state.visible_records().cloned().collect();
            self.state.selection.replace(visible);
        } else {
            self.state.selection.clear();
        }
        self.state.selection.set_select_all(checked);
    }

    /// Selects the first `n` visible rows of the current page.
    ///
    /// `input` is the raw text the user typed. Anything that is not a positive
    /// integer is ignored and `false` is returned. Rows without an id count
    /// towards `n` but stay unselected.
    pub fn select_first_n(&mut self, input: &str) -> bool {
        let n = match input.trim().parse::<i64>() {
            Ok(n) if n > 0 => n,
            _ => {
                debug!("Ignoring select-first-n input {:?}", input);
                return false;
            }
        };

        let take = usize::try_from(n).unwrap_or(usize::MAX);
        let first: Vec<Artwork> = self.state.visible_records().take(take).cloned().collect();
        self.on_row_selection_change(first);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::query::FilterField;

    fn page(ids: std::ops::RangeInclusive<i64>, total: usize) -> Page {
        Page::new(ids.map(|id| Artwork::new(id, format!("Artwork {}", id))).collect(), total)
    }

    fn loaded(ids: std::ops::RangeInclusive<i64>, total: usize) -> ArtworkBrowser {
        let mut browser = ArtworkBrowser::new();
        let pending = browser.begin_load();
        assert_eq!(browser.complete_load(pending.seq, Ok(page(ids, total))), LoadOutcome::Applied);
        browser
    }

    fn selected_ids(browser: &ArtworkBrowser) -> Vec<ArtworkId> {
        browser.state().selection().ids().collect()
    }

    #[test]
    fn test_first_page_request() {
        let browser = ArtworkBrowser::new();
        let request = browser.next_request();
        assert_eq!(request.offset(), 0);
        assert_eq!(request.page_size(), 12);
        assert_eq!(request.page_number(), 1);
    }

    #[test]
    fn test_initial_load() {
        let browser = loaded(1..=12, 100);
        let state = browser.state();
        assert_eq!(state.total_count(), 100);
        assert_eq!(state.records().len(), 12);
        assert!(state.selection().is_empty());
        assert!(!state.selection().is_select_all());
        assert!(!state.loading());
    }

    #[test]
    fn test_begin_load_sets_loading() {
        let mut browser = ArtworkBrowser::new();
        let pending = browser.begin_load();
        assert!(browser.state().loading());
        assert_eq!(pending.seq, 1);
        assert_eq!(browser.begin_load().seq, 2);
    }

    #[test]
    fn test_page_change_keeps_selection() {
        let mut browser = loaded(1..=12, 100);
        browser.on_row_selection_change(browser.state().records()[..3].to_vec());

        let pending = browser.on_page_change(12, 12).unwrap();
        assert_eq!(pending.request.page_number(), 2);
        browser.complete_load(pending.seq, Ok(page(13..=24, 100)));

        assert_eq!(selected_ids(&browser), vec![1, 2, 3]);
        assert_eq!(browser.state().selection().get(2).map(|a| a.title.as_str()), Some("Artwork 2"));
    }

    #[test]
    fn test_zero_page_size_is_ignored() {
        let mut browser = loaded(1..=12, 100);
        assert!(browser.on_page_change(12, 0).is_none());
        assert_eq!(browser.state().offset(), 0);
        assert!(!browser.state().loading());
    }

    #[test]
    fn test_filter_change_resets_offset() {
        let mut browser = loaded(1..=12, 100);
        let pending = browser.on_page_change(36, 12).unwrap();
        browser.complete_load(pending.seq, Ok(page(37..=48, 100)));
        browser.on_row_selection_change(browser.state().records()[..1].to_vec());

        let pending = browser.on_filter_change(Filters::new().with(FilterField::Title, "7"));
        assert_eq!(pending.request.offset(), 0);
        assert_eq!(pending.request.page_number(), 1);
        assert_eq!(pending.request.filters().get(FilterField::Title), "7");
        assert_eq!(selected_ids(&browser), vec![37]);
    }

    #[test]
    fn test_row_selection_recomputes_select_all() {
        let mut browser = loaded(1..=12, 100);
        browser.on_row_selection_change(browser.state().records().to_vec());
        assert_eq!(browser.state().selection().len(), 12);
        assert!(!browser.state().selection().is_select_all());

        let mut browser = loaded(1..=12, 12);
        browser.on_row_selection_change(browser.state().records().to_vec());
        assert!(browser.state().selection().is_select_all());
    }

    #[test]
    fn test_toggle_row() {
        let mut browser = loaded(1..=12, 100);
        assert!(browser.toggle_row(5));
        assert!(browser.toggle_row(7));
        assert_eq!(selected_ids(&browser), vec![5, 7]);

        assert!(browser.toggle_row(5));
        assert_eq!(selected_ids(&browser), vec![7]);

        assert!(!browser.toggle_row(999));
        assert_eq!(selected_ids(&browser), vec![7]);
    }

    #[test]
    fn test_toggle_row_deselects_from_other_page() {
        let mut browser = loaded(1..=12, 100);
        browser.toggle_row(1);
        let pending = browser.on_page_change(12, 12).unwrap();
        browser.complete_load(pending.seq, Ok(page(13..=24, 100)));

        assert!(browser.toggle_row(1));
        assert!(browser.state().selection().is_empty());
    }

    #[test]
    fn test_rows_without_id_are_shown_but_not_selectable() {
        let mut orphan = Artwork::new(0, "Unknown provenance");
        orphan.id = None;
        let mut browser = ArtworkBrowser::new();
        let pending = browser.begin_load();
        let records = vec![Artwork::new(1, "One"), orphan, Artwork::new(3, "Three")];
        browser.complete_load(pending.seq, Ok(Page::new(records, 3)));

        assert_eq!(browser.state().visible_records().count(), 3);

        browser.on_select_all_toggle(true);
        assert_eq!(selected_ids(&browser), vec![1, 3]);

        browser.select_first_n("2");
        assert_eq!(selected_ids(&browser), vec![1]);
    }

    #[tokio::test]
    async fn test_run_load_completes_issued_request() {
        let source = crate::api::MemorySource::new((1..=30).map(|id| Artwork::new(id, "")).collect());
        let mut browser = ArtworkBrowser::new();

        let pending = browser.on_page_change(24, 12).unwrap();
        let outcome = browser.run_load(&source, pending).await;
        assert_eq!(outcome, LoadOutcome::Applied);
        assert!(!browser.state().loading());
        assert_eq!(browser.state().records().len(), 6);
    }

    #[test]
    fn test_select_all_toggle() {
        let mut browser = loaded(1..=12, 100);
        browser.toggle_row(1);
        let pending = browser.on_page_change(12, 12).unwrap();
        browser.complete_load(pending.seq, Ok(page(13..=24, 100)));

        browser.on_select_all_toggle(true);
        assert!(browser.state().selection().is_select_all());
        assert_eq!(selected_ids(&browser), (13..=24).collect::<Vec<_>>());

        browser.on_select_all_toggle(false);
        assert!(!browser.state().selection().is_select_all());
        assert!(browser.state().selection().is_empty());
    }

    #[test]
    fn test_select_first_n() {
        let mut browser = loaded(1..=12, 100);
        assert!(browser.select_first_n("5"));
        assert_eq!(selected_ids(&browser), vec![1, 2, 3, 4, 5]);
        assert!(!browser.state().selection().is_select_all());

        assert!(browser.select_first_n(" 40 "));
        assert_eq!(browser.state().selection().len(), 12);
    }

    #[test]
    fn test_select_first_n_invalid_input() {
        let mut browser = loaded(1..=12, 100);
        browser.toggle_row(3);

        for input in ["", "0", "-4", "abc", "2.5", "12abc"] {
            assert!(!browser.select_first_n(input), "input {:?}", input);
            assert_eq!(selected_ids(&browser), vec![3]);
        }
    }

    #[test]
    fn test_select_first_n_matches_total() {
        let mut browser = loaded(1..=12, 12);
        browser.select_first_n("12");
        assert!(browser.state().selection().is_select_all());
    }

    #[test]
    fn test_selection_acts_on_visible_rows() {
        let mut browser = loaded(1..=12, 100);
        let pending = browser.on_filter_change(Filters::new().with(FilterField::Title, "Artwork 1"));
        browser.complete_load(pending.seq, Ok(page(1..=12, 100)));

        // "Artwork 1", "Artwork 10", "Artwork 11", "Artwork 12"
        browser.on_select_all_toggle(true);
        assert_eq!(selected_ids(&browser), vec![1, 10, 11, 12]);

        browser.select_first_n("2");
        assert_eq!(selected_ids(&browser), vec![1, 10]);
    }

    #[test]
    fn test_failed_load_keeps_state() {
        let mut browser = loaded(1..=12, 100);
        browser.toggle_row(4);

        let pending = browser.on_page_change(12, 12).unwrap();
        let outcome = browser.complete_load(pending.seq, Err(Error::InvalidPageSize));

        assert_eq!(outcome, LoadOutcome::Failed);
        let state = browser.state();
        assert!(!state.loading());
        assert_eq!(state.total_count(), 100);
        assert_eq!(state.records().first().and_then(|a| a.id), Some(1));
        assert_eq!(selected_ids(&browser), vec![4]);
    }

    #[test]
    fn test_stale_response_discarded() {
        let mut browser = loaded(1..=12, 100);
        let slow = browser.on_page_change(12, 12).unwrap();
        let fast = browser.on_page_change(24, 12).unwrap();

        assert_eq!(browser.complete_load(fast.seq, Ok(page(25..=36, 100))), LoadOutcome::Applied);
        assert!(!browser.state().loading());

        assert_eq!(browser.complete_load(slow.seq, Ok(page(13..=24, 90))), LoadOutcome::Stale);
        assert_eq!(browser.state().records().first().and_then(|a| a.id), Some(25));
        assert_eq!(browser.state().total_count(), 100);
    }

    #[test]
    fn test_stale_response_keeps_loading() {
        let mut browser = loaded(1..=12, 100);
        let slow = browser.on_page_change(12, 12).unwrap();
        let _fast = browser.on_page_change(24, 12).unwrap();

        assert_eq!(browser.complete_load(slow.seq, Ok(page(13..=24, 100))), LoadOutcome::Stale);
        assert!(browser.state().loading());
    }

    #[test]
    fn test_pager_helpers() {
        let mut browser = loaded(1..=12, 100);
        let state = browser.state();
        assert_eq!(state.page_count(), 9);
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.prev_offset(), None);
        assert_eq!(state.next_offset(), Some(12));
        assert_eq!(state.last_page_offset(), 96);

        let pending = browser.on_page_change(96, 12).unwrap();
        browser.complete_load(pending.seq, Ok(page(97..=100, 100)));
        let state = browser.state();
        assert_eq!(state.current_page(), 9);
        assert_eq!(state.next_offset(), None);
        assert_eq!(state.prev_offset(), Some(84));
    }

    #[test]
    fn test_state_serializes() {
        let mut browser = loaded(1..=2, 2);
        browser.toggle_row(2);

        let json = serde_json::to_value(browser.state()).unwrap();
        assert_eq!(json["total_count"], 2);
        assert_eq!(json["page_size"], 12);
        assert_eq!(json["selection"]["selected"]["2"]["title"], "Artwork 2");
        assert_eq!(json["selection"]["select_all"], false);
    }
}
