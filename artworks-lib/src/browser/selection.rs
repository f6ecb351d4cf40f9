//! Cross-page selection bookkeeping.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::Artwork;
use crate::model::ArtworkId;

/// Selected artworks, keyed by id.
///
/// Entries are full record snapshots taken when the row was selected, so a
/// selection survives navigating away from the page it was made on.
///
/// `select_all` is a display flag derived from the selection size and the
/// total count at the last recompute. It goes stale between recomputes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    selected: BTreeMap<ArtworkId, Artwork>,
    select_all: bool,
}

impl Selection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of selected artworks.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Check if an artwork is selected.
    pub fn contains(&self, id: ArtworkId) -> bool {
        self.selected.contains_key(&id)
    }

    /// Returns the snapshot of a selected artwork.
    pub fn get(&self, id: ArtworkId) -> Option<&Artwork> {
        self.selected.get(&id)
    }

    /// Iterates over selected artworks in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Artwork> {
        self.selected.values()
    }

    /// Iterates over selected ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = ArtworkId> + '_ {
        self.selected.keys().copied()
    }

    /// Value of the "select all" header checkbox.
    pub fn is_select_all(&self) -> bool {
        self.select_all
    }

    /// Replaces the selection. Duplicate ids keep the last record seen and
    /// records without an id are skipped.
    pub(crate) fn replace(&mut self, records: impl IntoIterator<Item = Artwork>) {
        self.selected = records
            .into_iter()
            .filter_map(|a| a.id.map(|id| (id, a)))
            .collect();
    }

    pub(crate) fn clear(&mut self) {
        self.selected.clear();
    }

    pub(crate) fn set_select_all(&mut self, select_all: bool) {
        self.select_all = select_all;
    }

    /// `select_all := |selected| == total_count`
    pub(crate) fn recompute_select_all(&mut self, total_count: usize) {
        self.select_all = self.selected.len() == total_count;
    }
}
