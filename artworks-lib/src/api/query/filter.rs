//! Column filters for the artwork table.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::model::Artwork;

/// A filterable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    Title,
    PlaceOfOrigin,
    ArtistDisplay,
}

impl FilterField {
    /// All filterable columns, in display order.
    pub const ALL: [FilterField; 3] = [
        FilterField::Title,
        FilterField::PlaceOfOrigin,
        FilterField::ArtistDisplay,
    ];

    /// Column header shown to the user.
    pub fn label(self) -> &'static str {
        match self {
            FilterField::Title => "Title",
            FilterField::PlaceOfOrigin => "Origin",
            FilterField::ArtistDisplay => "Artist",
        }
    }

    fn value_of(self, artwork: &Artwork) -> &str {
        match self {
            FilterField::Title => &artwork.title,
            FilterField::PlaceOfOrigin => &artwork.place_of_origin,
            FilterField::ArtistDisplay => &artwork.artist_display,
        }
    }
}

/// Active "contains" filters, keyed by column.
///
/// Matching is a case-insensitive substring test. An empty value is treated
/// as no filter for that column.
///
/// # Example
///
/// ```
/// use artworks_lib::api::query::{FilterField, Filters};
/// use artworks_lib::model::Artwork;
///
/// let filters = Filters::new().with(FilterField::Title, "jatte");
///
/// assert!(filters.matches(&Artwork::new(1, "A Sunday on La Grande Jatte")));
/// assert!(!filters.matches(&Artwork::new(2, "Nighthawks")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    values: BTreeMap<FilterField, String>,
}

impl Filters {
    /// Creates an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the filter set with `field` set to `value`.
    pub fn with(mut self, field: FilterField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Sets the filter value for a column. An empty value clears it.
    pub fn set(&mut self, field: FilterField, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.values.remove(&field);
        } else {
            self.values.insert(field, value);
        }
    }

    /// Returns the filter value for a column, or `""` if unset.
    pub fn get(&self, field: FilterField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Returns `true` if at least one column is filtered.
    pub fn is_active(&self) -> bool {
        !self.values.is_empty()
    }

    /// Returns `true` if the artwork passes every active filter.
    pub fn matches(&self, artwork: &Artwork) -> bool {
        self.values.iter().all(|(field, needle)| {
            field
                .value_of(artwork)
                .to_lowercase()
                .contains(&needle.to_lowercase())
        })
    }
}
