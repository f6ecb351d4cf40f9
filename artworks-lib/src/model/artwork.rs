//! Artwork records as returned by the paged artwork service.

use serde::Deserialize;
use serde::Serialize;

use super::lenient;

/// Stable identifier of an artwork, used as the selection key.
pub type ArtworkId = i64;

/// A single artwork row.
///
/// Every field is decoded leniently so a malformed value shows up in the
/// table instead of failing the page. A row without a usable `id` is still
/// displayed but cannot be selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    /// Unique identifier, stable across fetches. `None` if the service sent
    /// nothing usable.
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: Option<ArtworkId>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub place_of_origin: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub artist_display: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub inscriptions: String,
    /// First year of the creation range, if known.
    #[serde(default, deserialize_with = "lenient::year")]
    pub date_start: Option<i64>,
    /// Last year of the creation range, if known.
    #[serde(default, deserialize_with = "lenient::year")]
    pub date_end: Option<i64>,
}

impl Artwork {
    /// Creates an artwork with the given id and title and empty other fields.
    pub fn new(id: ArtworkId, title: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            title: title.into(),
            place_of_origin: String::new(),
            artist_display: String::new(),
            inscriptions: String::new(),
            date_start: None,
            date_end: None,
        }
    }

    /// Sets the place of origin.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.place_of_origin = origin.into();
        self
    }

    /// Sets the artist display text.
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist_display = artist.into();
        self
    }

    /// Sets the inscriptions text.
    pub fn with_inscriptions(mut self, inscriptions: impl Into<String>) -> Self {
        self.inscriptions = inscriptions.into();
        self
    }

    /// Sets the year range.
    pub fn with_dates(mut self, start: i64, end: i64) -> Self {
        self.date_start = Some(start);
        self.date_end = Some(end);
        self
    }
}
