//! Page type for paged artwork results.

use log::warn;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ApiError;
use crate::model::Artwork;
use crate::model::lenient;

/// One page of artworks plus the total record count reported by the service.
///
/// A page replaces the previously displayed one wholesale. It never merges
/// with earlier pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Page {
    records: Vec<Artwork>,
    total_count: usize,
}

impl Page {
    /// Creates a page from records and a total count.
    pub fn new(records: Vec<Artwork>, total_count: usize) -> Self {
        Self {
            records,
            total_count,
        }
    }

    /// Decodes a service response body.
    ///
    /// The body must be an object with a `data` array. `pagination.total`
    /// is zero when absent or not a number. Fields of each record are decoded
    /// leniently; only entries that are not JSON objects are dropped, with a
    /// warning.
    pub fn from_json(body: &str) -> Result<Self, ApiError> {
        let envelope: PageEnvelope = serde_json::from_str(body)
            .map_err(|e| ApiError::parse_with_body(e.to_string(), body))?;

        let mut records = Vec::with_capacity(envelope.data.len());
        for (index, raw) in envelope.data.into_iter().enumerate() {
            match serde_json::from_value::<Artwork>(raw) {
                Ok(artwork) => records.push(artwork),
                Err(e) => warn!("Dropping artwork at index {}: {}", index, e),
            }
        }

        Ok(Self::new(records, envelope.pagination.total))
    }

    /// Returns a reference to the records in this page.
    pub fn records(&self) -> &[Artwork] {
        &self.records
    }

    /// Consumes the page and returns the records.
    pub fn into_records(self) -> Vec<Artwork> {
        self.records
    }

    /// Returns the total number of records across all pages.
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Returns `true` if this page has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of records in this page.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// Response body of the paged artwork service.
#[derive(Debug, Deserialize)]
struct PageEnvelope {
    data: Vec<serde_json::Value>,
    #[serde(default)]
    pagination: Pagination,
}

#[derive(Debug, Default, Deserialize)]
struct Pagination {
    #[serde(default, deserialize_with = "lenient::count")]
    total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_page() {
        let body = r#"{
            "pagination": {"total": 129884, "limit": 12, "current_page": 1},
            "data": [
                {"id": 1, "title": "One", "date_start": 1900, "date_end": 1901},
                {"id": 2, "title": "Two", "date_start": 1800, "date_end": 1850}
            ]
        }"#;

        let page = Page::from_json(body).unwrap();
        assert_eq!(page.total_count(), 129884);
        assert_eq!(page.len(), 2);
        assert_eq!(page.records()[1].title, "Two");
    }

    #[test]
    fn test_missing_total_defaults_to_zero() {
        let page = Page::from_json(r#"{"data": []}"#).unwrap();
        assert_eq!(page.total_count(), 0);
        assert!(page.is_empty());
    }

    #[test]
    fn test_null_total_is_zero() {
        let page = Page::from_json(r#"{"pagination": {"total": null}, "data": [{"id": 1}]}"#).unwrap();
        assert_eq!(page.total_count(), 0);
        assert_eq!(page.len(), 1);

        let page = Page::from_json(r#"{"pagination": {"total": "40"}, "data": []}"#).unwrap();
        assert_eq!(page.total_count(), 40);
    }

    #[test]
    fn test_keeps_records_with_odd_ids() {
        let body = r#"{
            "pagination": {"total": 5},
            "data": [{"id": 1}, {"id": "2"}, {"id": 3.0}, {"title": "orphan"}, "garbage"]
        }"#;

        let page = Page::from_json(body).unwrap();
        let ids: Vec<_> = page.records().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![Some(1), Some(2), Some(3), None]);
        assert_eq!(page.records()[3].title, "orphan");
    }

    #[test]
    fn test_shape_mismatch_is_parse_error() {
        let err = Page::from_json(r#"{"pagination": {"total": 1}}"#).unwrap_err();
        assert!(matches!(err, ApiError::Parse { .. }));
        assert!(err.body().is_some());

        let err = Page::from_json("<html>oops</html>").unwrap_err();
        assert!(matches!(err, ApiError::Parse { .. }));
    }
}
