//! Service URL generation.

use url::Url;

/// Builds the URL for a page: `<base>?page=<n>`.
///
/// Query parameters already present on `base` are kept, except for an
/// existing `page` parameter which is replaced.
pub fn page_url(base: &Url, page_number: usize) -> Url {
    let mut url = base.clone();
    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "page")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(retained.iter())
        .append_pair("page", &page_number.to_string());
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_base() {
        let base = Url::parse("https://api.artic.edu/api/v1/artworks").unwrap();
        assert_eq!(
            page_url(&base, 3).as_str(),
            "https://api.artic.edu/api/v1/artworks?page=3"
        );
    }

    #[test]
    fn test_keeps_existing_params() {
        let base = Url::parse("https://example.com/artworks?fields=id,title").unwrap();
        assert_eq!(
            page_url(&base, 1).as_str(),
            "https://example.com/artworks?fields=id%2Ctitle&page=1"
        );
    }

    #[test]
    fn test_replaces_existing_page() {
        let base = Url::parse("https://example.com/artworks?page=9&limit=12").unwrap();
        assert_eq!(
            page_url(&base, 2).as_str(),
            "https://example.com/artworks?limit=12&page=2"
        );
    }
}
