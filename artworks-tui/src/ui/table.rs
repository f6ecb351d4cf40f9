//! Artwork table layout.

use artworks_lib::browser::BrowserState;
use artworks_lib::model::Artwork;
use crossterm::style::Color;

use super::text::{Line, Span, SpanStyle, fit, single_line};

/// Gap between columns.
const GAP: &str = " ";
const CHECKBOX_WIDTH: usize = 3;
const DATE_WIDTH: usize = 10;
const MIN_TEXT_WIDTH: usize = 4;

/// A table column after the checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Title,
    Origin,
    Artist,
    Inscriptions,
    DateStart,
    DateEnd,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::Title,
        Column::Origin,
        Column::Artist,
        Column::Inscriptions,
        Column::DateStart,
        Column::DateEnd,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Column::Title => "Title",
            Column::Origin => "Origin",
            Column::Artist => "Artist",
            Column::Inscriptions => "Inscriptions",
            Column::DateStart => "Date Start",
            Column::DateEnd => "Date End",
        }
    }

    /// Share of the flexible width, in percent. Date columns are fixed.
    fn share(self) -> Option<usize> {
        match self {
            Column::Title => Some(30),
            Column::Origin => Some(15),
            Column::Artist => Some(35),
            Column::Inscriptions => Some(20),
            Column::DateStart | Column::DateEnd => None,
        }
    }

    fn cell(self, artwork: &Artwork) -> String {
        match self {
            Column::Title => single_line(&artwork.title),
            Column::Origin => single_line(&artwork.place_of_origin),
            Column::Artist => single_line(&artwork.artist_display),
            Column::Inscriptions => single_line(&artwork.inscriptions),
            Column::DateStart => year(artwork.date_start),
            Column::DateEnd => year(artwork.date_end),
        }
    }
}

fn year(value: Option<i64>) -> String {
    value.map(|y| y.to_string()).unwrap_or_default()
}

fn checkbox(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}

/// Rows without an id cannot be selected.
const NO_CHECKBOX: &str = "[-]";

/// Widths of [`Column::ALL`] for a terminal `width` columns wide.
pub fn column_widths(width: usize) -> [usize; 6] {
    let fixed = CHECKBOX_WIDTH + 2 * DATE_WIDTH + GAP.len() * Column::ALL.len();
    let flexible = width.saturating_sub(fixed);

    let mut widths = [0; 6];
    let mut assigned = 0;
    for (i, column) in Column::ALL.into_iter().enumerate() {
        widths[i] = match column.share() {
            Some(share) => {
                let w = (flexible * share / 100).max(MIN_TEXT_WIDTH);
                assigned += w;
                w
            }
            None => DATE_WIDTH,
        };
    }

    // Rounding leftovers go to the title
    widths[0] += flexible.saturating_sub(assigned);
    widths
}

/// Header row. The checkbox mirrors the "select all" flag.
pub fn header_line(state: &BrowserState, widths: &[usize; 6]) -> Line {
    let mut text = String::from(checkbox(state.selection().is_select_all()));
    for (column, width) in Column::ALL.into_iter().zip(widths) {
        text.push_str(GAP);
        text.push_str(&fit(column.header(), *width));
    }
    Line::styled(text, SpanStyle::bold().fg(Color::Cyan))
}

/// Visible rows, scrolled so the cursor stays on screen.
pub fn row_lines(state: &BrowserState, cursor: usize, widths: &[usize; 6], max_rows: usize) -> Vec<Line> {
    let rows: Vec<&Artwork> = state.visible_records().collect();
    if rows.is_empty() {
        let message = if state.loading() {
            "Loading…"
        } else if state.records().is_empty() {
            "No artworks"
        } else {
            "No artworks on this page match the filters"
        };
        return vec![Line::styled(message, SpanStyle::dim())];
    }

    let max_rows = max_rows.max(1);
    let scroll = (cursor + 1).saturating_sub(max_rows);

    rows.iter()
        .enumerate()
        .skip(scroll)
        .take(max_rows)
        .map(|(index, artwork)| {
            let mut text = String::from(match artwork.id {
                Some(id) => checkbox(state.selection().contains(id)),
                None => NO_CHECKBOX,
            });
            for (column, width) in Column::ALL.into_iter().zip(widths) {
                text.push_str(GAP);
                text.push_str(&fit(&column.cell(artwork), *width));
            }
            let style = if index == cursor {
                SpanStyle::reverse()
            } else {
                SpanStyle::default()
            };
            Line::new().span(Span::styled(text, style))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use artworks_lib::api::query::Page;
    use artworks_lib::browser::ArtworkBrowser;

    use super::*;

    fn browser(records: Vec<Artwork>, total: usize) -> ArtworkBrowser {
        let mut browser = ArtworkBrowser::new();
        let pending = browser.begin_load();
        browser.complete_load(pending.seq, Ok(Page::new(records, total)));
        browser
    }

    fn seurat() -> Artwork {
        Artwork::new(27992, "A Sunday on La Grande Jatte")
            .with_origin("France")
            .with_artist("Georges Seurat\nFrench, 1859-1891")
            .with_inscriptions("Signed lower right")
            .with_dates(1884, 1886)
    }

    #[test]
    fn test_column_widths_fill_terminal() {
        for width in [80, 120, 200] {
            let widths = column_widths(width);
            let used: usize = CHECKBOX_WIDTH + widths.iter().sum::<usize>() + Column::ALL.len();
            assert_eq!(used, width, "width {}", width);
            assert_eq!(widths[4], DATE_WIDTH);
            assert_eq!(widths[5], DATE_WIDTH);
        }
    }

    #[test]
    fn test_column_widths_narrow_terminal() {
        let widths = column_widths(10);
        assert!(widths[..4].iter().all(|w| *w >= MIN_TEXT_WIDTH));
    }

    #[test]
    fn test_row_rendering() {
        let mut browser = browser(vec![seurat(), Artwork::new(2, "Nighthawks")], 2);
        browser.toggle_row(27992);
        let widths = column_widths(120);

        let rows = row_lines(browser.state(), 1, &widths, 10);
        assert_eq!(rows.len(), 2);

        let first = rows[0].text();
        assert!(first.starts_with("[x] A Sunday on La Grande Jatte"));
        assert!(first.contains("Georges Seurat French"));
        assert!(first.contains("Signed lower"));
        assert!(first.contains("1884"));
        assert_eq!(rows[0].spans[0].style, SpanStyle::default());

        assert!(rows[1].text().starts_with("[ ] Nighthawks"));
        assert_eq!(rows[1].spans[0].style, SpanStyle::reverse());
    }

    #[test]
    fn test_header_checkbox_follows_select_all() {
        let mut browser = browser(vec![seurat()], 100);
        let widths = column_widths(100);
        assert!(header_line(browser.state(), &widths).text().starts_with("[ ] Title"));

        browser.on_select_all_toggle(true);
        assert!(header_line(browser.state(), &widths).text().starts_with("[x] Title"));
    }

    #[test]
    fn test_rows_scroll_to_cursor() {
        let records = (1..=12).map(|id| Artwork::new(id, format!("Artwork {}", id))).collect();
        let browser = browser(records, 12);
        let widths = column_widths(100);

        let rows = row_lines(browser.state(), 11, &widths, 4);
        assert_eq!(rows.len(), 4);
        assert!(rows[0].text().starts_with("[ ] Artwork 9 "));
        assert!(rows[3].text().starts_with("[ ] Artwork 12"));
    }

    #[test]
    fn test_row_without_id_is_displayed() {
        let mut orphan = Artwork::new(0, "Unknown provenance");
        orphan.id = None;
        let mut browser = browser(vec![orphan, Artwork::new(2, "Nighthawks")], 2);
        browser.on_select_all_toggle(true);

        let rows = row_lines(browser.state(), 0, &column_widths(100), 10);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].text().starts_with("[-] Unknown provenance"));
        assert!(rows[1].text().starts_with("[x] Nighthawks"));
    }

    #[test]
    fn test_empty_page_message() {
        let browser = browser(Vec::new(), 0);
        let rows = row_lines(browser.state(), 0, &column_widths(80), 10);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text(), "No artworks");
    }
}
