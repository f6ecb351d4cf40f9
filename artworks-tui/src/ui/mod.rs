//! Screen layout and drawing.
//!
//! Layout is computed as plain [`Line`]s so it can be tested without a
//! terminal. [`draw`] then writes the lines with crossterm.

mod table;
mod text;

use std::io::{self, Write};

use artworks_lib::api::query::FilterField;
use artworks_lib::browser::BrowserState;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{Clear, ClearType},
};

use crate::app::{App, Mode};

use text::{Line, Span, SpanStyle, fit};

const TITLE: &str = "Artwork Table";
const HELP: &str =
    "↑↓ move  space select  a all  n first N  ←→ page  home/end  t/o/r filter  x clear  q quit";

/// Rows taken by everything except the table body.
const CHROME_ROWS: usize = 8;
/// Row of the table header.
const HEADER_ROW: u16 = 3;

/// Everything on screen except the popover.
pub fn screen_lines(app: &App, width: u16, height: u16) -> Vec<Line> {
    let width = width as usize;
    let state = app.browser().state();
    let widths = table::column_widths(width);
    let body_rows = (height as usize).saturating_sub(CHROME_ROWS);

    let mut lines = vec![
        title_line(app, width),
        filter_line(state, app.mode()),
        Line::new(),
        table::header_line(state, &widths),
    ];
    lines.extend(table::row_lines(state, app.cursor(), &widths, body_rows));
    lines.push(Line::new());
    lines.push(pager_line(state));
    lines.push(Line::styled(
        format!("Selected Rows: {}", state.selection().len()),
        SpanStyle::bold().fg(Color::Green),
    ));
    lines.push(Line::styled(HELP, SpanStyle::dim()));
    lines
}

fn title_line(app: &App, width: usize) -> Line {
    let title = Span::styled(TITLE, SpanStyle::bold());
    if !app.browser().state().loading() {
        return Line::new().span(title);
    }

    let spinner = Span::styled(app.spinner_frame(), SpanStyle::default().fg(Color::Yellow));
    let title_line = Line::new().span(title);
    let used = title_line.width() + Line::new().span(spinner.clone()).width();
    let gap = width.saturating_sub(used + 1);
    title_line.span(Span::plain(" ".repeat(gap.max(1)))).span(spinner)
}

fn filter_line(state: &BrowserState, mode: &Mode) -> Line {
    let mut line = Line::styled("Filters ", SpanStyle::dim());
    for field in FilterField::ALL {
        line = line.span(Span::plain(format!(" {}: ", field.label())));
        line = match mode {
            Mode::EditFilter { field: editing, buffer } if *editing == field => {
                line.span(Span::styled(format!("[{}_]", buffer), SpanStyle::reverse()))
            }
            _ => line.span(Span::plain(format!("[{}]", state.filters().get(field)))),
        };
    }
    line
}

/// Pager status, e.g. `Page 2 of 9 · rows 13–24 of 100`.
pub fn pager_line(state: &BrowserState) -> Line {
    if state.total_count() == 0 {
        return Line::styled("No records", SpanStyle::dim());
    }

    let mut text = format!("Page {} of {}", state.current_page(), state.page_count());
    if !state.records().is_empty() {
        text.push_str(&format!(
            " · rows {}–{} of {}",
            state.offset() + 1,
            state.offset() + state.records().len(),
            state.total_count()
        ));
    }
    if state.filters().is_active() {
        text.push_str(&format!(" · {} shown", state.visible_records().count()));
    }
    Line::plain(text)
}

/// The "select first N" popover, if open.
pub fn popover_lines(app: &App) -> Option<Vec<Line>> {
    let Mode::SelectCount { buffer } = app.mode() else {
        return None;
    };

    const INNER: usize = 28;
    let border = SpanStyle::default().fg(Color::Cyan);
    let row = |content: String, style: SpanStyle| {
        Line::styled("│", border)
            .span(Span::styled(fit(&content, INNER), style))
            .span(Span::styled("│", border))
    };

    Some(vec![
        Line::styled(format!("┌{}┐", fit("─ Select rows ", INNER).replace(' ', "─")), border),
        row(format!(" Count: {}_", buffer), SpanStyle::bold()),
        row(" enter submit · esc cancel".to_string(), SpanStyle::dim()),
        Line::styled(format!("└{}┘", "─".repeat(INNER)), border),
    ])
}

/// Draw one frame.
pub fn draw(out: &mut impl Write, app: &App, width: u16, height: u16) -> io::Result<()> {
    let lines = screen_lines(app, width, height);
    let mut last_row = 0;
    for (row, line) in lines.iter().take(height as usize).enumerate() {
        last_row = row as u16;
        queue!(out, MoveTo(0, last_row))?;
        write_line(out, line)?;
        queue!(out, Clear(ClearType::UntilNewLine))?;
    }
    queue!(out, MoveTo(0, last_row.saturating_add(1)), Clear(ClearType::FromCursorDown))?;

    if let Some(popover) = popover_lines(app) {
        for (i, line) in popover.iter().enumerate() {
            let row = HEADER_ROW + 1 + i as u16;
            if row >= height {
                break;
            }
            queue!(out, MoveTo(2, row))?;
            write_line(out, line)?;
        }
    }

    out.flush()
}

fn write_line(out: &mut impl Write, line: &Line) -> io::Result<()> {
    for span in &line.spans {
        let style = span.style;
        if style.bold {
            queue!(out, SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            queue!(out, SetAttribute(Attribute::Dim))?;
        }
        if style.reverse {
            queue!(out, SetAttribute(Attribute::Reverse))?;
        }
        if let Some(color) = style.fg {
            queue!(out, SetForegroundColor(color))?;
        }
        queue!(out, Print(&span.text), SetAttribute(Attribute::Reset), ResetColor)?;
    }
    Ok(())
}
