//! Styled text lines and width-aware fitting.

use crossterm::style::Color;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Text attributes for a span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpanStyle {
    pub bold: bool,
    pub dim: bool,
    pub reverse: bool,
    pub fg: Option<Color>,
}

impl SpanStyle {
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Self::default()
        }
    }

    pub fn dim() -> Self {
        Self {
            dim: true,
            ..Self::default()
        }
    }

    pub fn reverse() -> Self {
        Self {
            reverse: true,
            ..Self::default()
        }
    }

    pub fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }
}

/// A run of text with one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
}

impl Span {
    pub fn styled(text: impl Into<String>, style: SpanStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::styled(text, SpanStyle::default())
    }
}

/// One terminal row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new().span(Span::plain(text))
    }

    pub fn styled(text: impl Into<String>, style: SpanStyle) -> Self {
        Self::new().span(Span::styled(text, style))
    }

    pub fn span(mut self, span: Span) -> Self {
        self.spans.push(span);
        self
    }

    /// The line's text without styling.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Display width in terminal columns.
    pub fn width(&self) -> usize {
        self.spans.iter().map(|s| s.text.width()).sum()
    }
}

/// Flattens multi-line values onto one row.
pub fn single_line(s: &str) -> String {
    s.split(['\n', '\r', '\t'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncates or pads `s` to exactly `width` terminal columns.
///
/// Truncated text ends with `…`. Wide characters that would straddle the
/// edge are replaced by padding.
pub fn fit(s: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }

    let full = s.width();
    if full <= width {
        let mut out = s.to_string();
        out.extend(std::iter::repeat_n(' ', width - full));
        return out;
    }

    let budget = width - 1;
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(c);
        used += w;
    }
    out.extend(std::iter::repeat_n(' ', budget - used));
    out.push('…');
    out
}
