//! Application state and key handling.
//!
//! [`App`] wraps an [`ArtworkBrowser`] with the bits of state that only the
//! terminal needs: the row cursor, the input mode and the spinner tick. Key
//! handling is synchronous; any key that needs a page fetch returns the
//! [`PendingLoad`] for the runtime to spawn.

mod runtime;

pub use runtime::run;

use artworks_lib::api::query::FilterField;
use artworks_lib::api::query::Filters;
use artworks_lib::api::query::Page;
use artworks_lib::browser::ArtworkBrowser;
use artworks_lib::browser::LoadOutcome;
use artworks_lib::browser::PendingLoad;
use artworks_lib::error::Error;
use artworks_lib::model::Artwork;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;

use crate::widgets::Spinner;

/// Input mode of the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Navigating and selecting rows.
    Browse,
    /// Typing into one of the column filters.
    EditFilter { field: FilterField, buffer: String },
    /// The "select first N rows" popover is open.
    SelectCount { buffer: String },
}

/// A finished fetch, tagged with the sequence number it was issued under.
#[derive(Debug)]
pub struct CompletedLoad {
    pub seq: u64,
    pub result: Result<Page, Error>,
}

/// Terminal application state.
pub struct App {
    browser: ArtworkBrowser,
    cursor: usize,
    mode: Mode,
    spinner: Spinner,
    tick: usize,
    should_quit: bool,
}

impl App {
    /// Create the app around a browser.
    pub fn new(browser: ArtworkBrowser) -> Self {
        Self {
            browser,
            cursor: 0,
            mode: Mode::Browse,
            spinner: Spinner::default(),
            tick: 0,
            should_quit: false,
        }
    }

    pub fn browser(&self) -> &ArtworkBrowser {
        &self.browser
    }

    /// Index of the highlighted row among the visible rows.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// How often the spinner advances while loading.
    pub fn spinner_interval(&self) -> std::time::Duration {
        self.spinner.frame_duration()
    }

    /// Current spinner frame.
    pub fn spinner_frame(&self) -> &str {
        self.spinner.frame(self.tick)
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Issue the initial page load.
    pub fn start(&mut self) -> PendingLoad {
        self.browser.begin_load()
    }

    /// Advance the spinner by one frame.
    pub fn tick(&mut self) {
        self.tick = (self.tick + 1) % self.spinner.frame_count();
    }

    /// Apply a finished fetch.
    pub fn apply_load(&mut self, done: CompletedLoad) {
        let outcome = self.browser.complete_load(done.seq, done.result);
        debug!("Load {} completed: {:?}", done.seq, outcome);
        if outcome == LoadOutcome::Applied {
            self.cursor = 0;
        }
        self.clamp_cursor();
    }

    /// Handle one key press. Returns a load to run if the key changed the page
    /// window or the filters.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<PendingLoad> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return None;
        }

        match &mut self.mode {
            Mode::Browse => self.handle_browse_key(key),
            Mode::EditFilter { field, buffer } => match key.code {
                KeyCode::Esc => {
                    self.mode = Mode::Browse;
                    None
                }
                KeyCode::Enter => {
                    let mut filters = self.browser.state().filters().clone();
                    filters.set(*field, buffer.trim());
                    self.mode = Mode::Browse;
                    self.apply_filters(filters)
                }
                KeyCode::Backspace => {
                    buffer.pop();
                    None
                }
                KeyCode::Char(c) => {
                    buffer.push(c);
                    None
                }
                _ => None,
            },
            Mode::SelectCount { buffer } => match key.code {
                KeyCode::Esc => {
                    self.mode = Mode::Browse;
                    None
                }
                KeyCode::Enter => {
                    let input = std::mem::take(buffer);
                    self.mode = Mode::Browse;
                    self.browser.select_first_n(&input);
                    None
                }
                KeyCode::Backspace => {
                    buffer.pop();
                    None
                }
                KeyCode::Char(c) => {
                    buffer.push(c);
                    None
                }
                _ => None,
            },
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> Option<PendingLoad> {
        let state = self.browser.state();
        let page_size = state.page_size();

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor += 1;
                self.clamp_cursor();
                None
            }
            KeyCode::Char(' ') => {
                if let Some(id) = self.cursor_row().and_then(|a| a.id) {
                    self.browser.toggle_row(id);
                }
                None
            }
            KeyCode::Char('a') => {
                let checked = !state.selection().is_select_all();
                self.browser.on_select_all_toggle(checked);
                None
            }
            KeyCode::Right | KeyCode::PageDown | KeyCode::Char('l') => {
                let offset = state.next_offset()?;
                self.browser.on_page_change(offset, page_size)
            }
            KeyCode::Left | KeyCode::PageUp | KeyCode::Char('h') => {
                let offset = state.prev_offset()?;
                self.browser.on_page_change(offset, page_size)
            }
            KeyCode::Home | KeyCode::Char('g') => {
                if state.offset() == 0 {
                    return None;
                }
                self.browser.on_page_change(0, page_size)
            }
            KeyCode::End | KeyCode::Char('G') => {
                let last = state.last_page_offset();
                if state.offset() == last {
                    return None;
                }
                self.browser.on_page_change(last, page_size)
            }
            KeyCode::Char(c @ ('t' | 'o' | 'r')) => {
                let field = match c {
                    't' => FilterField::Title,
                    'o' => FilterField::PlaceOfOrigin,
                    _ => FilterField::ArtistDisplay,
                };
                self.mode = Mode::EditFilter {
                    field,
                    buffer: state.filters().get(field).to_string(),
                };
                None
            }
            KeyCode::Char('x') => {
                if !state.filters().is_active() {
                    return None;
                }
                self.apply_filters(Filters::new())
            }
            KeyCode::Char('n') => {
                self.mode = Mode::SelectCount {
                    buffer: String::new(),
                };
                None
            }
            _ => None,
        }
    }

    fn apply_filters(&mut self, filters: Filters) -> Option<PendingLoad> {
        if &filters == self.browser.state().filters() {
            return None;
        }
        self.cursor = 0;
        Some(self.browser.on_filter_change(filters))
    }

    fn cursor_row(&self) -> Option<&Artwork> {
        self.browser.state().visible_records().nth(self.cursor)
    }

    fn clamp_cursor(&mut self) {
        let visible = self.browser.state().visible_records().count();
        self.cursor = self.cursor.min(visible.saturating_sub(1));
    }
}
