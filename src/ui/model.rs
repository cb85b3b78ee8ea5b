//! View-model for the stack list viewer.
//!
//! Holds every piece of presentation state for one run: the items built from
//! grouped entries, the active filter, the selection and the detail height.
//! Key handling lives here so it can be tested without a terminal.

use super::filter::{filter, Rank};
use crate::aggregator::grouper::GroupedEntry;
use crate::output::text::{call_stack_string, entry_header};
use crate::parser::goroutine::DecodeResult;
use crate::utils::config::MIN_DETAIL_HEIGHT;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// One list entry: a title line and a multi-line description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackItem {
    /// Header summary, e.g. `goroutine [1 2] [running] [0s]`
    pub title: String,

    /// Call-stack string
    pub description: String,
}

impl StackItem {
    pub fn from_entry(entry: &GroupedEntry) -> Self {
        Self {
            title: entry_header(entry),
            description: call_stack_string(&entry.frames),
        }
    }

    /// Text the filter searches: title and description joined by a space
    pub fn filter_value(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}

/// Input mode of the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browsing,
    Filtering,
}

/// Presentation state for one viewer run
#[derive(Debug, Clone)]
pub struct ViewModel {
    title: String,
    items: Vec<StackItem>,
    filter_values: Vec<String>,
    total_goroutines: usize,
    visible: Vec<Rank>,
    selected: usize,
    detail_height: usize,
    page_size: usize,
    mode: Mode,
    query: String,
    should_quit: bool,
}

impl ViewModel {
    /// Build the view-model for a decoded dump
    ///
    /// # Arguments
    /// * `title` - Shown in the title bar (usually the dump path)
    /// * `result` - Decoded dump; items follow `result.grouped` order
    /// * `detail_height` - Call-stack lines per entry, at least `MIN_DETAIL_HEIGHT`
    pub fn new(title: impl Into<String>, result: &DecodeResult, detail_height: usize) -> Self {
        let items: Vec<StackItem> = result.grouped.iter().map(StackItem::from_entry).collect();
        let filter_values = items.iter().map(StackItem::filter_value).collect();
        let visible = (0..items.len()).map(Rank::unfiltered).collect();

        Self {
            title: title.into(),
            items,
            filter_values,
            total_goroutines: result.all.len(),
            visible,
            selected: 0,
            detail_height: detail_height.max(MIN_DETAIL_HEIGHT),
            page_size: 1,
            mode: Mode::Browsing,
            query: String::new(),
            should_quit: false,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn items(&self) -> &[StackItem] {
        &self.items
    }

    /// Entries currently shown, in display order
    pub fn visible(&self) -> &[Rank] {
        &self.visible
    }

    pub fn total_goroutines(&self) -> usize {
        self.total_goroutines
    }

    /// Position of the selection within `visible()`, if anything is shown
    pub fn selected(&self) -> Option<usize> {
        (!self.visible.is_empty()).then_some(self.selected)
    }

    pub fn selected_item(&self) -> Option<&StackItem> {
        self.visible
            .get(self.selected)
            .and_then(|rank| self.items.get(rank.index))
    }

    pub fn detail_height(&self) -> usize {
        self.detail_height
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Tell the model how many list rows the terminal currently shows
    pub fn set_viewport_rows(&mut self, rows: usize) {
        // Each entry takes a title line, its detail lines and a spacer
        self.page_size = (rows / (self.detail_height + 2)).max(1);
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.mode {
            Mode::Browsing => self.handle_browse_key(key.code),
            Mode::Filtering => self.handle_filter_key(key.code),
        }
    }

    fn handle_browse_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => {
                // First Esc drops an active filter, the next one quits
                if self.query.is_empty() {
                    self.should_quit = true;
                } else {
                    self.query.clear();
                    self.apply_filter();
                }
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.move_down(1),
            KeyCode::PageUp => self.move_up(self.page_size),
            KeyCode::PageDown => self.move_down(self.page_size),
            KeyCode::Home | KeyCode::Char('g') => self.selected = 0,
            KeyCode::End | KeyCode::Char('G') => {
                self.selected = self.visible.len().saturating_sub(1);
            }
            KeyCode::Char('+') => self.increase_detail(),
            KeyCode::Char('-') => self.decrease_detail(),
            KeyCode::Char('/') => self.mode = Mode::Filtering,
            _ => {}
        }
    }

    fn handle_filter_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.query.clear();
                self.mode = Mode::Browsing;
                self.apply_filter();
            }
            KeyCode::Enter => self.mode = Mode::Browsing,
            KeyCode::Backspace => {
                self.query.pop();
                self.apply_filter();
            }
            KeyCode::Char(c) => {
                self.query.push(c);
                self.apply_filter();
            }
            _ => {}
        }
    }

    pub fn increase_detail(&mut self) {
        self.detail_height += 1;
    }

    pub fn decrease_detail(&mut self) {
        if self.detail_height > MIN_DETAIL_HEIGHT {
            self.detail_height -= 1;
        }
    }

    fn move_up(&mut self, step: usize) {
        self.selected = self.selected.saturating_sub(step);
    }

    fn move_down(&mut self, step: usize) {
        let last = self.visible.len().saturating_sub(1);
        self.selected = (self.selected + step).min(last);
    }

    /// Recompute the visible entries from the current query
    fn apply_filter(&mut self) {
        self.visible = if self.query.is_empty() {
            (0..self.items.len()).map(Rank::unfiltered).collect()
        } else {
            filter(&self.query, &self.filter_values)
        };
        self.selected = 0;
    }
}
