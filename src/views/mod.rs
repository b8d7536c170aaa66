//! Per-view state
//!
//! Every view owns its data and is rebuilt from scratch each time its route
//! is activated. Nothing here is shared between views.

pub mod chapter;
pub mod quiz;
pub mod unit_list;

pub use chapter::ChapterView;
pub use quiz::{AnswerSheet, QuizView};
pub use unit_list::UnitListView;

/// Fetch state of a view's data
///
/// Loading, failure and content are mutually exclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Load<T> {
    #[default]
    Loading,
    /// Fixed, view-specific message
    Failed(&'static str),
    Ready(T),
}

impl<T> Load<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Load::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Load::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&'static str> {
        match self {
            Load::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Vertical scroll position over rendered lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollState {
    /// Lines from top
    pub offset: usize,
    /// Total rendered lines (updated on render)
    pub total_lines: usize,
    /// Visible height in lines (updated on render)
    pub visible_height: usize,
}

impl ScrollState {
    /// Largest offset that still shows the last line
    pub fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.visible_height)
    }

    /// Clamp offset to the valid range
    pub fn clamp(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.offset = self.offset.saturating_add(lines);
        self.clamp();
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.offset = self.offset.saturating_sub(lines);
    }

    pub fn to_top(&mut self) {
        self.offset = 0;
    }

    pub fn to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Lines moved by a page key
    pub fn page(&self) -> usize {
        self.visible_height.saturating_sub(1).max(1)
    }

    /// Adjust the offset so `line` is on screen
    pub fn reveal(&mut self, line: usize) {
        if line < self.offset {
            self.offset = line;
        } else if self.visible_height > 0 && line >= self.offset + self.visible_height {
            self.offset = line + 1 - self.visible_height;
        }
    }
}
