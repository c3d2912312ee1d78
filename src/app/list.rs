use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::highlight::filter_regex;
use crate::storage::NoteSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterState {
    #[default]
    Unfiltered,
    /// The user is typing a filter; keys go to the filter text.
    Filtering,
    FilterApplied,
}

/// Scrollable, filterable list of notes shown while browsing.
#[derive(Debug, Clone, Default)]
pub struct NoteList {
    items: Vec<NoteSummary>,
    selected: usize,
    filter: String,
    filter_state: FilterState,
    width: u16,
    height: u16,
}

impl NoteList {
    pub const TITLE: &'static str = "All Notes";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_items(&mut self, items: Vec<NoteSummary>) {
        self.items = items;
        self.normalize_selection();
    }

    pub fn set_size(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn filter_state(&self) -> FilterState {
        self.filter_state
    }

    pub fn is_filtering(&self) -> bool {
        self.filter_state == FilterState::Filtering
    }

    pub fn visible_items(&self) -> Vec<&NoteSummary> {
        let regex = filter_regex(&self.filter);
        self.items
            .iter()
            .filter(|note| note.matches_filter(regex.as_ref()))
            .collect()
    }

    pub fn selected_index(&self) -> Option<usize> {
        if self.visible_items().is_empty() {
            None
        } else {
            Some(self.selected)
        }
    }

    pub fn selected_item(&self) -> Option<&NoteSummary> {
        self.visible_items().get(self.selected).copied()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.is_filtering() {
            return self.handle_filter_key(key);
        }
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return false;
        }
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::PageDown => self.move_selection(self.page_len()),
            KeyCode::PageUp => self.move_selection(-self.page_len()),
            KeyCode::Home | KeyCode::Char('g') => self.jump_to(0),
            KeyCode::End | KeyCode::Char('G') => {
                let last = self.visible_items().len().saturating_sub(1);
                self.jump_to(last)
            }
            KeyCode::Char('/') => {
                self.filter_state = FilterState::Filtering;
                true
            }
            _ => false,
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => self.clear_filter(),
            KeyCode::Enter => {
                self.filter_state = if self.filter.is_empty() {
                    FilterState::Unfiltered
                } else {
                    FilterState::FilterApplied
                };
            }
            KeyCode::Backspace => {
                self.filter.pop();
                self.normalize_selection();
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.filter.push(ch);
                self.selected = 0;
            }
            _ => return false,
        }
        true
    }

    pub fn clear_filter(&mut self) {
        self.filter.clear();
        self.filter_state = FilterState::Unfiltered;
        self.normalize_selection();
    }

    fn page_len(&self) -> isize {
        // each entry renders as a title line plus a description line
        isize::try_from(self.height / 2).unwrap_or(isize::MAX).max(1)
    }

    fn move_selection(&mut self, delta: isize) -> bool {
        let len = self.visible_items().len();
        if len == 0 {
            return false;
        }
        let target = self.selected.saturating_add_signed(delta).min(len - 1);
        self.jump_to(target)
    }

    fn jump_to(&mut self, index: usize) -> bool {
        if self.visible_items().is_empty() || index == self.selected {
            return false;
        }
        self.selected = index;
        true
    }

    fn normalize_selection(&mut self) {
        let len = self.visible_items().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}
