use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use strum::Display;
use unicode_segmentation::UnicodeSegmentation;

use crate::storage::NoteHandle;

/// The single active interaction mode. The open note's handle lives inside
/// `Editing`, so a handle cannot exist in any other mode.
#[derive(Debug, Default, Display)]
pub enum Mode {
    #[default]
    #[strum(serialize = "IDLE")]
    Idle,
    #[strum(serialize = "NEW NOTE")]
    CreatePrompt,
    #[strum(serialize = "EDITING")]
    Editing(NoteHandle),
    #[strum(serialize = "BROWSING")]
    Browsing,
}

impl Mode {
    pub fn is_idle(&self) -> bool {
        matches!(self, Mode::Idle)
    }

    pub fn is_create_prompt(&self) -> bool {
        matches!(self, Mode::CreatePrompt)
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Mode::Editing(_))
    }

    pub fn is_browsing(&self) -> bool {
        matches!(self, Mode::Browsing)
    }

    pub fn open_note(&self) -> Option<&NoteHandle> {
        match self {
            Mode::Editing(handle) => Some(handle),
            _ => None,
        }
    }
}

fn is_plain(key: &KeyEvent) -> bool {
    !key.modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
}

/// Single-line entry used by the create prompt.
#[derive(Debug, Clone)]
pub struct FilenameInput {
    value: String,
    char_limit: usize,
    focused: bool,
}

impl FilenameInput {
    pub const PLACEHOLDER: &'static str = "Enter file name";

    pub fn new(char_limit: usize) -> Self {
        Self {
            value: String::new(),
            char_limit,
            focused: false,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.chars().take(self.char_limit).collect();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if !self.focused {
            return false;
        }
        match key.code {
            KeyCode::Backspace => self.value.pop().is_some(),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                let had_text = !self.value.is_empty();
                self.value.clear();
                had_text
            }
            KeyCode::Char(ch) if is_plain(&key) => {
                if self.value.chars().count() >= self.char_limit {
                    return false;
                }
                self.value.push(ch);
                true
            }
            _ => false,
        }
    }
}

/// In-memory text of the note being edited.
#[derive(Debug, Clone, Default)]
pub struct NoteBuffer {
    buffer: String,
    cursor: usize,
    dirty: bool,
    focused: bool,
    preferred_column: Option<usize>,
}

impl NoteBuffer {
    pub const PLACEHOLDER: &'static str = "Write your note here...";

    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the text and focuses the buffer for editing.
    pub fn load(&mut self, content: String) {
        self.cursor = content.len();
        self.buffer = content;
        self.dirty = false;
        self.focused = true;
        self.preferred_column = None;
    }

    pub fn value(&self) -> &str {
        &self.buffer
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.dirty = false;
        self.focused = false;
        self.preferred_column = None;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if !self.focused {
            return false;
        }
        match key.code {
            KeyCode::Enter => self.insert_newline(),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Tab => self.insert_char('\t'),
            KeyCode::Char(ch) if is_plain(&key) => self.insert_char(ch),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Up => self.move_up(),
            KeyCode::Down => self.move_down(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            _ => false,
        }
    }

    pub fn insert_char(&mut self, ch: char) -> bool {
        let mut scratch = [0u8; 4];
        let encoded = ch.encode_utf8(&mut scratch);
        self.buffer.insert_str(self.cursor, encoded);
        self.cursor += encoded.len();
        self.preferred_column = None;
        self.dirty = true;
        true
    }

    pub fn insert_newline(&mut self) -> bool {
        self.buffer.insert(self.cursor, '\n');
        self.cursor += 1;
        self.preferred_column = Some(0);
        self.dirty = true;
        true
    }

    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = prev_grapheme_boundary(&self.buffer, self.cursor);
        self.buffer.drain(prev..self.cursor);
        self.cursor = prev;
        self.preferred_column = None;
        self.dirty = true;
        true
    }

    pub fn delete(&mut self) -> bool {
        let next = next_grapheme_boundary(&self.buffer, self.cursor);
        if next == self.cursor {
            return false;
        }
        self.buffer.drain(self.cursor..next);
        self.preferred_column = None;
        self.dirty = true;
        true
    }

    pub fn move_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor = prev_grapheme_boundary(&self.buffer, self.cursor);
        self.preferred_column = None;
        true
    }

    pub fn move_right(&mut self) -> bool {
        let next = next_grapheme_boundary(&self.buffer, self.cursor);
        if next == self.cursor {
            return false;
        }
        self.cursor = next;
        self.preferred_column = None;
        true
    }

    pub fn move_home(&mut self) -> bool {
        let start = line_start(&self.buffer, self.cursor);
        if self.cursor == start {
            return false;
        }
        self.cursor = start;
        self.preferred_column = Some(0);
        true
    }

    pub fn move_end(&mut self) -> bool {
        let end = line_end(&self.buffer, self.cursor);
        if self.cursor == end {
            return false;
        }
        self.cursor = end;
        self.preferred_column = None;
        true
    }

    pub fn move_up(&mut self) -> bool {
        let current_line_start = line_start(&self.buffer, self.cursor);
        let column = self
            .preferred_column
            .unwrap_or_else(|| column_at(&self.buffer, current_line_start, self.cursor));
        if current_line_start == 0 {
            return false;
        }
        let prev_line_start = line_start(&self.buffer, current_line_start - 1);
        self.cursor = position_for_column(&self.buffer, prev_line_start, column);
        self.preferred_column = Some(column);
        true
    }

    pub fn move_down(&mut self) -> bool {
        let current_line_start = line_start(&self.buffer, self.cursor);
        let column = self
            .preferred_column
            .unwrap_or_else(|| column_at(&self.buffer, current_line_start, self.cursor));
        let current_line_end = line_end(&self.buffer, self.cursor);
        if current_line_end == self.buffer.len() {
            return false;
        }
        self.cursor = position_for_column(&self.buffer, current_line_end + 1, column);
        self.preferred_column = Some(column);
        true
    }

    /// Zero-based (line, column) of the cursor, in graphemes.
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let before = &self.buffer[..self.cursor];
        let line = before.matches('\n').count();
        let start = line_start(&self.buffer, self.cursor);
        (line, column_at(&self.buffer, start, self.cursor))
    }
}

fn prev_grapheme_boundary(text: &str, cursor: usize) -> usize {
    text[..cursor]
        .grapheme_indices(true)
        .next_back()
        .map(|(idx, _)| idx)
        .unwrap_or(0)
}

fn next_grapheme_boundary(text: &str, cursor: usize) -> usize {
    text[cursor..]
        .graphemes(true)
        .next()
        .map(|grapheme| cursor + grapheme.len())
        .unwrap_or(text.len())
}

fn line_start(text: &str, cursor: usize) -> usize {
    text[..cursor].rfind('\n').map(|idx| idx + 1).unwrap_or(0)
}

fn line_end(text: &str, cursor: usize) -> usize {
    text[cursor..]
        .find('\n')
        .map(|idx| cursor + idx)
        .unwrap_or(text.len())
}

fn column_at(text: &str, line_start: usize, cursor: usize) -> usize {
    text[line_start..cursor].graphemes(true).count()
}

fn position_for_column(text: &str, line_start: usize, column: usize) -> usize {
    let line_end = line_end(text, line_start);
    text[line_start..line_end]
        .grapheme_indices(true)
        .nth(column)
        .map(|(idx, _)| line_start + idx)
        .unwrap_or(line_end)
}
