use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::util::unicode;

/// Single-line text buffer with a grapheme-aware cursor.
///
/// `selected_all` mirrors a freshly focused input with its whole contents
/// selected: the first inserted character replaces everything, while a
/// cursor movement just drops the selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    buffer: String,
    /// Byte offset, always on a grapheme boundary
    cursor: usize,
    selected_all: bool,
}

/// What a key did to the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    Edited,
    Moved,
    Ignored,
}

impl TextInput {
    /// Empty input
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-filled input, cursor at the end, contents selected
    pub fn with_selected(text: &str) -> Self {
        TextInput {
            buffer: text.to_string(),
            cursor: text.len(),
            selected_all: !text.is_empty(),
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_selected_all(&self) -> bool {
        self.selected_all
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.selected_all = false;
    }

    pub fn insert_str(&mut self, text: &str) {
        self.replace_selection();
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    pub fn insert_char(&mut self, c: char) {
        let mut tmp = [0u8; 4];
        self.insert_str(c.encode_utf8(&mut tmp));
    }

    pub fn backspace(&mut self) {
        if self.replace_selection() {
            return;
        }
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.buffer, self.cursor) {
            self.buffer.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if self.replace_selection() {
            return;
        }
        if let Some(next) = unicode::next_grapheme_boundary(&self.buffer, self.cursor) {
            self.buffer.replace_range(self.cursor..next, "");
        }
    }

    /// Delete from the start of the current word to the cursor
    pub fn delete_word_back(&mut self) {
        if self.replace_selection() {
            return;
        }
        let start = unicode::word_boundary_left(&self.buffer, self.cursor);
        self.buffer.replace_range(start..self.cursor, "");
        self.cursor = start;
    }

    pub fn move_left(&mut self) {
        self.selected_all = false;
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.buffer, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        self.selected_all = false;
        if let Some(next) = unicode::next_grapheme_boundary(&self.buffer, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn move_home(&mut self) {
        self.selected_all = false;
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.selected_all = false;
        self.cursor = self.buffer.len();
    }

    /// Apply a line-editing key. Enter, Esc and Tab are left to the caller.
    pub fn handle_key(&mut self, key: KeyEvent) -> InputOutcome {
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('a')) | (_, KeyCode::Home) => {
                self.move_home();
                InputOutcome::Moved
            }
            (KeyModifiers::CONTROL, KeyCode::Char('e')) | (_, KeyCode::End) => {
                self.move_end();
                InputOutcome::Moved
            }
            (KeyModifiers::ALT, KeyCode::Left) | (KeyModifiers::CONTROL, KeyCode::Left) => {
                self.selected_all = false;
                self.cursor = unicode::word_boundary_left(&self.buffer, self.cursor);
                InputOutcome::Moved
            }
            (KeyModifiers::ALT, KeyCode::Right) | (KeyModifiers::CONTROL, KeyCode::Right) => {
                self.selected_all = false;
                self.cursor = unicode::word_boundary_right(&self.buffer, self.cursor);
                InputOutcome::Moved
            }
            (_, KeyCode::Left) => {
                self.move_left();
                InputOutcome::Moved
            }
            (_, KeyCode::Right) => {
                self.move_right();
                InputOutcome::Moved
            }
            (KeyModifiers::CONTROL, KeyCode::Char('w'))
            | (KeyModifiers::ALT, KeyCode::Backspace) => {
                self.delete_word_back();
                InputOutcome::Edited
            }
            (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
                self.clear();
                InputOutcome::Edited
            }
            (_, KeyCode::Backspace) => {
                self.backspace();
                InputOutcome::Edited
            }
            (_, KeyCode::Delete) => {
                self.delete();
                InputOutcome::Edited
            }
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
                self.insert_char(c);
                InputOutcome::Edited
            }
            _ => InputOutcome::Ignored,
        }
    }

    /// Drop the selected text if everything is selected. Returns whether
    /// anything was replaced.
    fn replace_selection(&mut self) -> bool {
        if !self.selected_all {
            return false;
        }
        self.selected_all = false;
        self.buffer.clear();
        self.cursor = 0;
        true
    }
}
