//! Inline edit sessions for list titles and items.
//!
//! A session exists only between "open" and "commit"/"cancel"; the store
//! never sees the buffer until commit. Every view rebuild calls
//! [`EditSessions::discard_all`], so a mutation anywhere closes any edit that
//! has not been committed yet.

use super::text_input::TextInput;

/// An editable field on a card
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Field {
    Title { list_id: String },
    Item { list_id: String, index: usize },
}

impl Field {
    pub fn list_id(&self) -> &str {
        match self {
            Field::Title { list_id } | Field::Item { list_id, .. } => list_id,
        }
    }
}

/// Result of committing a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Commit {
    /// Nothing to write; the view is still rebuilt
    NoChange,
    /// Value to hand to `update_title` / `update_item`
    Write(String),
}

#[derive(Debug, Clone)]
pub struct EditSession {
    pub field: Field,
    /// Committed value at the time the session opened
    pub original: String,
    pub input: TextInput,
}

impl EditSession {
    fn resolve(&self) -> Commit {
        let value = self.input.text().trim();
        match self.field {
            // Empty title reverts to the original
            Field::Title { .. } if value.is_empty() => Commit::NoChange,
            Field::Item { .. } if value.is_empty() => Commit::NoChange,
            _ if value == self.original => Commit::NoChange,
            _ => Commit::Write(value.to_string()),
        }
    }
}

/// All open sessions, at most one per field. One of them may hold keyboard
/// focus.
#[derive(Debug, Default)]
pub struct EditSessions {
    open: Vec<EditSession>,
    focused: Option<Field>,
}

impl EditSessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session on `field` pre-filled with `committed` and focus it.
    /// Returns false (and changes nothing) if that field already has one.
    pub fn open(&mut self, field: Field, committed: &str) -> bool {
        if self.is_open(&field) {
            return false;
        }
        self.open.push(EditSession {
            field: field.clone(),
            original: committed.to_string(),
            input: TextInput::with_selected(committed),
        });
        self.focused = Some(field);
        true
    }

    pub fn is_open(&self, field: &Field) -> bool {
        self.open.iter().any(|s| &s.field == field)
    }

    pub fn get(&self, field: &Field) -> Option<&EditSession> {
        self.open.iter().find(|s| &s.field == field)
    }

    pub fn get_mut(&mut self, field: &Field) -> Option<&mut EditSession> {
        self.open.iter_mut().find(|s| &s.field == field)
    }

    pub fn focused(&self) -> Option<&EditSession> {
        self.focused.as_ref().and_then(|f| self.get(f))
    }

    pub fn focused_mut(&mut self) -> Option<&mut EditSession> {
        let field = self.focused.clone()?;
        self.get_mut(&field)
    }

    pub fn focused_field(&self) -> Option<&Field> {
        self.focused.as_ref()
    }

    /// Close the session on `field` and decide what to write. `None` if the
    /// field had no session.
    pub fn commit(&mut self, field: &Field) -> Option<Commit> {
        let session = self.take(field)?;
        Some(session.resolve())
    }

    /// Close the session on `field` without writing anything
    pub fn cancel(&mut self, field: &Field) -> bool {
        self.take(field).is_some()
    }

    /// Close every session without committing. Returns how many were open.
    pub fn discard_all(&mut self) -> usize {
        self.focused = None;
        std::mem::take(&mut self.open).len()
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    fn take(&mut self, field: &Field) -> Option<EditSession> {
        let pos = self.open.iter().position(|s| &s.field == field)?;
        if self.focused.as_ref() == Some(field) {
            self.focused = None;
        }
        Some(self.open.remove(pos))
    }
}
