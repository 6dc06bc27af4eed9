use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named, ordered collection of text entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    /// Opaque id, assigned once at creation
    pub id: String,
    /// Display title (never empty once committed)
    pub title: String,
    /// Entries in display order; duplicates allowed
    pub items: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl List {
    /// Create a list with a fresh random id, stamped with the current time
    pub fn new(title: String, items: Vec<String>) -> Self {
        List {
            id: new_list_id(),
            title,
            items,
            created_at: Utc::now(),
        }
    }
}

/// The complete state of all lists at a point in time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub lists: Vec<List>,
}

impl Snapshot {
    pub fn find(&self, id: &str) -> Option<&List> {
        self.lists.iter().find(|l| l.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut List> {
        self.lists.iter_mut().find(|l| l.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.lists.iter().position(|l| l.id == id)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.lists.iter().any(|l| l.id == id)
    }

    pub fn ids(&self) -> Vec<String> {
        self.lists.iter().map(|l| l.id.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// An id that is not used by any list in this snapshot
    pub fn fresh_id(&self) -> String {
        loop {
            let id = new_list_id();
            if !self.contains_id(&id) {
                return id;
            }
        }
    }
}

fn new_list_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
