use serde::Serialize;

use crate::model::list::List;
use crate::notify::{Notifier, NotifyKind};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ListJson {
    pub position: usize,
    pub id: String,
    pub title: String,
    pub items: Vec<String>,
    pub created_at: String,
}

#[derive(Serialize)]
pub struct ThemeJson {
    pub theme: String,
}

#[derive(Serialize)]
pub struct ExportJson {
    pub path: String,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

/// `position` is 1-based
pub fn list_to_json(position: usize, list: &List) -> ListJson {
    ListJson {
        position,
        id: list.id.clone(),
        title: list.title.clone(),
        items: list.items.clone(),
        created_at: list.created_at.to_rfc3339(),
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// Length of the id prefix shown in listings
pub const SHORT_ID: usize = 8;

pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID) {
        Some((i, _)) => &id[..i],
        None => id,
    }
}

/// One line per list: `2. Team  (3 items)  [a1b2c3d4]`
pub fn format_list_line(position: usize, list: &List) -> String {
    let n = list.items.len();
    format!(
        "{}. {}  ({} item{})  [{}]",
        position,
        list.title,
        n,
        if n == 1 { "" } else { "s" },
        short_id(&list.id)
    )
}

/// A list's title followed by its numbered items
pub fn format_list_detail(list: &List) -> String {
    let mut out = list.title.clone();
    if list.items.is_empty() {
        out.push_str("\n  (no items)");
    }
    for (i, item) in list.items.iter().enumerate() {
        out.push_str(&format!("\n  {}. {}", i + 1, item));
    }
    out
}

/// Notifier for the CLI: acknowledgments to stdout, errors to stderr
pub struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn notify(&mut self, message: &str, kind: NotifyKind) {
        match kind {
            NotifyKind::Error => eprintln!("error: {}", message),
            NotifyKind::Info | NotifyKind::Success => println!("{}", message),
        }
    }
}
