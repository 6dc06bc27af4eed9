use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDateTime, Utc};

use crate::io::kv::atomic_write;
use crate::model::list::Snapshot;

/// Heading at the top of every exported document
pub const EXPORT_HEADING: &str = "Dawat-E-Mehnat Lists";

/// Render every list as a plain-text document, in snapshot order.
///
/// ```text
/// Dawat-E-Mehnat Lists
/// Exported: 2025-03-01 09:30:00
///
/// 1. Team
///   1) Ali
///   2) Sara
///
/// ```
pub fn render_text(snapshot: &Snapshot, exported_at: NaiveDateTime) -> String {
    let mut out = String::new();
    out.push_str(EXPORT_HEADING);
    out.push('\n');
    out.push_str(&format!(
        "Exported: {}\n\n",
        exported_at.format("%Y-%m-%d %H:%M:%S")
    ));
    for (idx, list) in snapshot.lists.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", idx + 1, list.title));
        for (i, item) in list.items.iter().enumerate() {
            out.push_str(&format!("  {}) {}\n", i + 1, item));
        }
        out.push('\n');
    }
    out
}

/// `Dawat_E_Mehnat_Lists_2025-03-01-09-30-00.txt`
pub fn default_file_name(now: DateTime<Utc>) -> String {
    format!(
        "Dawat_E_Mehnat_Lists_{}.txt",
        now.format("%Y-%m-%d-%H-%M-%S")
    )
}

/// Write the export into `dir` under the default file name. Returns the
/// written path.
pub fn export_to_dir(dir: &Path, snapshot: &Snapshot) -> io::Result<PathBuf> {
    let path = dir.join(default_file_name(Utc::now()));
    let text = render_text(snapshot, Local::now().naive_local());
    atomic_write(&path, text.as_bytes())?;
    Ok(path)
}
