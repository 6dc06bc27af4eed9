use std::collections::HashSet;

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde_json::Value;

use crate::io::kv::KeyValueStore;
use crate::model::{List, Snapshot, ThemeMode};

/// Key holding the serialized snapshot
pub const LISTS_KEY: &str = "dawatLists";
/// Key holding the theme preference
pub const THEME_KEY: &str = "dawatTheme";

/// Title given to a stored list whose title is blank
const UNTITLED: &str = "Untitled";

/// Error type for snapshot writes
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("could not serialize lists: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("could not write {key}: {source}")]
    Write {
        key: &'static str,
        source: std::io::Error,
    },
    #[error("could not remove {key}: {source}")]
    Remove {
        key: &'static str,
        source: std::io::Error,
    },
}

/// Load the snapshot. Never fails: absent, unreadable or malformed data
/// all come back as an empty snapshot.
pub fn load<K: KeyValueStore + ?Sized>(kv: &K) -> Snapshot {
    let raw = match kv.get(LISTS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("event=load module=persistence status=empty reason=absent");
            return Snapshot::default();
        }
        Err(e) => {
            warn!(
                "event=load module=persistence status=degraded reason=read_error error={}",
                e
            );
            return Snapshot::default();
        }
    };
    decode_snapshot(&raw)
}

/// Replace the stored snapshot with `snapshot`
pub fn save<K: KeyValueStore + ?Sized>(
    kv: &mut K,
    snapshot: &Snapshot,
) -> Result<(), PersistenceError> {
    let content = serde_json::to_string(snapshot)?;
    kv.set(LISTS_KEY, &content)
        .map_err(|source| PersistenceError::Write {
            key: LISTS_KEY,
            source,
        })?;
    debug!(
        "event=save module=persistence status=ok lists={} bytes={}",
        snapshot.lists.len(),
        content.len()
    );
    Ok(())
}

/// Drop the stored snapshot entirely
pub fn clear<K: KeyValueStore + ?Sized>(kv: &mut K) -> Result<(), PersistenceError> {
    kv.remove(LISTS_KEY)
        .map_err(|source| PersistenceError::Remove {
            key: LISTS_KEY,
            source,
        })
}

/// Read the theme preference, defaulting to light on anything unexpected
pub fn load_theme<K: KeyValueStore + ?Sized>(kv: &K) -> ThemeMode {
    match kv.get(THEME_KEY) {
        Ok(Some(raw)) => raw.parse().unwrap_or_else(|e| {
            warn!("event=load_theme module=persistence status=degraded error={}", e);
            ThemeMode::default()
        }),
        _ => ThemeMode::default(),
    }
}

pub fn save_theme<K: KeyValueStore + ?Sized>(
    kv: &mut K,
    mode: ThemeMode,
) -> Result<(), PersistenceError> {
    kv.set(THEME_KEY, mode.as_str())
        .map_err(|source| PersistenceError::Write {
            key: THEME_KEY,
            source,
        })
}

/// Decode stored text into a snapshot, tolerating corruption.
///
/// A top-level value that is not an object with a `lists` array yields an
/// empty snapshot. Inside the array, unusable entries are dropped one by one
/// so a single bad list cannot take the rest down with it.
pub fn decode_snapshot(raw: &str) -> Snapshot {
    let value: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            warn!(
                "event=load module=persistence status=degraded reason=parse_error error={}",
                e
            );
            return Snapshot::default();
        }
    };
    let entries = match value.get("lists").and_then(Value::as_array) {
        Some(entries) => entries,
        None => {
            warn!("event=load module=persistence status=degraded reason=lists_not_array");
            return Snapshot::default();
        }
    };

    let now = Utc::now();
    let mut snapshot = Snapshot::default();
    let mut seen: HashSet<String> = HashSet::new();
    let mut dropped = 0usize;

    for entry in entries {
        let Some(mut list) = decode_list(entry, now) else {
            dropped += 1;
            continue;
        };
        if !seen.insert(list.id.clone()) {
            // Keep the data, give the duplicate a new identity
            list.id = snapshot.fresh_id();
            seen.insert(list.id.clone());
        }
        snapshot.lists.push(list);
    }

    if dropped > 0 {
        warn!(
            "event=load module=persistence status=partial dropped_lists={}",
            dropped
        );
    }
    snapshot
}

fn decode_list(entry: &Value, now: DateTime<Utc>) -> Option<List> {
    let obj = entry.as_object()?;
    let id = obj.get("id")?.as_str()?.to_string();
    let title = obj.get("title")?.as_str()?.trim().to_string();
    let items = obj
        .get("items")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    let created_at = obj
        .get("createdAt")
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(now);

    Some(List {
        id,
        title: if title.is_empty() {
            UNTITLED.to_string()
        } else {
            title
        },
        items,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::kv::{FileKv, MemoryKv};
    use tempfile::TempDir;

    fn sample() -> Snapshot {
        let mut team = List::new("Team".into(), vec!["Ali".into(), "Sara".into(), "Ali".into()]);
        team.id = "team01".into();
        let mut bravo = List::new("Bravo".into(), vec![]);
        bravo.id = "bravo1".into();
        Snapshot {
            lists: vec![team, bravo],
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut kv = MemoryKv::new();
        let snapshot = sample();
        save(&mut kv, &snapshot).unwrap();
        assert_eq!(load(&kv), snapshot);
        assert_eq!(kv.writes(), 1);
    }

    #[test]
    fn save_then_load_round_trips_on_disk() {
        let tmp = TempDir::new().unwrap();
        let mut kv = FileKv::new(tmp.path());
        let snapshot = sample();
        save(&mut kv, &snapshot).unwrap();
        assert_eq!(load(&FileKv::new(tmp.path())), snapshot);
    }

    #[test]
    fn absent_key_loads_empty() {
        assert!(load(&MemoryKv::new()).is_empty());
    }

    #[test]
    fn unparseable_data_loads_empty() {
        let kv = MemoryKv::with_entry(LISTS_KEY, "not json {{{");
        assert!(load(&kv).is_empty());
    }

    #[test]
    fn lists_not_an_array_loads_empty() {
        for raw in [r#"{"lists": {}}"#, r#"{"lists": "x"}"#, r#"{}"#, "[]", "42", "null"] {
            let kv = MemoryKv::with_entry(LISTS_KEY, raw);
            assert!(load(&kv).is_empty(), "input {} should load empty", raw);
        }
    }

    #[test]
    fn malformed_entries_are_dropped_individually() {
        let raw = r#"{"lists": [
            {"id": "a", "title": "Good", "items": ["x", 3, null, "  ", "y"], "createdAt": "2025-01-02T03:04:05.000Z"},
            {"title": "no id"},
            "just a string",
            {"id": "b", "title": "   ", "items": "not an array"}
        ]}"#;
        let snapshot = decode_snapshot(raw);
        assert_eq!(snapshot.lists.len(), 2);
        assert_eq!(snapshot.lists[0].items, vec!["x", "y"]);
        assert_eq!(
            snapshot.lists[0].created_at.to_rfc3339(),
            "2025-01-02T03:04:05+00:00"
        );
        assert_eq!(snapshot.lists[1].title, "Untitled");
        assert!(snapshot.lists[1].items.is_empty());
    }

    #[test]
    fn duplicate_ids_get_fresh_identity() {
        let raw = r#"{"lists": [
            {"id": "same", "title": "One", "items": []},
            {"id": "same", "title": "Two", "items": []}
        ]}"#;
        let snapshot = decode_snapshot(raw);
        assert_eq!(snapshot.lists.len(), 2);
        assert_eq!(snapshot.lists[0].id, "same");
        assert_ne!(snapshot.lists[1].id, "same");
        assert_eq!(snapshot.lists[1].title, "Two");
    }

    #[test]
    fn write_failure_is_reported() {
        let mut kv = MemoryKv::new();
        kv.set_fail_writes(true);
        let err = save(&mut kv, &sample()).unwrap_err();
        assert!(matches!(err, PersistenceError::Write { key: LISTS_KEY, .. }));
        assert!(err.to_string().contains("dawatLists"));
    }

    #[test]
    fn theme_defaults_to_light() {
        let mut kv = MemoryKv::new();
        assert_eq!(load_theme(&kv), ThemeMode::Light);
        save_theme(&mut kv, ThemeMode::Dark).unwrap();
        assert_eq!(load_theme(&kv), ThemeMode::Dark);
        let kv = MemoryKv::with_entry(THEME_KEY, "purple");
        assert_eq!(load_theme(&kv), ThemeMode::Light);
    }
}
