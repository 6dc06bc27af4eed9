use log::{debug, info};

use crate::io::kv::KeyValueStore;
use crate::io::persistence::{self, PersistenceError};
use crate::model::{List, Snapshot};

/// Error type for list operations
#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error("{0} cannot be empty")]
    Validation(&'static str),
    #[error("list not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Whether an operation changed (and therefore persisted) anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Applied,
    Unchanged,
}

/// Owner of the canonical snapshot.
///
/// Every operation either leaves the snapshot alone (`Change::Unchanged`,
/// nothing written) or persists exactly once and then swaps in the new
/// snapshot. A failed write leaves the previous snapshot in place.
pub struct ListStore<K: KeyValueStore> {
    snapshot: Snapshot,
    kv: K,
    revision: u64,
}

impl<K: KeyValueStore> ListStore<K> {
    /// Load the stored snapshot (fail-open) and take ownership of the store
    pub fn open(kv: K) -> Self {
        let snapshot = persistence::load(&kv);
        info!(
            "event=store_open module=store status=ok lists={}",
            snapshot.lists.len()
        );
        ListStore {
            snapshot,
            kv,
            revision: 0,
        }
    }

    /// Read-only view of the current state
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Number of committed mutations since open
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn kv(&self) -> &K {
        &self.kv
    }

    pub fn kv_mut(&mut self) -> &mut K {
        &mut self.kv
    }

    /// Append a new list. Title and items are trimmed; blank items are
    /// dropped. Returns the new list's id.
    pub fn create_list(&mut self, title: &str, items: Vec<String>) -> Result<String, ListError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ListError::Validation("title"));
        }
        let items: Vec<String> = items
            .iter()
            .map(|item| item.trim())
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect();
        let mut list = List::new(title.to_string(), items);
        list.id = self.snapshot.fresh_id();
        let id = list.id.clone();
        self.apply("list_created", |snapshot| {
            snapshot.lists.push(list);
            Change::Applied
        })?;
        Ok(id)
    }

    /// Remove a list; unknown ids are a no-op
    pub fn delete_list(&mut self, id: &str) -> Result<Change, ListError> {
        self.apply("list_deleted", |snapshot| {
            match snapshot.position(id) {
                Some(pos) => {
                    snapshot.lists.remove(pos);
                    Change::Applied
                }
                None => not_found(id),
            }
        })
    }

    /// Append `text` as given to the end of a list
    pub fn add_item(&mut self, id: &str, text: &str) -> Result<Change, ListError> {
        self.apply("item_added", |snapshot| match snapshot.find_mut(id) {
            Some(list) => {
                list.items.push(text.to_string());
                Change::Applied
            }
            None => not_found(id),
        })
    }

    /// Remove the item at `index`; out-of-range indices are a no-op
    pub fn remove_item(&mut self, id: &str, index: usize) -> Result<Change, ListError> {
        self.apply("item_removed", |snapshot| match snapshot.find_mut(id) {
            Some(list) if index < list.items.len() => {
                list.items.remove(index);
                Change::Applied
            }
            Some(_) => {
                debug!(
                    "event=item_removed module=store status=noop reason=index_out_of_range id={} index={}",
                    id, index
                );
                Change::Unchanged
            }
            None => not_found(id),
        })
    }

    /// Replace the item at `index` when the text actually differs
    pub fn update_item(
        &mut self,
        id: &str,
        index: usize,
        new_text: &str,
    ) -> Result<Change, ListError> {
        self.apply("item_updated", |snapshot| match snapshot.find_mut(id) {
            Some(list) => match list.items.get_mut(index) {
                Some(item) if item != new_text => {
                    *item = new_text.to_string();
                    Change::Applied
                }
                _ => Change::Unchanged,
            },
            None => not_found(id),
        })
    }

    /// Rename a list. A blank title keeps the previous one.
    pub fn update_title(&mut self, id: &str, new_title: &str) -> Result<Change, ListError> {
        let trimmed = new_title.trim();
        self.apply("title_updated", |snapshot| match snapshot.find_mut(id) {
            Some(list) => {
                if trimmed.is_empty() || list.title == trimmed {
                    Change::Unchanged
                } else {
                    list.title = trimmed.to_string();
                    Change::Applied
                }
            }
            None => not_found(id),
        })
    }

    /// Move a list to `target_index`, counted in the sequence with the moved
    /// list already taken out.
    pub fn reorder_list(&mut self, id: &str, target_index: usize) -> Result<Change, ListError> {
        self.apply("list_reordered", |snapshot| {
            let Some(from) = snapshot.position(id) else {
                return not_found(id);
            };
            let moved = snapshot.lists.remove(from);
            let to = target_index.min(snapshot.lists.len());
            snapshot.lists.insert(to, moved);
            if to == from {
                Change::Unchanged
            } else {
                Change::Applied
            }
        })
    }

    /// Forget every list and delete the stored key
    pub fn reset(&mut self) -> Result<Change, ListError> {
        persistence::clear(&mut self.kv)?;
        self.snapshot = Snapshot::default();
        self.revision += 1;
        info!("event=store_reset module=store status=ok");
        Ok(Change::Applied)
    }

    /// Run `f` against a copy of the snapshot; persist and commit the copy
    /// only if it reports a change.
    fn apply<F>(&mut self, event: &str, f: F) -> Result<Change, ListError>
    where
        F: FnOnce(&mut Snapshot) -> Change,
    {
        let mut next = self.snapshot.clone();
        if f(&mut next) == Change::Unchanged {
            return Ok(Change::Unchanged);
        }
        persistence::save(&mut self.kv, &next)?;
        self.snapshot = next;
        self.revision += 1;
        info!(
            "event={} module=store status=ok revision={}",
            event, self.revision
        );
        Ok(Change::Applied)
    }
}

fn not_found(id: &str) -> Change {
    debug!("event=lookup module=store status=noop reason=not_found id={}", id);
    Change::Unchanged
}

/// Split multi-line input into trimmed, non-blank entries
pub fn parse_item_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::kv::MemoryKv;
    use crate::io::persistence::LISTS_KEY;

    fn store_with(titles: &[&str]) -> (ListStore<MemoryKv>, Vec<String>) {
        let mut store = ListStore::open(MemoryKv::new());
        let ids = titles
            .iter()
            .map(|t| store.create_list(t, vec![]).unwrap())
            .collect();
        (store, ids)
    }

    fn titles<K: KeyValueStore>(store: &ListStore<K>) -> Vec<&str> {
        store
            .snapshot()
            .lists
            .iter()
            .map(|l| l.title.as_str())
            .collect()
    }

    #[test]
    fn create_list_appends_with_unique_id() {
        let (mut store, ids) = store_with(&["A", "B"]);
        let id = store
            .create_list("  Team  ", vec!["Ali".into(), " ".into(), "Sara".into()])
            .unwrap();
        assert!(!ids.contains(&id));
        let list = store.snapshot().lists.last().unwrap();
        assert_eq!(list.id, id);
        assert_eq!(list.title, "Team");
        assert_eq!(list.items, vec!["Ali", "Sara"]);
        assert_eq!(store.kv().writes(), 3);
    }

    #[test]
    fn create_list_trims_padded_items() {
        let mut store = ListStore::open(MemoryKv::new());
        store
            .create_list("Team", vec!["  Ali  ".into(), "   ".into(), "Sara ".into()])
            .unwrap();
        assert_eq!(store.snapshot().lists[0].items, vec!["Ali", "Sara"]);
    }

    #[test]
    fn create_list_rejects_blank_title_without_writing() {
        let mut store = ListStore::open(MemoryKv::new());
        let err = store.create_list("   ", vec!["x".into()]).unwrap_err();
        assert!(matches!(err, ListError::Validation("title")));
        assert!(store.snapshot().is_empty());
        assert_eq!(store.kv().writes(), 0);
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn delete_list_is_idempotent() {
        let (mut store, ids) = store_with(&["A", "B"]);
        assert_eq!(store.delete_list(&ids[0]).unwrap(), Change::Applied);
        let writes = store.kv().writes();
        assert_eq!(store.delete_list(&ids[0]).unwrap(), Change::Unchanged);
        assert_eq!(store.kv().writes(), writes);
        assert_eq!(titles(&store), vec!["B"]);
    }

    #[test]
    fn add_item_to_unknown_list_is_noop() {
        let (mut store, ids) = store_with(&["A"]);
        assert_eq!(store.add_item("missing", "x").unwrap(), Change::Unchanged);
        assert_eq!(store.add_item(&ids[0], "Ali").unwrap(), Change::Applied);
        assert_eq!(store.add_item(&ids[0], "Ali").unwrap(), Change::Applied);
        assert_eq!(store.snapshot().lists[0].items, vec!["Ali", "Ali"]);
    }

    #[test]
    fn remove_item_only_touches_target_list() {
        let mut store = ListStore::open(MemoryKv::new());
        let a = store
            .create_list("A", vec!["a1".into(), "a2".into(), "a3".into()])
            .unwrap();
        let b = store
            .create_list("B", vec!["b1".into(), "b2".into()])
            .unwrap();

        store.remove_item(&a, 1).unwrap();
        assert_eq!(store.snapshot().find(&a).unwrap().items, vec!["a1", "a3"]);
        assert_eq!(store.snapshot().find(&b).unwrap().items, vec!["b1", "b2"]);

        // Out of range: nothing changes anywhere, nothing written
        let writes = store.kv().writes();
        assert_eq!(store.remove_item(&a, 7).unwrap(), Change::Unchanged);
        assert_eq!(store.remove_item(&b, 2).unwrap(), Change::Unchanged);
        assert_eq!(store.kv().writes(), writes);
        assert_eq!(store.snapshot().find(&a).unwrap().items, vec!["a1", "a3"]);
        assert_eq!(store.snapshot().find(&b).unwrap().items, vec!["b1", "b2"]);
    }

    #[test]
    fn update_item_skips_identical_text() {
        let mut store = ListStore::open(MemoryKv::new());
        let id = store.create_list("A", vec!["Ali".into()]).unwrap();
        let writes = store.kv().writes();
        assert_eq!(store.update_item(&id, 0, "Ali").unwrap(), Change::Unchanged);
        assert_eq!(store.kv().writes(), writes);
        assert_eq!(store.update_item(&id, 0, "Alia").unwrap(), Change::Applied);
        assert_eq!(store.kv().writes(), writes + 1);
        // Empty text is accepted at this layer
        assert_eq!(store.update_item(&id, 0, "").unwrap(), Change::Applied);
        assert_eq!(store.snapshot().lists[0].items, vec![""]);
        assert_eq!(store.update_item(&id, 5, "x").unwrap(), Change::Unchanged);
    }

    #[test]
    fn update_title_reverts_on_blank() {
        let (mut store, ids) = store_with(&["Team"]);
        assert_eq!(store.update_title(&ids[0], "   ").unwrap(), Change::Unchanged);
        assert_eq!(titles(&store), vec!["Team"]);
        assert_eq!(store.update_title(&ids[0], "Team").unwrap(), Change::Unchanged);
        assert_eq!(
            store.update_title(&ids[0], " Team Alpha ").unwrap(),
            Change::Applied
        );
        assert_eq!(titles(&store), vec!["Team Alpha"]);
    }

    #[test]
    fn reorder_uses_removed_then_reinsert_index() {
        let (mut store, ids) = store_with(&["A", "B", "C"]);
        store.reorder_list(&ids[0], 1).unwrap();
        assert_eq!(titles(&store), vec!["B", "A", "C"]);

        store.reorder_list(&ids[0], 2).unwrap();
        assert_eq!(titles(&store), vec!["B", "C", "A"]);

        store.reorder_list(&ids[0], 0).unwrap();
        assert_eq!(titles(&store), vec!["A", "B", "C"]);

        // Past the end clamps to the end
        store.reorder_list(&ids[1], 99).unwrap();
        assert_eq!(titles(&store), vec!["A", "C", "B"]);
    }

    #[test]
    fn reorder_to_same_place_writes_nothing() {
        let (mut store, ids) = store_with(&["A", "B", "C"]);
        let writes = store.kv().writes();
        assert_eq!(store.reorder_list(&ids[1], 1).unwrap(), Change::Unchanged);
        assert_eq!(store.reorder_list("missing", 0).unwrap(), Change::Unchanged);
        assert_eq!(store.kv().writes(), writes);
    }

    #[test]
    fn failed_write_keeps_previous_snapshot() {
        let (mut store, ids) = store_with(&["A"]);
        store.kv_mut().set_fail_writes(true);
        let err = store.add_item(&ids[0], "x").unwrap_err();
        assert!(matches!(err, ListError::Persistence(_)));
        assert!(store.snapshot().lists[0].items.is_empty());
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn reset_clears_store_and_key() {
        let (mut store, _) = store_with(&["A", "B"]);
        assert!(store.kv().raw(LISTS_KEY).is_some());
        store.reset().unwrap();
        assert!(store.snapshot().is_empty());
        assert!(store.kv().raw(LISTS_KEY).is_none());
    }

    #[test]
    fn reopening_sees_persisted_state() {
        let (store, ids) = store_with(&["A", "B"]);
        let kv = store.kv().clone();
        let reopened = ListStore::open(kv);
        assert_eq!(reopened.snapshot().ids(), ids);
    }

    #[test]
    fn parse_item_lines_trims_and_drops_blanks() {
        assert_eq!(
            parse_item_lines("  Ali \n\n\nSara\n   \nOmar"),
            vec!["Ali", "Sara", "Omar"]
        );
        assert!(parse_item_lines("").is_empty());
    }
}
