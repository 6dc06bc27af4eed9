//! The derived, disposable view model.
//!
//! Rebuilt from scratch after every store mutation and every filter change;
//! nothing here is ever written back to the snapshot.

use crate::model::list::Snapshot;
use crate::ops::search;

use super::reorder::{Placeholder, ReorderResolver};

/// One rendered list card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub list_id: String,
    pub title: String,
    pub items: Vec<String>,
    /// Suppressed by the current filter (still part of the rendered order)
    pub hidden: bool,
    /// This card is the drag source
    pub dragging: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ViewModel {
    /// Bumped on every rebuild
    pub epoch: u64,
    /// Every list, in snapshot order
    pub cards: Vec<CardView>,
    /// Where to draw the drop indicator while dragging
    pub indicator: Option<Placeholder>,
}

impl ViewModel {
    /// Ids of every rendered container, hidden ones included
    pub fn rendered_order(&self) -> Vec<String> {
        self.cards.iter().map(|c| c.list_id.clone()).collect()
    }

    pub fn visible(&self) -> impl Iterator<Item = &CardView> {
        self.cards.iter().filter(|c| !c.hidden)
    }

    pub fn card(&self, list_id: &str) -> Option<&CardView> {
        self.cards.iter().find(|c| c.list_id == list_id)
    }

    pub fn visible_count(&self) -> usize {
        self.visible().count()
    }
}

/// Build the view for `snapshot` under `query`, marking drag state from
/// `reorder`.
pub fn build_view(
    snapshot: &Snapshot,
    query: &str,
    reorder: &ReorderResolver,
    epoch: u64,
) -> ViewModel {
    let source = reorder.source();
    let cards = snapshot
        .lists
        .iter()
        .map(|list| CardView {
            list_id: list.id.clone(),
            title: list.title.clone(),
            items: list.items.clone(),
            hidden: !search::is_visible(list, query),
            dragging: source == Some(list.id.as_str()),
        })
        .collect();
    ViewModel {
        epoch,
        cards,
        indicator: reorder.placeholder().cloned(),
    }
}
