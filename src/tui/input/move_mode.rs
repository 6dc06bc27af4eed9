use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::debug;

use crate::tui::app::{App, Mode};

/// Enter MOVE mode for the card under the cursor. The placeholder stays
/// unset until the first step, so dropping straight away changes nothing.
pub(super) fn begin_move(app: &mut App) {
    app.commit_focused();
    let Some(list_id) = app.cursor_list_id() else {
        return;
    };
    if move_anchors(app, &list_id).is_empty()
        || !app.reorder.begin(&list_id, app.view.rendered_order())
    {
        return;
    }
    app.mode = Mode::Move;
    app.resync();
}

pub(super) fn handle_move(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => step_slot(app, 1),
        (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => step_slot(app, -1),
        (KeyModifiers::NONE, KeyCode::Char('g')) => step_slot(app, i32::MIN),
        (KeyModifiers::SHIFT, KeyCode::Char('G')) => step_slot(app, i32::MAX),
        (_, KeyCode::Enter | KeyCode::Char('m')) => {
            app.mode = Mode::Navigate;
            app.finish_drag();
        }
        (_, KeyCode::Esc) => {
            app.mode = Mode::Navigate;
            app.cancel_drag();
        }
        _ => {}
    }
}

/// Visible cards other than `source`, in rendered order. Hidden cards are
/// never offered as anchors since no indicator could be drawn beside them.
fn move_anchors(app: &App, source: &str) -> Vec<String> {
    app.view
        .visible()
        .filter(|c| c.list_id != source)
        .map(|c| c.list_id.clone())
        .collect()
}

/// Slot matching the source card's own place among the visible cards
fn home_slot(app: &App, source: &str) -> usize {
    app.view
        .visible()
        .take_while(|c| c.list_id != source)
        .count()
}

fn step_slot(app: &mut App, delta: i32) {
    let Some(source) = app.reorder.source().map(str::to_string) else {
        return;
    };
    let anchors = move_anchors(app, &source);
    if anchors.is_empty() {
        return;
    }
    let current = app
        .reorder
        .slot(&anchors)
        .unwrap_or_else(|| home_slot(app, &source));
    let next = (current as i64 + delta as i64).clamp(0, anchors.len() as i64) as usize;
    if next != current {
        debug!("event=move_slot module=tui slot={}", next);
        app.reorder.move_to_slot(&anchors, next);
        app.resync();
    }
}
