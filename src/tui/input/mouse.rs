use std::time::{Duration, Instant};

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use log::debug;

use crate::tui::app::{App, ConfirmAction, ConfirmState, Cursor, Hit, Mode, Press, Row};

use super::*;

/// Rows per wheel notch
const WHEEL_ROWS: usize = 3;

pub(super) fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    handle_mouse_at(app, mouse, Instant::now());
}

pub(super) fn handle_mouse_at(app: &mut App, mouse: MouseEvent, now: Instant) {
    // Popups are keyboard-only
    if matches!(app.mode, Mode::NewList | Mode::Confirm | Mode::Move) {
        return;
    }
    let (col, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => mouse_down(app, col, row, now),
        MouseEventKind::Drag(MouseButton::Left) => mouse_drag(app, col, row),
        MouseEventKind::Up(MouseButton::Left) => mouse_up(app, col, row),
        MouseEventKind::ScrollDown => {
            app.follow_cursor = false;
            app.scroll = app.scroll.saturating_add(WHEEL_ROWS);
        }
        MouseEventKind::ScrollUp => {
            app.follow_cursor = false;
            app.scroll = app.scroll.saturating_sub(WHEEL_ROWS);
        }
        _ => {}
    }
}

fn mouse_down(app: &mut App, col: u16, row: u16, now: Instant) {
    let hit = app.hit_at(col, row).map(|h| h.hit.clone());

    // Clicking anywhere other than the focused field blurs it. The delete
    // buttons are exempt: their mutation discards the open edit instead.
    let keeps_focus = match &hit {
        Some(Hit::DeleteItem { .. } | Hit::DeleteList { .. }) => true,
        Some(h) => h.field().is_some() && h.field().as_ref() == app.sessions.focused_field(),
        None => false,
    };
    if !keeps_focus {
        app.commit_focused();
    }

    // Leaving the add row or the search bar
    if app.mode == Mode::Add && !matches!(hit, Some(Hit::AddRow { .. })) {
        app.add_input = None;
        app.mode = Mode::Navigate;
    }
    if app.mode == Mode::Search && hit != Some(Hit::SearchBar) {
        app.mode = Mode::Navigate;
    }

    let double = is_double_click(app, hit.as_ref(), now);
    app.last_click = hit.clone().map(|h| (h, now));

    let Some(hit) = hit else {
        return;
    };
    match hit {
        Hit::SearchBar => begin_search(app),
        Hit::Title { ref list_id } | Hit::Item { ref list_id, .. } => {
            app.cursor = Cursor {
                list_id: Some(list_id.clone()),
                row: match hit {
                    Hit::Item { index, .. } => Row::Item(index),
                    _ => Row::Title,
                },
            };
            app.press = Some(Press {
                list_id: list_id.clone(),
                row,
            });
            if double && let Some(field) = hit.field() {
                app.begin_edit(field);
            }
        }
        Hit::DeleteItem { list_id, index } => app.remove_item(&list_id, index),
        Hit::DeleteList { list_id } => {
            let title = app
                .list(&list_id)
                .map(|l| l.title.clone())
                .unwrap_or_default();
            app.confirm_state = Some(ConfirmState {
                message: format!("Delete list \"{}\"? (y/n)", title),
                action: ConfirmAction::DeleteList { list_id },
            });
            app.mode = Mode::Confirm;
        }
        Hit::AddRow { list_id } => {
            let open_here = app
                .add_input
                .as_ref()
                .is_some_and(|add| add.list_id == list_id);
            if !open_here {
                app.cursor.list_id = Some(list_id);
                open_add_input(app);
            }
        }
        Hit::Card { list_id } => {
            app.cursor = Cursor {
                list_id: Some(list_id.clone()),
                row: Row::Title,
            };
            app.press = Some(Press { list_id, row });
        }
        Hit::ListArea => {}
    }
}

fn is_double_click(app: &App, hit: Option<&Hit>, now: Instant) -> bool {
    let window = Duration::from_millis(app.config.ui.double_click_ms);
    match (&app.last_click, hit) {
        (Some((last, at)), Some(hit)) => last == hit && now.duration_since(*at) <= window,
        _ => false,
    }
}

fn mouse_drag(app: &mut App, col: u16, row: u16) {
    if !app.reorder.is_dragging() {
        // A press only becomes a drag once the pointer leaves its row
        let Some(press) = app.press.clone() else {
            return;
        };
        if press.row == row {
            return;
        }
        app.commit_focused();
        if !app.reorder.begin(&press.list_id, app.view.rendered_order()) {
            app.press = None;
            return;
        }
        app.last_click = None;
    }

    let over = app.card_at(col, row).and_then(|region| match &region.hit {
        Hit::Card { list_id } => {
            let offset = row.saturating_sub(region.rect.y) as f32 + 0.5;
            Some((list_id.clone(), offset / region.rect.height.max(1) as f32))
        }
        _ => None,
    });
    if let Some((target, fraction)) = over {
        app.reorder.move_over(&target, fraction);
    }
    app.resync();
}

fn mouse_up(app: &mut App, col: u16, row: u16) {
    app.press = None;
    if !app.reorder.is_dragging() {
        return;
    }
    let over_list = app
        .hit_at(col, row)
        .is_some_and(|h| !matches!(h.hit, Hit::SearchBar));
    if over_list {
        app.finish_drag();
    } else {
        debug!("event=drag_outside module=tui");
        app.cancel_drag();
    }
}
