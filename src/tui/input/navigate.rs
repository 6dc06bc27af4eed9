use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, ConfirmAction, ConfirmState, Mode, NewListForm, Row};

use super::*;

/// Rows scrolled by PageUp/PageDown
const PAGE_ROWS: usize = 10;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Quit
        (KeyModifiers::NONE, KeyCode::Char('q')) | (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
            app.should_quit = true;
        }

        // Cursor movement
        (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => app.move_cursor(1),
        (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => app.move_cursor(-1),
        (KeyModifiers::SHIFT, KeyCode::Char('J')) => app.move_card(1),
        (KeyModifiers::SHIFT, KeyCode::Char('K')) => app.move_card(-1),
        (KeyModifiers::NONE, KeyCode::Char('g')) => app.move_cursor(i32::MIN),
        (KeyModifiers::SHIFT, KeyCode::Char('G')) => app.move_cursor(i32::MAX),
        (_, KeyCode::PageDown) => {
            app.follow_cursor = false;
            app.scroll = app.scroll.saturating_add(PAGE_ROWS);
        }
        (_, KeyCode::PageUp) => {
            app.follow_cursor = false;
            app.scroll = app.scroll.saturating_sub(PAGE_ROWS);
        }

        (KeyModifiers::NONE, KeyCode::Char('/')) => begin_search(app),

        // Edit the field under the cursor, or open the add row
        (KeyModifiers::NONE, KeyCode::Enter | KeyCode::Char('e')) => match app.cursor_field() {
            Some(field) => app.begin_edit(field),
            None => open_add_input(app),
        },
        (KeyModifiers::NONE, KeyCode::Char('a')) => open_add_input(app),

        (KeyModifiers::NONE, KeyCode::Char('n')) => {
            app.new_list = Some(NewListForm::default());
            app.mode = Mode::NewList;
        }

        (KeyModifiers::NONE, KeyCode::Char('d')) => {
            if let (Some(list_id), Row::Item(index)) = (app.cursor_list_id(), app.cursor.row) {
                app.remove_item(&list_id, index);
            }
        }
        (KeyModifiers::SHIFT, KeyCode::Char('D')) => {
            if let Some(list_id) = app.cursor_list_id() {
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
        }
        (KeyModifiers::SHIFT, KeyCode::Char('X')) => {
            if !app.store.snapshot().is_empty() {
                app.confirm_state = Some(ConfirmState {
                    message: "Clear all lists? This cannot be undone. (y/n)".to_string(),
                    action: ConfirmAction::ClearAll,
                });
                app.mode = Mode::Confirm;
            }
        }

        (KeyModifiers::NONE, KeyCode::Char('m')) => begin_move(app),
        (KeyModifiers::NONE, KeyCode::Char('t')) => app.toggle_theme(),
        (KeyModifiers::SHIFT, KeyCode::Char('E')) => app.export(),
        (_, KeyCode::Char('?')) => app.show_key_hints = !app.show_key_hints,

        // Esc: dismiss a toast first, then clear an active filter
        (_, KeyCode::Esc) => {
            if !app.toasts.dismiss() && !app.query().is_empty() {
                app.search_input.clear();
                app.resync();
            }
        }
        _ => {}
    }
}
