use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{AddInput, App, Mode, Row};
use crate::tui::text_input::TextInput;

/// Open the add-item input on the card under the cursor
pub(super) fn open_add_input(app: &mut App) {
    app.commit_focused();
    let Some(list_id) = app.cursor_list_id() else {
        return;
    };
    app.cursor.row = Row::Add;
    app.add_input = Some(AddInput {
        list_id,
        input: TextInput::new(),
    });
    app.mode = Mode::Add;
}

pub(super) fn handle_add(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            let Some(add) = app.add_input.take() else {
                app.mode = Mode::Navigate;
                return;
            };
            app.add_item(&add.list_id, add.input.text());
            // Keep going with the next name on the same card
            if app.list(&add.list_id).is_some() {
                app.cursor.list_id = Some(add.list_id.clone());
                app.cursor.row = Row::Add;
                app.add_input = Some(AddInput {
                    list_id: add.list_id,
                    input: TextInput::new(),
                });
                app.mode = Mode::Add;
            } else {
                app.mode = Mode::Navigate;
            }
        }
        KeyCode::Esc => {
            app.add_input = None;
            app.mode = Mode::Navigate;
        }
        _ => {
            if let Some(add) = &mut app.add_input {
                add.input.handle_key(key);
            }
        }
    }
}
