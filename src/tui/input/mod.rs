mod add;
mod confirm;
mod edit;
mod form;
mod mouse;
mod move_mode;
mod navigate;
mod search;

use crossterm::event::{KeyCode, KeyEvent, MouseEvent};

use super::app::{App, FormField, Mode};

// Import all submodule functions into this module's namespace
// so that submodules can access cross-module functions via `use super::*;`
#[allow(unused_imports)]
use add::*;
#[allow(unused_imports)]
use confirm::*;
#[allow(unused_imports)]
use edit::*;
#[allow(unused_imports)]
use form::*;
#[allow(unused_imports)]
use move_mode::*;
#[allow(unused_imports)]
use navigate::*;
#[allow(unused_imports)]
use search::*;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Search => handle_search(app, key),
        Mode::Edit => handle_edit(app, key),
        Mode::Add => handle_add(app, key),
        Mode::NewList => handle_form(app, key),
        Mode::Move => handle_move(app, key),
        Mode::Confirm => handle_confirm(app, key),
    }
}

/// Handle a mouse event (clicks, drags, wheel)
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    mouse::handle_mouse(app, mouse);
}

/// Handle a bracketed paste. Single-line inputs get newlines flattened to
/// spaces; the new-list item field gets one item per pasted line.
pub fn handle_paste(app: &mut App, text: &str) {
    if text.is_empty() {
        return;
    }
    let flat = text.replace(['\r', '\n'], " ");
    match app.mode {
        Mode::Edit => {
            if let Some(session) = app.sessions.focused_mut() {
                session.input.insert_str(&flat);
            }
        }
        Mode::Add => {
            if let Some(add) = &mut app.add_input {
                add.input.insert_str(&flat);
            }
        }
        Mode::Search => {
            app.search_input.insert_str(&flat);
            app.resync();
        }
        Mode::NewList => {
            if let Some(form) = &mut app.new_list {
                match form.field {
                    FormField::Title => form.title.insert_str(&flat),
                    FormField::Items => paste_item_lines(form, text),
                }
            }
        }
        Mode::Navigate | Mode::Move | Mode::Confirm => {}
    }
}
