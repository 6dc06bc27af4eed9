use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    let Some(field) = app.sessions.focused_field().cloned() else {
        app.mode = Mode::Navigate;
        return;
    };
    match key.code {
        KeyCode::Enter => app.commit_edit(&field),
        KeyCode::Esc => app.cancel_edit(&field),
        // Leaving the field commits it
        KeyCode::Tab | KeyCode::BackTab => app.commit_edit(&field),
        _ => {
            if let Some(session) = app.sessions.focused_mut() {
                session.input.handle_key(key);
            }
        }
    }
}
