use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};
use crate::tui::text_input::InputOutcome;

/// Focus the search bar. The current filter text is kept for refining.
pub(super) fn begin_search(app: &mut App) {
    app.commit_focused();
    app.search_input.move_end();
    app.mode = Mode::Search;
}

pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match key.code {
        // Clear the filter and leave
        KeyCode::Esc => {
            app.search_input.clear();
            app.mode = Mode::Navigate;
            app.resync();
        }
        // Keep the filter, go back to the cards
        KeyCode::Enter | KeyCode::Tab => {
            app.mode = Mode::Navigate;
        }
        _ => {
            if app.search_input.handle_key(key) == InputOutcome::Edited {
                app.resync();
            }
        }
    }
}
