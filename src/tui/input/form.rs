use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, FormField, Mode, NewListForm};
use crate::tui::text_input::TextInput;

pub(super) fn handle_form(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => {
            app.new_list = None;
            app.mode = Mode::Navigate;
        }
        (KeyModifiers::CONTROL, KeyCode::Char('s')) => app.submit_new_list(),
        _ => {
            if let Some(form) = &mut app.new_list {
                edit_form(form, key);
            }
        }
    }
}

fn edit_form(form: &mut NewListForm, key: KeyEvent) {
    match (form.field, key.code) {
        (FormField::Title, KeyCode::Enter | KeyCode::Tab | KeyCode::Down) => {
            form.field = FormField::Items;
        }
        (FormField::Items, KeyCode::Tab | KeyCode::BackTab) => form.field = FormField::Title,
        (FormField::Title, KeyCode::BackTab) => form.field = FormField::Items,
        (FormField::Title, _) => {
            form.title.handle_key(key);
        }
        (FormField::Items, KeyCode::Enter) => {
            form.line += 1;
            form.lines.insert(form.line, TextInput::new());
        }
        (FormField::Items, KeyCode::Up) => {
            if form.line == 0 {
                form.field = FormField::Title;
            } else {
                form.line -= 1;
            }
        }
        (FormField::Items, KeyCode::Down) => {
            form.line = (form.line + 1).min(form.lines.len() - 1);
        }
        // Backspace on an empty line joins it into the one above
        (FormField::Items, KeyCode::Backspace)
            if form.line > 0 && form.lines[form.line].text().is_empty() =>
        {
            form.lines.remove(form.line);
            form.line -= 1;
            form.lines[form.line].move_end();
        }
        (FormField::Items, _) => {
            if let Some(line) = form.lines.get_mut(form.line) {
                line.handle_key(key);
            }
        }
    }
}

/// Paste into the item lines: the first pasted line goes into the current
/// line, every further one becomes a line of its own.
pub(super) fn paste_item_lines(form: &mut NewListForm, text: &str) {
    let mut pasted = text.lines();
    if let Some(first) = pasted.next()
        && let Some(line) = form.lines.get_mut(form.line)
    {
        line.insert_str(first);
    }
    for rest in pasted {
        let mut line = TextInput::new();
        line.insert_str(rest);
        form.line += 1;
        form.lines.insert(form.line, line);
    }
}
