use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::notify::NotifyKind;
use crate::tui::app::{App, Mode};
use crate::util::unicode;

/// Render the status row (bottom of screen): the newest toast if there is
/// one, otherwise key hints for the current mode
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let line = if let Some(toast) = app.toasts.current() {
        let fg = match toast.kind {
            NotifyKind::Success => app.theme.green,
            NotifyKind::Error => app.theme.red,
            NotifyKind::Info => app.theme.text_bright,
        };
        let text = unicode::truncate_to_width(&format!(" {}", toast.message), width);
        Line::from(Span::styled(
            text,
            Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD),
        ))
    } else {
        let mut spans = Vec::new();
        if app.mode == Mode::Move {
            spans.push(Span::styled(
                " -- MOVE -- ",
                Style::default()
                    .fg(app.theme.highlight)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        if app.show_key_hints {
            let used: usize = spans.iter().map(|s| unicode::display_width(&s.content)).sum();
            let hints = unicode::truncate_to_width(
                &format!(" {}", mode_hints(app.mode)),
                width.saturating_sub(used),
            );
            spans.push(Span::styled(hints, Style::default().fg(app.theme.dim).bg(bg)));
        }
        Line::from(spans)
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn mode_hints(mode: Mode) -> &'static str {
    match mode {
        Mode::Navigate => {
            "e edit  a add  d del  n new list  D del list  m move  / search  t theme  E export  ? hints  q quit"
        }
        Mode::Search => "type to filter  Enter keep  Esc clear",
        Mode::Edit => "Enter save  Esc cancel  Tab leave",
        Mode::Add => "Enter add  Esc done",
        Mode::NewList => "Ctrl+S create  Tab switch field  Esc cancel",
        Mode::Move => "j/k move  Enter drop  Esc cancel",
        Mode::Confirm => "y confirm  n cancel",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Notifier;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn toast_wins_over_hints() {
        let mut app = app_with(&[]);
        app.toasts.notify("List created", NotifyKind::Success);
        let out = render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert_eq!(out, " List created");
    }

    #[test]
    fn hints_follow_mode() {
        let mut app = app_with(&[]);
        app.mode = Mode::Edit;
        let out = render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert_eq!(out, " Enter save  Esc cancel  Tab leave");
    }

    #[test]
    fn move_mode_label() {
        let mut app = app_with(&[]);
        app.mode = Mode::Move;
        let out = render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert!(out.starts_with(" -- MOVE --  j/k move"));
    }

    #[test]
    fn hints_can_be_hidden() {
        let mut app = app_with(&[]);
        app.show_key_hints = false;
        let out = render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert_eq!(out, "");
    }
}
