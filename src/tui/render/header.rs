use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Hit, HitRegion, Mode};
use crate::util::unicode;

use super::input_spans;

const APP_NAME: &str = "Dawat-E-Mehnat";

/// Render the header: app name, search bar, list count, separator below
pub fn render_header(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // name + search
            Constraint::Length(1), // separator
        ])
        .split(area);

    let bg = app.theme.background;
    let width = area.width as usize;
    let bg_style = Style::default().bg(bg);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);

    let mut spans = vec![
        Span::styled(" ", bg_style),
        Span::styled(
            APP_NAME,
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("   ", bg_style),
    ];
    let search_x = 1 + APP_NAME.len() + 3;

    let total = app.store.snapshot().lists.len();
    let visible = app.view.visible_count();
    let count = if app.query().trim().is_empty() {
        format!("{} list{} ", total, if total == 1 { "" } else { "s" })
    } else {
        format!("{}/{} lists ", visible, total)
    };
    let count_w = count.len();
    let search_w = width.saturating_sub(search_x + count_w + 1);

    spans.push(Span::styled("/", Style::default().fg(app.theme.highlight).bg(bg)));
    let (search, used) = if app.mode == Mode::Search {
        input_spans(
            &app.search_input,
            search_w.saturating_sub(1),
            Style::default().fg(app.theme.text_bright).bg(bg),
            Style::default().fg(app.theme.text_bright).bg(app.theme.selection_bg),
        )
    } else if app.query().is_empty() {
        let hint = unicode::truncate_to_width("search", search_w.saturating_sub(1));
        let w = unicode::display_width(&hint);
        (vec![Span::styled(hint, dim_style)], w)
    } else {
        let query = unicode::truncate_to_width(app.query(), search_w.saturating_sub(1));
        let w = unicode::display_width(&query);
        (
            vec![Span::styled(query, Style::default().fg(app.theme.text).bg(bg))],
            w,
        )
    };
    spans.extend(search);

    let used_total = search_x + 1 + used;
    if used_total + count_w <= width {
        spans.push(Span::styled(
            " ".repeat(width - used_total - count_w),
            bg_style,
        ));
        spans.push(Span::styled(count, dim_style));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(bg_style),
        chunks[0],
    );

    let separator = Line::from(Span::styled("\u{2500}".repeat(width), dim_style));
    frame.render_widget(Paragraph::new(separator).style(bg_style), chunks[1]);

    app.hits.push(HitRegion {
        rect: Rect::new(
            chunks[0].x + search_x as u16,
            chunks[0].y,
            (search_w as u16).max(1),
            1,
        ),
        hit: Hit::SearchBar,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn shows_name_and_count() {
        let mut app = app_with(&[("A", &[]), ("B", &[])]);
        let out = render_to_string(TERM_W, 2, |frame, area| {
            render_header(frame, &mut app, area);
        });
        let first = out.lines().next().unwrap();
        assert!(first.starts_with(" Dawat-E-Mehnat   /search"));
        assert!(first.ends_with("2 lists"));
    }

    #[test]
    fn filtered_count() {
        let mut app = app_with(&[("Ali", &[]), ("Bravo", &[])]);
        app.search_input.insert_str("ali");
        app.resync();
        let out = render_to_string(TERM_W, 2, |frame, area| {
            render_header(frame, &mut app, area);
        });
        assert!(out.contains("/ali"));
        assert!(out.contains("1/2 lists"));
    }

    #[test]
    fn records_search_bar_hit() {
        let mut app = app_with(&[]);
        render_to_string(TERM_W, 2, |frame, area| {
            render_header(frame, &mut app, area);
        });
        assert_eq!(
            app.hit_at(20, 0).map(|h| h.hit.clone()),
            Some(Hit::SearchBar)
        );
    }
}
