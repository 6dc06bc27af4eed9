pub mod cards;
pub mod header;
pub mod popups;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::Block;
use regex::Regex;

use crate::ops::search;
use crate::util::unicode;

use super::app::{App, Mode};
use super::text_input::TextInput;

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header (2 rows) | cards | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // title + search bar, separator
            Constraint::Min(1),    // card column
            Constraint::Length(1), // status row
        ])
        .split(area);

    // Hit regions are rebuilt on every draw
    app.hits.clear();

    cards::render_cards(frame, app, chunks[1]);
    header::render_header(frame, app, chunks[0]);

    match app.mode {
        Mode::NewList => popups::render_new_list(frame, app, area),
        Mode::Confirm => popups::render_confirm(frame, app, area),
        _ => {}
    }

    status_row::render_status_row(frame, app, chunks[2]);
}

/// Push spans for text with regex match highlighting. If no regex or no matches,
/// pushes a single span with `base_style`. Otherwise splits text at match boundaries.
pub(super) fn push_highlighted_spans(
    spans: &mut Vec<Span<'static>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    search_re: Option<&Regex>,
) {
    let re = match search_re {
        Some(r) => r,
        None => {
            spans.push(Span::styled(text.to_string(), base_style));
            return;
        }
    };

    let mut last_end = 0;
    for m in search::find_matches(re, text) {
        if m.start > last_end {
            spans.push(Span::styled(text[last_end..m.start].to_string(), base_style));
        }
        spans.push(Span::styled(text[m.clone()].to_string(), highlight_style));
        last_end = m.end;
    }
    if last_end == 0 {
        spans.push(Span::styled(text.to_string(), base_style));
    } else if last_end < text.len() {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
}

/// Spans for a text input squeezed into `width` cells, with a block cursor.
/// Returns the spans and the cells they take up.
pub(super) fn input_spans(
    input: &TextInput,
    width: usize,
    style: Style,
    selected_style: Style,
) -> (Vec<Span<'static>>, usize) {
    if width == 0 {
        return (Vec::new(), 0);
    }
    let text = input.text();
    let cursor_style = style.add_modifier(Modifier::REVERSED);

    if input.is_selected_all() {
        let shown = unicode::truncate_to_width(text, width);
        let w = unicode::display_width(&shown);
        return (vec![Span::styled(shown, selected_style)], w);
    }

    // Drop leading graphemes until the cursor fits
    let cursor = input.cursor();
    let mut start = 0;
    while unicode::display_width(&text[start..cursor]) + 1 > width {
        match unicode::next_grapheme_boundary(text, start) {
            Some(next) if next <= cursor => start = next,
            _ => break,
        }
    }
    let before = &text[start..cursor];
    let (under, after) = match unicode::next_grapheme_boundary(text, cursor) {
        Some(next) => (&text[cursor..next], &text[next..]),
        None => (" ", ""),
    };

    let used = unicode::display_width(before) + unicode::display_width(under);
    let after = unicode::truncate_to_width(after, width.saturating_sub(used));
    let total = used + unicode::display_width(&after);
    let mut spans = vec![
        Span::styled(before.to_string(), style),
        Span::styled(under.to_string(), cursor_style),
    ];
    if !after.is_empty() {
        spans.push(Span::styled(after, style));
    }
    (spans, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(spans: &[Span]) -> Vec<String> {
        spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn highlight_splits_on_matches() {
        let re = search::highlight_regex("ali");
        let mut spans = Vec::new();
        push_highlighted_spans(
            &mut spans,
            "Ali and Alina",
            Style::default(),
            Style::default().add_modifier(Modifier::BOLD),
            re.as_ref(),
        );
        assert_eq!(texts(&spans), vec!["Ali", " and ", "Ali", "na"]);
    }

    #[test]
    fn highlight_without_match_is_one_span() {
        let re = search::highlight_regex("zzz");
        let mut spans = Vec::new();
        push_highlighted_spans(&mut spans, "Sara", Style::default(), Style::default(), re.as_ref());
        assert_eq!(texts(&spans), vec!["Sara"]);
    }

    #[test]
    fn input_cursor_at_end_is_a_blank_block() {
        let mut input = TextInput::new();
        input.insert_str("Ali");
        let (spans, w) = input_spans(&input, 10, Style::default(), Style::default());
        assert_eq!(texts(&spans), vec!["Ali", " "]);
        assert_eq!(w, 4);
    }

    #[test]
    fn long_input_scrolls_to_keep_cursor_visible() {
        let mut input = TextInput::new();
        input.insert_str("abcdefghij");
        let (spans, w) = input_spans(&input, 5, Style::default(), Style::default());
        assert_eq!(texts(&spans), vec!["ghij", " "]);
        assert_eq!(w, 5);
    }

    #[test]
    fn selected_input_renders_whole_text() {
        let input = TextInput::with_selected("Team");
        let (spans, _) = input_spans(&input, 10, Style::default(), Style::default());
        assert_eq!(texts(&spans), vec!["Team"]);
    }
}
