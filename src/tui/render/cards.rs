//! The card column: one bordered card per visible list.
//!
//! Cards are flattened into terminal lines first so scrolling and hit
//! testing work on plain line indices, then the visible window is drawn.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Hit, HitRegion, Mode, Row};
use crate::tui::reorder::Placeholder;
use crate::tui::session::Field;
use crate::tui::view::CardView;
use crate::util::unicode;

use super::{input_spans, push_highlighted_spans};

const DELETE_LIST: &str = "[del]";
const DELETE_ITEM: &str = "[x]";
/// Columns left of the card content: margin, border, padding
const CONTENT_X: u16 = 3;

/// One terminal line of the card column
pub(crate) struct CardLine {
    pub spans: Vec<Span<'static>>,
    /// Clickable ranges on this line: (x offset, width, hit)
    pub hits: Vec<(u16, u16, Hit)>,
    /// Card this line belongs to, borders included
    pub card: Option<String>,
    pub cursor: bool,
}

impl CardLine {
    fn plain(spans: Vec<Span<'static>>) -> Self {
        CardLine {
            spans,
            hits: Vec::new(),
            card: None,
            cursor: false,
        }
    }

    #[cfg(test)]
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.content.as_ref()).collect()
    }
}

/// Styles shared by every line of one card
struct CardStyle {
    margin: Style,
    border: Style,
    fill: Style,
    cursor_fill: Style,
}

pub fn render_cards(frame: &mut Frame, app: &mut App, area: Rect) {
    app.hits.push(HitRegion {
        rect: area,
        hit: Hit::ListArea,
    });
    if area.height == 0 {
        return;
    }

    let lines = build_lines(app, area.width);
    if lines.is_empty() {
        render_empty(frame, app, area);
        return;
    }

    let height = area.height as usize;
    if app.follow_cursor
        && let Some(cursor_line) = lines.iter().position(|l| l.cursor)
    {
        if cursor_line < app.scroll {
            app.scroll = cursor_line;
        } else if cursor_line >= app.scroll + height {
            app.scroll = cursor_line + 1 - height;
        }
    }
    app.scroll = app.scroll.min(lines.len().saturating_sub(height));
    let scroll = app.scroll;

    let window = &lines[scroll..lines.len().min(scroll + height)];

    // Card outlines first so the finer regions on top of them win
    let mut start = 0;
    while start < window.len() {
        let Some(id) = window[start].card.clone() else {
            start += 1;
            continue;
        };
        let mut end = start;
        while end + 1 < window.len() && window[end + 1].card.as_deref() == Some(id.as_str()) {
            end += 1;
        }
        app.hits.push(HitRegion {
            rect: Rect::new(
                area.x,
                area.y + start as u16,
                area.width,
                (end - start + 1) as u16,
            ),
            hit: Hit::Card { list_id: id },
        });
        start = end + 1;
    }
    for (i, line) in window.iter().enumerate() {
        for (x, w, hit) in &line.hits {
            app.hits.push(HitRegion {
                rect: Rect::new(area.x + x, area.y + i as u16, *w, 1),
                hit: hit.clone(),
            });
        }
    }

    let text: Vec<Line> = window
        .iter()
        .map(|l| Line::from(l.spans.clone()))
        .collect();
    let paragraph = Paragraph::new(text).style(Style::default().bg(app.theme.background));
    frame.render_widget(paragraph, area);
}

fn render_empty(frame: &mut Frame, app: &App, area: Rect) {
    let message = if app.store.snapshot().is_empty() {
        " No lists yet. Press n to create one.".to_string()
    } else {
        format!(" No lists match \"{}\"", app.query().trim())
    };
    let line = Line::from(Span::styled(
        unicode::truncate_to_width(&message, area.width as usize),
        Style::default().fg(app.theme.dim).bg(app.theme.background),
    ));
    frame.render_widget(
        Paragraph::new(vec![Line::default(), line])
            .style(Style::default().bg(app.theme.background)),
        area,
    );
}

/// Flatten every visible card into lines for a column `width` cells wide
pub(crate) fn build_lines(app: &App, width: u16) -> Vec<CardLine> {
    let mut lines = Vec::new();
    let card_w = (width as usize).saturating_sub(2).max(10);
    let indicator = app.view.indicator.clone();

    for card in app.view.visible() {
        if indicator == Some(Placeholder::Before(card.list_id.clone())) {
            lines.push(indicator_line(app, card_w));
        }
        push_card(app, card, card_w, &mut lines);
        if indicator == Some(Placeholder::After(card.list_id.clone())) {
            lines.push(indicator_line(app, card_w));
        }
        lines.push(CardLine::plain(Vec::new()));
    }
    // No trailing spacer after the last card
    lines.pop();
    lines
}

fn indicator_line(app: &App, card_w: usize) -> CardLine {
    let style = Style::default()
        .fg(app.theme.drop_indicator)
        .bg(app.theme.background);
    CardLine::plain(vec![
        Span::styled(" ", style),
        Span::styled("\u{2501}".repeat(card_w), style),
    ])
}

fn push_card(app: &App, card: &CardView, card_w: usize, lines: &mut Vec<CardLine>) {
    let theme = &app.theme;
    let is_cursor_card = app.cursor.list_id.as_deref() == Some(card.list_id.as_str());
    let border_fg = if card.dragging {
        theme.dim
    } else if is_cursor_card {
        theme.selection_border
    } else {
        theme.border
    };
    let style = CardStyle {
        margin: Style::default().bg(theme.background),
        border: Style::default().fg(border_fg).bg(theme.card_bg),
        fill: Style::default().bg(theme.card_bg),
        cursor_fill: Style::default().bg(theme.selection_bg),
    };
    let inner = card_w.saturating_sub(4);
    let show_cursor = is_cursor_card && app.mode != Mode::Move;
    let at_cursor = |row: Row| show_cursor && app.cursor.row == row;
    let text_fg = if card.dragging { theme.dim } else { theme.text };
    let match_style = Style::default()
        .fg(theme.search_match_fg)
        .bg(theme.search_match_bg);

    // Top border
    lines.push(border_line(&style, card_w, '\u{256D}', '\u{256E}', &card.list_id));

    // Title
    {
        let cursor = at_cursor(Row::Title);
        let fill = if cursor { style.cursor_fill } else { style.fill };
        let text_style = fill.fg(theme.text_bright).add_modifier(Modifier::BOLD);
        let avail = inner.saturating_sub(DELETE_LIST.len() + 1);
        let field = Field::Title {
            list_id: card.list_id.clone(),
        };
        let (content, used) = field_spans(app, &field, &card.title, avail, text_style, match_style);
        let button = Span::styled(DELETE_LIST, fill.fg(theme.red));
        let mut line = framed(&style, fill, content, used, Some(button), inner, &card.list_id);
        line.cursor = cursor;
        line.hits.push((CONTENT_X, avail as u16, Hit::Title {
            list_id: card.list_id.clone(),
        }));
        line.hits.push((
            CONTENT_X + (inner - DELETE_LIST.len()) as u16,
            DELETE_LIST.len() as u16,
            Hit::DeleteList {
                list_id: card.list_id.clone(),
            },
        ));
        lines.push(line);
    }

    // Items
    for (index, item) in card.items.iter().enumerate() {
        let cursor = at_cursor(Row::Item(index));
        let fill = if cursor { style.cursor_fill } else { style.fill };
        let number = format!("{}. ", index + 1);
        let number_w = number.len();
        let avail = inner.saturating_sub(DELETE_ITEM.len() + 1 + number_w);
        let field = Field::Item {
            list_id: card.list_id.clone(),
            index,
        };
        let (mut content, used) = field_spans(app, &field, item, avail, fill.fg(text_fg), match_style);
        content.insert(0, Span::styled(number, fill.fg(theme.dim)));
        let button = Span::styled(DELETE_ITEM, fill.fg(theme.red));
        let mut line = framed(
            &style,
            fill,
            content,
            used + number_w,
            Some(button),
            inner,
            &card.list_id,
        );
        line.cursor = cursor;
        line.hits.push((
            CONTENT_X,
            (number_w + avail) as u16,
            Hit::Item {
                list_id: card.list_id.clone(),
                index,
            },
        ));
        line.hits.push((
            CONTENT_X + (inner - DELETE_ITEM.len()) as u16,
            DELETE_ITEM.len() as u16,
            Hit::DeleteItem {
                list_id: card.list_id.clone(),
                index,
            },
        ));
        lines.push(line);
    }

    // Add row
    {
        let cursor = at_cursor(Row::Add);
        let fill = if cursor { style.cursor_fill } else { style.fill };
        let add = app
            .add_input
            .as_ref()
            .filter(|a| a.list_id == card.list_id);
        let (content, used) = match add {
            Some(add) => {
                let mut spans = vec![Span::styled("+ ", fill.fg(theme.highlight))];
                let (input, w) = input_spans(
                    &add.input,
                    inner.saturating_sub(2),
                    fill.fg(theme.text_bright),
                    fill.fg(theme.text_bright).bg(theme.selection_bg),
                );
                spans.extend(input);
                (spans, w + 2)
            }
            None => {
                let label = unicode::truncate_to_width("+ add name", inner);
                let w = unicode::display_width(&label);
                (vec![Span::styled(label, fill.fg(theme.dim))], w)
            }
        };
        let mut line = framed(&style, fill, content, used, None, inner, &card.list_id);
        line.cursor = cursor;
        line.hits.push((CONTENT_X, inner as u16, Hit::AddRow {
            list_id: card.list_id.clone(),
        }));
        lines.push(line);
    }

    // Bottom border
    lines.push(border_line(&style, card_w, '\u{2570}', '\u{256F}', &card.list_id));
}

/// Spans for a title or item: the open edit session if there is one,
/// otherwise the committed text with filter matches highlighted.
fn field_spans(
    app: &App,
    field: &Field,
    committed: &str,
    avail: usize,
    style: Style,
    match_style: Style,
) -> (Vec<Span<'static>>, usize) {
    if let Some(session) = app.sessions.get(field) {
        let selected = style.bg(app.theme.selection_bg);
        return input_spans(&session.input, avail, style.add_modifier(Modifier::UNDERLINED), selected);
    }
    let shown = unicode::truncate_to_width(committed, avail);
    let used = unicode::display_width(&shown);
    let mut spans = Vec::new();
    push_highlighted_spans(
        &mut spans,
        &shown,
        style,
        match_style,
        app.active_search_re().as_ref(),
    );
    (spans, used)
}

fn border_line(style: &CardStyle, card_w: usize, left: char, right: char, list_id: &str) -> CardLine {
    let mut border = String::with_capacity(card_w * 3);
    border.push(left);
    border.push_str(&"\u{2500}".repeat(card_w.saturating_sub(2)));
    border.push(right);
    CardLine {
        spans: vec![Span::styled(" ", style.margin), Span::styled(border, style.border)],
        hits: Vec::new(),
        card: Some(list_id.to_string()),
        cursor: false,
    }
}

/// `│ content … button │`, padded out to the card width
fn framed(
    style: &CardStyle,
    fill: Style,
    content: Vec<Span<'static>>,
    content_w: usize,
    button: Option<Span<'static>>,
    inner: usize,
    list_id: &str,
) -> CardLine {
    let button_w = button
        .as_ref()
        .map_or(0, |b| unicode::display_width(&b.content));
    let pad = inner.saturating_sub(content_w + button_w);
    let mut spans = vec![
        Span::styled(" ", style.margin),
        Span::styled("\u{2502}", style.border),
        Span::styled(" ", fill),
    ];
    spans.extend(content);
    spans.push(Span::styled(" ".repeat(pad), fill));
    if let Some(button) = button {
        spans.push(button);
    }
    spans.push(Span::styled(" ", fill));
    spans.push(Span::styled("\u{2502}", style.border));
    CardLine {
        spans,
        hits: Vec::new(),
        card: Some(list_id.to_string()),
        cursor: false,
    }
}
