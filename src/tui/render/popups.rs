use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, FormField};
use crate::util::unicode;

use super::input_spans;

/// Render the new-list popup: a title field and one item per line
pub fn render_new_list(frame: &mut Frame, app: &App, area: Rect) {
    let Some(form) = &app.new_list else {
        return;
    };

    let bg = app.theme.background;
    let header_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let label_style = Style::default().fg(app.theme.text).bg(bg);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);
    let input_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let selected_style = input_style.bg(app.theme.selection_bg);

    let popup_w: u16 = 50.min(area.width.saturating_sub(2));
    // Inside the border, minus the two-column indent
    let field_w = (popup_w as usize).saturating_sub(4);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(" New list", header_style)));
    lines.push(Line::default());

    lines.push(Line::from(Span::styled(" Title", label_style)));
    let mut title = vec![Span::styled("  ", label_style)];
    if form.field == FormField::Title {
        title.extend(input_spans(&form.title, field_w, input_style, selected_style).0);
    } else {
        title.push(Span::styled(
            unicode::truncate_to_width(form.title.text(), field_w),
            input_style,
        ));
    }
    lines.push(Line::from(title));
    lines.push(Line::default());

    lines.push(Line::from(Span::styled(" Names, one per line", label_style)));
    for (i, item) in form.lines.iter().enumerate() {
        let number = format!("  {}. ", i + 1);
        let avail = field_w.saturating_sub(number.len() - 2);
        let mut spans = vec![Span::styled(number, dim_style)];
        if form.field == FormField::Items && form.line == i {
            spans.extend(input_spans(item, avail, input_style, selected_style).0);
        } else {
            spans.push(Span::styled(
                unicode::truncate_to_width(item.text(), avail),
                input_style,
            ));
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::default());

    lines.push(Line::from(vec![
        Span::styled(" ", label_style),
        Span::styled("Ctrl+S", dim_style),
        Span::styled(" create  ", label_style),
        Span::styled("Tab", dim_style),
        Span::styled(" switch  ", label_style),
        Span::styled("Esc", dim_style),
        Span::styled(" cancel", label_style),
    ]));

    // Keep the focused line inside the popup when there are many items
    let max_body = area.height.saturating_sub(4) as usize;
    if lines.len() > max_body && form.field == FormField::Items {
        let focus = 6 + form.line;
        let start = (focus + 3).saturating_sub(max_body).min(lines.len() - max_body);
        lines.drain(..start);
    }
    let popup_h = ((lines.len() as u16) + 2).min(area.height.saturating_sub(2));

    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, overlay_area);
}

/// Render the y/n confirmation popup
pub fn render_confirm(frame: &mut Frame, app: &App, area: Rect) {
    let Some(state) = &app.confirm_state else {
        return;
    };

    let bg = app.theme.background;
    let text_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);

    let popup_w: u16 = 50.min(area.width.saturating_sub(2));
    let message = unicode::truncate_to_width(
        &state.message,
        (popup_w as usize).saturating_sub(4),
    );

    let lines = vec![
        Line::default(),
        Line::from(vec![Span::styled(" ", text_style), Span::styled(message, text_style)]),
        Line::default(),
        Line::from(vec![
            Span::styled(" ", text_style),
            Span::styled("y", dim_style),
            Span::styled(" confirm  ", text_style),
            Span::styled("n", dim_style),
            Span::styled(" cancel", text_style),
        ]),
    ];

    let popup_h = ((lines.len() as u16) + 2).min(area.height.saturating_sub(2));
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.red).bg(bg))
        .style(Style::default().bg(bg));

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .style(Style::default().bg(bg)),
        overlay_area,
    );
}

fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}
