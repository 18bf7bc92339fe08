use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode, View};

use super::helpers::spans_width;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;

    let (mut spans, hint) = match app.mode {
        Mode::Navigate => {
            let spans = match &app.flash {
                Some(message) => vec![Span::styled(
                    format!(" {}", message),
                    Style::default().fg(app.theme.text).bg(bg),
                )],
                None => Vec::new(),
            };
            let hint = if app.view == View::Dashboard {
                "space toggle  i import  t theme  q quit "
            } else {
                "1-3 views  t theme  q quit "
            };
            (spans, hint)
        }
        Mode::Import => {
            let (before, after) = app.import_input.split_at(app.import_cursor);
            let spans = vec![
                Span::styled(" CSV file: ", Style::default().fg(app.theme.dim).bg(bg)),
                Span::styled(
                    before.to_string(),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ),
                Span::styled("\u{258C}", Style::default().fg(app.theme.accent).bg(bg)), // ▌ cursor
                Span::styled(
                    after.to_string(),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ),
            ];
            (spans, "Enter import  Esc cancel ")
        }
    };

    let width = area.width as usize;
    let content_width = spans_width(&spans);
    let hint_width = hint.chars().count();
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
