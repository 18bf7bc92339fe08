use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

use crate::tui::app::App;

use super::helpers::centered_rect;

/// Blocking panel shown when the session could not start
pub fn render_error_view(frame: &mut Frame, app: &App, message: &str, area: Rect) {
    let popup = centered_rect(60, 8, area);
    let bg = app.theme.surface;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(app.theme.red).bg(bg))
        .title(Span::styled(
            " Authentication Error ",
            Style::default()
                .fg(app.theme.red)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg));

    let lines = vec![
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(app.theme.text_bright).bg(bg),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to exit.",
            Style::default().fg(app.theme.dim).bg(bg),
        )),
    ];

    frame.render_widget(Clear, popup);
    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, popup);
}
