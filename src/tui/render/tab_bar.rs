use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, View};

use super::helpers::spans_width;

/// Render the tab bar: brand + view tabs, with separator line below
pub fn render_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tabs
            Constraint::Length(1), // separator
        ])
        .split(area);

    let sep_cols = render_tabs(frame, app, chunks[0]);
    render_separator(frame, app, chunks[1], &sep_cols);
}

/// Render tabs and return the column positions of each separator character.
fn render_tabs(frame: &mut Frame, app: &App, area: Rect) -> Vec<usize> {
    let bg = app.theme.background;
    let mut spans: Vec<Span> = Vec::new();
    let mut sep_cols: Vec<usize> = Vec::new();
    let sep = Span::styled("\u{2502}", Style::default().fg(app.theme.dim).bg(bg));

    spans.push(Span::styled(
        " Sprint OS ",
        Style::default()
            .fg(app.theme.accent)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    ));
    sep_cols.push(spans_width(&spans));
    spans.push(sep.clone());

    for view in View::ALL {
        spans.push(Span::styled(
            format!(" {} ", view.title()),
            tab_style(app, app.view == view),
        ));
        sep_cols.push(spans_width(&spans));
        spans.push(sep.clone());
    }

    // Theme indicator, right-aligned
    let indicator = if app.dark { "dark " } else { "light " };
    let used = spans_width(&spans);
    let width = area.width as usize;
    if used + indicator.len() < width {
        spans.push(Span::styled(
            " ".repeat(width - used - indicator.len()),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(indicator, Style::default().fg(app.theme.dim).bg(bg)));
    }

    let tabs = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(tabs, area);
    sep_cols
}

fn render_separator(frame: &mut Frame, app: &App, area: Rect, sep_cols: &[usize]) {
    let width = area.width as usize;
    let line: String = (0..width)
        .map(|col| {
            if sep_cols.contains(&col) {
                '\u{2534}'
            } else {
                '\u{2500}'
            }
        })
        .collect();
    let sep_widget =
        Paragraph::new(line).style(Style::default().fg(app.theme.dim).bg(app.theme.background));
    frame.render_widget(sep_widget, area);
}

/// Style for a tab: highlighted if current, normal otherwise
fn tab_style(app: &App, is_current: bool) -> Style {
    if is_current {
        Style::default()
            .fg(app.theme.accent)
            .bg(app.theme.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(app.theme.background)
    }
}
