pub mod dashboard_view;
pub mod error_view;
pub mod helpers;
pub mod placeholder_view;
pub mod status_row;
pub mod tab_bar;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::{App, View};

/// Main render function, dispatching to sub-renderers
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    if let Some(message) = &app.fatal_error {
        error_view::render_error_view(frame, app, message, area);
        return;
    }

    // Layout: tab bar (2 rows) | content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // tab bar + separator
            Constraint::Min(1),    // content area
            Constraint::Length(1), // status row
        ])
        .split(area);

    tab_bar::render_tab_bar(frame, app, chunks[0]);

    match app.view {
        View::Dashboard => dashboard_view::render_dashboard_view(frame, app, chunks[1]),
        View::FullPlan | View::Progress => {
            placeholder_view::render_placeholder_view(frame, app, chunks[1])
        }
    }

    status_row::render_status_row(frame, app, chunks[2]);
}
