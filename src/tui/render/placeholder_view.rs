use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Paragraph;

use crate::tui::app::App;

/// Views that exist in the tab bar but have no content yet
pub fn render_placeholder_view(frame: &mut Frame, app: &App, area: Rect) {
    let text = format!(" {} is not available yet.", app.view.title());
    let paragraph =
        Paragraph::new(text).style(Style::default().fg(app.theme.dim).bg(app.theme.background));
    frame.render_widget(paragraph, area);
}
