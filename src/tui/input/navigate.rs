use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, View};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        // Views
        KeyCode::Char('1') => app.view = View::Dashboard,
        KeyCode::Char('2') => app.view = View::FullPlan,
        KeyCode::Char('3') => app.view = View::Progress,
        KeyCode::Tab => app.view = app.view.next(),
        KeyCode::BackTab => app.view = app.view.prev(),

        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('i') => app.begin_import(),

        _ if app.view == View::Dashboard => handle_dashboard(app, key),
        _ => {}
    }
}

fn handle_dashboard(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_cursor(-1),
        KeyCode::Char('g') | KeyCode::Home => app.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => app.move_cursor(isize::MAX),
        KeyCode::Char(' ') | KeyCode::Char('x') | KeyCode::Enter => {
            app.flash = None;
            app.toggle_selected();
        }
        _ => {}
    }
}
