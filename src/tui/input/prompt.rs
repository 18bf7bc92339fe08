use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;
use crate::util::unicode::{next_grapheme_boundary, prev_grapheme_boundary};

/// Single-line path prompt for CSV import
pub(super) fn handle_import_prompt(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => app.cancel_import(),
        KeyCode::Enter => app.submit_import(),

        KeyCode::Char('u') if ctrl => {
            app.import_input.drain(..app.import_cursor);
            app.import_cursor = 0;
        }
        KeyCode::Char('a') if ctrl => app.import_cursor = 0,
        KeyCode::Char('e') if ctrl => app.import_cursor = app.import_input.len(),
        KeyCode::Char(c) => {
            app.import_input.insert(app.import_cursor, c);
            app.import_cursor += c.len_utf8();
        }

        KeyCode::Backspace => {
            if let Some(start) = prev_grapheme_boundary(&app.import_input, app.import_cursor) {
                app.import_input.drain(start..app.import_cursor);
                app.import_cursor = start;
            }
        }
        KeyCode::Delete => {
            if let Some(end) = next_grapheme_boundary(&app.import_input, app.import_cursor) {
                app.import_input.drain(app.import_cursor..end);
            }
        }
        KeyCode::Left => {
            if let Some(pos) = prev_grapheme_boundary(&app.import_input, app.import_cursor) {
                app.import_cursor = pos;
            }
        }
        KeyCode::Right => {
            if let Some(pos) = next_grapheme_boundary(&app.import_input, app.import_cursor) {
                app.import_cursor = pos;
            }
        }
        KeyCode::Home => app.import_cursor = 0,
        KeyCode::End => app.import_cursor = app.import_input.len(),
        _ => {}
    }
}
