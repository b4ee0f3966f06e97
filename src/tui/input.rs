//! Key binding dispatch for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::TuiApp;

/// Handle a key event, mutating app state.
pub fn handle_key(app: &mut TuiApp, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    // Global bindings
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
            return;
        }
        _ => {}
    }

    match key.code {
        KeyCode::Char('s') | KeyCode::Enter => app.on_user_start(),
        KeyCode::Char('x') => app.on_user_stop(),
        KeyCode::Char(' ') => app.toggle_roll(),
        KeyCode::Char('t') | KeyCode::Tab => app.cycle_theme(),
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            app.on_theme_index(index);
        }
        _ => {}
    }
}
