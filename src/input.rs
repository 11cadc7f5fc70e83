//! Keyboard input handling.
//!
//! Maps terminal key events to [`App`] actions.  In search mode every
//! printable key edits the query; otherwise keys are commands.
//!
//! To add a keybinding, add a method on [`App`] for the action, a match
//! arm in [`handle_normal`], and the hint in [`crate::ui`]'s status bar.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, InputMode, View};

/// Process a single key event, updating app state accordingly.
///
/// Only reacts to key-press events (ignoring release / repeat) so that each
/// physical keypress triggers exactly one action.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit = true;
        return;
    }

    match app.input_mode {
        InputMode::Search => handle_search(app, key),
        InputMode::Normal => handle_normal(app, key),
    }
}

fn handle_search(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.clear_search(),
        KeyCode::Enter => app.finish_search(),
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Char(c) => app.push_search_char(c),
        KeyCode::Down => app.select_next(),
        KeyCode::Up => app.select_previous(),
        _ => {}
    }
}

fn handle_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.quit = true,
        KeyCode::Esc => match app.view() {
            View::Detail => app.close_detail(),
            View::Headlines if app.is_searching() => app.clear_search(),
            View::ReadingList => app.switch_view(),
            View::Headlines => app.quit = true,
        },
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Home | KeyCode::Char('g') => app.select_first(),
        KeyCode::End | KeyCode::Char('G') => app.select_last(),
        KeyCode::Enter => app.open_detail(),
        KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => app.close_detail(),
        KeyCode::Char('b') | KeyCode::Char(' ') => app.toggle_bookmark(),
        KeyCode::Char('d') | KeyCode::Delete => app.remove_selected_bookmark(),
        KeyCode::Tab => app.switch_view(),
        KeyCode::Char('/') => app.start_search(),
        KeyCode::Char('r') => app.request_refresh(),
        _ => {}
    }
}
