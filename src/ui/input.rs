//! Input handling for the TUI.
//!
//! Keys that change the gallery only act once the page is ready; quitting
//! and theme cycling work in every phase.

use crate::app::App;
use crate::util::validate_url_for_open;
use crossterm::event::{KeyCode, KeyModifiers};

use super::Action;

/// Main input dispatch function.
pub(super) fn handle_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return Action::Quit,
        KeyCode::Char('t') => {
            let name = app.cycle_theme();
            app.set_status(format!("Theme: {}", name));
            return Action::Continue;
        }
        _ => {}
    }

    if !app.phase.is_ready() {
        return Action::Continue;
    }

    match code {
        KeyCode::Tab | KeyCode::Char(']') => app.cycle_category(1),
        KeyCode::BackTab | KeyCode::Char('[') => app.cycle_category(-1),
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            app.select_category_at(index);
        }
        KeyCode::Left | KeyCode::Char('h') => app.move_selection(-1, 0),
        KeyCode::Right | KeyCode::Char('l') => app.move_selection(1, 0),
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(0, -1),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(0, 1),
        KeyCode::Home | KeyCode::Char('g') => app.selected_card = 0,
        KeyCode::End | KeyCode::Char('G') => {
            app.selected_card = app.grid.visible_cards().len().saturating_sub(1);
        }
        KeyCode::Enter | KeyCode::Char('o') => open_selected(app),
        _ => {}
    }
    Action::Continue
}

/// Open the selected card's link in the system browser.
fn open_selected(app: &mut App) {
    let Some(card) = app.selected_card() else {
        return;
    };
    let url = card.url.clone();
    let title = card.title.clone();

    if let Err(e) = validate_url_for_open(&url) {
        tracing::warn!(url = %url, error = %e, "Refusing to open card link");
        app.set_status(e.to_string());
    } else if let Err(e) = open::that(&url) {
        app.set_status(format!("Failed to open browser: {}", e));
    } else {
        app.set_status(format!("Opening {}...", title));
    }
}
