//! Event handling for the TUI

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::layout::Position;

use super::app::App;

const POLL_TIMEOUT: Duration = Duration::from_millis(100);
/// Poll faster while a strip is sliding so the easing looks smooth
const ANIMATION_POLL_TIMEOUT: Duration = Duration::from_millis(16);

/// Handle all input events
pub fn handle_events(app: &mut App) -> Result<()> {
    let timeout = if app.is_animating(Instant::now()) {
        ANIMATION_POLL_TIMEOUT
    } else {
        POLL_TIMEOUT
    };

    if event::poll(timeout)? {
        match event::read()? {
            Event::Key(key) => handle_key_event(app, key),
            Event::Mouse(mouse) => handle_mouse_event(app, mouse)?,
            Event::Resize(_, _) => {} // Terminal will redraw automatically
            _ => {}
        }
    }
    Ok(())
}

/// Route one key: overlays first, then the grid surface, then app keys
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    if app.show_help() {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
        ) {
            app.close_help();
        }
        return;
    }

    // Clear status message on any key press
    app.clear_status();

    if app.handle_grid_key(&key).is_consumed() {
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('?') => app.open_help(),
        KeyCode::Char('r') => app.reload(),
        KeyCode::Char('t') => app.cycle_theme(),
        _ => {}
    }
}

fn handle_mouse_event(app: &mut App, mouse: MouseEvent) -> Result<()> {
    if app.show_help() {
        return Ok(());
    }
    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
        app.click_at(Position::new(mouse.column, mouse.row))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::CollectionSource;
    use crate::config::GridConfig;
    use crate::models::CollectionItem;
    use crate::tui::app::FocusTarget;

    fn app_with(n: usize) -> App {
        let mut app = App::new(&GridConfig::default(), CollectionSource::parse("unused.json")).unwrap();
        app.set_items(
            (0..n)
                .map(|i| CollectionItem::new(i as i64, format!("Item {i}"), "art.jpg"))
                .collect(),
        );
        app
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_arrows_move_focus() {
        let mut app = app_with(4);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.store.focused_index(), 1);
        assert!(app.running);
    }

    #[test]
    fn test_q_quits() {
        let mut app = app_with(4);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app_with(4);
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(!app.running);
    }

    #[test]
    fn test_help_blocks_grid_then_returns_focus() {
        let mut app = app_with(4);
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.focus_target, FocusTarget::Help);

        press(&mut app, KeyCode::Right);
        assert_eq!(app.store.focused_index(), 0);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.focus_target, FocusTarget::Grid);
        assert!(app.running);

        press(&mut app, KeyCode::Right);
        assert_eq!(app.store.focused_index(), 1);
    }

    #[test]
    fn test_select_reports_title() {
        let mut app = app_with(3);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.status_message.as_ref().map(|s| s.text.as_str()),
            Some("Selected: Item 1")
        );
    }

    #[test]
    fn test_empty_grid_ignores_navigation() {
        let mut app = app_with(0);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.store.snapshot().row, 0);
        assert_eq!(app.store.snapshot().index, 0);
        assert!(app.running);
    }
}
