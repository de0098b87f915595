//! Tests for the TUI application module

use std::time::Duration;

use crossterm::event::{KeyCode, KeyModifiers};

use super::*;
use crate::config::GridSettings;
use crate::tui::focus::FocusSnapshot;

fn config_with_rows(rows: usize) -> GridConfig {
    GridConfig {
        grid: GridSettings {
            rows,
            ..GridSettings::default()
        },
        ..GridConfig::default()
    }
}

fn items(n: usize) -> Vec<CollectionItem> {
    (0..n)
        .map(|i| CollectionItem::new(i as i64, format!("Item {i}"), format!("art/{i}.jpg")))
        .collect()
}

fn app(rows: usize) -> App {
    App::new(&config_with_rows(rows), CollectionSource::parse("unused.json")).unwrap()
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn wait_for_load(app: &mut App) {
    for _ in 0..500 {
        if app.poll_loading() {
            return;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    panic!("collection never finished loading");
}

// ==================== Focus Ownership ====================

#[test]
fn test_starts_unfocused_and_empty() {
    let app = app(1);
    assert_eq!(app.focus_target, FocusTarget::None);
    assert!(!app.grid.is_focused());
    assert!(app.items.is_empty());
}

#[test]
fn test_first_items_focus_grid() {
    let mut app = app(1);
    app.set_items(items(4));
    assert_eq!(app.focus_target, FocusTarget::Grid);
    assert!(app.grid.is_focused());
}

#[test]
fn test_empty_items_keep_grid_unfocused() {
    let mut app = app(1);
    app.set_items(Vec::new());
    assert_eq!(app.focus_target, FocusTarget::None);
    assert!(app.view().is_empty());
}

#[test]
fn test_items_arriving_under_help_wait_for_close() {
    let mut app = app(1);
    app.open_help();
    app.set_items(items(3));
    assert_eq!(app.focus_target, FocusTarget::Help);
    assert!(!app.grid.is_focused());

    app.close_help();
    assert_eq!(app.focus_target, FocusTarget::Grid);
    assert!(app.grid.is_focused());
}

// ==================== Navigation Scenarios ====================

#[test]
fn test_four_items_wrap_scenario() {
    let mut app = app(1);
    app.set_items(items(4));

    let mut seen = vec![app.store.focused_index()];
    for _ in 0..3 {
        assert_eq!(app.handle_grid_key(&key(KeyCode::Right)), KeyOutcome::Handled);
        seen.push(app.store.focused_index());
    }
    assert_eq!(seen, vec![0, 1, 2, 3]);

    app.handle_grid_key(&key(KeyCode::Right));
    assert_eq!(app.store.focused_index(), 0);
}

#[test]
fn test_two_row_scenario_restores_index() {
    let mut app = app(2);
    app.set_items(items(6));

    app.handle_grid_key(&key(KeyCode::Right));
    app.handle_grid_key(&key(KeyCode::Right));
    app.handle_grid_key(&key(KeyCode::Down));
    assert_eq!(app.store.snapshot(), FocusSnapshot { row: 1, index: 0 });

    app.handle_grid_key(&key(KeyCode::Down));
    assert_eq!(app.store.snapshot(), FocusSnapshot { row: 0, index: 2 });

    let view = app.view();
    let GridView::Grid { focused_row, focused_index, .. } = view else {
        panic!("expected grid");
    };
    assert_eq!((focused_row, focused_index), (0, 2));
}

#[test]
fn test_live_item_count_used_after_reload() {
    let mut app = app(1);
    app.set_items(items(2));
    app.handle_grid_key(&key(KeyCode::Right));
    assert_eq!(app.store.focused_index(), 1);

    // More items arrive; the same binding sees the new length
    app.set_items(items(5));
    app.handle_grid_key(&key(KeyCode::Right));
    assert_eq!(app.store.focused_index(), 2);
}

#[test]
fn test_keys_ignored_without_grid_focus() {
    let mut app = app(1);
    assert_eq!(app.handle_grid_key(&key(KeyCode::Right)), KeyOutcome::Ignored);
    assert_eq!(app.store.focused_index(), 0);
}

#[test]
fn test_reload_with_fewer_items_clamps_focus() {
    let mut app = app(1);
    app.set_items(items(10));
    app.store.set_focus(0, 8);
    app.set_items(items(3));

    assert_eq!(app.store.focused_index(), 2);
    let view = app.view();
    assert_eq!(view.cells().count(), 3);
    let focused = view.focused_cell().expect("clamped cell is focused");
    assert_eq!(focused.index, 2);
    let GridView::Grid { active_descendant, .. } = &view else {
        panic!("expected a grid");
    };
    assert_eq!(active_descendant, &focused.id);
    assert_eq!(app.grid.resolve(active_descendant), Ok((0, 2)));

    assert_eq!(
        app.handle_grid_key(&key(KeyCode::Enter)),
        KeyOutcome::Select { row: 0, index: 2 }
    );
}

#[test]
fn test_reload_clamps_remembered_column_of_other_rows() {
    let mut app = app(2);
    app.set_items(items(10));
    app.store.set_focus(1, 9);
    app.store.set_focus(0, 1);
    app.set_items(items(4));

    assert_eq!(app.store.focused_index_for(1), 3);
    app.handle_grid_key(&key(KeyCode::Down));
    assert_eq!(app.view().focused_cell().map(|c| (c.row, c.index)), Some((1, 3)));
}

// ==================== Transitions ====================

#[test]
fn test_strip_offset_animates_toward_focus() {
    let mut app = app(1);
    app.set_items(items(10));
    let start = Instant::now();
    assert_eq!(app.strip_offset_at(0, start), 0);

    app.store.focus_next(10);
    app.sync_transitions(start);
    assert!(app.is_animating(start));

    let done = start + Duration::from_millis(300);
    assert!(!app.is_animating(done));
    assert_eq!(app.strip_offset_at(0, done), -20);
}

// ==================== Loading ====================

#[test]
fn test_loads_collection_from_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("collection.json");
    std::fs::write(
        &path,
        r#"{"collection": [
            {"id": 1, "title": "One", "images": {"artwork_portrait": "1.jpg"}},
            {"id": 2, "title": "Two"},
            {"id": 3, "title": "Three", "images": {"artwork_portrait": "3.jpg"}}
        ]}"#,
    )
    .unwrap();

    let mut app = App::new(&GridConfig::default(), CollectionSource::File(path)).unwrap();
    app.start_loading();
    assert!(app.is_loading());
    wait_for_load(&mut app);

    assert!(matches!(app.load_state, LoadState::Loaded));
    assert_eq!(app.items.len(), 2);
    assert_eq!(app.focus_target, FocusTarget::Grid);
}

#[test]
fn test_failed_load_shows_empty_grid() {
    let mut app = App::new(
        &GridConfig::default(),
        CollectionSource::parse("/no/such/collection.json"),
    )
    .unwrap();
    app.start_loading();
    wait_for_load(&mut app);

    assert!(matches!(app.load_state, LoadState::Failed(_)));
    assert!(app.view().is_empty());
    assert!(app.status_message.as_ref().is_some_and(|s| s.is_error));
    assert_eq!(app.focus_target, FocusTarget::None);
}

#[test]
fn test_invalid_keymap_rejected() {
    let mut config = GridConfig::default();
    config.keys.next = vec!["NoSuchKey".to_string()];
    assert!(App::new(&config, CollectionSource::parse("unused.json")).is_err());
}
