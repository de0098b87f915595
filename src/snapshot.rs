//! Headless grid snapshots
//!
//! Replays named keys through the same keyboard binding the TUI uses and
//! returns the resulting view, for scripting and automation.

use anyhow::{Context, Result};
use crossterm::event::{KeyEvent, KeyModifiers};
use tracing::debug;

use crate::config::GridConfig;
use crate::models::CollectionItem;
use crate::tui::focus::FocusStore;
use crate::tui::grid::ContentGrid;
use crate::tui::keyboard::parse_key_name;
use crate::tui::view::GridView;

/// Split a comma separated key script such as `Right,Right,Down`
pub fn parse_key_script(script: &str) -> Vec<String> {
    script
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

/// Compose the grid for `items` after pressing `keys` in order
pub fn snapshot(config: &GridConfig, items: &[CollectionItem], keys: &[String]) -> Result<GridView> {
    let keymap = config.keymap().context("Invalid key bindings in config")?;
    let mut grid = ContentGrid::new(config.grid.clone(), keymap);
    let mut store = FocusStore::new();
    grid.on_items_changed(items.len());

    for name in keys {
        let code = parse_key_name(name).with_context(|| format!("Invalid key in script: {name}"))?;
        let outcome = grid.handle_key(&KeyEvent::new(code, KeyModifiers::NONE), items.len(), &mut store);
        debug!(key = %name, ?outcome, "replayed key");
    }

    Ok(grid.compose(items, &store))
}
