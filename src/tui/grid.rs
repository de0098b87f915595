//! Content grid composer
//!
//! Owns the single keyboard surface of the grid, the cell identity cache,
//! and stacks one `ListSurface` per row.

use std::collections::HashMap;

use crossterm::event::KeyEvent;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use super::focus::FocusStore;
use super::keyboard::{KeyMap, KeyOutcome, KeyboardBinding};
use super::list::ListSurface;
use super::view::{CellId, GridRowView, GridView, Role, StatusView};
use crate::config::GridSettings;
use crate::models::CollectionItem;

/// Grid invariant violations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("cell identity '{0}' was never issued by this grid")]
    UnknownCell(CellId),
}

/// Lazily issued, never reused identities per `(row, column)`
#[derive(Debug, Default)]
pub struct CellIdCache {
    ids: HashMap<(usize, usize), CellId>,
    coordinates: HashMap<CellId, (usize, usize)>,
}

impl CellIdCache {
    /// Identity for a cell, issued on first access and stable afterwards
    pub fn cell_id(&mut self, row: usize, column: usize) -> CellId {
        if let Some(id) = self.ids.get(&(row, column)) {
            return id.clone();
        }
        let id = CellId::new(Uuid::new_v4().to_string());
        self.ids.insert((row, column), id.clone());
        self.coordinates.insert(id.clone(), (row, column));
        id
    }

    /// Coordinate an identity was issued for
    pub fn coordinate_of(&self, id: &CellId) -> Result<(usize, usize), GridError> {
        self.coordinates
            .get(id)
            .copied()
            .ok_or_else(|| GridError::UnknownCell(id.clone()))
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// The grid surface
#[derive(Debug)]
pub struct ContentGrid {
    settings: GridSettings,
    ids: CellIdCache,
    binding: KeyboardBinding,
    /// One list per row, each with its own binding disabled
    lists: Vec<ListSurface>,
    has_items: bool,
}

impl ContentGrid {
    pub fn new(settings: GridSettings, keymap: KeyMap) -> Self {
        let rows = settings.rows.max(1);
        let binding = KeyboardBinding::new(keymap.clone(), rows);
        let lists = (0..rows)
            .map(|row| ListSurface::grid_row(row, keymap.clone()))
            .collect();
        Self {
            settings,
            ids: CellIdCache::default(),
            binding,
            lists,
            has_items: false,
        }
    }

    pub fn settings(&self) -> &GridSettings {
        &self.settings
    }

    pub fn rows(&self) -> usize {
        self.binding.row_count()
    }

    /// Whether the grid surface currently holds keyboard focus
    pub fn is_focused(&self) -> bool {
        self.binding.is_listening()
    }

    /// Take keyboard focus. No-op while the grid has nothing to show.
    pub fn focus(&mut self) {
        if self.has_items {
            self.binding.attach();
        }
    }

    /// Give up keyboard focus (overlay opened, grid emptied)
    pub fn blur(&mut self) {
        self.binding.detach();
    }

    /// React to a new item sequence. Returns true when the grid just took focus.
    pub fn on_items_changed(&mut self, item_count: usize) -> bool {
        let had_items = self.has_items;
        self.has_items = item_count > 0;

        if !self.has_items {
            self.blur();
            return false;
        }
        if !had_items {
            self.focus();
            info!(item_count, rows = self.rows(), "grid focused");
            return true;
        }
        false
    }

    /// Route a key event to the grid's binding.
    ///
    /// `item_count` is the live length of the item sequence.
    pub fn handle_key(&self, key: &KeyEvent, item_count: usize, store: &mut FocusStore) -> KeyOutcome {
        let outcome = self.binding.handle(key, item_count, store);
        if outcome.is_consumed() {
            debug!(?key.code, ?outcome, "grid key");
        }
        outcome
    }

    /// Resolve a painted cell back to its coordinate
    pub fn resolve(&self, id: &CellId) -> Result<(usize, usize), GridError> {
        self.ids.coordinate_of(id)
    }

    /// Build the view for the current items and focus
    pub fn compose(&mut self, items: &[CollectionItem], store: &FocusStore) -> GridView {
        if items.is_empty() {
            return GridView::Empty(StatusView::empty());
        }

        let focused_row = store.focused_row();
        let focused_index = store.focused_index();
        let active_descendant = self.ids.cell_id(focused_row, focused_index);

        let settings = &self.settings;
        let ids = &mut self.ids;
        let rows = self
            .lists
            .iter()
            .map(|list| GridRowView {
                role: Role::Row,
                list: list.build(items, settings, store, Some(&mut *ids)),
            })
            .collect();

        GridView::Grid {
            role: Role::Grid,
            label: "Content grid",
            active_descendant,
            focused_row,
            focused_index,
            rows,
        }
    }
}
