//! Windowed horizontal list
//!
//! Builds one strip of cells around the focused index. Inside a grid the
//! list is told its row and takes cell identities from the grid; on its own
//! it names cells by index and owns the keyboard surface.

use crossterm::event::KeyEvent;

use super::focus::FocusStore;
use super::grid::CellIdCache;
use super::keyboard::{KeyMap, KeyOutcome, KeyboardBinding};
use super::view::{CellId, CellView, Role, RowView, StatusView, StripView};
use super::window::{VirtualWindow, strip_offset};
use crate::config::GridSettings;
use crate::models::CollectionItem;

/// Per-frame builder for a list row
#[derive(Debug)]
pub struct HorizontalList<'a> {
    items: &'a [CollectionItem],
    settings: &'a GridSettings,
    row_index: Option<usize>,
    keyboard: bool,
}

impl<'a> HorizontalList<'a> {
    /// Standalone list that owns its keyboard surface
    pub fn new(items: &'a [CollectionItem], settings: &'a GridSettings) -> Self {
        Self {
            items,
            settings,
            row_index: None,
            keyboard: true,
        }
    }

    /// Place the list at `row` of a grid
    #[must_use]
    pub fn row(mut self, row: usize) -> Self {
        self.row_index = Some(row);
        self
    }

    /// Whether the list takes keyboard focus itself
    #[must_use]
    pub fn keyboard(mut self, keyboard: bool) -> Self {
        self.keyboard = keyboard;
        self
    }

    fn label(&self) -> String {
        match self.row_index {
            Some(row) => format!("Content list row {}", row + 1),
            None => "Content list".to_string(),
        }
    }

    fn cell_id(&self, index: usize, ids: &mut Option<&mut CellIdCache>) -> CellId {
        match (self.row_index, ids.as_deref_mut()) {
            (Some(row), Some(cache)) => cache.cell_id(row, index),
            _ => CellId::new(format!("list-item-{index}")),
        }
    }

    /// Build the row view from the store's current focus.
    ///
    /// `ids` supplies grid cell identities; without it cells are named
    /// `list-item-{index}`.
    pub fn build(&self, store: &FocusStore, mut ids: Option<&mut CellIdCache>) -> RowView {
        let stride = self.settings.stride();
        let focused_index = store.focused_index_for(self.row_index.unwrap_or(0));
        let Some(window) = VirtualWindow::compute(
            focused_index,
            self.items.len(),
            self.settings.window_radius,
            stride,
        ) else {
            return RowView::Empty(StatusView::empty());
        };

        let row_is_focused = self
            .row_index
            .is_none_or(|row| store.focused_row() == row);

        let cells = window
            .items(self.items)
            .iter()
            .enumerate()
            .map(|(offset, item)| {
                let index = window.start_index + offset;
                CellView {
                    id: self.cell_id(index, &mut ids),
                    role: Role::ListItem,
                    row: self.row_index.unwrap_or(0),
                    index,
                    focused: index == focused_index && row_is_focused,
                    item_id: item.id,
                    title: item.display_title().to_string(),
                    artwork: item.images.artwork_portrait.clone(),
                }
            })
            .collect();

        let active_descendant = self
            .keyboard
            .then(|| self.cell_id(focused_index, &mut ids));

        RowView::Strip(StripView {
            role: Role::List,
            label: self.label(),
            row: self.row_index,
            focusable: self.keyboard,
            active_descendant,
            focused_index,
            item_count: self.items.len(),
            window,
            translate_x: strip_offset(focused_index.min(window.end_index), stride),
            cells,
        })
    }
}

/// A list component that keeps its keyboard binding between frames.
///
/// Standalone, the list listens for keys itself once focused. As a grid row
/// its binding is disabled: the grid is the only keyboard surface.
#[derive(Debug, Clone)]
pub struct ListSurface {
    row_index: Option<usize>,
    binding: KeyboardBinding,
}

impl ListSurface {
    pub fn standalone(keymap: KeyMap) -> Self {
        Self {
            row_index: None,
            binding: KeyboardBinding::new(keymap, 1),
        }
    }

    pub fn grid_row(row: usize, keymap: KeyMap) -> Self {
        Self {
            row_index: Some(row),
            binding: KeyboardBinding::disabled(keymap),
        }
    }

    pub fn row_index(&self) -> Option<usize> {
        self.row_index
    }

    /// Attach the binding. Has no effect on a disabled (grid row) binding.
    pub fn focus(&mut self) {
        self.binding.attach();
    }

    pub fn blur(&mut self) {
        self.binding.detach();
    }

    pub fn is_focused(&self) -> bool {
        self.binding.is_listening()
    }

    /// Feed a key to this list's own binding
    pub fn handle_key(&self, key: &KeyEvent, item_count: usize, store: &mut FocusStore) -> KeyOutcome {
        self.binding.handle(key, item_count, store)
    }

    /// Build this frame's row view
    pub fn build(
        &self,
        items: &[CollectionItem],
        settings: &GridSettings,
        store: &FocusStore,
        ids: Option<&mut CellIdCache>,
    ) -> RowView {
        let mut list = HorizontalList::new(items, settings).keyboard(self.binding.is_enabled());
        if let Some(row) = self.row_index {
            list = list.row(row);
        }
        list.build(store, ids)
    }
}
