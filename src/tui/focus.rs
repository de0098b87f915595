//! Focus model for the content grid
//!
//! Pure move functions compute the next column or row with wraparound,
//! `FocusState` applies transitions as values, and `FocusStore` is the one
//! mutable copy the app owns and hands out by `&mut`.

use std::collections::HashMap;

use serde::Serialize;

/// Horizontal movement within a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnDirection {
    Next,
    Prev,
}

/// Vertical movement between rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowDirection {
    Up,
    Down,
}

/// Next column index with wraparound over `list_length`.
///
/// An empty list always yields 0. A single item list always yields 0.
pub fn next_column_index(current: usize, list_length: usize, direction: ColumnDirection) -> usize {
    if list_length == 0 {
        return 0;
    }

    // Reduce first so a stale index past the end still lands in range
    let current = current % list_length;
    match direction {
        ColumnDirection::Next => (current + 1) % list_length,
        ColumnDirection::Prev => (current + list_length - 1) % list_length,
    }
}

/// Next row index with wraparound over `row_count`.
///
/// Grids with zero or one row never change row.
pub fn next_row_index(current_row: usize, row_count: usize, direction: RowDirection) -> usize {
    if row_count <= 1 {
        return current_row;
    }

    let current_row = current_row % row_count;
    match direction {
        RowDirection::Down => (current_row + 1) % row_count,
        RowDirection::Up => (current_row + row_count - 1) % row_count,
    }
}

/// A single focus change request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTransition {
    Next { list_length: usize },
    Prev { list_length: usize },
    Up { row_count: usize },
    Down { row_count: usize },
    Set { row: usize, index: usize },
    /// Pull every stored column back inside a list of `list_length`
    Clamp { list_length: usize },
}

/// Which row is focused, and the last column focused in each row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusState {
    focused_row: usize,
    focused_index_by_row: HashMap<usize, usize>,
}

impl FocusState {
    pub fn focused_row(&self) -> usize {
        self.focused_row
    }

    /// Stored column for `row`, or 0 if the row was never focused
    pub fn focused_index_for(&self, row: usize) -> usize {
        self.focused_index_by_row.get(&row).copied().unwrap_or(0)
    }

    /// Column of the focused row
    pub fn focused_index(&self) -> usize {
        self.focused_index_for(self.focused_row)
    }

    /// Produce the state that follows `transition`.
    ///
    /// Column moves only write the focused row's entry. Row moves never
    /// write the column map, so each row keeps its last position.
    #[must_use]
    pub fn apply(mut self, transition: FocusTransition) -> Self {
        match transition {
            FocusTransition::Next { list_length } => {
                let next = next_column_index(self.focused_index(), list_length, ColumnDirection::Next);
                self.focused_index_by_row.insert(self.focused_row, next);
            }
            FocusTransition::Prev { list_length } => {
                let next = next_column_index(self.focused_index(), list_length, ColumnDirection::Prev);
                self.focused_index_by_row.insert(self.focused_row, next);
            }
            FocusTransition::Up { row_count } => {
                self.focused_row = next_row_index(self.focused_row, row_count, RowDirection::Up);
            }
            FocusTransition::Down { row_count } => {
                self.focused_row = next_row_index(self.focused_row, row_count, RowDirection::Down);
            }
            FocusTransition::Set { row, index } => {
                self.focused_row = row;
                self.focused_index_by_row.insert(row, index);
            }
            FocusTransition::Clamp { list_length } => {
                let last = list_length.saturating_sub(1);
                for index in self.focused_index_by_row.values_mut() {
                    *index = (*index).min(last);
                }
            }
        }
        self
    }
}

/// Point-in-time copy of the focused cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FocusSnapshot {
    pub row: usize,
    pub index: usize,
}

/// The single mutable focus state of a grid session
#[derive(Debug, Default)]
pub struct FocusStore {
    state: FocusState,
}

impl FocusStore {
    /// Fresh store focused on row 0 with no stored columns
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus_next(&mut self, list_length: usize) {
        self.apply(FocusTransition::Next { list_length });
    }

    pub fn focus_prev(&mut self, list_length: usize) {
        self.apply(FocusTransition::Prev { list_length });
    }

    pub fn focus_up(&mut self, row_count: usize) {
        self.apply(FocusTransition::Up { row_count });
    }

    pub fn focus_down(&mut self, row_count: usize) {
        self.apply(FocusTransition::Down { row_count });
    }

    /// Direct write, bypassing directional logic (pointer focus)
    pub fn set_focus(&mut self, row: usize, index: usize) {
        self.apply(FocusTransition::Set { row, index });
    }

    /// Keep stored columns in range after the item sequence shrank
    pub fn clamp_to(&mut self, list_length: usize) {
        self.apply(FocusTransition::Clamp { list_length });
    }

    pub fn focused_row(&self) -> usize {
        self.state.focused_row()
    }

    pub fn focused_index_for(&self, row: usize) -> usize {
        self.state.focused_index_for(row)
    }

    pub fn focused_index(&self) -> usize {
        self.state.focused_index()
    }

    pub fn snapshot(&self) -> FocusSnapshot {
        FocusSnapshot {
            row: self.state.focused_row(),
            index: self.state.focused_index(),
        }
    }

    /// Read-only view of the current state
    pub fn state(&self) -> &FocusState {
        &self.state
    }

    fn apply(&mut self, transition: FocusTransition) {
        self.state = std::mem::take(&mut self.state).apply(transition);
        tracing::debug!(
            ?transition,
            row = self.state.focused_row(),
            index = self.state.focused_index(),
            "focus transition"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Move Functions ====================

    #[test]
    fn test_column_empty_list_is_zero() {
        assert_eq!(next_column_index(0, 0, ColumnDirection::Next), 0);
        assert_eq!(next_column_index(0, 0, ColumnDirection::Prev), 0);
        assert_eq!(next_column_index(7, 0, ColumnDirection::Next), 0);
    }

    #[test]
    fn test_column_wraps_last_to_first() {
        assert_eq!(next_column_index(2, 3, ColumnDirection::Next), 0);
    }

    #[test]
    fn test_column_wraps_first_to_last() {
        assert_eq!(next_column_index(0, 3, ColumnDirection::Prev), 2);
    }

    #[test]
    fn test_column_steps_inside_list() {
        assert_eq!(next_column_index(0, 5, ColumnDirection::Next), 1);
        assert_eq!(next_column_index(1, 5, ColumnDirection::Next), 2);
        assert_eq!(next_column_index(2, 5, ColumnDirection::Prev), 1);
        assert_eq!(next_column_index(1, 5, ColumnDirection::Prev), 0);
    }

    #[test]
    fn test_column_single_item_self_loop() {
        assert_eq!(next_column_index(0, 1, ColumnDirection::Next), 0);
        assert_eq!(next_column_index(0, 1, ColumnDirection::Prev), 0);
    }

    #[test]
    fn test_column_result_always_in_range() {
        for len in 1..12 {
            for current in 0..len * 2 {
                for dir in [ColumnDirection::Next, ColumnDirection::Prev] {
                    assert!(next_column_index(current, len, dir) < len);
                }
            }
        }
    }

    #[test]
    fn test_column_next_then_prev_round_trips() {
        for len in 1..10 {
            for i in 0..len {
                let forward = next_column_index(i, len, ColumnDirection::Next);
                assert_eq!(next_column_index(forward, len, ColumnDirection::Prev), i);

                let back = next_column_index(i, len, ColumnDirection::Prev);
                assert_eq!(next_column_index(back, len, ColumnDirection::Next), i);
            }
        }
    }

    #[test]
    fn test_row_single_or_empty_grid_is_noop() {
        assert_eq!(next_row_index(0, 0, RowDirection::Down), 0);
        assert_eq!(next_row_index(0, 1, RowDirection::Up), 0);
        assert_eq!(next_row_index(0, 1, RowDirection::Down), 0);
        assert_eq!(next_row_index(3, 1, RowDirection::Down), 3);
    }

    #[test]
    fn test_row_wraps_both_ways() {
        assert_eq!(next_row_index(0, 2, RowDirection::Down), 1);
        assert_eq!(next_row_index(1, 2, RowDirection::Down), 0);
        assert_eq!(next_row_index(1, 2, RowDirection::Up), 0);
        assert_eq!(next_row_index(0, 2, RowDirection::Up), 1);
    }

    // ==================== Store ====================

    #[test]
    fn test_store_starts_at_origin() {
        let store = FocusStore::new();
        assert_eq!(store.focused_row(), 0);
        assert_eq!(store.focused_index_for(0), 0);
        assert_eq!(store.focused_index_for(5), 0);
        assert_eq!(store.snapshot(), FocusSnapshot { row: 0, index: 0 });
    }

    #[test]
    fn test_store_four_items_wrap_after_last() {
        let mut store = FocusStore::new();
        let mut seen = vec![store.focused_index()];
        for _ in 0..3 {
            store.focus_next(4);
            seen.push(store.focused_index());
        }
        assert_eq!(seen, vec![0, 1, 2, 3]);

        store.focus_next(4);
        assert_eq!(store.focused_index(), 0);
    }

    #[test]
    fn test_store_prev_wraps_to_last() {
        let mut store = FocusStore::new();
        store.focus_prev(4);
        assert_eq!(store.focused_index(), 3);
    }

    #[test]
    fn test_store_next_leaves_other_rows_alone() {
        let mut store = FocusStore::new();
        store.set_focus(1, 3);
        store.set_focus(0, 0);

        store.focus_next(10);
        assert_eq!(store.focused_index_for(0), 1);
        assert_eq!(store.focused_index_for(1), 3);
    }

    #[test]
    fn test_store_row_moves_keep_column_memory() {
        let mut store = FocusStore::new();
        store.focus_next(5);
        store.focus_next(5);
        assert_eq!(store.focused_index_for(0), 2);

        store.focus_down(2);
        assert_eq!(store.snapshot(), FocusSnapshot { row: 1, index: 0 });

        store.focus_down(2);
        assert_eq!(store.snapshot(), FocusSnapshot { row: 0, index: 2 });

        store.focus_down(2);
        store.focus_up(2);
        assert_eq!(store.focused_row(), 0);
        assert_eq!(store.focused_index_for(0), 2);
        assert_eq!(store.focused_index_for(1), 0);
    }

    #[test]
    fn test_store_single_row_and_single_item_floors() {
        let mut store = FocusStore::new();
        store.focus_down(1);
        store.focus_up(1);
        assert_eq!(store.focused_row(), 0);

        store.focus_next(1);
        assert_eq!(store.focused_index(), 0);
        store.focus_prev(1);
        assert_eq!(store.focused_index(), 0);
    }

    #[test]
    fn test_store_row_move_does_not_materialize_column() {
        let mut store = FocusStore::new();
        store.focus_down(3);
        assert!(store.state().focused_index_by_row.is_empty());
    }

    #[test]
    fn test_set_focus_writes_row_and_index() {
        let mut store = FocusStore::new();
        store.set_focus(2, 7);
        assert_eq!(store.focused_row(), 2);
        assert_eq!(store.focused_index(), 7);
        assert_eq!(store.focused_index_for(0), 0);
    }

    #[test]
    fn test_state_apply_is_pure_value_transition() {
        let start = FocusState::default();
        let moved = start.clone().apply(FocusTransition::Next { list_length: 3 });
        assert_eq!(start.focused_index(), 0);
        assert_eq!(moved.focused_index(), 1);
    }

    #[test]
    fn test_clamp_pulls_every_row_into_range() {
        let mut store = FocusStore::new();
        store.set_focus(1, 9);
        store.set_focus(0, 8);
        store.set_focus(2, 1);
        store.clamp_to(3);
        assert_eq!(store.focused_row(), 2);
        assert_eq!(store.focused_index_for(0), 2);
        assert_eq!(store.focused_index_for(1), 2);
        assert_eq!(store.focused_index_for(2), 1);
    }

    #[test]
    fn test_clamp_to_empty_resets_to_zero() {
        let mut store = FocusStore::new();
        store.set_focus(0, 4);
        store.clamp_to(0);
        assert_eq!(store.focused_index(), 0);
    }
}
