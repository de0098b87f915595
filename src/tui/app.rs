//! Application state for the TUI

use std::collections::HashMap;
use std::thread::JoinHandle;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::event::KeyEvent;
use ratatui::layout::{Position, Rect};
use tracing::{error, info};

use super::focus::FocusStore;
use super::grid::ContentGrid;
use super::keyboard::KeyOutcome;
use super::theme::ThemeVariant;
use super::view::{CellId, GridView};
use super::window::{Transition, strip_offset};
use crate::collection::{CollectionError, CollectionSource, load_collection};
use crate::config::GridConfig;
use crate::models::CollectionItem;

/// Which surface receives key events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusTarget {
    /// Nothing focusable yet (loading, or empty collection)
    #[default]
    None,
    Grid,
    Help,
}

/// Collection loading progress
#[derive(Debug, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading(LoadOperation),
    Loaded,
    Failed(String),
}

/// A collection fetch running on a worker thread
#[derive(Debug)]
pub struct LoadOperation {
    pub start_time: Instant,
    pub thread_handle: JoinHandle<Result<Vec<CollectionItem>, CollectionError>>,
}

/// Transient message in the footer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// Main application state
#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub source: CollectionSource,
    pub items: Vec<CollectionItem>,
    pub store: FocusStore,
    pub grid: ContentGrid,
    pub focus_target: FocusTarget,
    pub load_state: LoadState,
    pub theme_variant: ThemeVariant,
    pub status_message: Option<StatusMessage>,
    /// Strip offset animation per row
    transitions: HashMap<usize, Transition>,
    /// Screen areas of the cells painted in the last frame
    pub cell_areas: Vec<(Rect, CellId)>,
}

impl App {
    pub fn new(config: &GridConfig, source: CollectionSource) -> Result<Self> {
        let keymap = config.keymap().context("Invalid key bindings in config")?;
        Ok(Self {
            running: true,
            source,
            items: Vec::new(),
            store: FocusStore::new(),
            grid: ContentGrid::new(config.grid.clone(), keymap),
            focus_target: FocusTarget::None,
            load_state: LoadState::Idle,
            theme_variant: ThemeVariant::from(config.tui.theme),
            status_message: None,
            transitions: HashMap::new(),
            cell_areas: Vec::new(),
        })
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Start fetching the collection in the background
    pub fn start_loading(&mut self) {
        if self.is_loading() {
            return;
        }
        let source = self.source.clone();
        let thread_handle = std::thread::spawn(move || load_collection(&source));
        self.load_state = LoadState::Loading(LoadOperation {
            start_time: Instant::now(),
            thread_handle,
        });
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.load_state, LoadState::Loading(_))
    }

    /// Collect the load result once the worker is done. Returns true if it finished.
    pub fn poll_loading(&mut self) -> bool {
        let finished = match &self.load_state {
            LoadState::Loading(op) => op.thread_handle.is_finished(),
            _ => false,
        };
        if !finished {
            return false;
        }

        let LoadState::Loading(op) = std::mem::take(&mut self.load_state) else {
            return false;
        };
        let elapsed = op.start_time.elapsed();
        match op.thread_handle.join() {
            Ok(Ok(items)) => {
                info!(count = items.len(), ?elapsed, "collection ready");
                self.load_state = LoadState::Loaded;
                self.set_items(items);
            }
            Ok(Err(e)) => {
                error!(error = %e, "failed to load collection");
                self.fail_loading(e.to_string());
            }
            Err(_) => {
                error!("collection loader thread panicked");
                self.fail_loading("Collection loader crashed".to_string());
            }
        }
        true
    }

    fn fail_loading(&mut self, message: String) {
        self.set_status(format!("Failed to load collection: {message}"), true);
        self.load_state = LoadState::Failed(message);
        self.set_items(Vec::new());
    }

    /// Replace the item sequence, pulling stale focus back into range
    pub fn set_items(&mut self, items: Vec<CollectionItem>) {
        self.items = items;
        if !self.items.is_empty() {
            self.store.clamp_to(self.items.len());
        }
        let took_focus = self.grid.on_items_changed(self.items.len());
        match self.focus_target {
            // Help keeps focus; the grid gets it back when help closes
            FocusTarget::Help => self.grid.blur(),
            _ if took_focus => self.focus_target = FocusTarget::Grid,
            FocusTarget::Grid if self.items.is_empty() => self.focus_target = FocusTarget::None,
            _ => {}
        }
        self.sync_transitions(Instant::now());
    }

    /// Fetch the collection again
    pub fn reload(&mut self) {
        info!(source = %self.source, "reloading collection");
        self.start_loading();
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Feed a key to the grid surface
    pub fn handle_grid_key(&mut self, key: &KeyEvent) -> KeyOutcome {
        if self.focus_target != FocusTarget::Grid {
            return KeyOutcome::Ignored;
        }
        let outcome = self.grid.handle_key(key, self.items.len(), &mut self.store);
        if outcome.is_consumed() {
            self.sync_transitions(Instant::now());
        }
        if let KeyOutcome::Select { index, .. } = outcome
            && let Some(item) = self.items.get(index)
        {
            self.set_status(format!("Selected: {}", item.display_title()), false);
        }
        outcome
    }

    /// Pointer focus: focus the cell painted at `position`, if any
    pub fn click_at(&mut self, position: Position) -> Result<bool> {
        let Some(id) = self
            .cell_areas
            .iter()
            .find(|(area, _)| area.contains(position))
            .map(|(_, id)| id.clone())
        else {
            return Ok(false);
        };

        let (row, index) = self
            .grid
            .resolve(&id)
            .context("Clicked cell has no grid coordinate")?;
        self.store.set_focus(row, index);
        if self.focus_target == FocusTarget::None && !self.items.is_empty() {
            self.grid.focus();
            self.focus_target = FocusTarget::Grid;
        }
        self.sync_transitions(Instant::now());
        Ok(true)
    }

    // ========================================================================
    // Overlays
    // ========================================================================

    pub fn show_help(&self) -> bool {
        self.focus_target == FocusTarget::Help
    }

    /// Open help; the grid loses keyboard focus while it is up
    pub fn open_help(&mut self) {
        self.grid.blur();
        self.focus_target = FocusTarget::Help;
    }

    /// Close help and hand focus back to the grid
    pub fn close_help(&mut self) {
        self.focus_target = FocusTarget::None;
        self.restore_focus();
    }

    /// Put keyboard focus back on the grid when nothing else holds it
    pub fn restore_focus(&mut self) {
        if self.focus_target != FocusTarget::None {
            return;
        }
        self.grid.focus();
        if self.grid.is_focused() {
            self.focus_target = FocusTarget::Grid;
        }
    }

    pub fn cycle_theme(&mut self) {
        self.theme_variant = self.theme_variant.next();
        self.set_status(format!("Theme: {}", self.theme_variant.display_name()), false);
    }

    pub fn set_status(&mut self, text: impl Into<String>, is_error: bool) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            is_error,
        });
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    // ========================================================================
    // View
    // ========================================================================

    /// Compose the grid view for this frame
    pub fn view(&mut self) -> GridView {
        self.grid.compose(&self.items, &self.store)
    }

    /// Point every row's animation at its current focus target
    pub fn sync_transitions(&mut self, now: Instant) {
        let settings = self.grid.settings();
        let stride = settings.stride();
        let duration = settings.transition();
        let last = self.items.len().saturating_sub(1);

        for row in 0..self.grid.rows() {
            let target = strip_offset(self.store.focused_index_for(row).min(last), stride);
            self.transitions
                .entry(row)
                .and_modify(|t| t.retarget(target, now))
                .or_insert_with(|| Transition::settled(target, duration));
        }
    }

    /// Animated strip offset of `row` at `now`
    pub fn strip_offset_at(&self, row: usize, now: Instant) -> i64 {
        self.transitions
            .get(&row)
            .map_or(0, |transition| transition.offset_at(now))
    }

    /// True while any strip is still sliding
    pub fn is_animating(&self, now: Instant) -> bool {
        self.transitions.values().any(|t| t.is_running(now))
    }
}

#[cfg(test)]
mod tests;
