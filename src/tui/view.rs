//! View model for the grid
//!
//! Plain data describing what is on screen: structure roles, the cell
//! identities, the active descendant and focus attributes. The painter in
//! `ui` draws it; `cgrid snapshot` prints it as JSON.

use std::fmt;

use serde::Serialize;

use super::window::VirtualWindow;

/// Notice shown in place of an empty list or grid
pub const EMPTY_NOTICE: &str = "No items to display.";

/// Structural role of a view node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Grid,
    Row,
    List,
    ListItem,
    Status,
}

/// Stable opaque identity of one grid cell
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CellId(String);

impl CellId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Non-interactive status message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusView {
    pub role: Role,
    pub message: &'static str,
}

impl StatusView {
    pub fn empty() -> Self {
        Self {
            role: Role::Status,
            message: EMPTY_NOTICE,
        }
    }
}

/// One painted cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellView {
    pub id: CellId,
    pub role: Role,
    pub row: usize,
    pub index: usize,
    pub focused: bool,
    pub item_id: i64,
    pub title: String,
    pub artwork: String,
}

/// A windowed horizontal strip of cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StripView {
    pub role: Role,
    pub label: String,
    /// Row index inside a grid, `None` for a standalone list
    pub row: Option<usize>,
    /// Whether this strip takes keyboard focus itself
    pub focusable: bool,
    /// Set only when the strip is focusable
    pub active_descendant: Option<CellId>,
    pub focused_index: usize,
    pub item_count: usize,
    pub window: VirtualWindow,
    /// Target horizontal offset of the strip
    pub translate_x: i64,
    pub cells: Vec<CellView>,
}

impl StripView {
    /// Full strip width including the gaps for skipped items
    pub fn content_width(&self, stride: usize) -> usize {
        self.window.leading_gap + self.window.len() * stride + self.window.trailing_gap
    }
}

/// A list row: either a strip or the empty notice
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowView {
    Strip(StripView),
    Empty(StatusView),
}

/// Whole grid surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GridView {
    Grid {
        role: Role,
        label: &'static str,
        active_descendant: CellId,
        focused_row: usize,
        focused_index: usize,
        rows: Vec<GridRowView>,
    },
    Empty(StatusView),
}

/// A `Role::Row` container wrapping one list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridRowView {
    pub role: Role,
    pub list: RowView,
}

impl GridRowView {
    pub fn cells(&self) -> &[CellView] {
        match &self.list {
            RowView::Strip(strip) => &strip.cells,
            RowView::Empty(_) => &[],
        }
    }
}

impl GridView {
    /// Cell marked focused, if any
    pub fn focused_cell(&self) -> Option<&CellView> {
        self.cells().find(|cell| cell.focused)
    }

    /// All painted cells across rows
    pub fn cells(&self) -> impl Iterator<Item = &CellView> {
        let rows: &[GridRowView] = match self {
            Self::Grid { rows, .. } => rows,
            Self::Empty(_) => &[],
        };
        rows.iter().flat_map(GridRowView::cells)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty(_))
    }
}
