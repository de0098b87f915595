//! Keyboard binding for grid navigation
//!
//! Translates crossterm key events into focus store transitions. Several
//! physical keys can share one logical action (arrow keys, vim keys and
//! remote-control media keys), see [`KeyMap`].

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MediaKeyCode};
use thiserror::Error;

use super::focus::FocusStore;
use crate::config::KeysConfig;

/// Error raised when a configured key name is not recognized
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyMapError {
    #[error("unknown key name '{0}'")]
    UnknownKey(String),
    #[error("no keys bound to '{0}'")]
    EmptyBinding(&'static str),
}

/// Logical navigation actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Next,
    Prev,
    Up,
    Down,
    Select,
}

impl KeyAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Prev => "prev",
            Self::Up => "up",
            Self::Down => "down",
            Self::Select => "select",
        }
    }
}

/// Parse a key name such as `ArrowRight`, `Right`, `Enter`, `MediaTrackNext` or `l`.
///
/// Browser style names and their short remote-control aliases resolve to the
/// same key code. `Select` has no terminal key of its own and maps to Enter.
pub fn parse_key_name(name: &str) -> Result<KeyCode, KeyMapError> {
    let code = match name {
        "ArrowRight" | "Right" => KeyCode::Right,
        "ArrowLeft" | "Left" => KeyCode::Left,
        "ArrowUp" | "Up" => KeyCode::Up,
        "ArrowDown" | "Down" => KeyCode::Down,
        "Enter" | "Select" => KeyCode::Enter,
        "Space" => KeyCode::Char(' '),
        "Tab" => KeyCode::Tab,
        "BackTab" => KeyCode::BackTab,
        "Home" => KeyCode::Home,
        "End" => KeyCode::End,
        "PageUp" => KeyCode::PageUp,
        "PageDown" => KeyCode::PageDown,
        "MediaTrackNext" => KeyCode::Media(MediaKeyCode::TrackNext),
        "MediaTrackPrevious" => KeyCode::Media(MediaKeyCode::TrackPrevious),
        "MediaFastForward" => KeyCode::Media(MediaKeyCode::FastForward),
        "MediaRewind" => KeyCode::Media(MediaKeyCode::Rewind),
        "MediaPlayPause" => KeyCode::Media(MediaKeyCode::PlayPause),
        "MediaPlay" => KeyCode::Media(MediaKeyCode::Play),
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return Err(KeyMapError::UnknownKey(other.to_string())),
            }
        }
    };
    Ok(code)
}

/// Logical action → set of physical keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    next: Vec<KeyCode>,
    prev: Vec<KeyCode>,
    up: Vec<KeyCode>,
    down: Vec<KeyCode>,
    select: Vec<KeyCode>,
}

impl KeyMap {
    /// Build from configured key names
    pub fn from_config(keys: &KeysConfig) -> Result<Self, KeyMapError> {
        Ok(Self {
            next: parse_names("next", &keys.next)?,
            prev: parse_names("prev", &keys.prev)?,
            up: parse_names("up", &keys.up)?,
            down: parse_names("down", &keys.down)?,
            select: parse_names("select", &keys.select)?,
        })
    }

    /// Whether `code` is bound to `action`
    pub fn matches(&self, action: KeyAction, code: KeyCode) -> bool {
        let keys = match action {
            KeyAction::Next => &self.next,
            KeyAction::Prev => &self.prev,
            KeyAction::Up => &self.up,
            KeyAction::Down => &self.down,
            KeyAction::Select => &self.select,
        };
        keys.contains(&code)
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            next: vec![
                KeyCode::Right,
                KeyCode::Char('l'),
                KeyCode::Media(MediaKeyCode::TrackNext),
                KeyCode::Media(MediaKeyCode::FastForward),
            ],
            prev: vec![
                KeyCode::Left,
                KeyCode::Char('h'),
                KeyCode::Media(MediaKeyCode::TrackPrevious),
                KeyCode::Media(MediaKeyCode::Rewind),
            ],
            up: vec![KeyCode::Up, KeyCode::Char('k')],
            down: vec![KeyCode::Down, KeyCode::Char('j')],
            select: vec![
                KeyCode::Enter,
                KeyCode::Char(' '),
                KeyCode::Media(MediaKeyCode::PlayPause),
            ],
        }
    }
}

fn parse_names(action: &'static str, names: &[String]) -> Result<Vec<KeyCode>, KeyMapError> {
    if names.is_empty() {
        return Err(KeyMapError::EmptyBinding(action));
    }
    let mut codes = Vec::with_capacity(names.len());
    for name in names {
        let code = parse_key_name(name)?;
        // "ArrowRight" and "Right" resolve to the same code
        if !codes.contains(&code) {
            codes.push(code);
        }
    }
    Ok(codes)
}

const CHORD_MODIFIERS: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SUPER)
    .union(KeyModifiers::HYPER)
    .union(KeyModifiers::META);

/// What a key event did to the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not a navigation key, or the binding is inactive; the caller may use it
    Ignored,
    /// A focus transition ran and the key was consumed
    Handled,
    /// Select on an in-range cell; consumed, no action taken here
    Select { row: usize, index: usize },
}

impl KeyOutcome {
    pub fn is_consumed(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Listener that drives focus transitions from key events on one surface
#[derive(Debug, Clone)]
pub struct KeyboardBinding {
    keymap: KeyMap,
    row_count: usize,
    enabled: bool,
    attached: bool,
}

impl KeyboardBinding {
    /// Enabled binding, detached until its surface takes focus
    pub fn new(keymap: KeyMap, row_count: usize) -> Self {
        Self {
            keymap,
            row_count,
            enabled: true,
            attached: false,
        }
    }

    /// Binding that never listens (child rows inside a grid)
    pub fn disabled(keymap: KeyMap) -> Self {
        Self {
            enabled: false,
            ..Self::new(keymap, 1)
        }
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    pub fn detach(&mut self) {
        self.attached = false;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// True while the binding reacts to events
    pub fn is_listening(&self) -> bool {
        self.enabled && self.attached
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Apply one key event.
    ///
    /// `item_count` must be read from the live item sequence at the time of
    /// the event. An empty list ignores every key, and so does any key held
    /// with Ctrl, Alt or another non-Shift modifier.
    pub fn handle(&self, key: &KeyEvent, item_count: usize, store: &mut FocusStore) -> KeyOutcome {
        if !self.is_listening() || key.kind == KeyEventKind::Release {
            return KeyOutcome::Ignored;
        }
        // Chorded keys (Ctrl+l, Alt+Right) belong to the app, Shift is fine
        if key.modifiers.intersects(CHORD_MODIFIERS) {
            return KeyOutcome::Ignored;
        }
        if item_count == 0 {
            return KeyOutcome::Ignored;
        }

        let code = key.code;
        let multi_row = self.row_count > 1;

        if self.keymap.matches(KeyAction::Next, code) {
            store.focus_next(item_count);
            KeyOutcome::Handled
        } else if self.keymap.matches(KeyAction::Prev, code) {
            store.focus_prev(item_count);
            KeyOutcome::Handled
        } else if multi_row && self.keymap.matches(KeyAction::Up, code) {
            store.focus_up(self.row_count);
            KeyOutcome::Handled
        } else if multi_row && self.keymap.matches(KeyAction::Down, code) {
            store.focus_down(self.row_count);
            KeyOutcome::Handled
        } else if self.keymap.matches(KeyAction::Select, code) {
            let snapshot = store.snapshot();
            if snapshot.index < item_count {
                KeyOutcome::Select {
                    row: snapshot.row,
                    index: snapshot.index,
                }
            } else {
                KeyOutcome::Ignored
            }
        } else {
            KeyOutcome::Ignored
        }
    }
}
