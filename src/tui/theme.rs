//! Color palettes for the grid
//!
//! Four built-in palettes plus `custom-theme.json` in the config directory.
//! The custom file holds `"#rrggbb"` strings and may set only some colors;
//! the rest come from Catppuccin Mocha.

use std::path::PathBuf;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use ratatui::style::Color;
use serde::Deserialize;
use tracing::warn;

use crate::config::{GridConfig, TuiTheme};

const CUSTOM_THEME_FILE: &str = "custom-theme.json";

/// Colors used by the grid painter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    /// Cell fill
    pub cell: Color,
    /// Unfocused cell and grid borders
    pub outline: Color,
    pub text: Color,
    /// Hints and artwork captions
    pub muted: Color,
    /// Focused cell border and title
    pub focus: Color,
    pub heading: Color,
    /// Loading indicator
    pub busy: Color,
    pub failure: Color,
}

/// Custom palette file. Every color is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PaletteFile {
    pub background: Option<String>,
    pub cell: Option<String>,
    pub outline: Option<String>,
    pub text: Option<String>,
    pub muted: Option<String>,
    pub focus: Option<String>,
    pub heading: Option<String>,
    pub busy: Option<String>,
    pub failure: Option<String>,
}

impl PaletteFile {
    pub fn path() -> Result<PathBuf> {
        Ok(GridConfig::config_dir()?.join(CUSTOM_THEME_FILE))
    }

    pub fn read() -> Result<Self> {
        let path = Self::path()?;
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("Invalid palette in {}", path.display()))
    }

    /// Overlay the colors set in this file on `base`
    pub fn apply_to(&self, base: Theme) -> Theme {
        let pick = |value: &Option<String>, fallback: Color| {
            value
                .as_deref()
                .and_then(|hex| {
                    hex.parse::<Color>()
                        .inspect_err(|_| warn!(color = hex, "ignoring unparsable palette color"))
                        .ok()
                })
                .unwrap_or(fallback)
        };
        Theme {
            name: "Custom",
            background: pick(&self.background, base.background),
            cell: pick(&self.cell, base.cell),
            outline: pick(&self.outline, base.outline),
            text: pick(&self.text, base.text),
            muted: pick(&self.muted, base.muted),
            focus: pick(&self.focus, base.focus),
            heading: pick(&self.heading, base.heading),
            busy: pick(&self.busy, base.busy),
            failure: pick(&self.failure, base.failure),
        }
    }
}

/// The custom palette, read on first use
fn custom_theme() -> Theme {
    static CUSTOM: OnceLock<Theme> = OnceLock::new();
    *CUSTOM.get_or_init(|| match PaletteFile::read() {
        Ok(file) => file.apply_to(CATPPUCCIN_MOCHA),
        Err(e) => {
            warn!(error = %e, "custom theme unavailable, using Catppuccin Mocha");
            CATPPUCCIN_MOCHA
        }
    })
}

/// Palette selection, cycled with `t`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeVariant {
    #[default]
    CatppuccinMocha,
    CatppuccinLatte,
    Dracula,
    Nord,
    Custom,
}

impl ThemeVariant {
    const CYCLE: [Self; 5] = [
        Self::CatppuccinMocha,
        Self::CatppuccinLatte,
        Self::Dracula,
        Self::Nord,
        Self::Custom,
    ];

    pub fn theme(self) -> Theme {
        match self {
            Self::CatppuccinMocha => CATPPUCCIN_MOCHA,
            Self::CatppuccinLatte => CATPPUCCIN_LATTE,
            Self::Dracula => DRACULA,
            Self::Nord => NORD,
            Self::Custom => custom_theme(),
        }
    }

    /// Following palette; `Custom` is skipped when no file exists
    pub fn next(self) -> Self {
        let has_custom = PaletteFile::path().is_ok_and(|p| p.exists());
        self.next_with(has_custom)
    }

    fn next_with(self, has_custom: bool) -> Self {
        let position = Self::CYCLE.iter().position(|v| *v == self).unwrap_or(0);
        Self::CYCLE
            .iter()
            .cycle()
            .skip(position + 1)
            .copied()
            .find(|v| has_custom || *v != Self::Custom)
            .unwrap_or_default()
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Custom => "Custom",
            builtin => builtin.theme().name,
        }
    }
}

impl From<TuiTheme> for ThemeVariant {
    fn from(theme: TuiTheme) -> Self {
        match theme {
            TuiTheme::CatppuccinMocha => Self::CatppuccinMocha,
            TuiTheme::CatppuccinLatte => Self::CatppuccinLatte,
            TuiTheme::Dracula => Self::Dracula,
            TuiTheme::Nord => Self::Nord,
            TuiTheme::Custom => Self::Custom,
        }
    }
}

pub const CATPPUCCIN_MOCHA: Theme = Theme {
    name: "Catppuccin Mocha",
    background: Color::Rgb(0x1e, 0x1e, 0x2e),
    cell: Color::Rgb(0x31, 0x32, 0x44),
    outline: Color::Rgb(0x45, 0x47, 0x5a),
    text: Color::Rgb(0xcd, 0xd6, 0xf4),
    muted: Color::Rgb(0xa6, 0xad, 0xc8),
    focus: Color::Rgb(0x89, 0xb4, 0xfa),
    heading: Color::Rgb(0xcb, 0xa6, 0xf7),
    busy: Color::Rgb(0xf9, 0xe2, 0xaf),
    failure: Color::Rgb(0xf3, 0x8b, 0xa8),
};

pub const CATPPUCCIN_LATTE: Theme = Theme {
    name: "Catppuccin Latte",
    background: Color::Rgb(0xef, 0xf1, 0xf5),
    cell: Color::Rgb(0xdc, 0xe0, 0xe8),
    outline: Color::Rgb(0xbc, 0xc0, 0xcc),
    text: Color::Rgb(0x4c, 0x4f, 0x69),
    muted: Color::Rgb(0x6c, 0x6f, 0x85),
    focus: Color::Rgb(0x1e, 0x66, 0xf5),
    heading: Color::Rgb(0x88, 0x39, 0xef),
    busy: Color::Rgb(0xdf, 0x8e, 0x1d),
    failure: Color::Rgb(0xd2, 0x0f, 0x39),
};

pub const DRACULA: Theme = Theme {
    name: "Dracula",
    background: Color::Rgb(0x28, 0x2a, 0x36),
    cell: Color::Rgb(0x44, 0x47, 0x5a),
    outline: Color::Rgb(0x62, 0x72, 0xa4),
    text: Color::Rgb(0xf8, 0xf8, 0xf2),
    muted: Color::Rgb(0xbd, 0x93, 0xf9),
    focus: Color::Rgb(0x8b, 0xe9, 0xfd),
    heading: Color::Rgb(0xff, 0x79, 0xc6),
    busy: Color::Rgb(0xf1, 0xfa, 0x8c),
    failure: Color::Rgb(0xff, 0x55, 0x55),
};

pub const NORD: Theme = Theme {
    name: "Nord",
    background: Color::Rgb(0x2e, 0x34, 0x40),
    cell: Color::Rgb(0x3b, 0x42, 0x52),
    outline: Color::Rgb(0x4c, 0x56, 0x6a),
    text: Color::Rgb(0xec, 0xef, 0xf4),
    muted: Color::Rgb(0xd8, 0xde, 0xe9),
    focus: Color::Rgb(0x88, 0xc0, 0xd0),
    heading: Color::Rgb(0xb4, 0x8e, 0xad),
    busy: Color::Rgb(0xeb, 0xcb, 0x8b),
    failure: Color::Rgb(0xbf, 0x61, 0x6a),
};
