//! content-grid: a keyboard and remote navigable content grid for the terminal
//!
//! The focus model, keyboard binding and virtual window live in [`tui`];
//! [`collection`] loads and validates the items shown in the grid.

pub mod collection;
pub mod config;
pub mod http;
pub mod logging;
pub mod models;
pub mod snapshot;
pub mod tui;

pub use collection::{CollectionError, CollectionSource, load_collection, parse_collection};
pub use config::GridConfig;
pub use models::CollectionItem;
