//! Terminal UI for the content grid

pub mod app;
pub mod event;
pub mod focus;
pub mod grid;
pub mod keyboard;
pub mod list;
pub mod theme;
pub mod ui;
pub mod view;
pub mod window;

use std::io::{self, stdout};

use anyhow::{Context, Result};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;
use tracing::info;

use crate::collection::CollectionSource;
use crate::config::GridConfig;
use app::App;

/// Run the TUI until the user quits
pub fn run(config: &GridConfig, source: CollectionSource) -> Result<()> {
    let mut app = App::new(config, source)?;
    app.start_loading();

    let mut terminal = ratatui::init();
    guard_setup(execute!(stdout(), EnableMouseCapture), ratatui::restore)
        .context("Failed to enable mouse capture")?;
    info!("tui started");

    let result = run_loop(&mut terminal, &mut app);

    // Restore the terminal even when the loop failed
    let _ = execute!(stdout(), DisableMouseCapture);
    ratatui::restore();
    info!("tui stopped");
    result
}

fn run_loop(terminal: &mut DefaultTerminal, app: &mut App) -> Result<()> {
    while app.running {
        app.poll_loading();
        terminal.draw(|frame| ui::render(frame, app))?;
        event::handle_events(app)?;
    }
    Ok(())
}

/// Pass a setup step's result through, running `restore` first if it failed
fn guard_setup(result: io::Result<()>, restore: impl FnOnce()) -> io::Result<()> {
    if result.is_err() {
        restore();
    }
    result
}
