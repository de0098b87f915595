mod cli;

use std::io;

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser};
use tracing::{info, warn};

use cli::{Cli, Commands};
use content_grid::collection::{CollectionSource, load_collection};
use content_grid::config::GridConfig;
use content_grid::{logging, snapshot, tui};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        clap_complete::generate(*shell, &mut Cli::command(), "cgrid", &mut io::stdout());
        return Ok(());
    }

    // Logging is best effort; the grid works without a log file
    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("Warning: logging disabled: {e:#}");
    }

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => GridConfig::default_path()?,
    };
    let mut config = GridConfig::load_from(&config_path)?;
    if let Some(rows) = cli.rows {
        config.grid.rows = rows;
        config.validate()?;
    }

    match cli.command {
        Some(Commands::Config { init }) => cmd_config(&config, &config_path, init),
        Some(Commands::Snapshot { keys }) => {
            let source = resolve_source(cli.source.as_deref(), &config)?;
            cmd_snapshot(&config, &source, &keys)
        }
        Some(Commands::Completions { .. }) => Ok(()),
        None => {
            let source = resolve_source(cli.source.as_deref(), &config)?;
            info!(%source, rows = config.grid.rows, "starting grid");
            tui::run(&config, source)
        }
    }
}

fn resolve_source(flag: Option<&str>, config: &GridConfig) -> Result<CollectionSource> {
    match flag.or(config.source.as_deref()) {
        Some(raw) => Ok(CollectionSource::parse(raw)),
        None => bail!(
            "No collection source given. Pass --source <URL|FILE> or set `source` in {}",
            GridConfig::default_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "the config file".to_string())
        ),
    }
}

fn cmd_snapshot(config: &GridConfig, source: &CollectionSource, keys: &str) -> Result<()> {
    let items = load_collection(source)?;
    let keys = snapshot::parse_key_script(keys);
    let view = snapshot::snapshot(config, &items, &keys)?;
    let json = serde_json::to_string_pretty(&view).context("Failed to serialize grid view")?;
    println!("{json}");
    Ok(())
}

fn cmd_config(config: &GridConfig, path: &std::path::Path, init: bool) -> Result<()> {
    if init {
        if path.exists() {
            warn!(path = %path.display(), "config file already exists");
            eprintln!("Config already exists at {}", path.display());
        } else {
            config.save_to(path)?;
            eprintln!("Wrote default config to {}", path.display());
        }
    }
    print!("{}", config.to_toml()?);
    Ok(())
}
