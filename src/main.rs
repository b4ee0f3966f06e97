use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use rollcall::config::RollcallConfig;
use rollcall::engine::driver::roll_to_completion;
use rollcall::engine::{RollEngine, RollView};
use rollcall::theme::ThemeCatalog;
use rollcall::tui::app::TuiApp;
use rollcall::tui::runner::run_tui;

#[derive(Parser)]
#[command(name = "rollcall", about = "Random student picker. Decelerating roll, swappable themes.")]
struct Cli {
    /// Roster file (YAML list, or one name per line)
    #[arg(short, long)]
    roster: Option<PathBuf>,

    /// Themes file (.json, or a YAML list of theme descriptors)
    #[arg(short, long)]
    themes: Option<PathBuf>,

    /// Theme to apply at startup, by name
    #[arg(long)]
    theme: Option<String>,

    /// Theme descriptor as raw JSON, applied over --theme. Unparseable
    /// input falls back to the default theme.
    #[arg(long, value_name = "JSON")]
    theme_json: Option<String>,

    /// Fixed RNG seed for reproducible picks
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Interactive classroom screen (default)
    Tui,
    /// Run one roll headless and print the pick
    Pick,
    /// List selectable themes in presentation order
    Themes,
}

/// Headless view: the pick is printed once the roll settles.
struct Quiet;

impl RollView for Quiet {
    fn render_name(&mut self, _text: &str) {}
    fn set_highlighted(&mut self, _index: Option<usize>) {}
}

fn build_engine(config: &RollcallConfig) -> Result<RollEngine> {
    let roster = config.roster()?;
    info!(students = roster.len(), "roster loaded");
    let timing = config.timing();
    Ok(match config.seed {
        Some(seed) => RollEngine::seeded(roster, timing, seed),
        None => RollEngine::new(roster, timing),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Tui);

    // The TUI owns the screen; keep stderr quiet unless asked.
    let directive = if command == Command::Tui {
        "rollcall=warn"
    } else {
        "rollcall=info"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(directive.parse()?),
        )
        .init();

    let config = RollcallConfig::load().merged(RollcallConfig {
        roster_file: cli.roster,
        themes_file: cli.themes,
        theme: cli.theme,
        seed: cli.seed,
        ..RollcallConfig::default()
    });

    let catalog = match &config.themes_file {
        Some(path) => ThemeCatalog::load_or_default(path),
        None => ThemeCatalog::default(),
    };

    match command {
        Command::Themes => {
            for (i, theme) in catalog.list().iter().enumerate() {
                println!("{:>2}  {}  ({})", i + 1, theme.theme_name, theme.background_color);
            }
        }
        Command::Pick => {
            let mut engine = build_engine(&config)?;
            if engine.roster().is_empty() {
                bail!("roster is empty; pass --roster or set `roster` in .rollcall/config.yaml");
            }
            roll_to_completion(&mut engine, &mut Quiet).await;
            if let Some(name) = engine.last_pick_name() {
                println!("{name}");
            }
        }
        Command::Tui => {
            let engine = build_engine(&config)?;
            let mut app = TuiApp::new(engine, catalog, config.theme.as_deref());
            if let Some(raw) = cli.theme_json.as_deref() {
                app.on_theme_json(raw);
            }
            run_tui(app).await?;
        }
    }

    Ok(())
}
