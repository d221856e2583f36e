//! # mf-cli
//!
//! Command-line host for the Monthly Focus widget.
//!
//! Stands in for the home-screen host: it reads the shared container the
//! main app writes goals into, and renders or toggles them.
//! - `mf goals list/toggle` — inspect this month's goals, check one off
//! - `mf widget snapshot/placeholder/timeline/info` — what the widget would show

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mf_goal::FocusConfig;
use tracing_subscriber::EnvFilter;

/// Monthly Focus — this month's goals, one tap to check off.
#[derive(Parser)]
#[command(name = "mf", version, about)]
struct Cli {
    /// Path to config.toml (defaults to <config_dir>/monthly-focus/config.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Shared container directory (overrides storage.container_dir).
    #[arg(long)]
    container: Option<PathBuf>,

    /// Log debug output to stderr.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and toggle goals.
    Goals {
        #[command(subcommand)]
        command: commands::goals::GoalsCommands,
    },
    /// Render the widget.
    Widget {
        #[command(subcommand)]
        command: commands::widget::WidgetCommands,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they don't mix with rendered output on stdout.
    let level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("mf_goal={}", level).parse()?)
                .add_directive(format!("mf_widget={}", level).parse()?)
                .add_directive(format!("mf={}", level).parse()?),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config_path = cli.config.unwrap_or_else(FocusConfig::default_path);
    let mut config = FocusConfig::load_or_default(&config_path)?;
    if let Some(dir) = cli.container {
        config.storage.container_dir = Some(dir);
    }
    tracing::debug!(
        config = %config_path.display(),
        container = %config.container_dir().display(),
        "configuration loaded"
    );

    match &cli.command {
        Commands::Goals { command } => commands::goals::execute(command, &config),
        Commands::Widget { command } => commands::widget::execute(command, &config),
    }
}
