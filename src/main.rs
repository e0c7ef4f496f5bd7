use std::fs::{self, File};
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use trend_alert::app::AppContext;
use trend_alert::cli::{commands, Cli, Commands};
use trend_alert::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    init_tracing(matches!(command, Commands::Tui));

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let ctx = AppContext::new(config, cli.source)?;

    match command {
        Commands::Tui => {
            trend_alert::tui::run(Arc::new(ctx)).await?;
        }
        Commands::Render { view, output } => {
            commands::render_html(&ctx, &view, output.as_deref()).await?;
        }
        Commands::List { view } => {
            commands::list_topics(&ctx, &view).await?;
        }
        Commands::Stats => {
            commands::show_stats(&ctx).await?;
        }
        Commands::Theme { action } => {
            commands::theme(&ctx, action)?;
        }
    }

    Ok(())
}

/// Log to stderr, or to `<data_dir>/trend-alert/trend-alert.log` while the
/// TUI owns the terminal.
fn init_tracing(tui: bool) {
    let log_file = if tui {
        dirs::data_dir().and_then(|dir| {
            let dir = dir.join("trend-alert");
            fs::create_dir_all(&dir).ok()?;
            File::options()
                .create(true)
                .append(true)
                .open(dir.join("trend-alert.log"))
                .ok()
        })
    } else {
        None
    };

    match log_file {
        Some(file) => tracing_subscriber::registry()
            .with(fmt::layer().with_writer(Arc::new(file)).with_ansi(false))
            .with(EnvFilter::from_default_env())
            .init(),
        None if tui => tracing_subscriber::registry()
            .with(EnvFilter::new("off"))
            .init(),
        None => tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(EnvFilter::from_default_env())
            .init(),
    }
}
