//! otpgate binary entry point

use std::io;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use otpgate::{config::Config, tui::App};

#[derive(Parser)]
#[command(name = "otpgate")]
#[command(about = "Terminal UI for phone-number sign-in")]
#[command(version)]
pub struct Cli {
    /// Base URL of the authentication service
    #[arg(long)]
    pub api_url: Option<String>,

    /// UI language ("en", "fr")
    #[arg(long)]
    pub locale: Option<String>,

    /// Use the light palette
    #[arg(long)]
    pub light: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "otpgate=info");
    }

    // Log to a file so the TUI display stays clean
    let file_appender = tracing_appender::rolling::never(".", "otpgate.log");
    let (log_writer, _log_guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(log_writer)
        .with_ansi(false)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    info!("Starting otpgate...");

    let mut config = Config::from_env()?;
    if let Some(api_url) = cli.api_url {
        config.api_base_url = api_url;
    }
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }
    if cli.light {
        config.dark_theme = false;
    }
    config.validate()?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config)?;
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    match result {
        Ok(()) => {
            info!("otpgate exited successfully");
        }
        Err(e) => {
            error!("otpgate encountered an error: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
