//! inventory-manager binary entry point.
//!
//! Parses options, sets up logging, initializes the terminal in raw mode,
//! runs the TUI event loop, and restores the terminal state on exit.
//!
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use inventory_manager::app::{self, AppState};
use inventory_manager::cli::Cli;
use inventory_manager::error::{Context, Result};
use inventory_manager::logging;

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode().with_ctx(|| "enable raw mode".to_string())?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .with_ctx(|| "enter alternate screen".to_string())?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).with_ctx(|| "create terminal".to_string())?;
    Ok(terminal)
}

/// Program entry point: run the TUI and report any top-level error to stderr.
fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_dir = cli.resolved_config_dir();
    if let Err(e) = std::fs::create_dir_all(&config_dir) {
        eprintln!("warning: cannot create {}: {e}", config_dir.display());
    }
    // logging is best-effort; the app runs without it
    let log_file = cli.resolved_log_file(&config_dir);
    if let Err(e) = logging::init(&log_file, &cli.log_level) {
        eprintln!("warning: logging disabled: {e}");
    }
    tracing::info!(export_path = %cli.export_path.display(), config_dir = %config_dir.display(), "starting");

    let mut app = AppState::new(&config_dir, cli.export_path.clone());
    let mut terminal = init_terminal().map_err(|e| format!("init terminal: {}", e))?;

    let res = app::run(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        tracing::error!(error = %err, "application error");
        eprintln!("application error: {err}");
    }
    Ok(())
}
