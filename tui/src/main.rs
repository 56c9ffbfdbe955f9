//! Gutenshelf TUI Entry Point
//!
//! Launches the terminal UI for the personal book library.
//!
//! Environment:
//!   GUTENSHELF_API_URL  Library service base URL
//!   GUTENSHELF_LOG      Log file path (default: gutenshelf.log)
//!   RUST_LOG            Log filter directives

use std::fs::File;
use std::io;
use std::panic;
use std::sync::Arc;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gutenshelf_tui::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to a file; stdout belongs to the TUI
    let log_path =
        std::env::var("GUTENSHELF_LOG").unwrap_or_else(|_| "gutenshelf.log".to_string());
    let log_file = Arc::new(File::create(&log_path)?);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(log_file),
        )
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gutenshelf_tui=info".parse()?)
                .add_directive("library_core=info".parse()?),
        )
        .init();

    // Check for a TTY before touching the terminal
    use std::io::IsTerminal;

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: gutenshelf requires a terminal (TTY)");
        std::process::exit(1);
    }

    // Panic hook to restore the terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the app
    let result = run_app(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> anyhow::Result<()> {
    let mut app = App::new()?;
    app.run(terminal).await
}
