//! carmate - in-car infotainment shell
//!
//! A terminal shell for Linux head units:
//! - Dashboard with speed, clock and weather widgets
//! - Maintenance guides with ADB commands
//! - AI co-pilot chat
//!
//! Usage: carmate [--help] [--version]

mod app;
mod config;
mod i18n;
mod modules;
mod nav;
mod types;
mod ui;

use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::stdout;
use std::time::Duration;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    if args.iter().any(|a| a == "--version" || a == "-v") {
        println!("carmate {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if let Err(e) = run_app() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn print_help() {
    println!(
        r#"carmate - in-car infotainment shell

USAGE:
    carmate [OPTIONS]

OPTIONS:
    -h, --help       Print help information
    -v, --version    Print version information

KEYBINDINGS:
    1-3              Switch views
    Backspace        Back to the previous view
    j/k              Navigate up/down
    Enter            Select/confirm
    g                Toggle language (EN / 中文)
    b                Brightness menu
    ,                Settings
    ?                Help / About
    q                Quit

VIEWS:
    [1] Dash         Speed, clock and weather widgets
    [2] Tools        Maintenance guides with ADB commands
    [3] AI Pilot     Chat assistant for your car setup

AI:
    The co-pilot uses the Gemini API. Provide a key via the
    GEMINI_API_KEY environment variable or the settings page.

CONFIG:
    ~/.config/carmate/config.toml
"#
    );
}

fn run_app() -> Result<()> {
    // Load configuration
    let config = config::Config::load()
        .context("Failed to load configuration")?;

    // Create application state
    let mut app = App::new(config)
        .context("Failed to initialize application")?;

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .context("Failed to create terminal")?;

    // Install panic handler so terminal is restored on panic
    // (without this, a panic leaves the terminal in raw mode + alternate screen)
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
        let _ = execute!(std::io::stdout(), crossterm::cursor::Show);
        original_hook(info);
    }));

    // Run main loop
    let result = main_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

fn main_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            ui::render(frame, app);
        })?;

        // Clock refresh, GPS and chat polling, flash expiry
        app.update_timers();

        // Poll for events with timeout so timers keep ticking
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key)?;
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_does_not_panic() {
        print_help();
    }
}
