//! TUI mode execution

use super::SessionData;
use crate::environment::Environment;
use crate::ui;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{error::Error, io};

/// Runs the application in TUI mode
///
/// This function handles:
/// 1. Terminal setup and cleanup
/// 2. UI application initialization and execution
/// 3. Proper shutdown handling
pub async fn run_tui_mode(
    session: SessionData,
    environment: Environment,
) -> Result<(), Box<dyn Error>> {
    let SessionData {
        dataset,
        update_receiver,
        event_receiver,
        command_sender,
        shutdown_sender,
        join_handle,
    } = session;

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Initialize the terminal with Crossterm backend
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create the application and run it
    let dataset_name = if dataset.name.is_empty() {
        None
    } else {
        Some(dataset.name)
    };
    let app = ui::App::new(
        dataset.id,
        dataset_name,
        environment,
        update_receiver,
        event_receiver,
        command_sender,
        shutdown_sender,
    );

    let result = ui::run(&mut terminal, app).await;

    // Clean up the terminal after running the application
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Handle the result
    result?;

    // Wait for the refresher to finish
    let _ = join_handle.await;

    Ok(())
}
