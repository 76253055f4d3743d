//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::consts::cli_consts::ui_timing;
use crate::environment::Environment;
use crate::events::{DashboardUpdate, Event as WorkerEvent};
use crate::ui::dashboard::{DashboardState, render_dashboard};
use crate::ui::splash::render_splash;
use crate::workers::refresher::RefresherCommand;
use crossterm::event::{self, Event, KeyCode};
use ratatui::{Frame, Terminal, backend::Backend};
use std::time::Instant;
use tokio::sync::{broadcast, mpsc};

/// The different screens in the application.
#[derive(Debug)]
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    /// Dashboard screen displaying the dataset profile.
    Dashboard,
}

/// Application state
pub struct App {
    /// The current screen being displayed in the application.
    current_screen: Screen,

    /// Dashboard state; owned here so that updates arriving during the
    /// splash screen are queued rather than dropped.
    state: DashboardState,

    /// Receives view-model updates from the refresher.
    update_receiver: mpsc::Receiver<DashboardUpdate>,

    /// Receives events from worker tasks.
    event_receiver: mpsc::Receiver<WorkerEvent>,

    /// Sends refresh and histogram commands to the refresher.
    command_sender: mpsc::Sender<RefresherCommand>,

    /// Broadcasts shutdown signal to worker tasks.
    shutdown_sender: broadcast::Sender<()>,
}

impl App {
    /// Creates a new instance of the application.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        dataset_id: u64,
        dataset_name: Option<String>,
        environment: Environment,
        update_receiver: mpsc::Receiver<DashboardUpdate>,
        event_receiver: mpsc::Receiver<WorkerEvent>,
        command_sender: mpsc::Sender<RefresherCommand>,
        shutdown_sender: broadcast::Sender<()>,
    ) -> Self {
        Self {
            current_screen: Screen::Splash,
            state: DashboardState::new(dataset_id, dataset_name, environment, Instant::now()),
            update_receiver,
            event_receiver,
            command_sender,
            shutdown_sender,
        }
    }
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let splash_start = Instant::now();

    // UI event loop
    loop {
        // Queue all incoming updates and events for processing
        while let Ok(update) = app.update_receiver.try_recv() {
            app.state.add_update(update);
        }
        while let Ok(event) = app.event_receiver.try_recv() {
            app.state.add_event(event);
        }

        // Update the state based on the current screen
        if let Screen::Dashboard = app.current_screen {
            app.state.update();
        }
        terminal.draw(|f| render(f, &app))?;

        // Handle splash-to-dashboard transition
        if let Screen::Splash = app.current_screen {
            if splash_start.elapsed() >= ui_timing::splash_duration() {
                app.current_screen = Screen::Dashboard;
                continue;
            }
        }

        // Poll for key events
        if event::poll(ui_timing::event_poll_interval())? {
            if let Event::Key(key) = event::read()? {
                // Skip events that are not KeyEventKind::Press
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }

                // Handle exit events
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                    // Send shutdown signal to workers
                    let _ = app.shutdown_sender.send(());
                    return Ok(());
                }

                match app.current_screen {
                    Screen::Splash => {
                        // Any key press will skip the splash screen
                        app.current_screen = Screen::Dashboard;
                    }
                    Screen::Dashboard => match key.code {
                        KeyCode::Char('r') => {
                            let _ = app.command_sender.send(RefresherCommand::RefreshAll).await;
                        }
                        KeyCode::Right => {
                            if let Some(column) = app.state.select_next_column() {
                                let _ = app
                                    .command_sender
                                    .send(RefresherCommand::Histogram { column })
                                    .await;
                            }
                        }
                        KeyCode::Left => {
                            if let Some(column) = app.state.select_prev_column() {
                                let _ = app
                                    .command_sender
                                    .send(RefresherCommand::Histogram { column })
                                    .await;
                            }
                        }
                        _ => {}
                    },
                }
            }
        }
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, app: &App) {
    match app.current_screen {
        Screen::Splash => render_splash(f),
        Screen::Dashboard => render_dashboard(f, &app.state),
    }
}
