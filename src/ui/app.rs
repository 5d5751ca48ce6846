//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::error_classifier::LogLevel;
use crate::events::{Event as WorkerEvent, EventType};
use crate::ui::dashboard::{DashboardState, render_dashboard};
use crate::ui::splash::render_splash;
use crate::workers::poller::PollerHandle;
use crossterm::event::{self, Event, KeyCode};
use ratatui::{Frame, Terminal, backend::Backend};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
    pub endpoint: String,
    pub poll_interval: Duration,
}

impl UIConfig {
    pub fn new(with_background_color: bool, endpoint: String, poll_interval: Duration) -> Self {
        Self {
            with_background_color,
            endpoint,
            poll_interval,
        }
    }
}

/// The different screens in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    /// Dashboard screen displaying the latest sentiment snapshot.
    Dashboard,
}

/// Application state
pub struct App {
    /// The current screen being displayed in the application.
    current_screen: Screen,

    /// Dashboard view model. Fed during the splash too, so the first fetch is not lost.
    dashboard: DashboardState,

    /// Receives events from the poller.
    event_receiver: mpsc::Receiver<WorkerEvent>,

    /// The mounted poller; unmounted when the app exits.
    poller: PollerHandle,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(
        mounted_at: Instant,
        event_receiver: mpsc::Receiver<WorkerEvent>,
        poller: PollerHandle,
        ui_config: UIConfig,
    ) -> Self {
        Self {
            current_screen: Screen::Splash,
            dashboard: DashboardState::new(mounted_at, ui_config),
            event_receiver,
            poller,
        }
    }

    /// Manual refresh from the `r` key.
    fn request_refresh(&mut self) {
        let msg = if self.poller.refresh() {
            "Manual refresh requested"
        } else {
            "Refresh already queued"
        };
        self.dashboard.add_event(WorkerEvent::dashboard_with_level(
            msg.to_string(),
            EventType::Refresh,
            LogLevel::Info,
        ));
    }
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let splash_start = Instant::now();
    let splash_duration = Duration::from_secs(2);

    // UI event loop
    loop {
        // Queue all incoming events for processing
        while let Ok(event) = app.event_receiver.try_recv() {
            app.dashboard.add_event(event);
        }
        app.dashboard.update();

        terminal.draw(|f| render(f, app.current_screen, &app.dashboard))?;

        // Handle splash-to-dashboard transition
        if app.current_screen == Screen::Splash && splash_start.elapsed() >= splash_duration {
            app.current_screen = Screen::Dashboard;
            continue;
        }

        // Poll for key events
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Skip events that are not KeyEventKind::Press
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }

                // Handle exit events
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                    app.poller.unmount().await;
                    return Ok(());
                }

                match app.current_screen {
                    Screen::Splash => {
                        // Any key press will skip the splash screen
                        app.current_screen = Screen::Dashboard;
                    }
                    Screen::Dashboard => {
                        if matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R')) {
                            app.request_refresh();
                        }
                    }
                }
            }
        }
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, screen: Screen, dashboard: &DashboardState) {
    match screen {
        Screen::Splash => render_splash(f),
        Screen::Dashboard => render_dashboard(f, dashboard),
    }
}
