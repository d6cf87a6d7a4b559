//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::events::Event as SensorEvent;
use crate::pedometer::StepTracker;
use crate::sensor::{SensorAvailability, SensorGate};
use crate::ui::bmi_form::{BmiForm, FormAction, render_bmi_form};
use crate::ui::dashboard::{DashboardState, render_dashboard};
use crate::ui::notice::Notice;
use crate::ui::splash::render_splash;
use crossterm::event::{self, Event, KeyCode};
use ratatui::{Frame, Terminal, backend::Backend};
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, mpsc};

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
    pub daily_goal: u64,
}

impl UIConfig {
    pub fn new(with_background_color: bool, daily_goal: u64) -> Self {
        Self {
            with_background_color,
            daily_goal,
        }
    }
}

/// The different screens in the application.
#[derive(Debug)]
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    /// Live step dashboard.
    Dashboard,
    /// BMI calculator. The sensor is paused while it is showing.
    Bmi(BmiForm),
}

/// Application state
pub struct App {
    /// The current screen being displayed in the application.
    current_screen: Screen,

    /// Step state; kept while other screens are showing.
    dashboard: Box<DashboardState>,

    /// The step sensor and its subscription.
    sensor: SensorGate,

    /// Receives events from the sensor task.
    event_receiver: mpsc::Receiver<SensorEvent>,

    /// Broadcasts shutdown signal to background tasks.
    shutdown_sender: broadcast::Sender<()>,

    /// The user paused readings with `p`.
    paused_by_user: bool,

    /// Summaries to hand to the share sink once the terminal is released.
    shared: Vec<String>,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(
        tracker: StepTracker,
        sensor: SensorGate,
        event_receiver: mpsc::Receiver<SensorEvent>,
        shutdown_sender: broadcast::Sender<()>,
        ui_config: UIConfig,
    ) -> Self {
        let mut dashboard = DashboardState::new(tracker, Instant::now(), ui_config);
        dashboard.set_availability(sensor.availability(), sensor.description());
        Self {
            current_screen: Screen::Splash,
            dashboard: Box::new(dashboard),
            sensor,
            event_receiver,
            shutdown_sender,
            paused_by_user: false,
            shared: Vec::new(),
        }
    }

    /// Summaries queued with the share key.
    pub fn take_shared(&mut self) -> Vec<String> {
        std::mem::take(&mut self.shared)
    }

    async fn open_bmi(&mut self) {
        self.sensor.pause().await;
        self.current_screen = Screen::Bmi(BmiForm::new());
    }

    fn close_bmi(&mut self) {
        if !self.paused_by_user {
            self.sensor.resume();
        }
        self.current_screen = Screen::Dashboard;
    }

    async fn toggle_pause(&mut self) {
        if self.sensor.is_running() {
            if self.sensor.pause().await {
                self.paused_by_user = true;
            }
        } else if self.sensor.resume() {
            self.paused_by_user = false;
        } else if self.sensor.is_finished() {
            self.dashboard
                .show_notice(Notice::short("Step sensor has no more readings"));
        }
    }

    async fn reprobe(&mut self) {
        if self.sensor.availability() == SensorAvailability::Available {
            self.dashboard
                .show_notice(Notice::short("Step sensor already connected"));
            return;
        }
        let availability = self.sensor.probe().await;
        self.dashboard
            .set_availability(availability, self.sensor.description());
        if availability == SensorAvailability::Available && !self.paused_by_user {
            self.sensor.resume();
        }
    }

    fn share(&mut self) {
        let summary = self.dashboard.share_summary();
        self.shared.push(summary);
    }

    /// Handles a key on the dashboard. Returns true when the app should quit.
    async fn handle_dashboard_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Esc | KeyCode::Char('q') => return true,
            KeyCode::Char('b') => self.open_bmi().await,
            KeyCode::Char('s') => self.share(),
            KeyCode::Char('p') => self.toggle_pause().await,
            KeyCode::Char('r') => self.reprobe().await,
            _ => {}
        }
        false
    }

    async fn shutdown(&mut self) {
        let _ = self.shutdown_sender.send(());
        self.sensor.pause().await;
    }
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> std::io::Result<()> {
    let splash_start = Instant::now();
    let splash_duration = Duration::from_secs(2);

    if !app.paused_by_user {
        app.sensor.resume();
    }

    // UI event loop
    loop {
        // Queue all incoming events for processing
        while let Ok(event) = app.event_receiver.try_recv() {
            app.dashboard.add_event(event);
        }

        // Readings are applied on every screen; only the dashboard shows them
        app.dashboard.update();
        if let Screen::Bmi(form) = &mut app.current_screen {
            form.update();
        }
        terminal.draw(|f| render(f, &app.current_screen, &app.dashboard))?;

        // Handle splash-to-dashboard transition
        if let Screen::Splash = app.current_screen {
            if splash_start.elapsed() >= splash_duration {
                app.current_screen = Screen::Dashboard;
                continue;
            }
        }

        // Poll for key events
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Skip events that are not KeyEventKind::Press
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }

                match &mut app.current_screen {
                    Screen::Splash => {
                        if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                            app.shutdown().await;
                            return Ok(());
                        }
                        // Any other key skips the splash screen
                        app.current_screen = Screen::Dashboard;
                    }
                    Screen::Dashboard => {
                        if app.handle_dashboard_key(key.code).await {
                            app.shutdown().await;
                            return Ok(());
                        }
                    }
                    Screen::Bmi(form) => {
                        if form.handle_key(key.code) == FormAction::Back {
                            app.close_bmi();
                        }
                    }
                }
            }
        }
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, screen: &Screen, dashboard: &DashboardState) {
    match screen {
        Screen::Splash => render_splash(f),
        Screen::Dashboard => render_dashboard(f, dashboard),
        Screen::Bmi(form) => render_bmi_form(f, form, dashboard.with_background_color),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::SensorState;
    use crate::pedometer::{ChartPolicy, RollbackPolicy};
    use crate::sensor::{SensorDelay, SensorSpec};
    use crate::storage::MockBaselineStore;

    async fn app(spec: SensorSpec) -> App {
        let mut store = MockBaselineStore::new();
        store.expect_load_baseline().returning(|| Ok(Some(0)));
        let tracker = StepTracker::new(
            Box::new(store),
            RollbackPolicy::Clamp,
            ChartPolicy::EveryRefresh,
        );
        let (event_sender, event_receiver) = mpsc::channel(256);
        let (shutdown_sender, _) = broadcast::channel(1);
        let mut sensor = SensorGate::new(spec, SensorDelay::Ui, event_sender);
        sensor.probe().await;
        App::new(
            tracker,
            sensor,
            event_receiver,
            shutdown_sender,
            UIConfig::new(false, 10_000),
        )
    }

    fn simulated() -> SensorSpec {
        SensorSpec::Simulated {
            seed: Some(3),
            boot_count: 0,
        }
    }

    #[tokio::test]
    async fn bmi_screen_pauses_the_sensor() {
        let mut app = app(simulated()).await;
        app.sensor.resume();
        app.current_screen = Screen::Dashboard;

        assert!(!app.handle_dashboard_key(KeyCode::Char('b')).await);
        assert!(matches!(app.current_screen, Screen::Bmi(_)));
        assert!(!app.sensor.is_running());

        app.close_bmi();
        assert!(matches!(app.current_screen, Screen::Dashboard));
        assert!(app.sensor.is_running());
        app.shutdown().await;
    }

    #[tokio::test]
    async fn user_pause_survives_the_bmi_screen() {
        let mut app = app(simulated()).await;
        app.sensor.resume();

        app.handle_dashboard_key(KeyCode::Char('p')).await;
        assert!(!app.sensor.is_running());
        app.open_bmi().await;
        app.close_bmi();
        assert!(!app.sensor.is_running());

        app.handle_dashboard_key(KeyCode::Char('p')).await;
        assert!(app.sensor.is_running());
        app.shutdown().await;
    }

    #[tokio::test]
    async fn share_queues_the_summary() {
        let mut app = app(simulated()).await;
        app.handle_dashboard_key(KeyCode::Char('s')).await;

        let shared = app.take_shared();
        assert_eq!(shared.len(), 1);
        assert!(shared[0].starts_with("🔥 StepPulse Update:"));
        assert!(app.take_shared().is_empty());
    }

    #[tokio::test]
    async fn missing_sensor_reprobe_keeps_na() {
        let mut app = app(SensorSpec::Absent).await;
        app.handle_dashboard_key(KeyCode::Char('r')).await;

        assert_eq!(app.dashboard.steps_text(), "N/A");
        assert_eq!(app.dashboard.availability(), SensorAvailability::Missing);
    }

    #[tokio::test]
    async fn ended_feed_is_not_resumed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.txt");
        std::fs::write(&path, "5\n").unwrap();
        let mut app = app(SensorSpec::Replay(path)).await;
        app.sensor.resume();
        while !app.sensor.is_finished() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        app.handle_dashboard_key(KeyCode::Char('p')).await;

        assert!(!app.sensor.is_running());
        let notice = app.dashboard.notice().map(|n| n.text.as_str());
        assert_eq!(notice, Some("Step sensor has no more readings"));
    }

    #[tokio::test]
    async fn quit_keys_end_the_session() {
        let mut app = app(simulated()).await;
        assert!(app.handle_dashboard_key(KeyCode::Char('q')).await);
        assert!(app.handle_dashboard_key(KeyCode::Esc).await);
    }

    #[tokio::test]
    async fn pause_is_reported_to_the_dashboard() {
        let mut app = app(simulated()).await;
        app.sensor.resume();
        app.handle_dashboard_key(KeyCode::Char('p')).await;

        while let Ok(event) = app.event_receiver.try_recv() {
            app.dashboard.add_event(event);
        }
        app.dashboard.update();
        assert_eq!(app.dashboard.sensor_state(), Some(SensorState::Paused));
    }
}
