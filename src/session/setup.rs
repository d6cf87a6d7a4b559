//! Session setup and initialization

use crate::config::{Config, get_prefs_path};
use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
use crate::events::Event;
use crate::pedometer::StepTracker;
use crate::sensor::{SensorGate, SensorSpec};
use crate::storage::PrefsFile;
use std::error::Error;
use tokio::sync::{broadcast, mpsc};

/// Session data for both TUI and headless modes
pub struct SessionData {
    /// Event receiver for sensor events
    pub event_receiver: mpsc::Receiver<Event>,
    /// Step reconciliation backed by the preferences file
    pub tracker: StepTracker,
    /// The probed step sensor
    pub sensor: SensorGate,
    /// Shutdown sender to stop background tasks
    pub shutdown_sender: broadcast::Sender<()>,
    /// Steps needed to fill the goal gauge
    pub daily_goal: u64,
}

/// Sets up a step tracking session
///
/// This function handles all the common setup required for both TUI and headless modes:
/// 1. Opens the baseline store in the preferences file
/// 2. Creates the event and shutdown channels
/// 3. Probes the step sensor once
///
/// The sensor is not started; each mode decides when readings begin.
pub async fn setup_session(config: &Config, spec: SensorSpec) -> Result<SessionData, Box<dyn Error>> {
    let prefs = PrefsFile::new(get_prefs_path()?);
    log::debug!("Using preferences at {}", prefs.path().display());
    let tracker = StepTracker::new(
        Box::new(prefs),
        config.rollback_policy,
        config.chart_policy,
    );

    let (event_sender, event_receiver) = mpsc::channel(EVENT_QUEUE_SIZE);
    let (shutdown_sender, _) = broadcast::channel(1);

    let mut sensor = SensorGate::new(spec, config.sensor_delay, event_sender);
    sensor.probe().await;

    Ok(SessionData {
        event_receiver,
        tracker,
        sensor,
        shutdown_sender,
        daily_goal: config.daily_goal,
    })
}
