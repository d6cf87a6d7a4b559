//! Dashboard state management
//!
//! Contains the main dashboard state struct

use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::events::{Event as SensorEvent, SensorState};
use crate::pedometer::StepTracker;
use crate::sensor::SensorAvailability;
use crate::ui::app::UIConfig;
use crate::ui::notice::Notice;

use std::collections::VecDeque;
use std::time::Instant;

/// Everything the step dashboard shows.
pub struct DashboardState {
    /// The start time of the application, used for the session clock.
    pub start_time: Instant,
    /// Reconciled steps, metrics and chart points.
    pub tracker: StepTracker,
    /// Steps needed to fill the goal gauge.
    pub daily_goal: u64,
    /// Human readable name of the sensor, once found.
    pub sensor_description: Option<String>,
    /// Queue of events waiting to be processed
    pub pending_events: VecDeque<SensorEvent>,
    /// Activity logs for display
    pub activity_logs: VecDeque<SensorEvent>,
    /// Whether to enable background colors
    pub with_background_color: bool,

    availability: SensorAvailability,
    sensor_state: Option<SensorState>,
    notice: Option<Notice>,
    /// The last reading was below the stored baseline.
    in_rollback: bool,
}

impl DashboardState {
    /// Creates a new instance of the dashboard state.
    pub fn new(tracker: StepTracker, start_time: Instant, ui_config: UIConfig) -> Self {
        Self {
            start_time,
            tracker,
            daily_goal: ui_config.daily_goal,
            sensor_description: None,
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
            with_background_color: ui_config.with_background_color,
            availability: SensorAvailability::Missing,
            sensor_state: None,
            notice: None,
            in_rollback: false,
        }
    }

    pub fn availability(&self) -> SensorAvailability {
        self.availability
    }

    pub fn sensor_state(&self) -> Option<SensorState> {
        self.sensor_state
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn in_rollback(&self) -> bool {
        self.in_rollback
    }

    pub fn show_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub(super) fn clear_expired_notice(&mut self) {
        if self.notice.as_ref().is_some_and(Notice::is_expired) {
            self.notice = None;
        }
    }

    pub(super) fn set_sensor_state(&mut self, state: SensorState) {
        self.sensor_state = Some(state);
    }

    pub(super) fn set_in_rollback(&mut self, in_rollback: bool) {
        self.in_rollback = in_rollback;
    }

    pub(super) fn set_availability_raw(&mut self, availability: SensorAvailability) {
        self.availability = availability;
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: SensorEvent) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add an event to the processing queue
    pub fn add_event(&mut self, event: SensorEvent) {
        self.pending_events.push_back(event);
    }
}
