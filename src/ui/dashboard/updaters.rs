//! Dashboard state update logic
//!
//! Contains all methods for updating dashboard state from events

use super::state::DashboardState;

use crate::events::{Event as SensorEvent, EventType, SensorState};
use crate::logging::LogLevel;
use crate::sensor::SensorAvailability;
use crate::share;
use crate::ui::notice::Notice;

impl DashboardState {
    /// Applies queued events.
    pub fn update(&mut self) {
        // Process all queued events one by one
        while let Some(event) = self.pending_events.pop_front() {
            self.process_event(&event);

            // Raw readings only feed the tracker
            if event.event_type != EventType::Reading {
                self.add_to_activity_log(event);
            }
        }

        self.clear_expired_notice();
    }

    /// Records the outcome of a sensor probe and tells the user when steps
    /// cannot be shown.
    pub fn set_availability(&mut self, availability: SensorAvailability, description: Option<&str>) {
        self.set_availability_raw(availability);
        self.sensor_description = description.map(str::to_string);
        match availability {
            SensorAvailability::Available => {}
            SensorAvailability::Missing => {
                self.show_notice(Notice::long("Step sensor not found on this device"));
                self.add_to_activity_log(SensorEvent::sensor_with_level(
                    "Step sensor not found on this device".to_string(),
                    EventType::Error,
                    LogLevel::Warn,
                ));
            }
            SensorAvailability::PermissionDenied => {
                self.show_notice(Notice::short("Permission Required!"));
                self.add_to_activity_log(SensorEvent::sensor_with_level(
                    "Permission to read the step sensor was denied".to_string(),
                    EventType::Error,
                    LogLevel::Warn,
                ));
            }
        }
    }

    /// Text shown in the steps field.
    pub fn steps_text(&self) -> String {
        match self.availability() {
            SensorAvailability::Available => self.tracker.steps().to_string(),
            _ => "N/A".to_string(),
        }
    }

    /// Builds the share text for the current session and notes it in the log.
    pub fn share_summary(&mut self) -> String {
        let summary = share::summary(&self.tracker.metrics());
        self.show_notice(Notice::short("Summary shared"));
        self.add_to_activity_log(SensorEvent::dashboard_with_level(
            format!("Shared {} steps", self.tracker.steps()),
            EventType::Success,
            LogLevel::Info,
        ));
        summary
    }

    /// Process a single event and update relevant state
    fn process_event(&mut self, event: &SensorEvent) {
        if let Some(cumulative) = event.reading {
            self.apply_reading(cumulative);
        }

        if event.event_type == EventType::StateChange {
            if let Some(state) = event.sensor_state {
                self.set_sensor_state(state);
                if state == SensorState::Ended {
                    self.show_notice(Notice::long("Step sensor stopped delivering readings"));
                }
            }
        }
    }

    fn apply_reading(&mut self, cumulative: u64) {
        let snapshot = self.tracker.on_reading(cumulative);

        if snapshot.baseline_established {
            self.add_to_activity_log(SensorEvent::tracker_with_level(
                format!("Counting from counter value {}", cumulative),
                EventType::Success,
                LogLevel::Info,
            ));
        }

        if snapshot.rollback_detected && !self.in_rollback() {
            self.add_to_activity_log(SensorEvent::tracker_with_level(
                format!(
                    "Step counter went back to {} (device restart?)",
                    cumulative
                ),
                EventType::Error,
                LogLevel::Warn,
            ));
        }
        self.set_in_rollback(snapshot.rollback_detected);
    }
}
