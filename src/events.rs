//! Event System
//!
//! Types for events flowing from the sensor task to the dashboard, and for
//! the dashboard's activity log.

use crate::logging::{LogLevel, should_log_with_env};
use chrono::Local;
use std::fmt::Display;

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum Source {
    /// The step-counter subscription.
    Sensor,
    /// Step reconciliation and derived metrics.
    Tracker,
    /// Dashboard actions such as sharing.
    Dashboard,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    /// A raw cumulative counter value.
    Reading,
    Success,
    Error,
    StateChange,
}

/// Lifecycle of the sensor feed.
#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum SensorState {
    /// Subscribed and delivering readings.
    Listening,
    /// Unsubscribed while the dashboard is hidden or paused.
    Paused,
    /// The source has no more readings.
    Ended,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub source: Source,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
    /// Cumulative counter value carried by reading events
    pub reading: Option<u64>,
    /// New sensor state carried by state change events
    pub sensor_state: Option<SensorState>,
}

impl Event {
    fn new(source: Source, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            source,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
            reading: None,
            sensor_state: None,
        }
    }

    pub fn reading(cumulative: u64) -> Self {
        let mut event = Self::new(
            Source::Sensor,
            format!("Counter at {}", cumulative),
            EventType::Reading,
            LogLevel::Trace,
        );
        event.reading = Some(cumulative);
        event
    }

    pub fn sensor_state(state: SensorState, msg: String) -> Self {
        let mut event = Self::new(Source::Sensor, msg, EventType::StateChange, LogLevel::Info);
        event.sensor_state = Some(state);
        event
    }

    pub fn sensor_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Source::Sensor, msg, event_type, log_level)
    }

    pub fn tracker_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Source::Tracker, msg, event_type, log_level)
    }

    pub fn dashboard_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Source::Dashboard, msg, event_type, log_level)
    }

    pub fn should_display(&self) -> bool {
        // Raw readings arrive many times per second and only feed state
        if self.event_type == EventType::Reading {
            return false;
        }
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.event_type, self.timestamp, self.msg)
    }
}
