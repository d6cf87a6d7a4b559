//! Availability, pause and resume for the dashboard's step counter.

use super::{SensorAvailability, SensorDelay, SensorSpec, SensorSubscription, probe};
use crate::events::{Event, SensorState};
use tokio::sync::mpsc;

/// Owns the subscription once the sensor has been found.
///
/// Probing is explicit: a missing or denied sensor stays that way until
/// [`SensorGate::probe`] is called again.
pub struct SensorGate {
    spec: SensorSpec,
    delay: SensorDelay,
    events: mpsc::Sender<Event>,
    subscription: Option<SensorSubscription>,
    availability: SensorAvailability,
}

impl SensorGate {
    pub fn new(spec: SensorSpec, delay: SensorDelay, events: mpsc::Sender<Event>) -> Self {
        Self {
            spec,
            delay,
            events,
            subscription: None,
            availability: SensorAvailability::Missing,
        }
    }

    pub fn availability(&self) -> SensorAvailability {
        self.availability
    }

    pub fn description(&self) -> Option<&str> {
        self.subscription.as_ref().map(|s| s.description())
    }

    pub fn is_running(&self) -> bool {
        self.subscription.as_ref().is_some_and(|s| s.is_running())
    }

    /// The feed delivered its last reading.
    pub fn is_finished(&self) -> bool {
        self.subscription.as_ref().is_some_and(|s| s.is_finished())
    }

    /// Opens the sensor if it is not already available.
    pub async fn probe(&mut self) -> SensorAvailability {
        if self.subscription.is_some() {
            return self.availability;
        }
        match probe(&self.spec).await {
            Ok(source) => {
                let subscription = SensorSubscription::new(source, self.delay, self.events.clone());
                log::info!("Step sensor available: {}", subscription.description());
                self.subscription = Some(subscription);
                self.availability = SensorAvailability::Available;
            }
            Err(e) => {
                log::warn!("Step sensor unavailable: {}", e);
                self.availability = SensorAvailability::from_error(&e);
            }
        }
        self.availability
    }

    /// Starts delivering readings. Returns false when there is nothing to
    /// start.
    pub fn resume(&mut self) -> bool {
        let Some(subscription) = self.subscription.as_mut() else {
            return false;
        };
        if !subscription.start() {
            return false;
        }
        let msg = format!("Listening to {}", subscription.description());
        let _ = self
            .events
            .try_send(Event::sensor_state(SensorState::Listening, msg));
        true
    }

    /// Stops delivering readings. Returns false when nothing was running.
    pub async fn pause(&mut self) -> bool {
        let Some(subscription) = self.subscription.as_mut() else {
            return false;
        };
        if !subscription.is_running() {
            // Reap a task that ended on its own.
            subscription.stop().await;
            return false;
        }
        subscription.stop().await;
        if subscription.is_finished() {
            return false;
        }
        let _ = self.events.try_send(Event::sensor_state(
            SensorState::Paused,
            "Step sensor paused".to_string(),
        ));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::tempdir;
    use tokio::time::timeout;

    async fn next_state(receiver: &mut mpsc::Receiver<Event>) -> SensorState {
        loop {
            let event = timeout(Duration::from_secs(5), receiver.recv())
                .await
                .expect("timed out waiting for event")
                .expect("channel closed");
            if let Some(state) = event.sensor_state {
                return state;
            }
        }
    }

    #[tokio::test]
    async fn missing_sensor_cannot_resume() {
        let (sender, _receiver) = mpsc::channel(8);
        let mut gate = SensorGate::new(SensorSpec::Absent, SensorDelay::Ui, sender);

        assert_eq!(gate.probe().await, SensorAvailability::Missing);
        assert!(!gate.resume());
        assert!(!gate.pause().await);
        assert!(gate.description().is_none());
    }

    #[tokio::test]
    async fn reprobe_finds_a_sensor_that_appeared() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("feed.txt");
        let (sender, _receiver) = mpsc::channel(8);
        let mut gate = SensorGate::new(SensorSpec::Replay(path.clone()), SensorDelay::Ui, sender);

        assert_eq!(gate.probe().await, SensorAvailability::Missing);
        std::fs::write(&path, "1\n").unwrap();
        assert_eq!(gate.probe().await, SensorAvailability::Available);
        assert!(gate.description().unwrap().contains("feed.txt"));
    }

    #[tokio::test]
    async fn pause_and_resume_report_state_changes() {
        let (sender, mut receiver) = mpsc::channel(64);
        let spec = SensorSpec::Simulated {
            seed: Some(1),
            boot_count: 0,
        };
        let mut gate = SensorGate::new(spec, SensorDelay::Ui, sender);
        gate.probe().await;

        assert!(gate.resume());
        assert!(gate.is_running());
        assert_eq!(next_state(&mut receiver).await, SensorState::Listening);

        assert!(gate.pause().await);
        assert!(!gate.is_running());
        assert_eq!(next_state(&mut receiver).await, SensorState::Paused);

        assert!(gate.resume());
        assert_eq!(next_state(&mut receiver).await, SensorState::Listening);
        gate.pause().await;
    }
}
