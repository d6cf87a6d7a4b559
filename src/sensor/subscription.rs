//! Start/stop control over a step counter feed.
//!
//! While started, a tokio task reads the source at the requested delay and
//! forwards each value as a reading event. Stopping hands the source back so
//! the next start resumes the same feed.

use super::{SensorDelay, SensorError, StepCounterSource};
use crate::events::{Event, EventType, SensorState};
use crate::logging::LogLevel;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

type Source = Box<dyn StepCounterSource>;

enum State {
    Idle(Source),
    Running {
        cancel: CancellationToken,
        handle: JoinHandle<Option<Source>>,
    },
    /// The source ran dry or its task died.
    Finished,
}

pub struct SensorSubscription {
    state: State,
    delay: SensorDelay,
    event_sender: mpsc::Sender<Event>,
    description: String,
}

impl SensorSubscription {
    pub fn new(source: Source, delay: SensorDelay, event_sender: mpsc::Sender<Event>) -> Self {
        let description = source.describe();
        Self {
            state: State::Idle(source),
            delay,
            event_sender,
            description,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_running(&self) -> bool {
        matches!(&self.state, State::Running { handle, .. } if !handle.is_finished())
    }

    pub fn is_finished(&self) -> bool {
        match &self.state {
            State::Finished => true,
            State::Running { handle, .. } => handle.is_finished(),
            State::Idle(_) => false,
        }
    }

    /// Begins delivering readings. Returns false if already running or the
    /// feed has ended.
    pub fn start(&mut self) -> bool {
        let state = std::mem::replace(&mut self.state, State::Finished);
        match state {
            State::Idle(source) => {
                let cancel = CancellationToken::new();
                let handle = tokio::spawn(pump(
                    source,
                    self.delay,
                    self.event_sender.clone(),
                    cancel.clone(),
                ));
                log::debug!("Subscribed to {}", self.description);
                self.state = State::Running { cancel, handle };
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    /// Stops delivering readings and waits for the task to hand the source
    /// back.
    pub async fn stop(&mut self) {
        let state = std::mem::replace(&mut self.state, State::Finished);
        self.state = match state {
            State::Running { cancel, handle } => {
                cancel.cancel();
                match handle.await {
                    Ok(Some(source)) => {
                        log::debug!("Unsubscribed from {}", self.description);
                        State::Idle(source)
                    }
                    Ok(None) => State::Finished,
                    Err(e) => {
                        log::error!("Sensor task for {} failed: {}", self.description, e);
                        State::Finished
                    }
                }
            }
            other => other,
        };
    }
}

async fn next_paced(
    ticker: &mut Interval,
    source: &mut dyn StepCounterSource,
) -> Result<Option<u64>, super::SensorError> {
    ticker.tick().await;
    source.next_reading().await
}

/// Returns the source when cancelled, or `None` once it has no more readings.
async fn pump(
    mut source: Source,
    delay: SensorDelay,
    events: mpsc::Sender<Event>,
    cancel: CancellationToken,
) -> Option<Source> {
    let mut ticker = tokio::time::interval(delay.interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        let reading = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            reading = next_paced(&mut ticker, source.as_mut()) => Some(reading),
        };
        let Some(reading) = reading else {
            return Some(source);
        };

        match reading {
            Ok(Some(cumulative)) => {
                // A full channel must not block cancellation.
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return Some(source),
                    sent = events.send(Event::reading(cumulative)) => {
                        if sent.is_err() {
                            return Some(source);
                        }
                    }
                }
            }
            Ok(None) => {
                let msg = format!("{} has no more readings", source.describe());
                log::info!("{}", msg);
                let _ = events
                    .send(Event::sensor_state(SensorState::Ended, msg))
                    .await;
                return None;
            }
            Err(SensorError::Io(e)) => {
                let msg = format!("{} stopped delivering: {}", source.describe(), e);
                log::error!("{}", msg);
                let _ = events
                    .send(Event::sensor_state(SensorState::Ended, msg))
                    .await;
                return None;
            }
            Err(e) => {
                log::warn!("Skipping sensor delivery: {}", e);
                let _ = events
                    .send(Event::sensor_with_level(
                        format!("Skipped reading: {}", e),
                        EventType::Error,
                        LogLevel::Warn,
                    ))
                    .await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::{MockStepCounterSource, ReplayStepCounter, SensorError};
    use std::time::Duration;
    use tokio::time::timeout;

    async fn recv(receiver: &mut mpsc::Receiver<Event>) -> Event {
        timeout(Duration::from_secs(5), receiver.recv())
            .await
            .expect("timed out waiting for event")
            .expect("channel closed")
    }

    #[tokio::test]
    async fn forwards_readings_until_the_feed_ends() {
        let (sender, mut receiver) = mpsc::channel(16);
        let source = ReplayStepCounter::new(&b"5\n6\n"[..], "test");
        let mut subscription = SensorSubscription::new(Box::new(source), SensorDelay::Ui, sender);

        assert!(subscription.start());
        assert_eq!(recv(&mut receiver).await.reading, Some(5));
        assert_eq!(recv(&mut receiver).await.reading, Some(6));
        let ended = recv(&mut receiver).await;
        assert_eq!(ended.sensor_state, Some(SensorState::Ended));

        subscription.stop().await;
        assert!(subscription.is_finished());
        assert!(!subscription.start());
    }

    #[tokio::test]
    async fn stop_then_start_resumes_the_same_source() {
        let (sender, mut receiver) = mpsc::channel(16);
        let mut counter = 0u64;
        let mut source = MockStepCounterSource::new();
        source
            .expect_describe()
            .returning(|| "mock".to_string());
        source.expect_next_reading().returning(move || {
            counter += 1;
            Ok(Some(counter))
        });

        let mut subscription = SensorSubscription::new(Box::new(source), SensorDelay::Ui, sender);
        assert!(subscription.start());
        assert!(subscription.is_running());
        let first = recv(&mut receiver).await.reading.unwrap();

        subscription.stop().await;
        assert!(!subscription.is_running());
        assert!(!subscription.is_finished());
        while receiver.try_recv().is_ok() {}

        assert!(subscription.start());
        let resumed = recv(&mut receiver).await.reading.unwrap();
        assert!(resumed > first);
        subscription.stop().await;
    }

    #[tokio::test]
    async fn errors_are_reported_and_the_feed_continues() {
        let (sender, mut receiver) = mpsc::channel(16);
        let mut calls = 0;
        let mut source = MockStepCounterSource::new();
        source
            .expect_describe()
            .returning(|| "flaky".to_string());
        source.expect_next_reading().returning(move || {
            calls += 1;
            match calls {
                1 => Err(SensorError::Malformed("x".to_string())),
                2 => Ok(Some(40)),
                _ => Ok(None),
            }
        });

        let mut subscription = SensorSubscription::new(Box::new(source), SensorDelay::Ui, sender);
        subscription.start();

        let error = recv(&mut receiver).await;
        assert_eq!(error.event_type, EventType::Error);
        assert_eq!(error.log_level, LogLevel::Warn);
        assert_eq!(recv(&mut receiver).await.reading, Some(40));
        assert_eq!(
            recv(&mut receiver).await.sensor_state,
            Some(SensorState::Ended)
        );
        subscription.stop().await;
    }

    #[tokio::test]
    async fn io_errors_end_the_feed() {
        let (sender, mut receiver) = mpsc::channel(16);
        let mut source = MockStepCounterSource::new();
        source
            .expect_describe()
            .returning(|| "broken".to_string());
        source.expect_next_reading().times(1).returning(|| {
            Err(SensorError::Io(std::io::Error::other("Is a directory")))
        });

        let mut subscription = SensorSubscription::new(Box::new(source), SensorDelay::Ui, sender);
        subscription.start();

        let ended = recv(&mut receiver).await;
        assert_eq!(ended.sensor_state, Some(SensorState::Ended));
        assert!(ended.msg.contains("Is a directory"));

        subscription.stop().await;
        assert!(subscription.is_finished());
    }

    #[tokio::test]
    async fn starting_twice_is_a_no_op() {
        let (sender, _receiver) = mpsc::channel(16);
        let source = ReplayStepCounter::new(&b"1\n"[..], "test");
        let mut subscription = SensorSubscription::new(Box::new(source), SensorDelay::Normal, sender);
        assert!(subscription.start());
        assert!(!subscription.start());
        subscription.stop().await;
    }
}
