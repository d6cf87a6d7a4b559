//! Step counter sources
//!
//! A source delivers the platform's cumulative step count, which only ever
//! grows within one boot session. [`probe`] opens the source described by a
//! [`SensorSpec`]; [`SensorSubscription`] pumps its readings to the UI while
//! started, and [`SensorGate`] ties the two together for the dashboard.

pub mod error;
pub mod gate;
pub mod replay;
pub mod simulated;
pub mod subscription;

pub use error::SensorError;
pub use gate::SensorGate;
pub use replay::ReplayStepCounter;
pub use simulated::SimulatedStepCounter;
pub use subscription::SensorSubscription;

use crate::consts::cli_consts::sensor::{normal_delay, ui_delay};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait StepCounterSource: Send {
    /// Human readable name for logs.
    fn describe(&self) -> String;

    /// Waits for the next cumulative counter value. `Ok(None)` means the feed
    /// has ended.
    async fn next_reading(&mut self) -> Result<Option<u64>, SensorError>;
}

/// Delivery rate requested from the sensor.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SensorDelay {
    /// Rate suitable for updating the screen.
    #[default]
    Ui,
    /// Slower rate for background-style updates.
    Normal,
}

impl SensorDelay {
    pub fn interval(&self) -> Duration {
        match self {
            SensorDelay::Ui => ui_delay(),
            SensorDelay::Normal => normal_delay(),
        }
    }
}

/// Which step counter to open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SensorSpec {
    /// Random walk starting at `boot_count`.
    Simulated { seed: Option<u64>, boot_count: u64 },
    /// Counter values read line by line from a file, or stdin for `-`.
    Replay(PathBuf),
    /// A device without a step counter.
    Absent,
}

/// Whether the dashboard can show live steps.
#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
pub enum SensorAvailability {
    Available,
    Missing,
    PermissionDenied,
}

impl SensorAvailability {
    pub fn from_error(error: &SensorError) -> Self {
        match error {
            SensorError::PermissionDenied(_) => SensorAvailability::PermissionDenied,
            _ => SensorAvailability::Missing,
        }
    }
}

/// Opens the step counter described by `spec`.
pub async fn probe(spec: &SensorSpec) -> Result<Box<dyn StepCounterSource>, SensorError> {
    match spec {
        SensorSpec::Absent => Err(SensorError::NotFound(
            "no step counter on this device".to_string(),
        )),
        SensorSpec::Simulated { seed, boot_count } => {
            Ok(Box::new(SimulatedStepCounter::new(*boot_count, *seed)))
        }
        SensorSpec::Replay(path) if path.as_os_str() == "-" => {
            Ok(Box::new(ReplayStepCounter::new(tokio::io::stdin(), "stdin")))
        }
        SensorSpec::Replay(path) => open_replay(path).await,
    }
}

async fn open_replay(path: &Path) -> Result<Box<dyn StepCounterSource>, SensorError> {
    let label = path.display().to_string();
    match tokio::fs::File::open(path).await {
        Ok(file) => {
            if file.metadata().await?.is_dir() {
                return Err(SensorError::NotFound(format!("{} is a directory", label)));
            }
            Ok(Box::new(ReplayStepCounter::new(file, label)))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Err(SensorError::NotFound(label)),
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            Err(SensorError::PermissionDenied(label))
        }
        Err(e) => Err(SensorError::Io(e)),
    }
}
