//! Error handling for the sensor module

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SensorError {
    /// There is no step counter to read from.
    #[error("Step sensor not found: {0}")]
    NotFound(String),

    /// The step counter exists but this process may not read it.
    #[error("Permission denied for step sensor: {0}")]
    PermissionDenied(String),

    /// A delivered value was not a non-negative counter.
    #[error("Malformed reading {0:?}")]
    Malformed(String),

    #[error("Sensor I/O error: {0}")]
    Io(#[from] std::io::Error),
}
