//! Counter values replayed from a text stream, one per line.

use super::{SensorError, StepCounterSource};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines};

pub struct ReplayStepCounter<R> {
    lines: Lines<BufReader<R>>,
    label: String,
}

impl<R: AsyncRead + Unpin> ReplayStepCounter<R> {
    pub fn new(reader: R, label: impl Into<String>) -> Self {
        Self {
            lines: BufReader::new(reader).lines(),
            label: label.into(),
        }
    }
}

#[async_trait::async_trait]
impl<R: AsyncRead + Unpin + Send> StepCounterSource for ReplayStepCounter<R> {
    fn describe(&self) -> String {
        format!("replay ({})", self.label)
    }

    async fn next_reading(&mut self) -> Result<Option<u64>, SensorError> {
        while let Some(line) = self.lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            return parse_counter(line).map(Some);
        }
        Ok(None)
    }
}

/// Accepts integers, or non-negative decimals which are truncated the way
/// float sensor payloads are.
pub fn parse_counter(raw: &str) -> Result<u64, SensorError> {
    if let Ok(value) = raw.parse::<u64>() {
        return Ok(value);
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value as u64),
        _ => Err(SensorError::Malformed(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_integers_and_float_payloads() {
        assert_eq!(parse_counter("0").unwrap(), 0);
        assert_eq!(parse_counter("18342").unwrap(), 18_342);
        assert_eq!(parse_counter("18342.0").unwrap(), 18_342);
        assert_eq!(parse_counter("7.9").unwrap(), 7);
    }

    #[test]
    fn rejects_negative_and_garbage() {
        assert!(matches!(parse_counter("-4"), Err(SensorError::Malformed(_))));
        assert!(matches!(parse_counter("steps"), Err(SensorError::Malformed(_))));
        assert!(matches!(parse_counter("inf"), Err(SensorError::Malformed(_))));
    }

    #[tokio::test]
    // A malformed line is reported once and the following lines still arrive.
    async fn skips_blank_lines_and_continues_after_errors() {
        let input: &[u8] = b"100\n\n  101 \nabc\n102.5\n";
        let mut source = ReplayStepCounter::new(input, "test");

        assert_eq!(source.next_reading().await.unwrap(), Some(100));
        assert_eq!(source.next_reading().await.unwrap(), Some(101));
        assert!(matches!(
            source.next_reading().await,
            Err(SensorError::Malformed(line)) if line == "abc"
        ));
        assert_eq!(source.next_reading().await.unwrap(), Some(102));
        assert_eq!(source.next_reading().await.unwrap(), None);
        assert_eq!(source.describe(), "replay (test)");
    }
}
