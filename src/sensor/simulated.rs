//! A step counter that walks on its own, for running without hardware.

use super::{SensorError, StepCounterSource};
use crate::consts::cli_consts::sensor::SIMULATED_MAX_STEPS_PER_READING;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct SimulatedStepCounter {
    cumulative: u64,
    rng: StdRng,
}

impl SimulatedStepCounter {
    /// `boot_count` is the counter value before the first reading. A seed
    /// makes the walk reproducible.
    pub fn new(boot_count: u64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            cumulative: boot_count,
            rng,
        }
    }
}

#[async_trait::async_trait]
impl StepCounterSource for SimulatedStepCounter {
    fn describe(&self) -> String {
        "simulated step counter".to_string()
    }

    async fn next_reading(&mut self) -> Result<Option<u64>, SensorError> {
        let advanced = self.rng.gen_range(0..=SIMULATED_MAX_STEPS_PER_READING);
        self.cumulative = self.cumulative.saturating_add(advanced);
        Ok(Some(self.cumulative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn counter_never_decreases() {
        let mut counter = SimulatedStepCounter::new(1_000, Some(42));
        let mut previous = 1_000;
        for _ in 0..200 {
            let reading = counter.next_reading().await.unwrap().unwrap();
            assert!(reading >= previous);
            assert!(reading - previous <= SIMULATED_MAX_STEPS_PER_READING);
            previous = reading;
        }
    }

    #[tokio::test]
    async fn same_seed_same_walk() {
        let mut a = SimulatedStepCounter::new(0, Some(9));
        let mut b = SimulatedStepCounter::new(0, Some(9));
        for _ in 0..50 {
            assert_eq!(
                a.next_reading().await.unwrap(),
                b.next_reading().await.unwrap()
            );
        }
    }
}
