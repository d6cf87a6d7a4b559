//! Console lines printed around a dashboard or headless session

use crate::cli_messages::{print_info, print_success};
use crate::pedometer::tracker::Snapshot;

/// Announces the session, its sensor and the goal it counts toward.
pub fn print_session_starting(mode: &str, sensor: Option<&str>, daily_goal: u64) {
    let sensor = sensor.unwrap_or("no step sensor");
    print_info(
        &format!("Starting {} mode with {}", mode, sensor),
        &format!("daily goal {} steps", daily_goal),
    );
}

/// Prints where the count stood when the session ended.
pub fn print_session_total(latest: Option<&Snapshot>) {
    match latest {
        Some(snapshot) => print_info("Session total", &snapshot.to_string()),
        None => print_info("Session total", "no readings received"),
    }
}

/// Hands summaries queued on the dashboard to stdout, the share sink.
pub fn print_shared(summaries: &[String]) {
    for summary in summaries {
        println!("{}\n", summary);
    }
}

pub fn print_session_exit_success() {
    print_success("StepPulse exited successfully", "");
}
