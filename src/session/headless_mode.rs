//! Headless mode execution

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_starting, print_session_total},
};
use crate::events::SensorState;
use crate::sensor::SensorAvailability;
use crate::print_cmd_warn;
use std::error::Error;

/// Runs the application in headless mode
///
/// This function handles:
/// 1. Printing a line whenever the step count changes
/// 2. Ctrl+C shutdown handling
/// 3. Stopping when the sensor feed ends
///
/// # Arguments
/// * `session` - Session data from setup
pub async fn run_headless_mode(mut session: SessionData) -> Result<(), Box<dyn Error>> {
    print_session_starting(
        "headless",
        session.sensor.description(),
        session.daily_goal,
    );

    match session.sensor.availability() {
        SensorAvailability::Available => {}
        SensorAvailability::Missing => {
            print_cmd_warn!("Step sensor not found on this device", "Steps: N/A");
            return Ok(());
        }
        SensorAvailability::PermissionDenied => {
            print_cmd_warn!(
                "Permission Required!",
                "Allow access to the step sensor and start again"
            );
            return Ok(());
        }
    }

    // Trigger shutdown on Ctrl+C
    let shutdown_sender_clone = session.shutdown_sender.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_sender_clone.send(());
        }
    });

    let mut shutdown_receiver = session.shutdown_sender.subscribe();
    session.sensor.resume();

    // Event loop: print step changes until shutdown or the feed ends
    let mut last_steps = None;
    loop {
        tokio::select! {
            Some(event) = session.event_receiver.recv() => {
                if let Some(cumulative) = event.reading {
                    let snapshot = session.tracker.on_reading(cumulative);
                    if last_steps != Some(snapshot.steps) {
                        println!("{}", snapshot);
                        last_steps = Some(snapshot.steps);
                    }
                    continue;
                }
                if event.should_display() {
                    println!("{}", event);
                }
                if event.sensor_state == Some(SensorState::Ended) {
                    break;
                }
            }
            _ = shutdown_receiver.recv() => {
                break;
            }
        }
    }

    session.sensor.pause().await;
    print_session_total(session.tracker.latest());
    print_session_exit_success();

    Ok(())
}
