mod bmi;
mod cli_messages;
mod config;
mod consts;
mod events;
mod logging;
mod pedometer;
mod sensor;
mod session;
mod share;
mod storage;
mod ui;

use crate::config::{Config, get_config_path, get_log_path, get_prefs_path};
use crate::consts::cli_consts::KEY_INITIAL_STEPS;
use crate::pedometer::{ChartPolicy, RollbackPolicy, StepTracker};
use crate::sensor::{SensorDelay, SensorSpec};
use crate::session::{run_headless_mode, run_tui_mode, setup_session};
use crate::storage::PrefsFile;
use clap::{Parser, Subcommand, ValueEnum};
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Step counting dashboard and BMI calculator
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

/// Where step counter readings come from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum SensorKind {
    /// A random walk, for trying the dashboard out.
    Simulated,
    /// Counter values from a file, one per line.
    Replay,
    /// Behave like a device without a step counter.
    #[value(name = "none")]
    Absent,
}

#[derive(Subcommand)]
enum Command {
    /// Start the step dashboard
    Start {
        /// Step counter to read from
        #[arg(long, value_enum, default_value_t = SensorKind::Simulated)]
        sensor: SensorKind,

        /// File of counter values for `--sensor replay`; `-` reads stdin
        #[arg(long, value_name = "PATH", required_if_eq("sensor", "replay"))]
        replay_file: Option<PathBuf>,

        /// Seed for the simulated walk
        #[arg(long)]
        seed: Option<u64>,

        /// Simulated counter value at startup
        #[arg(long, default_value_t = 0)]
        boot_count: u64,

        /// Rate at which the sensor is read
        #[arg(long, value_enum)]
        delay: Option<SensorDelay>,

        /// When readings become chart points
        #[arg(long, value_enum)]
        chart: Option<ChartPolicy>,

        /// What to do when the counter drops below the stored baseline
        #[arg(long, value_enum)]
        rollback: Option<RollbackPolicy>,

        /// Daily step goal
        #[arg(long, value_name = "STEPS")]
        goal: Option<u64>,

        /// Print step updates to the console instead of opening the dashboard
        #[arg(long, default_value = "false")]
        headless: bool,

        /// Paint the dashboard background
        #[arg(long = "with-background", default_value = "false")]
        with_background: bool,
    },
    /// Reconcile one counter value against the stored baseline
    Reading {
        /// Cumulative step counter value
        #[arg(long)]
        counter: u64,
    },
    /// Print the share summary for a counter value
    Share {
        /// Cumulative step counter value
        #[arg(long)]
        counter: u64,
    },
    /// Calculate Body Mass Index
    Bmi {
        /// Weight in kilograms
        #[arg(long, allow_hyphen_values = true)]
        weight: String,

        /// Height in centimeters
        #[arg(long, allow_hyphen_values = true)]
        height: String,
    },
    /// Forget the stored step baseline
    Reset,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    // The dashboard owns the terminal, so its logs go to a file
    match &args.command {
        Command::Start {
            headless: false, ..
        } => logging::init_file_logger(&get_log_path()?),
        _ => logging::init_console_logger(),
    }

    let config_path = get_config_path()?;
    match args.command {
        Command::Start {
            sensor,
            replay_file,
            seed,
            boot_count,
            delay,
            chart,
            rollback,
            goal,
            headless,
            with_background,
        } => {
            let mut config = Config::load_or_default(&config_path);
            if !config_path.exists() {
                // Leave an editable copy of the defaults behind
                if let Err(e) = config.save(&config_path) {
                    log::warn!("Could not write default config: {}", e);
                }
            }
            if let Some(delay) = delay {
                config.sensor_delay = delay;
            }
            if let Some(chart) = chart {
                config.chart_policy = chart;
            }
            if let Some(rollback) = rollback {
                config.rollback_policy = rollback;
            }
            if let Some(goal) = goal {
                config.daily_goal = goal;
            }

            let spec = match sensor {
                SensorKind::Simulated => SensorSpec::Simulated { seed, boot_count },
                SensorKind::Replay => {
                    SensorSpec::Replay(replay_file.unwrap_or_else(|| PathBuf::from("-")))
                }
                SensorKind::Absent => SensorSpec::Absent,
            };

            let session = setup_session(&config, spec).await?;
            if headless {
                run_headless_mode(session).await
            } else {
                run_tui_mode(session, with_background).await
            }
        }
        Command::Reading { counter } => {
            let mut tracker = open_tracker(&config_path)?;
            let snapshot = tracker.on_reading(counter);
            if snapshot.rollback_detected {
                print_cmd_warn!(
                    "Counter below baseline",
                    "the device has likely restarted since counting began"
                );
            }
            if snapshot.baseline_established {
                print_cmd_info!("Baseline established", "counting from {}", counter);
            }
            print_cmd_success!("Today", "{}", snapshot);
            Ok(())
        }
        Command::Share { counter } => {
            let mut tracker = open_tracker(&config_path)?;
            let snapshot = tracker.on_reading(counter);
            println!("{}", share::summary(&snapshot.metrics));
            Ok(())
        }
        Command::Bmi { weight, height } => match bmi::calculate(&weight, &height) {
            Ok(reading) => {
                print_cmd_success!("BMI", "{}", reading);
                Ok(())
            }
            Err(e) => {
                print_cmd_error!(e.notice(), &e.to_string());
                Err(e.into())
            }
        },
        Command::Reset => {
            let stored = match PrefsFile::new(get_prefs_path()?).get_int(KEY_INITIAL_STEPS) {
                Ok(stored) => stored,
                Err(e) => {
                    print_cmd_warn!("Preferences unreadable", "{}; starting fresh", e);
                    None
                }
            };
            open_tracker(&config_path)?.reset_baseline();
            match stored {
                Some(baseline) => print_cmd_success!(
                    "Step baseline cleared",
                    "was {}; counting restarts at the next reading",
                    baseline
                ),
                None => print_cmd_info!("No step baseline stored", ""),
            }
            Ok(())
        }
    }
}

/// Builds a tracker over the stored baseline using the configured policies.
fn open_tracker(config_path: &std::path::Path) -> Result<StepTracker, Box<dyn Error>> {
    let config = Config::load_or_default(config_path);
    let prefs = PrefsFile::new(get_prefs_path()?);
    Ok(StepTracker::new(
        Box::new(prefs),
        config.rollback_policy,
        config.chart_policy,
    ))
}
