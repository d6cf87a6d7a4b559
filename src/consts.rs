pub mod cli_consts {
    //! Application Constants
    //!
    //! Fixed estimation constants and buffer sizes, organized by functional
    //! area.

    // =============================================================================
    // STEP ESTIMATION
    // =============================================================================

    /// Assumed distance covered per step, in meters.
    pub const STRIDE_LENGTH_METERS: f64 = 0.762;

    /// Assumed energy expenditure per step, in kilocalories.
    pub const CALORIES_PER_STEP: f64 = 0.04;

    /// Approximate walking cadence used to estimate active time.
    pub const STEPS_PER_MINUTE_AVG: u64 = 100;

    /// Pace is only reported once the distance exceeds this many kilometers.
    pub const MIN_PACE_DISTANCE_KM: f64 = 0.1;

    /// Default daily step goal shown on the dashboard gauge.
    pub const DEFAULT_DAILY_GOAL: u64 = 10_000;

    // =============================================================================
    // CHART CONFIGURATION
    // =============================================================================

    /// Chart configuration
    pub mod chart {
        /// Number of bars kept when plotting on every refresh.
        pub const EVERY_REFRESH_CAPACITY: usize = 7;

        /// Number of points kept when plotting on step deltas.
        pub const STEP_DELTA_CAPACITY: usize = 50;

        /// Minimum change in steps before a new point is plotted.
        pub const MIN_PLOT_STEP_DELTA: u64 = 10;
    }

    // =============================================================================
    // SENSOR CONFIGURATION
    // =============================================================================

    /// Sensor delivery configuration
    pub mod sensor {
        use std::time::Duration;

        /// Delivery interval for UI-rate sensor updates (milliseconds)
        pub const UI_DELAY_MS: u64 = 60;

        /// Delivery interval for normal-rate sensor updates (milliseconds)
        pub const NORMAL_DELAY_MS: u64 = 200;

        /// Upper bound of steps the simulated counter advances per reading
        pub const SIMULATED_MAX_STEPS_PER_READING: u64 = 2;

        pub const fn ui_delay() -> Duration {
            Duration::from_millis(UI_DELAY_MS)
        }

        pub const fn normal_delay() -> Duration {
            Duration::from_millis(NORMAL_DELAY_MS)
        }
    }

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Maximum number of buffered events between the sensor task and the UI
    pub const EVENT_QUEUE_SIZE: usize = 100;

    // =============================================================================
    // NOTICES
    // =============================================================================

    /// How long transient notices stay on screen
    pub mod notice {
        use std::time::Duration;

        pub const SHORT_MS: u64 = 2_000;
        pub const LONG_MS: u64 = 3_500;

        pub const fn short() -> Duration {
            Duration::from_millis(SHORT_MS)
        }

        pub const fn long() -> Duration {
            Duration::from_millis(LONG_MS)
        }
    }

    // =============================================================================
    // FILES
    // =============================================================================

    /// Directory under $HOME holding all application files.
    pub const APP_DIR_NAME: &str = ".steppulse";

    pub const CONFIG_FILE_NAME: &str = "config.json";

    pub const PREFS_FILE_NAME: &str = "step_prefs.json";

    pub const LOG_FILE_NAME: &str = "steppulse.log";

    /// Preference key holding the persisted step baseline.
    pub const KEY_INITIAL_STEPS: &str = "initial_steps";
}
