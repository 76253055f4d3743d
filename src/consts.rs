pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! This module contains all configuration constants for the dashboard
    //! client, organized by functional area for clarity and maintainability.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Maximum buffer size for the worker event channel.
    pub const EVENT_QUEUE_SIZE: usize = 100;

    /// Maximum buffer size for the dashboard update channel.
    pub const UPDATE_QUEUE_SIZE: usize = 64;

    /// Maximum buffer size for the refresher command channel.
    pub const COMMAND_QUEUE_SIZE: usize = 16;

    // =============================================================================
    // PROFILE CONFIGURATION
    // =============================================================================

    /// Number of rows requested for the head preview table.
    pub const HEAD_PREVIEW_ROWS: usize = 7;

    // =============================================================================
    // UI TIMING
    // =============================================================================

    pub mod ui_timing {
        use std::time::Duration;

        /// How long the splash screen stays up before the dashboard appears.
        pub const SPLASH_DURATION_MS: u64 = 2000;

        /// Interval between keyboard polls in the UI loop.
        pub const EVENT_POLL_INTERVAL_MS: u64 = 100;

        /// Helper function to get the splash duration
        pub const fn splash_duration() -> Duration {
            Duration::from_millis(SPLASH_DURATION_MS)
        }

        /// Helper function to get the keyboard poll interval
        pub const fn event_poll_interval() -> Duration {
            Duration::from_millis(EVENT_POLL_INTERVAL_MS)
        }
    }
}
