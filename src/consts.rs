pub mod cli_consts {
    //! Dashboard and Provider Configuration Constants
    //!
    //! This module contains the configuration constants shared by the
    //! sentiment provider and the polling dashboard, organized by functional
    //! area.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Maximum number of buffered events between the poller and the UI
    pub const EVENT_QUEUE_SIZE: usize = 100;

    /// Pending manual refresh requests. A second request while one is queued is dropped.
    pub const REFRESH_QUEUE_SIZE: usize = 1;

    // =============================================================================
    // POLLING CONFIGURATION
    // =============================================================================

    /// Dashboard polling configuration
    pub mod polling {
        /// Interval between scheduled refreshes (seconds)
        pub const POLL_INTERVAL_SECS: u64 = 60;

        /// Connect timeout for the sentiment endpoint (seconds)
        pub const CONNECT_TIMEOUT_SECS: u64 = 10;

        /// Total request timeout for the sentiment endpoint (seconds)
        pub const REQUEST_TIMEOUT_SECS: u64 = 10;

        /// Endpoint polled when no URL is configured
        pub const DEFAULT_SENTIMENT_URL: &str = "http://127.0.0.1:3000/api/sentiment";

        /// Message shown to the user for any failed refresh
        pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch sentiment data";
    }

    // =============================================================================
    // PROVIDER CONFIGURATION
    // =============================================================================

    /// Data provider configuration
    pub mod provider {
        /// Snapshot file read by the static-file provider, relative to the working directory
        pub const DEFAULT_DATA_FILE: &str = "public/data.json";

        /// Upper bound on an external snapshot command (seconds)
        pub const EXTERNAL_TIMEOUT_SECS: u64 = 120;

        /// Lines of stderr kept when an external command fails
        pub const STDERR_TAIL_LINES: usize = 20;
    }

    // =============================================================================
    // SERVER CONFIGURATION
    // =============================================================================

    /// HTTP server configuration
    pub mod server {
        /// Address the provider binds to by default
        pub const DEFAULT_BIND: &str = "127.0.0.1";

        /// Port the provider listens on by default
        pub const DEFAULT_PORT: u16 = 3000;

        /// Envelope message for a successful read
        pub const SUCCESS_MESSAGE: &str = "Market sentiment data retrieved successfully";

        /// Envelope message for any provider failure
        pub const FAILURE_MESSAGE: &str = "Failed to retrieve sentiment data";
    }

    // =============================================================================
    // DISPLAY CONFIGURATION
    // =============================================================================

    /// Strategic bias at or above this percentage is a momentum regime
    pub const MOMENTUM_THRESHOLD: f64 = 50.0;
}
