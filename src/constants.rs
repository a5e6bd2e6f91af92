//! Application-wide constants
//!
//! This module contains all the magic numbers and default values used throughout
//! the application, making them easy to find and modify.

/// Configuration-related constants
pub mod config {
    /// Environment variable that overrides the configuration file path
    pub const CONFIG_FILE_ENV_VAR: &str = "HERALD_CONFIG_FILE";

    /// Default configuration file name, resolved relative to the working directory
    pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
}

/// Chain polling constants
pub mod polling {
    /// Interval between head block checks (in seconds)
    pub const POLL_INTERVAL_SECS: u64 = 5;

    /// Capacity of the per-chain event processing channel
    pub const EVENT_CHANNEL_CAPACITY: usize = 100;
}

/// Network-related constants
pub mod network {
    /// Default HTTP request timeout for webhook delivery (in seconds)
    pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 30;
}

/// Metrics-related constants
pub mod metrics {
    /// Port for Prometheus metrics server
    pub const METRICS_SERVER_PORT: u16 = 9090;
}
