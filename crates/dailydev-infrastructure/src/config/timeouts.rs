use std::time::Duration;

/// Timeout durations shared by the database layer and the HTTP server
#[derive(Debug, Clone)]
pub struct TimeoutConfig {
    /// Waiting for a pooled database connection
    pub db_acquire: Duration,

    /// A single database statement
    pub db_query: Duration,

    /// Whole HTTP request, handler included
    pub http_request: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        GLOBAL_TIMEOUT_CONFIG.clone()
    }
}

impl TimeoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the global timeout configuration
    pub fn global() -> &'static Self {
        &GLOBAL_TIMEOUT_CONFIG
    }
}

static GLOBAL_TIMEOUT_CONFIG: TimeoutConfig = TimeoutConfig {
    db_acquire: Duration::from_secs(5),
    db_query: Duration::from_secs(10),
    http_request: Duration::from_secs(30),
};
