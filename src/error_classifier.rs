use crate::client::error::FetchError;
use crate::provider::ProviderError;
use log::{Level, LevelFilter};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
        }
    }
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::Trace,
            LogLevel::Debug => Level::Debug,
            LogLevel::Info => Level::Info,
            LogLevel::Warn => Level::Warn,
            LogLevel::Error => Level::Error,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify_fetch_error(&self, error: &FetchError) -> LogLevel {
        match error {
            // Temporary server issues
            FetchError::Http { status, .. } if *status == 429 => LogLevel::Debug,
            FetchError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Wrong URL or a server that is not a sentiment API
            FetchError::Http { status, .. } if *status == 404 => LogLevel::Error,
            FetchError::InvalidEnvelope { .. } => LogLevel::Error,

            // Network issues - usually temporary
            _ => LogLevel::Warn,
        }
    }

    pub fn classify_provider_error(&self, error: &ProviderError) -> LogLevel {
        match error {
            // Data not there yet or the producer is slow
            ProviderError::Io { .. } => LogLevel::Warn,
            ProviderError::Timeout { .. } => LogLevel::Warn,

            // Broken producer or data file
            ProviderError::Parse(_) => LogLevel::Error,
            ProviderError::Spawn { .. } => LogLevel::Error,
            ProviderError::ProcessFailed { .. } => LogLevel::Error,
        }
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}
