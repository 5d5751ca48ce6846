//! Event System
//!
//! Types and implementations for poller events and logging

use crate::error_classifier::LogLevel;
use crate::logging::should_log_with_env;
use crate::snapshot::SentimentSnapshot;
use crate::snapshot::display::SnapshotView;
use chrono::Local;
use std::fmt::Display;
use std::time::Instant;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Worker {
    /// Background task that fetches snapshots on a timer.
    Poller,
    /// The dashboard itself (key presses, lifecycle).
    Dashboard,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
    Waiting,
}

/// Outcome of one step of the fetch cycle
#[derive(Debug, Clone, PartialEq)]
pub enum FetchUpdate {
    /// A timer tick fired; the following one is due at this instant.
    Scheduled(Instant),
    Started,
    Succeeded(Box<SentimentSnapshot>),
    /// Detailed cause; the dashboard shows a generic message instead.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub worker: Worker,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
    /// Set for events produced by the fetch cycle
    pub update: Option<FetchUpdate>,
}

impl Event {
    fn new(worker: Worker, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            worker,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
            update: None,
        }
    }

    fn with_update(mut self, update: FetchUpdate) -> Self {
        self.update = Some(update);
        self
    }

    pub fn fetch_scheduled(next_at: Instant) -> Self {
        let wait = next_at.saturating_duration_since(Instant::now());
        Self::new(
            Worker::Poller,
            format!("Next scheduled refresh in {}s", wait.as_secs()),
            EventType::Waiting,
            LogLevel::Debug,
        )
        .with_update(FetchUpdate::Scheduled(next_at))
    }

    pub fn fetch_started(endpoint: &str) -> Self {
        Self::new(
            Worker::Poller,
            format!("Fetching sentiment from {}", endpoint),
            EventType::Refresh,
            LogLevel::Debug,
        )
        .with_update(FetchUpdate::Started)
    }

    pub fn fetch_succeeded(snapshot: SentimentSnapshot) -> Self {
        let msg = format!(
            "Snapshot {} received: {}",
            snapshot.datetime,
            SnapshotView::of(&snapshot).summary()
        );
        Self::new(Worker::Poller, msg, EventType::Success, LogLevel::Info)
            .with_update(FetchUpdate::Succeeded(Box::new(snapshot)))
    }

    pub fn fetch_failed(detail: String, log_level: LogLevel) -> Self {
        Self::new(
            Worker::Poller,
            format!("Fetch failed: {}", detail),
            EventType::Error,
            log_level,
        )
        .with_update(FetchUpdate::Failed(detail))
    }

    pub fn poller_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Worker::Poller, msg, event_type, log_level)
    }

    pub fn dashboard_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Worker::Dashboard, msg, event_type, log_level)
    }

    pub fn should_display(&self) -> bool {
        // Always show success events and info level events
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.event_type, self.timestamp, self.msg)
    }
}
