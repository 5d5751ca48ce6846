//! Dashboard state management
//!
//! Contains the view model driven by the poller's fetch cycle

use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::consts::cli_consts::polling::FETCH_FAILED_MESSAGE;
use crate::events::Event as WorkerEvent;
use crate::snapshot::SentimentSnapshot;
use crate::ui::app::UIConfig;
use chrono::{DateTime, Local};

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// What the dashboard is currently able to show.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// No snapshot yet and a fetch is pending.
    Loading,
    /// The last fetch failed; any earlier snapshot has been discarded.
    Error { message: String },
    /// The latest snapshot and when it arrived.
    Ready {
        snapshot: Box<SentimentSnapshot>,
        last_updated: DateTime<Local>,
    },
}

impl ViewState {
    /// A fetch has begun. Only an errored view changes; it drops back to loading.
    pub fn on_fetch_started(self) -> Self {
        match self {
            ViewState::Error { .. } => ViewState::Loading,
            other => other,
        }
    }

    pub fn on_fetch_succeeded(self, snapshot: SentimentSnapshot, now: DateTime<Local>) -> Self {
        ViewState::Ready {
            snapshot: Box::new(snapshot),
            last_updated: now,
        }
    }

    /// Any failure replaces the view, stale data included, with a generic message.
    pub fn on_fetch_failed(self) -> Self {
        ViewState::Error {
            message: FETCH_FAILED_MESSAGE.to_string(),
        }
    }

    pub fn snapshot(&self) -> Option<&SentimentSnapshot> {
        match self {
            ViewState::Ready { snapshot, .. } => Some(&**snapshot),
            _ => None,
        }
    }
}

/// Dashboard state with the sentiment view model and activity log.
#[derive(Debug)]
pub struct DashboardState {
    /// Endpoint the poller reads from.
    pub endpoint: String,
    /// Time between scheduled fetches.
    pub poll_interval: Duration,
    /// Queue of events waiting to be processed
    pub pending_events: VecDeque<WorkerEvent>,
    /// Activity logs for display
    pub activity_logs: VecDeque<WorkerEvent>,
    /// Whether to enable background colors
    pub with_background_color: bool,
    /// Animation tick counter
    pub tick: usize,

    view: ViewState,
    /// Set for the duration of every fetch, with or without data on screen.
    refreshing: bool,
    /// Next timer tick as last announced by the poller.
    next_refresh_at: Instant,
}

impl DashboardState {
    pub fn new(mounted_at: Instant, ui_config: UIConfig) -> Self {
        Self {
            endpoint: ui_config.endpoint,
            poll_interval: ui_config.poll_interval,
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
            with_background_color: ui_config.with_background_color,
            tick: 0,
            view: ViewState::Loading,
            refreshing: false,
            next_refresh_at: mounted_at + ui_config.poll_interval,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    /// The spinner is only for a dashboard with nothing else to show.
    pub fn show_spinner(&self) -> bool {
        matches!(self.view, ViewState::Loading)
    }

    pub(super) fn set_view(&mut self, transition: impl FnOnce(ViewState) -> ViewState) {
        let current = std::mem::replace(&mut self.view, ViewState::Loading);
        self.view = transition(current);
    }

    pub(super) fn set_refreshing(&mut self, refreshing: bool) {
        self.refreshing = refreshing;
    }

    pub(super) fn set_next_refresh(&mut self, next_refresh_at: Instant) {
        self.next_refresh_at = next_refresh_at;
    }

    /// Whole seconds, rounded up, until the next scheduled fetch. Zero when overdue.
    pub fn seconds_until_refresh(&self) -> u64 {
        let remaining = self.next_refresh_at.saturating_duration_since(Instant::now());
        remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0)
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: WorkerEvent) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add an event to the processing queue
    pub fn add_event(&mut self, event: WorkerEvent) {
        self.pending_events.push_back(event);
    }
}
