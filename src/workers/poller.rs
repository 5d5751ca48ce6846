//! Sentiment poller
//!
//! Owns the refresh timer. One task fetches immediately on mount, then on every
//! tick of the poll interval and whenever a manual refresh is requested. Fetches
//! run inside that task, so two fetches never overlap. Each timer tick announces
//! when the next one is due.

use super::core::EventSender;
use crate::client::SentimentSource;
use crate::consts::cli_consts::REFRESH_QUEUE_SIZE;
use crate::error_classifier::{ErrorClassifier, LogLevel};
use crate::events::{Event, EventType};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};

/// How late a tick may fire and still count as on schedule.
const LATE_TICK_TOLERANCE: Duration = Duration::from_millis(5);

pub struct SentimentPoller {
    source: Arc<dyn SentimentSource>,
    interval: Duration,
    event_sender: EventSender,
    classifier: ErrorClassifier,
}

impl SentimentPoller {
    /// Start polling `source` every `interval`. The first fetch happens right away.
    pub fn mount(
        source: Arc<dyn SentimentSource>,
        interval: Duration,
        events: mpsc::Sender<Event>,
    ) -> PollerHandle {
        let (shutdown_sender, shutdown_receiver) = broadcast::channel(1);
        let (refresh_sender, refresh_receiver) = mpsc::channel(REFRESH_QUEUE_SIZE);

        let poller = Self {
            source,
            interval,
            event_sender: EventSender::new(events),
            classifier: ErrorClassifier::new(),
        };
        let task = tokio::spawn(poller.run(refresh_receiver, shutdown_receiver));

        PollerHandle {
            refresh_sender,
            shutdown_sender,
            task: Some(task),
        }
    }

    async fn run(
        self,
        mut refresh_requests: mpsc::Receiver<()>,
        mut shutdown: broadcast::Receiver<()>,
    ) {
        self.event_sender
            .send_poller_event(
                format!(
                    "Polling {} every {}s",
                    self.source.endpoint(),
                    self.interval.as_secs()
                ),
                EventType::Waiting,
                LogLevel::Debug,
            )
            .await;

        let mut next_tick = Instant::now();
        loop {
            let scheduled = tokio::select! {
                biased;
                _ = shutdown.recv() => break,
                _ = sleep_until(next_tick) => {
                    next_tick = next_deadline(next_tick, Instant::now(), self.interval);
                    Some(next_tick)
                }
                request = refresh_requests.recv() => {
                    // Every handle is gone
                    if request.is_none() {
                        break;
                    }
                    None
                }
            };

            // Dropping the fetch on shutdown guarantees no late result.
            tokio::select! {
                biased;
                _ = shutdown.recv() => break,
                _ = async {
                    if let Some(next_at) = scheduled {
                        self.event_sender
                            .send_event(Event::fetch_scheduled(next_at.into_std()))
                            .await;
                    }
                    self.fetch_once().await;
                } => {}
            }
        }
    }

    async fn fetch_once(&self) {
        self.event_sender
            .send_event(Event::fetch_started(self.source.endpoint()))
            .await;

        let event = match self.source.fetch_snapshot().await {
            Ok(snapshot) => Event::fetch_succeeded(snapshot),
            Err(e) => {
                let level = self.classifier.classify_fetch_error(&e);
                Event::fetch_failed(e.to_string(), level)
            }
        };
        self.event_sender.send_event(event).await;
    }
}

/// Deadline that follows a tick due at `deadline` which fired at `now`.
///
/// A tick that fired late (a fetch overran the interval) restarts the period
/// from `now` instead of bursting to catch up. Manual refreshes never move it.
fn next_deadline(deadline: Instant, now: Instant, interval: Duration) -> Instant {
    if now > deadline + LATE_TICK_TOLERANCE {
        now + interval
    } else {
        deadline + interval
    }
}

/// Owned handle to a mounted poller. Dropping it stops the poller.
pub struct PollerHandle {
    refresh_sender: mpsc::Sender<()>,
    shutdown_sender: broadcast::Sender<()>,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// Ask for an immediate fetch without touching the periodic schedule.
    ///
    /// Returns `false` when a request is already queued (or the poller is gone);
    /// the duplicate is dropped.
    pub fn refresh(&self) -> bool {
        self.refresh_sender.try_send(()).is_ok()
    }

    /// Stop the timer and cancel any in-flight fetch. No event is sent once this returns.
    pub async fn unmount(mut self) {
        let _ = self.shutdown_sender.send(());
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                log::debug!("Poller task ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        let _ = self.shutdown_sender.send(());
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
