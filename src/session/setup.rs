//! Session setup and initialization

use crate::client::{SentimentClient, SentimentSource};
use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
use crate::events::Event;
use crate::workers::poller::{PollerHandle, SentimentPoller};
use std::error::Error;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Session data for both TUI and headless modes
pub struct SessionData {
    /// Event receiver for poller events
    pub event_receiver: mpsc::Receiver<Event>,
    /// The mounted poller
    pub poller: PollerHandle,
    /// When the poller was mounted
    pub mounted_at: Instant,
    /// Endpoint being polled
    pub endpoint: String,
    /// Time between scheduled fetches
    pub poll_interval: Duration,
}

/// Sets up a polling session against `url`
///
/// This function handles all the common setup required for both TUI and headless modes:
/// 1. Builds the HTTP client
/// 2. Creates the event channel
/// 3. Mounts the poller, which fetches immediately
///
/// # Returns
/// * `Ok(SessionData)` - Successfully set up session
/// * `Err` - The HTTP client could not be built
pub async fn setup_session(
    url: String,
    poll_interval: Duration,
) -> Result<SessionData, Box<dyn Error>> {
    let client = SentimentClient::new(url)?;
    setup_session_with_source(Arc::new(client), poll_interval)
}

/// Same as [`setup_session`] with any snapshot source.
pub fn setup_session_with_source(
    source: Arc<dyn SentimentSource>,
    poll_interval: Duration,
) -> Result<SessionData, Box<dyn Error>> {
    if poll_interval.is_zero() {
        return Err(Box::from("Poll interval must be at least one second"));
    }

    let endpoint = source.endpoint().to_string();
    let (event_sender, event_receiver) = mpsc::channel::<Event>(EVENT_QUEUE_SIZE);
    let mounted_at = Instant::now();
    let poller = SentimentPoller::mount(source, poll_interval, event_sender);

    Ok(SessionData {
        event_receiver,
        poller,
        mounted_at,
        endpoint,
        poll_interval,
    })
}
