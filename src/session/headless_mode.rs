//! Headless mode execution

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_shutdown, print_session_starting},
};
use crate::events::FetchUpdate;
use crate::snapshot::display::SnapshotView;
use crate::ui::dashboard::ViewState;
use chrono::Local;
use std::error::Error;

/// Runs the dashboard without a terminal UI
///
/// Prints every poller event, plus a one-line summary whenever a snapshot
/// with a new timestamp arrives, until Ctrl+C. The poller is unmounted on exit.
pub async fn run_headless_mode(mut session: SessionData) -> Result<(), Box<dyn Error>> {
    print_session_starting("headless", &session.endpoint);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut view = ViewState::Loading;

    // Event loop: log events to console until shutdown
    loop {
        tokio::select! {
            event = session.event_receiver.recv() => {
                let Some(event) = event else { break };
                if event.should_display() {
                    println!("{}", event);
                }
                view = match event.update {
                    Some(FetchUpdate::Started) => view.on_fetch_started(),
                    Some(FetchUpdate::Succeeded(snapshot)) => {
                        if is_new_snapshot(&view, &snapshot) {
                            println!("  {}", SnapshotView::of(&snapshot).summary());
                        }
                        view.on_fetch_succeeded(*snapshot, Local::now())
                    }
                    Some(FetchUpdate::Failed(detail)) => {
                        log::warn!("Sentiment fetch failed: {}", detail);
                        view.on_fetch_failed()
                    }
                    Some(FetchUpdate::Scheduled(_)) | None => view,
                };
            }
            _ = &mut ctrl_c => {
                break;
            }
        }
    }

    print_session_shutdown();
    session.poller.unmount().await;
    print_session_exit_success();

    Ok(())
}

/// A snapshot is new unless the one on display carries the same timestamp.
fn is_new_snapshot(view: &ViewState, incoming: &crate::snapshot::SentimentSnapshot) -> bool {
    !matches!(view.snapshot(), Some(current) if current.timestamp == incoming.timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::SentimentSnapshot;
    use crate::snapshot::fixtures::{mean_reversion_short, momentum_long};

    #[test]
    fn test_only_new_timestamps_are_summarised() {
        assert!(is_new_snapshot(&ViewState::Loading, &momentum_long()));

        let view = ViewState::Loading.on_fetch_succeeded(momentum_long(), Local::now());
        assert!(!is_new_snapshot(&view, &momentum_long()));
        let next = SentimentSnapshot {
            timestamp: momentum_long().timestamp + 60_000,
            ..mean_reversion_short()
        };
        assert!(is_new_snapshot(&view, &next));

        // After a failure the next success is worth printing again.
        assert!(is_new_snapshot(&view.on_fetch_failed(), &momentum_long()));
    }
}
