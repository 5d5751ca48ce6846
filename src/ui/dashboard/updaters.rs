//! Dashboard state update logic
//!
//! Applies queued poller events to the view model

use super::state::{DashboardState, ViewState};

use crate::events::{Event as WorkerEvent, FetchUpdate};
use chrono::Local;

impl DashboardState {
    /// Advance the animation tick and apply every queued event.
    pub fn update(&mut self) {
        self.tick += 1;

        while let Some(event) = self.pending_events.pop_front() {
            self.add_to_activity_log(event.clone());
            self.process_event(event);
        }
    }

    /// Process a single event and update relevant state
    fn process_event(&mut self, event: WorkerEvent) {
        let Some(update) = event.update else {
            return;
        };

        match update {
            FetchUpdate::Scheduled(next_at) => self.set_next_refresh(next_at),
            FetchUpdate::Started => {
                self.set_refreshing(true);
                self.set_view(ViewState::on_fetch_started);
            }
            FetchUpdate::Succeeded(snapshot) => {
                self.set_refreshing(false);
                self.set_view(|view| view.on_fetch_succeeded(*snapshot, Local::now()));
            }
            FetchUpdate::Failed(_) => {
                self.set_refreshing(false);
                self.set_view(ViewState::on_fetch_failed);
            }
        }
    }
}
