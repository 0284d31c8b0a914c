//! Draining backend events.

use super::CordialApp;
use crate::events;

impl CordialApp {
    /// Apply every pending backend event. Only the last typing snapshot
    /// is handed to the aggregator; it supersedes earlier ones anyway.
    pub fn process_events(&mut self) {
        let mut snapshot = None;
        while let Ok(event) = self.event_rx.try_recv() {
            if let Some(s) = events::process_single_event(&mut self.state, event) {
                snapshot = Some(s);
            }
        }
        if let Some(snapshot) = snapshot {
            self.typing.submit(snapshot);
        }
    }
}
