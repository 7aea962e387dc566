//! Recent navigator events, collected from the process-wide event store.

use chapnav::{Observable, NavigatorEvent, Subscription};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

const MAX_ENTRIES: usize = 50;

/// Rolling log of navigator events for the details panel.
///
/// The subscription lives as long as the log; dropping the log unsubscribes.
pub struct EventLog {
    entries: Arc<Mutex<VecDeque<NavigatorEvent>>>,
    _subscription: Subscription<NavigatorEvent>,
}

impl EventLog {
    pub fn subscribe_to(events: &Observable<NavigatorEvent>) -> Self {
        let entries = Arc::new(Mutex::new(VecDeque::with_capacity(MAX_ENTRIES)));
        let sink = Arc::clone(&entries);
        let subscription = events.subscribe(move |event: &NavigatorEvent| {
            if let Ok(mut entries) = sink.lock() {
                if entries.len() == MAX_ENTRIES {
                    entries.pop_front();
                }
                entries.push_back(event.clone());
            }
        });

        Self {
            entries,
            _subscription: subscription,
        }
    }

    /// Most recent events first.
    pub fn recent(&self, limit: usize) -> Vec<NavigatorEvent> {
        match self.entries.lock() {
            Ok(entries) => entries.iter().rev().take(limit).cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chapnav::ChapterNumber;

    #[test]
    fn test_log_keeps_latest_entries() {
        let events = Observable::new();
        let log = EventLog::subscribe_to(&events);
        let number = ChapterNumber::whole(1).unwrap();
        for index in 0..(MAX_ENTRIES + 5) {
            events.publish(&NavigatorEvent::Settled { index, number });
        }

        let recent = log.recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0], NavigatorEvent::Settled { index: MAX_ENTRIES + 4, number });

        drop(log);
        assert_eq!(events.subscriber_count(), 0);
    }
}
