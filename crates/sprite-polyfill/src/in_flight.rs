//! In-flight request tracking
//!
//! While a URL has an entry here, a fetch for it is underway and no second
//! fetch may start. Later callers queue a waiter and receive the document
//! the first fetch produces.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use smol::channel::{Receiver, Sender};

use crate::SpriteDocument;

type Waiter = Sender<Rc<SpriteDocument>>;

/// Pending waiters per URL being fetched
#[derive(Debug, Default)]
pub struct InFlightTracker {
    pending: RefCell<HashMap<String, Vec<Waiter>>>,
}

impl InFlightTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking `url`; false if a fetch is already underway
    pub fn begin(&self, url: &str) -> bool {
        let mut pending = self.pending.borrow_mut();
        if pending.contains_key(url) {
            return false;
        }
        pending.insert(url.to_string(), Vec::new());
        true
    }

    /// Queue a waiter on an in-flight `url`
    ///
    /// Returns `None` when nothing is in flight for the URL.
    pub fn wait(&self, url: &str) -> Option<Receiver<Rc<SpriteDocument>>> {
        let mut pending = self.pending.borrow_mut();
        let waiters = pending.get_mut(url)?;
        let (tx, rx) = smol::channel::bounded(1);
        waiters.push(tx);
        Some(rx)
    }

    /// Finish `url`, handing `document` to every waiter in registration order
    ///
    /// Returns how many waiters were notified.
    pub fn complete(&self, url: &str, document: &Rc<SpriteDocument>) -> usize {
        let waiters = self.pending.borrow_mut().remove(url).unwrap_or_default();
        let mut notified = 0;
        for waiter in waiters {
            // A waiter whose receiver is gone simply stopped listening
            if waiter.try_send(document.clone()).is_ok() {
                notified += 1;
            }
        }
        notified
    }

    /// Drop `url` without a document; waiters observe a closed channel
    ///
    /// Returns how many waiters were queued.
    pub fn abandon(&self, url: &str) -> usize {
        self.pending
            .borrow_mut()
            .remove(url)
            .map(|waiters| waiters.len())
            .unwrap_or(0)
    }

    pub fn is_pending(&self, url: &str) -> bool {
        self.pending.borrow().contains_key(url)
    }

    /// Number of waiters queued behind the fetch for `url`
    pub fn waiter_count(&self, url: &str) -> usize {
        self.pending.borrow().get(url).map_or(0, Vec::len)
    }

    /// Number of URLs currently being fetched
    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Rc<SpriteDocument> {
        Rc::new(SpriteDocument::parse("<svg></svg>", "about:blank"))
    }

    #[test]
    fn test_begin_is_exclusive() {
        let tracker = InFlightTracker::new();
        assert!(tracker.begin("icons.svg"));
        assert!(!tracker.begin("icons.svg"));
        assert!(tracker.is_pending("icons.svg"));
        assert_eq!(tracker.pending_count(), 1);
    }

    #[test]
    fn test_wait_requires_flight() {
        let tracker = InFlightTracker::new();
        assert!(tracker.wait("icons.svg").is_none());
    }

    #[test]
    fn test_complete_notifies_in_order() {
        let tracker = InFlightTracker::new();
        tracker.begin("icons.svg");
        let receivers: Vec<_> = (0..3).map(|_| tracker.wait("icons.svg").unwrap()).collect();
        assert_eq!(tracker.waiter_count("icons.svg"), 3);

        let document = doc();
        assert_eq!(tracker.complete("icons.svg", &document), 3);
        assert!(!tracker.is_pending("icons.svg"));

        for rx in receivers {
            let received = rx.try_recv().unwrap();
            assert!(Rc::ptr_eq(&received, &document));
        }
    }

    #[test]
    fn test_abandon_closes_waiters() {
        let tracker = InFlightTracker::new();
        tracker.begin("sprite.svg");
        let rx = tracker.wait("sprite.svg").unwrap();

        assert_eq!(tracker.abandon("sprite.svg"), 1);
        assert!(!tracker.is_pending("sprite.svg"));
        assert!(rx.is_closed());
        assert!(smol::block_on(rx.recv()).is_err());
    }

    #[test]
    fn test_complete_skips_dropped_waiters() {
        let tracker = InFlightTracker::new();
        tracker.begin("icons.svg");
        drop(tracker.wait("icons.svg"));
        let _kept = tracker.wait("icons.svg").unwrap();

        assert_eq!(tracker.complete("icons.svg", &doc()), 1);
    }
}
