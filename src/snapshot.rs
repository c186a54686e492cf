//! Single-writer store for server-owned collections.
//!
//! Readers get an immutable `Arc<[T]>` and never observe a half-applied
//! refresh: a fetched collection is installed in one swap. Each refresh takes
//! a ticket when it starts, and a result is only installed if no later-started
//! refresh has already installed its own, so an older response that resolves
//! late cannot roll the snapshot back.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

struct Installed<T> {
    ticket: u64,
    items: Arc<[T]>,
}

pub struct Snapshot<T> {
    current: RwLock<Installed<T>>,
    next_ticket: AtomicU64,
    in_flight: AtomicUsize,
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self {
            current: RwLock::new(Installed {
                ticket: 0,
                items: Arc::from(Vec::new()),
            }),
            next_ticket: AtomicU64::new(1),
            in_flight: AtomicUsize::new(0),
        }
    }
}

impl<T> Snapshot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last successfully installed collection.
    pub fn read(&self) -> Arc<[T]> {
        Arc::clone(&self.current.read().items)
    }

    /// True while at least one refresh is in flight.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire) > 0
    }

    /// Start a refresh. Dropping the ticket without installing leaves the
    /// current collection untouched.
    pub fn begin(&self) -> RefreshTicket<'_, T> {
        self.in_flight.fetch_add(1, Ordering::AcqRel);
        RefreshTicket {
            snapshot: self,
            ticket: self.next_ticket.fetch_add(1, Ordering::AcqRel),
        }
    }
}

pub struct RefreshTicket<'a, T> {
    snapshot: &'a Snapshot<T>,
    ticket: u64,
}

impl<T> RefreshTicket<'_, T> {
    /// Swap in `items`. Returns `false` if a newer refresh already landed.
    pub fn install(self, items: Vec<T>) -> bool {
        let mut current = self.snapshot.current.write();
        if current.ticket > self.ticket {
            return false;
        }
        *current = Installed {
            ticket: self.ticket,
            items: Arc::from(items),
        };
        true
    }
}

impl<T> Drop for RefreshTicket<'_, T> {
    fn drop(&mut self) {
        self.snapshot.in_flight.fetch_sub(1, Ordering::AcqRel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_replaces_whole_collection() {
        let snapshot = Snapshot::new();
        assert!(snapshot.begin().install(vec![1, 2, 3]));
        assert_eq!(&*snapshot.read(), &[1, 2, 3]);
        assert!(snapshot.begin().install(vec![4]));
        assert_eq!(&*snapshot.read(), &[4]);
    }

    #[test]
    fn test_abandoned_refresh_keeps_previous_collection() {
        let snapshot = Snapshot::new();
        snapshot.begin().install(vec!["a"]);
        {
            let _ticket = snapshot.begin();
            assert!(snapshot.is_loading());
        }
        assert!(!snapshot.is_loading());
        assert_eq!(&*snapshot.read(), &["a"]);
    }

    #[test]
    fn test_late_older_response_is_discarded() {
        let snapshot = Snapshot::new();
        let older = snapshot.begin();
        let newer = snapshot.begin();
        assert!(newer.install(vec!["fresh"]));
        assert!(!older.install(vec!["stale"]));
        assert_eq!(&*snapshot.read(), &["fresh"]);
    }

    #[test]
    fn test_readers_keep_their_copy_across_refresh() {
        let snapshot = Snapshot::new();
        snapshot.begin().install(vec![1]);
        let held = snapshot.read();
        snapshot.begin().install(vec![2]);
        assert_eq!(&*held, &[1]);
        assert_eq!(&*snapshot.read(), &[2]);
    }
}
