// ============================================================================
// slotted - Connection Table
// Sorted (signal, callback-set) pairs with binary-search lookup
// ============================================================================

use crate::dispatch::callback_set::{Callback, CallbackSet};
use crate::dispatch::signal::Signal;

// =============================================================================
// CONNECTION TABLE
// =============================================================================

/// The per-instance mapping from signal identity to callback set.
///
/// Stored as a vector sorted ascending by signal identity key, one entry
/// per distinct signal, searched with binary search. An instance rarely
/// has more than a handful of signals connected, so a dense sorted vector
/// wins on memory and iteration locality over a hash map; O(log n) lookup
/// is incidental.
///
/// The table owns its callback sets and holds a counted clone of each key
/// signal. Entries whose set becomes empty are removed immediately.
pub struct ConnectionTable {
    entries: Vec<(Signal, CallbackSet)>,
}

impl ConnectionTable {
    /// An empty table. Instances allocate one lazily on first connect.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn position(&self, signal: &Signal) -> Result<usize, usize> {
        self.entries
            .binary_search_by(|(entry, _)| entry.key().cmp(&signal.key()))
    }

    /// Bind `handle` to `signal`, inserting a fresh single-handle entry at
    /// the sorted position or appending to the existing set.
    pub fn connect(&mut self, signal: &Signal, handle: Callback) {
        match self.position(signal) {
            Ok(found) => self.entries[found].1.add(handle),
            Err(insert_at) => self
                .entries
                .insert(insert_at, (signal.clone(), CallbackSet::single(handle))),
        }
    }

    /// Remove the whole entry for `signal`, releasing its callback set and
    /// the table's signal reference. No-op for an unconnected signal.
    pub fn disconnect_signal(&mut self, signal: &Signal) {
        if let Ok(found) = self.position(signal) {
            self.entries.remove(found);
        }
    }

    /// Remove every binding of `handle` under `signal`; drop the entry if
    /// its set empties. Forgiving: unknown signal or handle is a no-op.
    pub fn disconnect_callback(&mut self, signal: &Signal, handle: &Callback) {
        if let Ok(found) = self.position(signal) {
            let set = &mut self.entries[found].1;
            set.remove(handle);
            if set.is_empty() {
                self.entries.remove(found);
            }
        }
    }

    /// A detached clone of `signal`'s callback set, or `None` when the
    /// signal has no subscribers.
    ///
    /// Dispatch runs against this snapshot after all table borrows are
    /// released, so mid-pass connects and disconnects never affect the
    /// pass in flight.
    pub fn snapshot(&self, signal: &Signal) -> Option<CallbackSet> {
        self.position(signal)
            .ok()
            .map(|found| self.entries[found].1.clone())
    }

    /// Number of distinct signals with at least one subscriber.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no signal has subscribers.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Heap bytes held by the table: entry storage plus every set's
    /// spilled callback storage.
    pub fn heap_bytes(&self) -> usize {
        let entry_size = std::mem::size_of::<(Signal, CallbackSet)>();
        let spilled: usize = self
            .entries
            .iter()
            .map(|(_, set)| set.heap_bytes())
            .sum();
        self.entries.capacity() * entry_size + spilled
    }

    #[cfg(test)]
    fn keys(&self) -> Vec<usize> {
        self.entries.iter().map(|(s, _)| s.key()).collect()
    }
}

impl Default for ConnectionTable {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::callback_set::callback;
    use crate::dispatch::signal::signal;

    fn noop() -> Callback {
        callback(|_| Ok(()))
    }

    #[test]
    fn connect_inserts_sorted_unique_entries() {
        let signals: Vec<Signal> = (0..8).map(|i| signal(format!("s{i}"))).collect();
        let mut table = ConnectionTable::new();

        // Connect in an arbitrary order, some signals repeatedly.
        for sig in [5usize, 1, 7, 1, 3, 5, 0, 6, 2, 4, 3] {
            table.connect(&signals[sig], noop());
        }

        assert_eq!(table.len(), 8);
        let keys = table.keys();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn repeat_connect_grows_existing_entry() {
        let sig = signal("grow");
        let mut table = ConnectionTable::new();

        table.connect(&sig, noop());
        table.connect(&sig, noop());

        assert_eq!(table.len(), 1);
        assert_eq!(table.snapshot(&sig).unwrap().len(), 2);
    }

    #[test]
    fn disconnect_signal_removes_entry() {
        let a = signal("a");
        let b = signal("b");
        let mut table = ConnectionTable::new();
        table.connect(&a, noop());
        table.connect(&b, noop());

        table.disconnect_signal(&a);

        assert_eq!(table.len(), 1);
        assert!(table.snapshot(&a).is_none());
        assert!(table.snapshot(&b).is_some());
    }

    #[test]
    fn empty_set_entry_dropped_immediately() {
        let sig = signal("transient");
        let handle = noop();
        let mut table = ConnectionTable::new();
        table.connect(&sig, handle.clone());

        table.disconnect_callback(&sig, &handle);

        assert!(table.is_empty());
        assert!(table.snapshot(&sig).is_none());
    }

    #[test]
    fn disconnect_is_forgiving() {
        let known = signal("known");
        let unknown = signal("unknown");
        let handle = noop();
        let stranger = noop();

        let mut table = ConnectionTable::new();
        table.connect(&known, handle.clone());

        // Neither of these is an error, and neither disturbs the entry.
        table.disconnect_signal(&unknown);
        table.disconnect_callback(&unknown, &handle);
        table.disconnect_callback(&known, &stranger);

        assert_eq!(table.len(), 1);
        assert_eq!(table.snapshot(&known).unwrap().len(), 1);
    }

    #[test]
    fn snapshot_is_detached_from_later_mutation() {
        let sig = signal("snap");
        let handle = noop();
        let mut table = ConnectionTable::new();
        table.connect(&sig, handle.clone());

        let snap = table.snapshot(&sig).unwrap();
        table.disconnect_signal(&sig);

        assert_eq!(snap.len(), 1);
        assert!(table.snapshot(&sig).is_none());
    }

    #[test]
    fn heap_bytes_counts_spill() {
        let sig = signal("fat");
        let mut table = ConnectionTable::new();
        table.connect(&sig, noop());
        let lean = table.heap_bytes();

        table.connect(&sig, noop());
        assert!(table.heap_bytes() > lean);
    }
}
