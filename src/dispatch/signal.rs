// ============================================================================
// slotted - Signal
// Identity tokens used as dispatch keys by the connection table
// ============================================================================

use std::rc::Rc;

// =============================================================================
// SIGNAL
// =============================================================================

/// An identity token for the observer mechanism.
///
/// Two signals are equal iff they share the same allocation; the carried
/// name is purely diagnostic and never compared. Clones share identity, so
/// a signal can be handed to subscribers, stored in a connection table, and
/// emitted from anywhere while remaining one dispatch key.
///
/// # Example
///
/// ```
/// use slotted::signal;
///
/// let changed = signal("changed");
/// let alias = changed.clone();
/// let other = signal("changed");
///
/// assert!(changed.same_signal(&alias));
/// assert!(!changed.same_signal(&other)); // same name, different identity
/// ```
#[derive(Clone)]
pub struct Signal {
    inner: Rc<SignalInner>,
}

struct SignalInner {
    name: String,
}

impl Signal {
    /// Create a fresh signal identity with a diagnostic name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(SignalInner { name: name.into() }),
        }
    }

    /// The diagnostic name the signal was created with.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// True when `other` is the same identity (clone of this signal).
    pub fn same_signal(&self, other: &Signal) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// The ordering key used by the sorted connection table.
    ///
    /// Stable while any clone of this signal is alive, which the table
    /// guarantees by holding one.
    pub(crate) fn key(&self) -> usize {
        Rc::as_ptr(&self.inner) as usize
    }
}

impl std::fmt::Debug for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("name", &self.inner.name)
            .field("key", &self.key())
            .finish()
    }
}

/// Create a signal identity token.
///
/// Free-function form of [`Signal::new`].
pub fn signal(name: impl Into<String>) -> Signal {
    Signal::new(name)
}

// =============================================================================
// TESTS
// =============================================================================
