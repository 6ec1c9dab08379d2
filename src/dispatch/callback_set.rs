// ============================================================================
// slotted - Callback Set
// Ordered callback handles for one (instance, signal) pair, stored inline
// for the single-subscriber case
// ============================================================================

use std::rc::Rc;

use smallvec::{smallvec, SmallVec};

use crate::core::{CallArgs, SlottedError};

// =============================================================================
// CALLBACK
// =============================================================================

/// The closure type behind a callback handle.
pub type CallbackFn = dyn Fn(&CallArgs) -> Result<(), SlottedError>;

/// An invocable handle registered against a signal.
///
/// Identity is the closure allocation: clones of one handle compare equal
/// (the bound-method analogue), two handles built from identical source
/// code do not. Disconnect matches on this identity.
#[derive(Clone)]
pub struct Callback {
    f: Rc<CallbackFn>,
}

impl Callback {
    /// Wrap a closure as a connectable handle.
    pub fn new(f: impl Fn(&CallArgs) -> Result<(), SlottedError> + 'static) -> Self {
        Self { f: Rc::new(f) }
    }

    /// Invoke the handle.
    pub fn call(&self, args: &CallArgs) -> Result<(), SlottedError> {
        (self.f)(args)
    }

    /// True when `other` shares this handle's identity.
    pub fn same_handle(&self, other: &Callback) -> bool {
        Rc::ptr_eq(&self.f, &other.f)
    }
}

impl std::fmt::Debug for Callback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callback")
            .field("ptr", &Rc::as_ptr(&self.f))
            .finish()
    }
}

/// Wrap a closure as a connectable handle.
///
/// Free-function form of [`Callback::new`].
pub fn callback(f: impl Fn(&CallArgs) -> Result<(), SlottedError> + 'static) -> Callback {
    Callback::new(f)
}

// =============================================================================
// CALLBACK SET
// =============================================================================

/// The ordered callbacks bound to one signal on one instance.
///
/// The overwhelming common case is a single subscriber, so the first
/// handle lives inline in the set with no heap allocation; the storage
/// spills to the heap on the second `add` and grows from there.
///
/// Dispatch runs against a snapshot taken at entry: a callback that
/// connects or disconnects handles mid-pass never changes which handles
/// the current pass invokes.
#[derive(Clone)]
pub struct CallbackSet {
    handles: SmallVec<[Callback; 1]>,
}

impl CallbackSet {
    /// A set holding exactly one handle, stored inline.
    pub fn single(handle: Callback) -> Self {
        Self {
            handles: smallvec![handle],
        }
    }

    /// Append a handle.
    ///
    /// No de-duplication: adding the same handle twice yields two entries,
    /// both invoked on dispatch, in insertion order.
    pub fn add(&mut self, handle: Callback) {
        self.handles.push(handle);
    }

    /// Remove every entry sharing `handle`'s identity.
    ///
    /// The caller maintaining the connection table drops the owning entry
    /// when this leaves the set empty.
    pub fn remove(&mut self, handle: &Callback) {
        self.handles.retain(|h| !h.same_handle(handle));
    }

    /// Number of entries (counting duplicates).
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// True when no handles remain.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Invoke every handle in insertion order with the same argument pack.
    ///
    /// Callers dispatch against a clone detached from the connection
    /// table, so this iteration is the snapshot. The first handle error
    /// propagates and aborts the remaining handles of this pass only;
    /// handles that already ran are not rolled back.
    pub fn dispatch(&self, args: &CallArgs) -> Result<(), SlottedError> {
        for handle in &self.handles {
            handle.call(args)?;
        }
        Ok(())
    }

    /// Heap bytes used by spilled storage, for the introspection surface.
    ///
    /// Zero while the single inline handle suffices.
    pub fn heap_bytes(&self) -> usize {
        if self.handles.spilled() {
            self.handles.capacity() * std::mem::size_of::<Callback>()
        } else {
            0
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording(log: &Rc<RefCell<Vec<&'static str>>>, tag: &'static str) -> Callback {
        let log = log.clone();
        callback(move |_| {
            log.borrow_mut().push(tag);
            Ok(())
        })
    }

    #[test]
    fn single_handle_stays_inline() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let set = CallbackSet::single(recording(&log, "only"));

        assert_eq!(set.len(), 1);
        assert_eq!(set.heap_bytes(), 0);

        set.dispatch(&CallArgs::new()).unwrap();
        assert_eq!(*log.borrow(), vec!["only"]);
    }

    #[test]
    fn second_add_spills_and_preserves_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut set = CallbackSet::single(recording(&log, "first"));
        set.add(recording(&log, "second"));

        assert!(set.heap_bytes() > 0);

        set.dispatch(&CallArgs::new()).unwrap();
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn duplicate_handle_invoked_twice() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let handle = recording(&log, "dup");
        let mut set = CallbackSet::single(handle.clone());
        set.add(handle);

        set.dispatch(&CallArgs::new()).unwrap();
        assert_eq!(*log.borrow(), vec!["dup", "dup"]);
    }

    #[test]
    fn remove_drops_all_matching_entries() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let dup = recording(&log, "dup");
        let keep = recording(&log, "keep");

        let mut set = CallbackSet::single(dup.clone());
        set.add(keep);
        set.add(dup.clone());

        set.remove(&dup);
        assert_eq!(set.len(), 1);

        set.dispatch(&CallArgs::new()).unwrap();
        assert_eq!(*log.borrow(), vec!["keep"]);
    }

    #[test]
    fn remove_unknown_handle_is_noop() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut set = CallbackSet::single(recording(&log, "kept"));
        let stranger = recording(&log, "stranger");

        set.remove(&stranger);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn error_aborts_remaining_handles() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut set = CallbackSet::single(recording(&log, "ran"));
        set.add(callback(|_| {
            Err(SlottedError::Callback("boom".into()))
        }));
        set.add(recording(&log, "never"));

        let err = set.dispatch(&CallArgs::new()).unwrap_err();
        assert!(matches!(err, SlottedError::Callback(_)));
        // The first handle ran and stays ran; the third never did.
        assert_eq!(*log.borrow(), vec!["ran"]);
    }

    #[test]
    fn clone_shares_handle_identity() {
        let a = callback(|_| Ok(()));
        let b = a.clone();
        let c = callback(|_| Ok(()));
        assert!(a.same_handle(&b));
        assert!(!a.same_handle(&c));
    }
}
