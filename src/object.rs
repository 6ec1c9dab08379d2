// ============================================================================
// slotted - Object
// The instance: slot-backed attribute access plus connect/disconnect/emit
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

use crate::core::{CallArgs, SlottedError, Value};
use crate::dispatch::{Callback, ConnectionTable, Signal};
use crate::store::{lookup_class, Class, Member, SlotStore};

// =============================================================================
// OBJECT
// =============================================================================

/// An instance of a [`Class`]: a fixed slot array for attribute values and
/// a lazily allocated connection table for signal dispatch.
///
/// All operations take `&self`; interior mutability makes the
/// single-threaded cooperative model explicit. A callback running inside
/// [`emit`](Object::emit) may freely read and write the same instance's
/// attributes and connections, because dispatch runs against a snapshot
/// with no internal borrows held.
///
/// There is no tracing collector behind this type: a callback that closes
/// over an `Rc` of an object which transitively holds the callback forms a
/// leakable cycle. Break such cycles by hand with
/// [`disconnect_all`](Object::disconnect_all) (or by capturing `Weak`).
///
/// # Example
///
/// ```
/// use slotted::{callback, signal, value, value_as, CallArgs, Class, Object, PlainMember};
/// use std::rc::Rc;
///
/// let class = Class::new("Point", vec![
///     ("x".into(), Rc::new(PlainMember::typed(0, 0i32)) as _),
///     ("y".into(), Rc::new(PlainMember::typed(1, 0i32)) as _),
/// ]).unwrap();
///
/// let p = Object::new(Rc::new(class));
/// assert_eq!(value_as::<i32>(&p.get_attr("x").unwrap()), Some(&0));
///
/// p.set_attr("x", value(5i32)).unwrap();
/// assert_eq!(value_as::<i32>(&p.get_attr("x").unwrap()), Some(&5));
///
/// let moved = signal("moved");
/// p.connect(&moved, callback(|_| Ok(())));
/// p.emit(&moved, &CallArgs::new()).unwrap();
/// ```
pub struct Object {
    class: Rc<Class>,
    slots: SlotStore,
    connections: RefCell<Option<ConnectionTable>>,
}

impl Object {
    // =========================================================================
    // CONSTRUCTION
    // =========================================================================

    /// Build an instance of `class` with every slot empty.
    pub fn new(class: Rc<Class>) -> Self {
        let slots = SlotStore::new(class.member_count());
        Self {
            class,
            slots,
            connections: RefCell::new(None),
        }
    }

    /// Build an instance of the class registered under `name`.
    ///
    /// Fails with [`SlottedError::UnregisteredClass`] when no class of
    /// that name was ever registered on this thread.
    pub fn instantiate(name: &str) -> Result<Self, SlottedError> {
        Ok(Self::new(lookup_class(name)?))
    }

    /// Build an instance and apply initial `(name, value)` pairs through
    /// the normal validated set path.
    ///
    /// The first failing pair aborts construction; values set before it
    /// are discarded with the instance.
    pub fn with_values(
        class: Rc<Class>,
        values: impl IntoIterator<Item = (String, Value)>,
    ) -> Result<Self, SlottedError> {
        let object = Self::new(class);
        for (name, val) in values {
            object.set_attr(&name, val)?;
        }
        Ok(object)
    }

    // =========================================================================
    // ATTRIBUTE PROTOCOL
    // =========================================================================

    /// Read an attribute, computing and memoizing its default on first
    /// access.
    ///
    /// [`SlottedError::UnknownAttribute`] marks a name outside this
    /// class's member set; a host embedding would fall through to its
    /// generic attribute mechanism there.
    pub fn get_attr(&self, name: &str) -> Result<Value, SlottedError> {
        let member = self.resolve(name)?;
        self.slots.get(self, member.as_ref(), name)
    }

    /// Validate and store an attribute value. Atomic: a rejected
    /// candidate leaves the prior value in place.
    pub fn set_attr(&self, name: &str, candidate: Value) -> Result<(), SlottedError> {
        let member = self.resolve(name)?;
        self.slots.set(self, member.as_ref(), name, candidate)
    }

    /// Unset an attribute; the next read recomputes its default.
    pub fn clear_attr(&self, name: &str) -> Result<(), SlottedError> {
        let member = self.resolve(name)?;
        self.slots.clear(member.index());
        Ok(())
    }

    /// Empty every slot without touching connections.
    pub fn clear_all(&self) {
        self.slots.clear_all();
    }

    fn resolve(&self, name: &str) -> Result<Rc<dyn Member>, SlottedError> {
        self.class
            .member(name)
            .cloned()
            .ok_or_else(|| SlottedError::UnknownAttribute(name.to_string()))
    }

    // =========================================================================
    // DISPATCH ENGINE
    // =========================================================================

    /// Bind `handle` to `signal` on this instance.
    ///
    /// The connection table is allocated on the first connect and the
    /// handle appended in registration order; connecting the same handle
    /// twice registers it twice.
    pub fn connect(&self, signal: &Signal, handle: Callback) {
        trace!(signal = signal.name(), "connect");
        self.connections
            .borrow_mut()
            .get_or_insert_with(ConnectionTable::new)
            .connect(signal, handle);
    }

    /// Tear down every connection, returning the instance to the
    /// never-connected state.
    ///
    /// The table is detached first and dropped only after the instance is
    /// back in a consistent state, so drop-order re-entrancy cannot
    /// observe a half-cleared table.
    pub fn disconnect_all(&self) {
        trace!("disconnect all");
        let detached = self.connections.borrow_mut().take();
        drop(detached);
    }

    /// Remove every handle bound to `signal`. Scoped disconnects keep the
    /// table allocated even when it empties; only
    /// [`disconnect_all`](Object::disconnect_all) releases it.
    pub fn disconnect_signal(&self, signal: &Signal) {
        trace!(signal = signal.name(), "disconnect signal");
        if let Some(table) = self.connections.borrow_mut().as_mut() {
            table.disconnect_signal(signal);
        }
    }

    /// Remove every binding of `handle` under `signal`. Forgiving: an
    /// unconnected signal or never-registered handle is a silent no-op.
    pub fn disconnect_callback(&self, signal: &Signal, handle: &Callback) {
        trace!(signal = signal.name(), "disconnect callback");
        if let Some(table) = self.connections.borrow_mut().as_mut() {
            table.disconnect_callback(signal, handle);
        }
    }

    /// Synchronously invoke every handle bound to `signal`, in
    /// registration order, with the same argument pack.
    ///
    /// Emitting with no table or no subscribers is a silent no-op. The
    /// handle list is snapshotted before the first invocation, so a
    /// callback may reconnect, disconnect, or re-emit on this same
    /// instance without affecting the pass in flight. A handle error
    /// aborts the remaining handles of this pass; completed handles are
    /// not rolled back.
    pub fn emit(&self, signal: &Signal, args: &CallArgs) -> Result<(), SlottedError> {
        let snapshot = {
            let connections = self.connections.borrow();
            match connections.as_ref() {
                Some(table) => table.snapshot(signal),
                None => None,
            }
        };
        // Borrow released: handles run re-entrantly on this stack.
        if let Some(set) = snapshot {
            trace!(signal = signal.name(), handles = set.len(), "emit");
            set.dispatch(args)?;
        }
        Ok(())
    }

    // =========================================================================
    // INTROSPECTION
    // =========================================================================

    /// The class this instance was built from.
    pub fn class(&self) -> &Rc<Class> {
        &self.class
    }

    /// The member registered under `name`, if any.
    pub fn get_member(&self, name: &str) -> Option<Rc<dyn Member>> {
        self.class.member(name).cloned()
    }

    /// Iterate the class's `(name, member)` pairs in declaration order.
    pub fn members(&self) -> impl Iterator<Item = (&str, &Rc<dyn Member>)> {
        self.class.members()
    }

    /// Approximate memory footprint in bytes: the instance struct, the
    /// slot array, and the connection table including spilled callback
    /// storage.
    pub fn allocated_bytes(&self) -> usize {
        let table = match self.connections.borrow().as_ref() {
            Some(table) => std::mem::size_of::<ConnectionTable>() + table.heap_bytes(),
            None => 0,
        };
        std::mem::size_of::<Self>() + self.slots.heap_bytes() + table
    }

    /// True once a connection table has been allocated, until a full
    /// disconnect releases it. Diagnostic only.
    pub fn has_connections(&self) -> bool {
        self.connections.borrow().is_some()
    }
}

impl std::fmt::Debug for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Object")
            .field("class", &self.class.name())
            .field("slots", &self.slots.len())
            .field("connected", &self.has_connections())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
