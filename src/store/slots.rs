// ============================================================================
// slotted - Attribute Slot Store
// Fixed-size per-instance value array with memoized lazy defaults and
// validated writes
// ============================================================================

use std::cell::RefCell;

use crate::core::{SlottedError, Value};
use crate::object::Object;
use crate::store::member::Member;

// =============================================================================
// SLOT STORE
// =============================================================================

/// The per-instance attribute value array.
///
/// One slot per class member, fixed at construction; slot `i` is either
/// empty or holds a value produced by member `i` (its default, or a
/// validated candidate). Attribute resolution happens outside this store:
/// callers hand in the member they already looked up on the class.
///
/// Interior mutability keeps all operations `&self`, so a member's default
/// or validator may read back into the same instance while running. Borrows
/// are released before any member code is invoked.
pub struct SlotStore {
    values: RefCell<Vec<Option<Value>>>,
}

impl SlotStore {
    /// A store with `len` empty slots.
    pub fn new(len: usize) -> Self {
        Self {
            values: RefCell::new(vec![None; len]),
        }
    }

    /// Number of slots (the owning class's member count).
    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    /// True for a zero-member class.
    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }

    /// Read the attribute, computing and memoizing the member's default on
    /// first access.
    ///
    /// A non-empty slot is returned unchanged: no re-validation, no
    /// recomputation. An empty slot invokes `member.default_value` exactly
    /// once; on success the result is stored and returned, on failure the
    /// slot stays empty so the next read retries.
    pub fn get(
        &self,
        owner: &Object,
        member: &dyn Member,
        name: &str,
    ) -> Result<Value, SlottedError> {
        let index = member.index();
        {
            let values = self.values.borrow();
            if let Some(existing) = &values[index] {
                return Ok(existing.clone());
            }
        }
        // Borrow released: the default may re-enter this store.
        let computed = member.default_value(owner, name)?;
        self.values.borrow_mut()[index] = Some(computed.clone());
        Ok(computed)
    }

    /// Validate and store a candidate value.
    ///
    /// Atomic: on validation failure the slot keeps its prior value
    /// (including "still empty"); on success the validated result replaces
    /// it and the prior value is released.
    pub fn set(
        &self,
        owner: &Object,
        member: &dyn Member,
        name: &str,
        candidate: Value,
    ) -> Result<(), SlottedError> {
        let validated = member.validate(owner, name, candidate)?;
        self.values.borrow_mut()[member.index()] = Some(validated);
        Ok(())
    }

    /// Empty the slot; the next read recomputes the default.
    ///
    /// This is "unset", not "set to null".
    pub fn clear(&self, index: usize) {
        self.values.borrow_mut()[index] = None;
    }

    /// Empty every slot. The teardown path.
    pub fn clear_all(&self) {
        for slot in self.values.borrow_mut().iter_mut() {
            *slot = None;
        }
    }

    /// The slot's current value without computing anything.
    pub fn peek(&self, index: usize) -> Option<Value> {
        self.values.borrow()[index].clone()
    }

    /// Heap footprint of the slot array, for the introspection surface.
    pub fn heap_bytes(&self) -> usize {
        self.values.borrow().capacity() * std::mem::size_of::<Option<Value>>()
    }
}

// =============================================================================
// TESTS
// =============================================================================
