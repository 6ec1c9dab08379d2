// ============================================================================
// slotted - Member Descriptor Contract
// The two-operation boundary between the slot store and user-defined
// attribute behavior
// ============================================================================

use crate::core::{SlottedError, Value};
use crate::object::Object;

// =============================================================================
// MEMBER TRAIT
// =============================================================================

/// A per-class attribute descriptor.
///
/// A member assigns an attribute name to a fixed slot index and supplies
/// the default-value and validation behavior for that slot. Members are
/// immutable, owned by their [`Class`](crate::store::Class), and shared by
/// every instance of that class; the store never looks past this contract.
///
/// Both fallible operations receive the owning object, so a default or a
/// validator may read the instance's other attributes. They must not hold
/// on to the owner beyond the call.
pub trait Member {
    /// The slot index this member occupies, unique within its class and
    /// in `0..member_count`.
    fn index(&self) -> usize;

    /// Produce the default value for an empty slot on first read.
    ///
    /// Called at most once per instance per attribute unless the slot is
    /// cleared or the computation fails (failures are not cached).
    fn default_value(&self, owner: &Object, name: &str) -> Result<Value, SlottedError>;

    /// Validate a candidate value on set, returning the value to store.
    ///
    /// The returned value need not be the candidate itself; a validator
    /// may coerce. On error nothing is stored.
    fn validate(&self, owner: &Object, name: &str, candidate: Value)
    -> Result<Value, SlottedError>;
}

// =============================================================================
// PLAIN MEMBER
// =============================================================================

/// The simplest useful member: a cloneable constant default and no
/// validation beyond a type check supplied as a closure pair.
///
/// Library users with richer semantics implement [`Member`] directly;
/// `PlainMember` covers the common "typed field with a default" case and
/// keeps the examples and tests honest.
pub struct PlainMember {
    index: usize,
    default: Box<dyn Fn(&Object, &str) -> Result<Value, SlottedError>>,
    validator: Box<dyn Fn(&Object, &str, Value) -> Result<Value, SlottedError>>,
}

impl PlainMember {
    /// Build a member from a default closure and a validator closure.
    pub fn new(
        index: usize,
        default: impl Fn(&Object, &str) -> Result<Value, SlottedError> + 'static,
        validator: impl Fn(&Object, &str, Value) -> Result<Value, SlottedError> + 'static,
    ) -> Self {
        Self {
            index,
            default: Box::new(default),
            validator: Box::new(validator),
        }
    }

    /// A member with a cloneable constant default that accepts any
    /// candidate unchanged.
    pub fn with_default<T: Clone + 'static>(index: usize, default: T) -> Self {
        Self::new(
            index,
            move |_, _| Ok(crate::core::value(default.clone())),
            |_, _, candidate| Ok(candidate),
        )
    }

    /// A member with a constant default that only accepts candidates of
    /// type `T`, rejected with a `Validation` error otherwise.
    pub fn typed<T: Clone + 'static>(index: usize, default: T) -> Self {
        Self::new(
            index,
            move |_, _| Ok(crate::core::value(default.clone())),
            |_, name, candidate| {
                if candidate.downcast_ref::<T>().is_some() {
                    Ok(candidate)
                } else {
                    Err(SlottedError::validation(
                        name,
                        format!("expected a {}", std::any::type_name::<T>()),
                    ))
                }
            },
        )
    }
}

impl Member for PlainMember {
    fn index(&self) -> usize {
        self.index
    }

    fn default_value(&self, owner: &Object, name: &str) -> Result<Value, SlottedError> {
        (self.default)(owner, name)
    }

    fn validate(
        &self,
        owner: &Object,
        name: &str,
        candidate: Value,
    ) -> Result<Value, SlottedError> {
        (self.validator)(owner, name, candidate)
    }
}

// =============================================================================
// TESTS
// =============================================================================
