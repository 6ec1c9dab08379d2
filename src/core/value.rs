// ============================================================================
// slotted - Values and Call Arguments
// Type-erased attribute values and the argument pack passed to callbacks
// ============================================================================

use std::any::Any;
use std::rc::Rc;

// =============================================================================
// VALUE
// =============================================================================

/// A type-erased attribute value, shared by reference counting.
///
/// Slots, default values, validated candidates, and emit arguments are all
/// `Value`s. Cloning a `Value` bumps the reference count; the underlying
/// data is never copied.
pub type Value = Rc<dyn Any>;

/// Wrap a concrete value for storage in a slot or an argument pack.
///
/// # Example
///
/// ```
/// use slotted::{value, value_as};
///
/// let v = value(42i64);
/// assert_eq!(value_as::<i64>(&v), Some(&42));
/// ```
pub fn value<T: 'static>(v: T) -> Value {
    Rc::new(v)
}

/// Borrow the concrete value behind a `Value`, if it has that type.
pub fn value_as<T: 'static>(v: &Value) -> Option<&T> {
    v.downcast_ref::<T>()
}

/// Check whether two `Value`s are the same allocation.
///
/// This is identity, not structural equality: two independently created
/// values holding `42` are not the same value.
pub fn value_is(a: &Value, b: &Value) -> bool {
    Rc::ptr_eq(a, b)
}

// =============================================================================
// CALL ARGS
// =============================================================================

/// The argument pack handed to every callback of one dispatch pass.
///
/// Mirrors a positional-plus-named calling convention: positional arguments
/// in order, named arguments as `(name, value)` pairs. Every callback in a
/// pass receives the same pack.
///
/// # Example
///
/// ```
/// use slotted::{value, value_as, CallArgs};
///
/// let args = CallArgs::positional(vec![value(1i32)]).with_named("reason", value("resize"));
/// assert_eq!(args.len(), 1);
/// assert!(args.named("reason").is_some());
/// assert_eq!(value_as::<i32>(args.get(0).unwrap()), Some(&1));
/// ```
#[derive(Clone, Default)]
pub struct CallArgs {
    positional: Vec<Value>,
    named: Vec<(String, Value)>,
}

impl CallArgs {
    /// An empty argument pack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pack from positional arguments only.
    pub fn positional(args: Vec<Value>) -> Self {
        Self {
            positional: args,
            named: Vec::new(),
        }
    }

    /// Add a named argument, builder style.
    pub fn with_named(mut self, name: impl Into<String>, v: Value) -> Self {
        self.named.push((name.into(), v));
        self
    }

    /// Positional argument at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.positional.get(index)
    }

    /// Named argument by name, if present. Linear scan; packs are tiny.
    pub fn named(&self, name: &str) -> Option<&Value> {
        self.named
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Number of positional arguments.
    pub fn len(&self) -> usize {
        self.positional.len()
    }

    /// True when there are no positional and no named arguments.
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }

    /// Number of named arguments.
    pub fn named_len(&self) -> usize {
        self.named.len()
    }
}

// =============================================================================
// TESTS
// =============================================================================
