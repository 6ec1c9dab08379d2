// ============================================================================
// slotted - Class Registry
// Thread-local mapping from class name to member layout, consulted once
// per instance construction
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::debug;

use crate::core::SlottedError;
use crate::store::class::Class;

thread_local! {
    static REGISTRY: RefCell<HashMap<String, Rc<Class>>> = RefCell::new(HashMap::new());
}

/// Register a class layout under its name.
///
/// Registering a name twice replaces the previous layout; instances built
/// from the old layout keep their own `Rc<Class>` and are unaffected.
pub fn register_class(class: Rc<Class>) {
    debug!(class = class.name(), members = class.member_count(), "registering class");
    REGISTRY.with(|registry| {
        registry
            .borrow_mut()
            .insert(class.name().to_string(), class);
    });
}

/// Look up a registered class layout by name.
///
/// Fails with [`SlottedError::UnregisteredClass`] when the name was never
/// registered on this thread. This is the construction-time lookup; it is
/// never on a per-attribute-access path.
pub fn lookup_class(name: &str) -> Result<Rc<Class>, SlottedError> {
    REGISTRY.with(|registry| {
        registry
            .borrow()
            .get(name)
            .cloned()
            .ok_or_else(|| SlottedError::UnregisteredClass(name.to_string()))
    })
}

/// Remove a class from the registry, returning whether it was present.
///
/// Mostly useful for tests; live instances keep their layout alive.
pub fn unregister_class(name: &str) -> bool {
    REGISTRY.with(|registry| registry.borrow_mut().remove(name).is_some())
}

// =============================================================================
// TESTS
// =============================================================================
