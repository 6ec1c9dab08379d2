// ============================================================================
// slotted - Slot-Based Object Attribute Store with Signal/Slot Dispatch
// ============================================================================
//
// The performance-critical base layer beneath a declarative-attribute
// object framework: per-instance fixed-size attribute slot arrays with
// lazy validated defaults, and a sorted per-instance connection table
// routing signals to ordered callback sets.
// ============================================================================

pub mod core;
pub mod dispatch;
pub mod object;
pub mod store;

// Re-export core items at crate root for ergonomic access
pub use crate::core::error::SlottedError;
pub use crate::core::value::{value, value_as, value_is, CallArgs, Value};

// Re-export the store surface
pub use store::class::Class;
pub use store::member::{Member, PlainMember};
pub use store::registry::{lookup_class, register_class, unregister_class};
pub use store::slots::SlotStore;

// Re-export the dispatch surface
pub use dispatch::callback_set::{callback, Callback, CallbackFn, CallbackSet};
pub use dispatch::connections::ConnectionTable;
pub use dispatch::signal::{signal, Signal};

// Re-export the instance type
pub use object::Object;

// =============================================================================
// TESTS
// =============================================================================
