// ============================================================================
// slotted - Store Module
// Member contract, class layout, class registry, attribute slot store
// ============================================================================

pub mod class;
pub mod member;
pub mod registry;
pub mod slots;

// Re-export commonly used items
pub use class::Class;
pub use member::{Member, PlainMember};
pub use registry::{lookup_class, register_class, unregister_class};
pub use slots::SlotStore;
