// ============================================================================
// slotted - Dispatch Module
// Signal identity, callback handles, callback sets, connection table
// ============================================================================

pub mod callback_set;
pub mod connections;
pub mod signal;

// Re-export commonly used items
pub use callback_set::{callback, Callback, CallbackFn, CallbackSet};
pub use connections::ConnectionTable;
pub use signal::{signal, Signal};
