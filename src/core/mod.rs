// ============================================================================
// slotted - Core Module
// Shared leaf types: values, call arguments, errors
// ============================================================================

pub mod error;
pub mod value;

// Re-export commonly used items
pub use error::SlottedError;
pub use value::{value, value_as, value_is, CallArgs, Value};
