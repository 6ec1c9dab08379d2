// ============================================================================
// slotted - Errors
// The single error type surfaced by attribute access, construction,
// and signal dispatch
// ============================================================================

use thiserror::Error;

/// Errors produced by the attribute store and the dispatch engine.
///
/// Every error is propagated unchanged to the immediate caller; the crate
/// performs no retries and no silent suppression. Failed operations leave
/// no partial state behind, with one documented exception: a `Callback`
/// error aborts the remaining callbacks of the in-flight dispatch pass,
/// but callbacks that already ran are not rolled back.
#[derive(Debug, Error)]
pub enum SlottedError {
    /// A member rejected a candidate value on set. The slot keeps its
    /// prior value, including the still-empty case.
    #[error("validation failed for attribute '{attribute}': {reason}")]
    Validation { attribute: String, reason: String },

    /// A member failed to produce a default on first read. The slot stays
    /// empty, so a later read retries the computation.
    #[error("default value for attribute '{attribute}' failed: {reason}")]
    DefaultValue { attribute: String, reason: String },

    /// The name resolves to no member on this object's class. This marks
    /// the boundary where a host would fall through to its generic
    /// attribute mechanism.
    #[error("object has no attribute '{0}'")]
    UnknownAttribute(String),

    /// Instance construction was attempted for a class name the registry
    /// has never seen. Fatal to construction.
    #[error("class '{0}' has no registered members")]
    UnregisteredClass(String),

    /// Member indices handed to `Class::new` were not a permutation of
    /// `0..member_count`.
    #[error("invalid member layout for class '{class}': {detail}")]
    BadLayout { class: String, detail: String },

    /// A callback failed during dispatch.
    #[error("callback failed during dispatch: {0}")]
    Callback(String),
}

impl SlottedError {
    /// Shorthand for a validation rejection.
    pub fn validation(attribute: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            attribute: attribute.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for a failed default computation.
    pub fn default_value(attribute: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DefaultValue {
            attribute: attribute.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = SlottedError::validation("x", "expected an integer");
        assert_eq!(
            err.to_string(),
            "validation failed for attribute 'x': expected an integer"
        );

        let err = SlottedError::UnregisteredClass("Point".into());
        assert_eq!(err.to_string(), "class 'Point' has no registered members");
    }

    #[test]
    fn is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&SlottedError::UnknownAttribute("x".into()));
    }
}
