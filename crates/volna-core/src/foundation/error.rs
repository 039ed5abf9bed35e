//! Unified error types for the Volna core.
//!
//! Each stage of the dispatch pipeline has its own error enum. A missing
//! route is *not* an error: the router reports it as `None` and callers
//! branch on it explicitly.

use thiserror::Error;

/// Type-erased error produced by handler method bodies.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

// =============================================================================
// Event Errors
// =============================================================================

/// Errors that can occur while building an [`Event`](super::event::Event)
/// from an inbound callback envelope.
#[derive(Debug, Clone, Error)]
pub enum EventError {
    /// The envelope carries no `type` field, or it is empty.
    #[error("event envelope has no usable 'type' field")]
    MissingKind,

    /// The envelope is not valid JSON.
    #[error("malformed event envelope: {0}")]
    Malformed(String),
}

// =============================================================================
// Registry Errors
// =============================================================================

/// Errors raised while freezing the handler table.
///
/// These are fatal at startup: a registry that fails to build must abort
/// the bootstrap sequence.
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    /// Every handler group must declare at least one event-kind validator.
    #[error("handler group '{group}' declares no event-kind validator")]
    MissingKindGate {
        /// Name of the offending group.
        group: String,
    },
}

// =============================================================================
// Predicate Errors
// =============================================================================

/// Returned when `validate()` is called on a validator that was never bound.
///
/// This is a programmer error, not a property of any particular event, so it
/// is raised eagerly instead of being folded into a non-match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("validate() called before bind_haystack()")]
pub struct PredicateNotBound;

// =============================================================================
// Dispatch Errors
// =============================================================================

/// Errors surfaced by the invoker and dispatcher.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The matched handler method returned an error.
    ///
    /// The cause is wrapped verbatim; the core never retries or swallows it.
    #[error("handler '{group}::{method}' failed")]
    Handler {
        /// Name of the handler group.
        group: String,
        /// Name of the handler method.
        method: String,
        /// The error raised inside the handler body.
        #[source]
        source: BoxError,
    },

    /// The caller's cancellation token fired before the handler completed.
    #[error("dispatch cancelled before handler completed")]
    Cancelled,

    /// A route match was applied to a handler table it was not produced from.
    #[error("route match '{group}::{method}' does not exist in this handler table")]
    UnknownMatch {
        /// Group name recorded in the match.
        group: String,
        /// Method name recorded in the match.
        method: String,
    },

    /// A validator was evaluated without a bound haystack.
    #[error(transparent)]
    Predicate(#[from] PredicateNotBound),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for registry construction.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;
