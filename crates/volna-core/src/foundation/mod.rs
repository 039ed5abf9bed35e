//! Foundation layer - Core abstractions and type system.
//!
//! This module contains the building blocks shared by the framework layer:
//! - The inbound event model ([`Event`])
//! - The dispatch context handlers receive ([`EventContext`])
//! - Unified error types

pub mod context;
pub mod error;
pub mod event;

pub use context::EventContext;
pub use error::{
    BoxError, DispatchError, DispatchResult, EventError, PredicateNotBound, RegistryError,
    RegistryResult,
};
pub use event::Event;
