//! # Volna Core
//!
//! The routing engine of the Volna bot framework.
//!
//! Volna dispatches inbound messaging-platform events to user-registered
//! handler methods gated by declarative predicate validators. This crate
//! contains the whole matching pipeline; transports, API clients, and
//! upload plumbing live outside it and are consumed by handler bodies.
//!
//! ## Architecture Layers
//!
//! ### Foundation Layer
//!
//! - **Event model**: one immutable [`Event`] per inbound request
//! - **Dispatch context**: [`EventContext`] with cancellation propagation
//! - **Errors**: per-stage `thiserror` enums
//!
//! ### Framework Layer
//!
//! - **Validators**: [`KindValidator`] selects event kinds,
//!   [`PayloadValidator`] matches payload content under
//!   [`PayloadRule`] `Strict` / `KeyExists` / `Contains`
//! - **Registry**: explicit [`GroupBuilder`] registration frozen into a
//!   read-only [`HandlerTable`]
//! - **Router**: declaration-order, first-match-wins selection
//! - **Invoker**: lazy handler instantiation and error surfacing
//! - **Dispatcher**: the per-event `route` + `invoke` composition
//!
//! ## Dispatch Flow
//!
//! ```text
//! ┌─────────────┐     ┌────────┐     ┌─────────┐     ┌───────────────┐
//! │ raw payload │────▶│ Event  │────▶│ Router  │────▶│ Lazy Invoker  │
//! └─────────────┘     └────────┘     └─────────┘     └───────────────┘
//!                                         │ consults
//!                                    ┌────────────┐
//!                                    │HandlerTable│  (built once)
//!                                    └────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use serde_json::json;
//! use volna_core::prelude::*;
//!
//! struct Greeter;
//!
//! impl Greeter {
//!     async fn start(self: Arc<Self>, ctx: Arc<EventContext>) -> Result<(), BoxError> {
//!         println!("start clicked: {}", ctx.raw());
//!         Ok(())
//!     }
//! }
//!
//! let group = GroupBuilder::new("greeter", || Greeter)
//!     .on_kind("message_event")
//!     .method_with(
//!         "start",
//!         [PayloadValidator::strict(json!({"command": "start"})).boxed()],
//!         Greeter::start,
//!     )
//!     .build();
//!
//! let table = Registry::new().with(group).finish()?;
//! let dispatcher = Dispatcher::new(table);
//! dispatcher.dispatch(Event::new("message_event", r#"{"command":"start"}"#)).await?;
//! ```

// Architectural layers
pub mod foundation;
pub mod framework;

// Re-export foundation types
pub use foundation::{
    BoxError, DispatchError, DispatchResult, Event, EventContext, EventError, PredicateNotBound,
    RegistryError, RegistryResult,
};

// Re-export framework types
pub use framework::{
    Combinator, DispatchOutcome, Dispatcher, GroupBuilder, HandlerGroup, HandlerTable, Invoker,
    KindValidator, MethodEntry, MethodFuture, PayloadRule, PayloadValidator, Registry, RouteMatch,
    Router, Validator,
};

/// Prelude for common imports.
pub mod prelude {
    pub use super::foundation::*;
    pub use super::framework::{
        Combinator, DispatchOutcome, Dispatcher, GroupBuilder, KindValidator, PayloadRule,
        PayloadValidator, Registry, Validator,
    };
}
