//! # Volna
//!
//! A declarative, predicate-routed bot framework for messaging platforms.
//!
//! ## Overview
//!
//! Volna routes inbound platform events to user-registered handler methods.
//! Handler groups declare the event kinds they accept; methods declare
//! content predicates over the event payload. The router picks at most one
//! method per event (declaration order, first match wins) and the invoker
//! constructs the handler lazily, only after the match.
//!
//! ## Dispatch pipeline
//!
//! ```text
//! ┌──────────────┐     ┌────────┐     ┌──────────┐     ┌──────────────┐
//! │ inbound push │────▶│ Event  │────▶│  Router  │────▶│ Lazy Invoker │
//! └──────────────┘     └────────┘     └──────────┘     └──────────────┘
//!                                          │
//!                                    HandlerTable (frozen at startup)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use serde_json::json;
//! use volna::prelude::*;
//!
//! struct Greeter;
//!
//! impl Greeter {
//!     async fn start(self: Arc<Self>, ctx: Arc<EventContext>) -> Result<(), BoxError> {
//!         println!("button pressed: {}", ctx.raw());
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let _config = volna::runtime::bootstrap()?;
//!
//!     let table = Registry::new()
//!         .with(
//!             GroupBuilder::new("greeter", || Greeter)
//!                 .on_kind("message_event")
//!                 .method_with(
//!                     "start",
//!                     [PayloadValidator::strict(json!({"command": "start"})).boxed()],
//!                     Greeter::start,
//!                 )
//!                 .build(),
//!         )
//!         .finish()?;
//!
//!     let dispatcher = Dispatcher::new(table);
//!     let event = Event::from_envelope(r#"{"type":"message_event","object":{"command":"start"}}"#)?;
//!     dispatcher.dispatch(event).await?;
//!     Ok(())
//! }
//! ```

pub use volna_core as core;
pub use volna_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use volna::prelude::*;
/// ```
pub mod prelude {
    // Event model and dispatch context
    pub use volna_core::{BoxError, Event, EventContext};

    // Registration and dispatch
    pub use volna_core::{
        DispatchOutcome, Dispatcher, GroupBuilder, Invoker, Registry, RouteMatch, Router,
    };

    // Validators
    pub use volna_core::{Combinator, KindValidator, PayloadRule, PayloadValidator, Validator};

    // Errors
    pub use volna_core::{DispatchError, EventError, PredicateNotBound, RegistryError};

    // Runtime bootstrap
    pub use volna_runtime::{ConfigLoader, LoggingBuilder, VolnaConfig};
}
