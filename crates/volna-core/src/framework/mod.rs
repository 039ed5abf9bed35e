//! Framework layer - Matching and dispatch.
//!
//! This module contains the routing pipeline:
//! - Predicate validators gating handler groups and methods
//! - The handler registry and frozen descriptor table
//! - The router (declaration-order, first-match-wins selection)
//! - The lazy invoker and the composing dispatcher

pub mod dispatcher;
pub mod invoker;
pub mod registry;
pub mod router;
pub mod validator;

pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use invoker::Invoker;
pub use registry::{GroupBuilder, HandlerGroup, HandlerTable, MethodEntry, MethodFuture, Registry};
pub use router::{RouteMatch, Router};
pub use validator::{Combinator, KindValidator, PayloadRule, PayloadValidator, Validator};
