//! Handler registry and descriptor table.
//!
//! Handler authors register groups explicitly through [`GroupBuilder`]:
//! a group names the event kinds it accepts (group-level validators) and
//! lists its methods, each gated by method-level validators. Registration
//! replaces attribute/reflection scanning with a plain builder step, so
//! discovery never runs user constructors.
//!
//! [`Registry::finish`] freezes the groups into a [`HandlerTable`]. The
//! table is built once at startup, shared behind an `Arc`, and read-only
//! thereafter; concurrent dispatches read it without synchronization.
//!
//! # Example
//!
//! ```rust,ignore
//! let group = GroupBuilder::new("greeter", || Greeter::new(api.clone()))
//!     .on_kind("message_event")
//!     .method_with(
//!         "start",
//!         [PayloadValidator::strict(json!({"command": "start"})).boxed()],
//!         Greeter::start,
//!     )
//!     .build();
//!
//! let table = Registry::new().with(group).finish()?;
//! ```

use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::foundation::context::EventContext;
use crate::foundation::error::{BoxError, RegistryError, RegistryResult};
use crate::framework::router::RouteMatch;
use crate::framework::validator::{Combinator, KindValidator, Validator};

/// Type-erased future returned by a handler method.
pub type MethodFuture = BoxFuture<'static, Result<(), BoxError>>;

/// Type-erased handler method callback.
///
/// Constructing the handler instance happens inside this closure, so no
/// group is instantiated before the router has committed to it.
pub(crate) type MethodFn = Arc<dyn Fn(Arc<EventContext>) -> MethodFuture + Send + Sync>;

// =============================================================================
// Descriptors
// =============================================================================

/// One handler method: its name, content gates, and erased callback.
pub struct MethodEntry {
    name: String,
    validators: Vec<Box<dyn Validator>>,
    combinator: Combinator,
    pub(crate) call: MethodFn,
}

impl MethodEntry {
    /// Returns the method name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the method-level validators in declaration order.
    pub fn validators(&self) -> &[Box<dyn Validator>] {
        &self.validators
    }

    /// Returns how this method's validators combine.
    pub fn combinator(&self) -> Combinator {
        self.combinator
    }
}

/// One handler group: its kind gates and ordered methods.
///
/// Built once via [`GroupBuilder`] and owned by the [`HandlerTable`] for
/// the process lifetime.
pub struct HandlerGroup {
    name: String,
    gates: Vec<Box<dyn Validator>>,
    methods: Vec<MethodEntry>,
}

impl HandlerGroup {
    /// Returns the group name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the group-level validators in declaration order.
    pub fn gates(&self) -> &[Box<dyn Validator>] {
        &self.gates
    }

    /// Returns the methods in declaration order.
    pub fn methods(&self) -> &[MethodEntry] {
        &self.methods
    }
}

// =============================================================================
// GroupBuilder
// =============================================================================

/// Builder for a [`HandlerGroup`] backed by a handler type `H`.
///
/// The factory is stored, never called here: the invoker runs it only
/// after a route match, once per dispatched event.
pub struct GroupBuilder<H> {
    name: String,
    factory: Arc<dyn Fn() -> H + Send + Sync>,
    gates: Vec<Box<dyn Validator>>,
    methods: Vec<MethodEntry>,
}

impl<H: Send + Sync + 'static> GroupBuilder<H> {
    /// Creates a builder for a group named `name` with a lazy instance factory.
    pub fn new(name: impl Into<String>, factory: impl Fn() -> H + Send + Sync + 'static) -> Self {
        Self {
            name: name.into(),
            factory: Arc::new(factory),
            gates: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Adds a group-level validator.
    pub fn gate(mut self, validator: impl Validator + 'static) -> Self {
        self.gates.push(validator.boxed());
        self
    }

    /// Shorthand for gating on one event-kind token.
    pub fn on_kind(self, kind: impl Into<String>) -> Self {
        self.gate(KindValidator::new(kind))
    }

    /// Adds a method with no content validators.
    ///
    /// Such a method is registrable but never selected by content matching;
    /// there is no implicit fallback.
    pub fn method<F, Fut, E>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(Arc<H>, Arc<EventContext>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
        E: Into<BoxError> + 'static,
    {
        self.method_matching(name, Combinator::All, [], f)
    }

    /// Adds a method whose validators must all pass (logical AND).
    pub fn method_with<F, Fut, E, I>(self, name: impl Into<String>, validators: I, f: F) -> Self
    where
        F: Fn(Arc<H>, Arc<EventContext>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
        E: Into<BoxError> + 'static,
        I: IntoIterator<Item = Box<dyn Validator>>,
    {
        self.method_matching(name, Combinator::All, validators, f)
    }

    /// Adds a method with an explicit validator combinator.
    pub fn method_matching<F, Fut, E, I>(
        mut self,
        name: impl Into<String>,
        combinator: Combinator,
        validators: I,
        f: F,
    ) -> Self
    where
        F: Fn(Arc<H>, Arc<EventContext>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
        E: Into<BoxError> + 'static,
        I: IntoIterator<Item = Box<dyn Validator>>,
    {
        let factory = Arc::clone(&self.factory);
        let f = Arc::new(f);
        let call: MethodFn = Arc::new(move |ctx| {
            // Lazy instantiation: the handler is constructed here, after a match.
            let instance = Arc::new(factory());
            let fut = f(instance, ctx);
            async move { fut.await.map_err(Into::into) }.boxed()
        });

        self.methods.push(MethodEntry {
            name: name.into(),
            validators: validators.into_iter().collect(),
            combinator,
            call,
        });
        self
    }

    /// Finishes the group, erasing the handler type.
    pub fn build(self) -> HandlerGroup {
        HandlerGroup {
            name: self.name,
            gates: self.gates,
            methods: self.methods,
        }
    }
}

// =============================================================================
// Registry and HandlerTable
// =============================================================================

/// Accumulates handler groups in declaration order.
#[derive(Default)]
pub struct Registry {
    groups: Vec<HandlerGroup>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler group. Declaration order is match precedence.
    pub fn register(&mut self, group: HandlerGroup) {
        self.groups.push(group);
    }

    /// Registers a handler group (builder pattern).
    pub fn with(mut self, group: HandlerGroup) -> Self {
        self.groups.push(group);
        self
    }

    /// Freezes the registry into a shared, read-only [`HandlerTable`].
    ///
    /// # Errors
    ///
    /// [`RegistryError::MissingKindGate`] if any group declares no
    /// group-level validator. Every group must assert an event kind.
    pub fn finish(self) -> RegistryResult<Arc<HandlerTable>> {
        for group in &self.groups {
            if group.gates.is_empty() {
                return Err(RegistryError::MissingKindGate {
                    group: group.name.clone(),
                });
            }
        }
        Ok(Arc::new(HandlerTable {
            groups: self.groups,
        }))
    }
}

/// The immutable descriptor table consulted on every dispatch.
///
/// Safe for unsynchronized concurrent reads: nothing mutates it after
/// [`Registry::finish`].
pub struct HandlerTable {
    groups: Vec<HandlerGroup>,
}

impl HandlerTable {
    /// Returns the groups in declaration order.
    pub fn groups(&self) -> &[HandlerGroup] {
        &self.groups
    }

    /// Returns the number of registered groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if no groups are registered.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Resolves a route match back to its method entry.
    ///
    /// Names are cross-checked so a match routed on a different table is
    /// rejected instead of silently invoking the wrong handler.
    pub(crate) fn method(&self, matched: &RouteMatch) -> Option<&MethodEntry> {
        let group = self.groups.get(matched.group_index())?;
        if group.name != matched.group() {
            return None;
        }
        let method = group.methods.get(matched.method_index())?;
        if method.name != matched.method() {
            return None;
        }
        Some(method)
    }
}

impl std::fmt::Debug for HandlerTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerTable")
            .field("group_count", &self.groups.len())
            .finish()
    }
}
