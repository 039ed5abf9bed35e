//! Event routing.
//!
//! The [`Router`] walks the handler table in declaration order, filters
//! groups by their kind gates, then evaluates method-level validators
//! within the surviving groups. The first group whose first method matches
//! wins; declaration order is the only precedence mechanism.
//!
//! Routing is stateless: every call evaluates fresh validator copies bound
//! to the current event, so nothing leaks between dispatches and concurrent
//! calls never share bound state.

use tracing::{debug, trace};

use crate::foundation::error::PredicateNotBound;
use crate::foundation::event::Event;
use crate::framework::registry::HandlerTable;
use crate::framework::validator::{Combinator, Validator};

/// The outcome of a successful route: which group and method to invoke.
///
/// Ephemeral, produced per dispatch, and only meaningful against the table
/// it was routed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    group_index: usize,
    method_index: usize,
    group: String,
    method: String,
}

impl RouteMatch {
    /// Returns the matched group name.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Returns the matched method name.
    pub fn method(&self) -> &str {
        &self.method
    }

    pub(crate) fn group_index(&self) -> usize {
        self.group_index
    }

    pub(crate) fn method_index(&self) -> usize {
        self.method_index
    }
}

/// Stateless matcher over a frozen [`HandlerTable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Router;

impl Router {
    /// Creates a router.
    pub fn new() -> Self {
        Self
    }

    /// Selects at most one `(group, method)` pair for `event`.
    ///
    /// Group-level validators are bound to the event kind and combine with
    /// AND. Method-level validators are bound to the raw payload and combine
    /// per the method's [`Combinator`]. A method with zero validators is
    /// never selected. `Ok(None)` is the no-match outcome, not an error.
    ///
    /// # Errors
    ///
    /// [`PredicateNotBound`] only if a custom validator mishandles the
    /// bind/validate protocol.
    pub fn route(
        &self,
        event: &Event,
        table: &HandlerTable,
    ) -> Result<Option<RouteMatch>, PredicateNotBound> {
        for (group_index, group) in table.groups().iter().enumerate() {
            if !evaluate(group.gates(), Combinator::All, event.kind())? {
                trace!(
                    group = group.name(),
                    kind = event.kind(),
                    "kind gates rejected group"
                );
                continue;
            }

            for (method_index, method) in group.methods().iter().enumerate() {
                if method.validators().is_empty() {
                    continue;
                }
                if evaluate(method.validators(), method.combinator(), event.raw())? {
                    debug!(
                        group = group.name(),
                        method = method.name(),
                        kind = event.kind(),
                        "route matched"
                    );
                    return Ok(Some(RouteMatch {
                        group_index,
                        method_index,
                        group: group.name().to_owned(),
                        method: method.name().to_owned(),
                    }));
                }
            }
        }

        trace!(kind = event.kind(), "no route matched");
        Ok(None)
    }
}

/// Evaluates a validator list against one haystack under a combinator.
fn evaluate(
    validators: &[Box<dyn Validator>],
    combinator: Combinator,
    haystack: &str,
) -> Result<bool, PredicateNotBound> {
    match combinator {
        Combinator::All => {
            for validator in validators {
                if !check(validator.as_ref(), haystack)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        Combinator::Any => {
            for validator in validators {
                if check(validator.as_ref(), haystack)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
    }
}

/// Binds a fresh copy of `validator` and evaluates it.
fn check(validator: &dyn Validator, haystack: &str) -> Result<bool, PredicateNotBound> {
    let mut fresh = validator.fresh();
    fresh.bind_haystack(haystack);
    fresh.validate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::context::EventContext;
    use crate::framework::registry::{GroupBuilder, HandlerGroup, Registry};
    use crate::framework::validator::PayloadValidator;
    use serde_json::json;
    use std::convert::Infallible;
    use std::sync::Arc;

    struct Noop;

    async fn noop(_: Arc<Noop>, _: Arc<EventContext>) -> Result<(), Infallible> {
        Ok(())
    }

    fn table(groups: Vec<HandlerGroup>) -> Arc<HandlerTable> {
        let mut registry = Registry::new();
        for group in groups {
            registry.register(group);
        }
        registry.finish().unwrap()
    }

    fn start_group(name: &str) -> HandlerGroup {
        GroupBuilder::new(name, || Noop)
            .on_kind("message_event")
            .method_with(
                "start",
                [PayloadValidator::strict(json!({"command": "start"})).boxed()],
                noop,
            )
            .build()
    }

    #[test]
    fn first_declared_group_wins() {
        let table = table(vec![start_group("first"), start_group("second")]);
        let event = Event::new("message_event", r#"{"command":"start"}"#);

        let matched = Router::new().route(&event, &table).unwrap().unwrap();
        assert_eq!(matched.group(), "first");
        assert_eq!(matched.method(), "start");
    }

    #[test]
    fn first_declared_method_wins() {
        let group = GroupBuilder::new("g", || Noop)
            .on_kind("message_event")
            .method_with(
                "by_key",
                [PayloadValidator::key_exists("command").boxed()],
                noop,
            )
            .method_with(
                "by_value",
                [PayloadValidator::strict(json!({"command": "start"})).boxed()],
                noop,
            )
            .build();
        let table = table(vec![group]);
        let event = Event::new("message_event", r#"{"command":"start"}"#);

        let matched = Router::new().route(&event, &table).unwrap().unwrap();
        assert_eq!(matched.method(), "by_key");
    }

    #[test]
    fn repeated_validators_combine_with_and() {
        let group = GroupBuilder::new("g", || Noop)
            .on_kind("message_event")
            .method_with(
                "both",
                [
                    PayloadValidator::key_exists("command").boxed(),
                    PayloadValidator::strict(json!({"command": "stop"})).boxed(),
                ],
                noop,
            )
            .build();
        let table = table(vec![group]);

        // First validator passes, second fails: no match.
        let event = Event::new("message_event", r#"{"command":"start"}"#);
        assert_eq!(Router::new().route(&event, &table).unwrap(), None);
    }

    #[test]
    fn any_combinator_needs_one_pass() {
        let group = GroupBuilder::new("g", || Noop)
            .on_kind("message_event")
            .method_matching(
                "either",
                Combinator::Any,
                [
                    PayloadValidator::strict(json!({"command": "stop"})).boxed(),
                    PayloadValidator::key_exists("command").boxed(),
                ],
                noop,
            )
            .build();
        let table = table(vec![group]);
        let event = Event::new("message_event", r#"{"command":"start"}"#);

        assert!(Router::new().route(&event, &table).unwrap().is_some());
    }

    #[test]
    fn unknown_kind_yields_no_match() {
        let table = table(vec![start_group("g")]);
        let event = Event::new("unknown_event", r#"{"command":"start"}"#);
        assert_eq!(Router::new().route(&event, &table).unwrap(), None);
    }

    #[test]
    fn zero_validator_methods_are_not_a_fallback() {
        let group = GroupBuilder::new("g", || Noop)
            .on_kind("message_event")
            .method("catch_all", noop)
            .build();
        let table = table(vec![group]);
        let event = Event::new("message_event", r#"{"command":"start"}"#);

        assert_eq!(Router::new().route(&event, &table).unwrap(), None);
    }

    #[test]
    fn routing_is_deterministic() {
        let table = table(vec![start_group("a"), start_group("b")]);
        let event = Event::new("message_event", r#"{"command":"start"}"#);

        let router = Router::new();
        let first = router.route(&event, &table).unwrap();
        for _ in 0..10 {
            assert_eq!(router.route(&event, &table).unwrap(), first);
        }
    }

    #[test]
    fn malformed_payload_never_errors() {
        let table = table(vec![start_group("g")]);
        let event = Event::new("message_event", "not-json");
        assert_eq!(Router::new().route(&event, &table).unwrap(), None);
    }
}
