//! Predicate validators.
//!
//! A [`Validator`] is a single boolean rule gating whether a handler group
//! or handler method may process an event. Group-level validators select by
//! event *kind*; method-level validators select by event *content* (e.g.
//! button-click payloads).
//!
//! Evaluation is a two-step protocol: the router binds the haystack (the
//! value under test) immediately before calling [`validate`](Validator::validate).
//! Validators hold no state across events — the router always evaluates a
//! [`fresh`](Validator::fresh) copy, so a bound instance is never shared
//! between two concurrent dispatches.

use serde_json::Value;

use crate::foundation::error::PredicateNotBound;

/// A boolean rule bound to a handler group or method.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use volna_core::{PayloadValidator, Validator};
///
/// let mut v = PayloadValidator::strict(json!({"command": "start"})).fresh();
/// v.bind_haystack(r#"{"command":"start"}"#);
/// assert_eq!(v.validate(), Ok(true));
/// ```
pub trait Validator: Send + Sync {
    /// Returns an unbound copy of this validator for one evaluation.
    fn fresh(&self) -> Box<dyn Validator>;

    /// Binds the value this predicate will be evaluated against.
    fn bind_haystack(&mut self, haystack: &str);

    /// Evaluates the predicate against the bound haystack.
    ///
    /// # Errors
    ///
    /// [`PredicateNotBound`] if no haystack was bound first. This is a
    /// programmer error and fails fast rather than counting as a non-match.
    fn validate(&self) -> Result<bool, PredicateNotBound>;

    /// Boxes this validator for registration.
    fn boxed(self) -> Box<dyn Validator>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

// =============================================================================
// Combinator
// =============================================================================

/// How repeated validators on one method combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Combinator {
    /// Every validator must pass (logical AND). The default.
    #[default]
    All,
    /// At least one validator must pass (logical OR).
    Any,
}

// =============================================================================
// KindValidator
// =============================================================================

/// Group-scoped validator matching a fixed event-kind token.
#[derive(Debug, Clone)]
pub struct KindValidator {
    expected: String,
    haystack: Option<String>,
}

impl KindValidator {
    /// Creates a validator that passes iff the event kind equals `expected`.
    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            haystack: None,
        }
    }

    /// Returns the expected event-kind token.
    pub fn expected(&self) -> &str {
        &self.expected
    }
}

impl Validator for KindValidator {
    fn fresh(&self) -> Box<dyn Validator> {
        Box::new(Self::new(self.expected.clone()))
    }

    fn bind_haystack(&mut self, haystack: &str) {
        self.haystack = Some(haystack.to_owned());
    }

    fn validate(&self) -> Result<bool, PredicateNotBound> {
        let kind = self.haystack.as_deref().ok_or(PredicateNotBound)?;
        Ok(kind == self.expected)
    }
}

// =============================================================================
// PayloadValidator
// =============================================================================

/// How a [`PayloadValidator`] compares its expected value to the decoded payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadRule {
    /// The decoded payload must be deep-equal to the expected value.
    Strict,
    /// The expected value is a key that must exist in the decoded payload.
    KeyExists,
    /// Expected value and decoded payload are treated as sets; their
    /// intersection must be non-empty.
    Contains,
}

/// Method-scoped validator matching the event's payload substructure.
///
/// The bound haystack is decoded as JSON on every evaluation; a haystack
/// that does not decode to an object or array is a non-match, never an
/// error. Decode results are not cached between events.
#[derive(Debug, Clone)]
pub struct PayloadValidator {
    expected: Value,
    rule: PayloadRule,
    haystack: Option<String>,
}

impl PayloadValidator {
    /// Creates a payload validator with an explicit rule.
    pub fn new(expected: Value, rule: PayloadRule) -> Self {
        Self {
            expected,
            rule,
            haystack: None,
        }
    }

    /// Deep-equality match against `expected`.
    pub fn strict(expected: Value) -> Self {
        Self::new(expected, PayloadRule::Strict)
    }

    /// Passes when `key` exists in the decoded payload.
    pub fn key_exists(key: impl Into<String>) -> Self {
        Self::new(Value::String(key.into()), PayloadRule::KeyExists)
    }

    /// Passes when `expected` and the decoded payload intersect.
    pub fn contains(expected: Value) -> Self {
        Self::new(expected, PayloadRule::Contains)
    }

    fn evaluate(&self, payload: &Value) -> bool {
        match self.rule {
            PayloadRule::Strict => self.expected == *payload,
            PayloadRule::KeyExists => key_exists(&self.expected, payload),
            PayloadRule::Contains => {
                let needles = as_set(&self.expected);
                let hay = as_set(payload);
                needles.iter().any(|needle| hay.contains(needle))
            }
        }
    }
}

impl Validator for PayloadValidator {
    fn fresh(&self) -> Box<dyn Validator> {
        Box::new(Self::new(self.expected.clone(), self.rule))
    }

    fn bind_haystack(&mut self, haystack: &str) {
        self.haystack = Some(haystack.to_owned());
    }

    fn validate(&self) -> Result<bool, PredicateNotBound> {
        let haystack = self.haystack.as_deref().ok_or(PredicateNotBound)?;

        let Ok(payload) = serde_json::from_str::<Value>(haystack) else {
            return Ok(false);
        };
        if !payload.is_object() && !payload.is_array() {
            return Ok(false);
        }

        Ok(self.evaluate(&payload))
    }
}

fn key_exists(expected: &Value, payload: &Value) -> bool {
    match (expected, payload) {
        (Value::String(key), Value::Object(map)) => map.contains_key(key),
        // JSON arrays carry integer keys, so an in-range index counts.
        (Value::Number(index), Value::Array(items)) => index
            .as_u64()
            .is_some_and(|i| (i as usize) < items.len()),
        _ => false,
    }
}

/// Views a JSON value as a set of elements: array items, object member
/// values, or the scalar itself.
fn as_set(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => map.values().collect(),
        other => vec![other],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bound(validator: &dyn Validator, haystack: &str) -> Result<bool, PredicateNotBound> {
        let mut v = validator.fresh();
        v.bind_haystack(haystack);
        v.validate()
    }

    #[test]
    fn kind_validator_compares_equality() {
        let v = KindValidator::new("message_new");
        assert_eq!(bound(&v, "message_new"), Ok(true));
        assert_eq!(bound(&v, "message_event"), Ok(false));
    }

    #[test]
    fn unbound_validate_fails_fast() {
        assert_eq!(
            KindValidator::new("message_new").validate(),
            Err(PredicateNotBound)
        );
        assert_eq!(
            PayloadValidator::key_exists("command").validate(),
            Err(PredicateNotBound)
        );
    }

    #[test]
    fn strict_requires_deep_equality() {
        let v = PayloadValidator::strict(json!({"command": "start"}));
        assert_eq!(bound(&v, r#"{"command":"start"}"#), Ok(true));
        assert_eq!(bound(&v, r#"{"command":"start","extra":1}"#), Ok(false));
        assert_eq!(bound(&v, r#"{"command":"stop"}"#), Ok(false));
    }

    #[test]
    fn key_exists_checks_object_keys() {
        let v = PayloadValidator::key_exists("command");
        assert_eq!(bound(&v, r#"{"command":"start"}"#), Ok(true));
        assert_eq!(bound(&v, r#"{"other":1}"#), Ok(false));
    }

    #[test]
    fn key_exists_checks_array_indices() {
        let v = PayloadValidator::new(json!(1), PayloadRule::KeyExists);
        assert_eq!(bound(&v, r#"["a","b"]"#), Ok(true));
        assert_eq!(bound(&v, r#"["a"]"#), Ok(false));
    }

    #[test]
    fn contains_intersects_sets() {
        let v = PayloadValidator::contains(json!(["a", "b"]));
        assert_eq!(bound(&v, r#"["b","c"]"#), Ok(true));
        assert_eq!(bound(&v, r#"["x","y"]"#), Ok(false));
    }

    #[test]
    fn contains_uses_object_member_values() {
        let v = PayloadValidator::contains(json!(["start"]));
        assert_eq!(bound(&v, r#"{"command":"start"}"#), Ok(true));
        assert_eq!(bound(&v, r#"{"command":"stop"}"#), Ok(false));
    }

    #[test]
    fn malformed_haystack_is_a_non_match() {
        let v = PayloadValidator::strict(json!({"command": "start"}));
        assert_eq!(bound(&v, "not-json"), Ok(false));
        assert_eq!(bound(&v, ""), Ok(false));
    }

    #[test]
    fn scalar_haystack_is_a_non_match() {
        let v = PayloadValidator::key_exists("command");
        assert_eq!(bound(&v, "42"), Ok(false));
        assert_eq!(bound(&v, r#""command""#), Ok(false));
    }

    #[test]
    fn fresh_copies_are_unbound() {
        let mut v = PayloadValidator::key_exists("command");
        v.bind_haystack(r#"{"command":"start"}"#);
        assert_eq!(v.validate(), Ok(true));
        assert_eq!(v.fresh().validate(), Err(PredicateNotBound));
    }
}
