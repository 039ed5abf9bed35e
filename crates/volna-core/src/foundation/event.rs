//! Inbound event model.
//!
//! An [`Event`] is the immutable, per-request view over one raw inbound
//! payload. It carries the short event-kind token that group-level
//! validators compare against, and the verbatim payload text that
//! content validators decode and inspect.
//!
//! Events are created once per inbound request and discarded after
//! dispatch completes; nothing in the core mutates or caches them.

use serde_json::Value;

use crate::foundation::error::EventError;

/// One parsed inbound event.
///
/// # Example
///
/// ```rust
/// use volna_core::Event;
///
/// let event = Event::new("message_new", r#"{"command":"start"}"#);
/// assert_eq!(event.kind(), "message_new");
/// ```
#[derive(Debug, Clone)]
pub struct Event {
    /// Short event-kind token, e.g. `"message_new"` or `"message_event"`.
    kind: String,
    /// Verbatim payload text used by content validators.
    raw: String,
}

impl Event {
    /// Creates an event from an already-separated kind and payload.
    pub fn new(kind: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            raw: raw.into(),
        }
    }

    /// Parses a callback envelope of the form `{"type": ..., "object": ...}`.
    ///
    /// The `object` substructure is kept as serialized JSON text so content
    /// validators can decode exactly what the platform delivered.
    ///
    /// # Errors
    ///
    /// [`EventError::Malformed`] if the envelope is not valid JSON,
    /// [`EventError::MissingKind`] if `type` is absent, not a string, or empty.
    pub fn from_envelope(text: &str) -> Result<Self, EventError> {
        let envelope: Value =
            serde_json::from_str(text).map_err(|e| EventError::Malformed(e.to_string()))?;

        let kind = envelope
            .get("type")
            .and_then(Value::as_str)
            .filter(|k| !k.is_empty())
            .ok_or(EventError::MissingKind)?
            .to_owned();

        let raw = envelope
            .get("object")
            .map(Value::to_string)
            .unwrap_or_default();

        Ok(Self { kind, raw })
    }

    /// Returns the event-kind token.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns the raw payload text.
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_splits_kind_and_object() {
        let event =
            Event::from_envelope(r#"{"type":"message_new","object":{"text":"hi"}}"#).unwrap();
        assert_eq!(event.kind(), "message_new");
        assert_eq!(event.raw(), r#"{"text":"hi"}"#);
    }

    #[test]
    fn envelope_without_object_yields_empty_raw() {
        let event = Event::from_envelope(r#"{"type":"confirmation"}"#).unwrap();
        assert_eq!(event.kind(), "confirmation");
        assert_eq!(event.raw(), "");
    }

    #[test]
    fn envelope_rejects_missing_or_empty_kind() {
        assert!(matches!(
            Event::from_envelope(r#"{"object":{}}"#),
            Err(EventError::MissingKind)
        ));
        assert!(matches!(
            Event::from_envelope(r#"{"type":"","object":{}}"#),
            Err(EventError::MissingKind)
        ));
    }

    #[test]
    fn envelope_rejects_invalid_json() {
        assert!(matches!(
            Event::from_envelope("not-json"),
            Err(EventError::Malformed(_))
        ));
    }
}
