//! Dispatch context.
//!
//! This module provides [`EventContext`], the value handler methods receive.
//! It wraps the immutable [`Event`] together with the caller's cancellation
//! token, so long-running handler logic can observe an external abort signal.

use tokio_util::sync::CancellationToken;

use crate::foundation::event::Event;

/// The context object passed to handler methods during dispatch.
///
/// `EventContext` is shared through an `Arc` for the duration of one
/// dispatch; it is never reused across events.
///
/// # Example
///
/// ```rust,ignore
/// async fn start(handler: Arc<Greeter>, ctx: Arc<EventContext>) -> Result<(), BoxError> {
///     println!("payload: {}", ctx.raw());
///     Ok(())
/// }
/// ```
pub struct EventContext {
    event: Event,
    cancel: CancellationToken,
}

impl EventContext {
    /// Creates a context with a fresh, never-cancelled token.
    pub fn new(event: Event) -> Self {
        Self {
            event,
            cancel: CancellationToken::new(),
        }
    }

    /// Creates a context carrying the caller's cancellation token.
    pub fn with_cancellation(event: Event, cancel: CancellationToken) -> Self {
        Self { event, cancel }
    }

    /// Returns the event being dispatched.
    pub fn event(&self) -> &Event {
        &self.event
    }

    /// Shorthand for the event-kind token.
    pub fn kind(&self) -> &str {
        self.event.kind()
    }

    /// Shorthand for the raw payload text.
    pub fn raw(&self) -> &str {
        self.event.raw()
    }

    /// Returns the cancellation token governing this dispatch.
    ///
    /// Handler bodies may clone it to abort their own sub-tasks when the
    /// surrounding request is cancelled.
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Checks whether the surrounding request has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl std::fmt::Debug for EventContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventContext")
            .field("kind", &self.event.kind())
            .field("is_cancelled", &self.is_cancelled())
            .finish()
    }
}
