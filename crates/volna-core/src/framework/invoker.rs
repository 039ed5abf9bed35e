//! Lazy handler invocation.
//!
//! The [`Invoker`] runs the method selected by the router. The handler
//! group's factory executes inside the method callback, so instantiation
//! happens only after a match — no other group's constructor runs during
//! a dispatch. Errors from the handler body are wrapped and surfaced to
//! the caller; nothing is retried here.

use std::sync::Arc;

use tracing::debug;

use crate::foundation::context::EventContext;
use crate::foundation::error::{DispatchError, DispatchResult};
use crate::framework::registry::HandlerTable;
use crate::framework::router::RouteMatch;

/// Executes matched handler methods.
#[derive(Debug, Clone, Copy, Default)]
pub struct Invoker;

impl Invoker {
    /// Creates an invoker.
    pub fn new() -> Self {
        Self
    }

    /// Instantiates and runs the matched handler method.
    ///
    /// The context's cancellation token is raced against the handler
    /// future; a cancellation aborts the handler and returns
    /// [`DispatchError::Cancelled`].
    ///
    /// # Errors
    ///
    /// [`DispatchError::Handler`] wrapping any error from the handler body,
    /// [`DispatchError::Cancelled`] on external cancellation, or
    /// [`DispatchError::UnknownMatch`] if `matched` was not produced from
    /// `table`.
    pub async fn invoke(
        &self,
        table: &HandlerTable,
        matched: &RouteMatch,
        ctx: Arc<EventContext>,
    ) -> DispatchResult<()> {
        let method = table
            .method(matched)
            .ok_or_else(|| DispatchError::UnknownMatch {
                group: matched.group().to_owned(),
                method: matched.method().to_owned(),
            })?;

        debug!(
            group = matched.group(),
            method = matched.method(),
            "invoking handler"
        );

        let cancel = ctx.cancellation().clone();
        let handler = (method.call)(Arc::clone(&ctx));

        tokio::select! {
            _ = cancel.cancelled() => Err(DispatchError::Cancelled),
            result = handler => result.map_err(|source| DispatchError::Handler {
                group: matched.group().to_owned(),
                method: matched.method().to_owned(),
                source,
            }),
        }
    }
}
