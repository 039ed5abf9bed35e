//! Event dispatcher.
//!
//! The [`Dispatcher`] composes the router and invoker over a frozen
//! [`HandlerTable`]: one call routes an inbound event and, on a match,
//! lazily invokes the selected handler method.
//!
//! A no-match is a normal outcome ([`DispatchOutcome::NoMatch`]), never an
//! error; callers decide what a silent event means (no-op, default reply).
//!
//! # Thread Safety
//!
//! `Dispatcher` is `Clone + Send + Sync`. Each `dispatch` call is fully
//! self-contained given the immutable table and a fresh event, so any
//! number of request-handling workers may share one dispatcher.
//!
//! ```rust,ignore
//! let table = Registry::new().with(greeter_group).finish()?;
//! let dispatcher = Dispatcher::new(table);
//!
//! match dispatcher.dispatch(event).await? {
//!     DispatchOutcome::Handled { group, method } => info!(%group, %method, "handled"),
//!     DispatchOutcome::NoMatch => {}
//! }
//! ```

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{Instrument, Level, debug, span};

use crate::foundation::context::EventContext;
use crate::foundation::error::DispatchResult;
use crate::foundation::event::Event;
use crate::framework::invoker::Invoker;
use crate::framework::registry::HandlerTable;
use crate::framework::router::Router;

/// The result of dispatching one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A handler method matched and completed.
    Handled {
        /// Name of the handler group that ran.
        group: String,
        /// Name of the handler method that ran.
        method: String,
    },
    /// No handler method satisfied its validators.
    NoMatch,
}

impl DispatchOutcome {
    /// Returns true if a handler ran.
    pub fn is_handled(&self) -> bool {
        matches!(self, Self::Handled { .. })
    }
}

/// Routes and invokes handlers for inbound events.
#[derive(Clone)]
pub struct Dispatcher {
    table: Arc<HandlerTable>,
    router: Router,
    invoker: Invoker,
}

impl Dispatcher {
    /// Creates a dispatcher over a frozen handler table.
    pub fn new(table: Arc<HandlerTable>) -> Self {
        Self {
            table,
            router: Router::new(),
            invoker: Invoker::new(),
        }
    }

    /// Returns the handler table this dispatcher reads.
    pub fn table(&self) -> &Arc<HandlerTable> {
        &self.table
    }

    /// Dispatches an event with a fresh, never-cancelled token.
    pub async fn dispatch(&self, event: Event) -> DispatchResult<DispatchOutcome> {
        self.dispatch_with_cancel(event, CancellationToken::new())
            .await
    }

    /// Dispatches an event under the caller's cancellation token.
    ///
    /// The token is propagated into the handler call through the
    /// [`EventContext`], and the invoker aborts the handler when it fires.
    pub async fn dispatch_with_cancel(
        &self,
        event: Event,
        cancel: CancellationToken,
    ) -> DispatchResult<DispatchOutcome> {
        let dispatch_span = span!(Level::DEBUG, "dispatch", kind = %event.kind());

        async move {
            let matched = self.router.route(&event, &self.table)?;
            match matched {
                Some(matched) => {
                    let ctx = Arc::new(EventContext::with_cancellation(event, cancel));
                    self.invoker.invoke(&self.table, &matched, ctx).await?;
                    Ok(DispatchOutcome::Handled {
                        group: matched.group().to_owned(),
                        method: matched.method().to_owned(),
                    })
                }
                None => {
                    debug!("no handler matched");
                    Ok(DispatchOutcome::NoMatch)
                }
            }
        }
        .instrument(dispatch_span)
        .await
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("group_count", &self.table.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::registry::{GroupBuilder, Registry};
    use crate::framework::validator::{Combinator, PayloadValidator, Validator};
    use serde_json::json;
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Recorder {
        hits: Arc<AtomicUsize>,
    }

    async fn record(handler: Arc<Recorder>, _: Arc<EventContext>) -> Result<(), Infallible> {
        handler.hits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn dispatcher_with_recorder(hits: Arc<AtomicUsize>) -> Dispatcher {
        let group = GroupBuilder::new("recorder", move || Recorder {
            hits: Arc::clone(&hits),
        })
        .on_kind("message_event")
        .method_with(
            "start",
            [PayloadValidator::strict(json!({"command": "start"})).boxed()],
            record,
        )
        .build();

        Dispatcher::new(Registry::new().with(group).finish().unwrap())
    }

    #[tokio::test]
    async fn matched_event_runs_exactly_one_handler() {
        let hits = Arc::new(AtomicUsize::new(0));
        let dispatcher = dispatcher_with_recorder(Arc::clone(&hits));

        let outcome = dispatcher
            .dispatch(Event::new("message_event", r#"{"command":"start"}"#))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            DispatchOutcome::Handled {
                group: "recorder".into(),
                method: "start".into(),
            }
        );
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unmatched_event_is_a_silent_no_match() {
        let hits = Arc::new(AtomicUsize::new(0));
        let dispatcher = dispatcher_with_recorder(Arc::clone(&hits));

        let outcome = dispatcher
            .dispatch(Event::new("unknown_event", r#"{"command":"start"}"#))
            .await
            .unwrap();

        assert_eq!(outcome, DispatchOutcome::NoMatch);
        assert!(!outcome.is_handled());
        assert_eq!(hits.load(Ordering::SeqCst), 0, "no handler may run on no-match");
    }

    #[tokio::test]
    async fn dispatcher_is_shareable_across_tasks() {
        let hits = Arc::new(AtomicUsize::new(0));
        let dispatcher = dispatcher_with_recorder(Arc::clone(&hits));

        let mut workers = Vec::new();
        for _ in 0..8 {
            let dispatcher = dispatcher.clone();
            workers.push(tokio::spawn(async move {
                dispatcher
                    .dispatch(Event::new("message_event", r#"{"command":"start"}"#))
                    .await
                    .unwrap()
            }));
        }
        for worker in workers {
            assert!(worker.await.unwrap().is_handled());
        }

        assert_eq!(hits.load(Ordering::SeqCst), 8);
    }

    #[tokio::test]
    async fn any_combinator_is_honoured_end_to_end() {
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_in = Arc::clone(&hits);

        let group = GroupBuilder::new("either", move || Recorder {
            hits: Arc::clone(&hits_in),
        })
        .on_kind("message_new")
        .method_matching(
            "start_or_help",
            Combinator::Any,
            [
                PayloadValidator::strict(json!({"command": "start"})).boxed(),
                PayloadValidator::strict(json!({"command": "help"})).boxed(),
            ],
            record,
        )
        .build();

        let dispatcher = Dispatcher::new(Registry::new().with(group).finish().unwrap());

        let outcome = dispatcher
            .dispatch(Event::new("message_new", r#"{"command":"help"}"#))
            .await
            .unwrap();
        assert!(outcome.is_handled());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn envelope_to_outcome_round_trip() {
        let hits = Arc::new(AtomicUsize::new(0));
        let dispatcher = dispatcher_with_recorder(Arc::clone(&hits));

        let event =
            Event::from_envelope(r#"{"type":"message_event","object":{"command":"start"}}"#)
                .unwrap();
        assert!(dispatcher.dispatch(event).await.unwrap().is_handled());
    }
}
