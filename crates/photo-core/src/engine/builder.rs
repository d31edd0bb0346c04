//! Builder para `SessionEngine`.
//!
//! Permite reemplazar el store de sesiones, el diario de eventos y el sink
//! de archivo antes de construir el engine. Por defecto todo vive en
//! memoria y el sink descarta (`NullArchiveSink`).
//!
//! ```ignore
//! let engine = SessionEngine::builder(catalog)
//!     .archive_sink(Arc::new(sink))
//!     .summary_separator("\n")
//!     .build();
//! ```

use std::sync::Arc;

use crate::catalog::StepCatalog;
use crate::constants::DEFAULT_SUMMARY_SEPARATOR;
use crate::engine::SessionEngine;
use crate::event::{EventStore, InMemoryEventStore};
use crate::finalize::{ArchiveSink, Finalizer, NullArchiveSink};
use crate::session::{InMemorySessionStore, SessionStore};

pub struct EngineBuilder<S: SessionStore, E: EventStore> {
    catalog: StepCatalog,
    store: Arc<S>,
    events: Arc<E>,
    sink: Arc<dyn ArchiveSink>,
    summary_separator: String,
}

impl EngineBuilder<InMemorySessionStore, InMemoryEventStore> {
    pub fn new(catalog: StepCatalog) -> Self {
        Self { catalog,
               store: Arc::new(InMemorySessionStore::new()),
               events: Arc::new(InMemoryEventStore::new()),
               sink: Arc::new(NullArchiveSink),
               summary_separator: DEFAULT_SUMMARY_SEPARATOR.to_string() }
    }
}

impl<S: SessionStore, E: EventStore> EngineBuilder<S, E> {
    /// Reemplaza el store de sesiones (se comparte vía `Arc`).
    pub fn store<S2: SessionStore>(self, store: Arc<S2>) -> EngineBuilder<S2, E> {
        EngineBuilder { catalog: self.catalog,
                        store,
                        events: self.events,
                        sink: self.sink,
                        summary_separator: self.summary_separator }
    }

    /// Reemplaza el diario de eventos.
    pub fn event_store<E2: EventStore>(self, events: Arc<E2>) -> EngineBuilder<S, E2> {
        EngineBuilder { catalog: self.catalog,
                        store: self.store,
                        events,
                        sink: self.sink,
                        summary_separator: self.summary_separator }
    }

    pub fn archive_sink(mut self, sink: Arc<dyn ArchiveSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn summary_separator(mut self, separator: impl Into<String>) -> Self {
        self.summary_separator = separator.into();
        self
    }

    #[inline]
    pub fn build(self) -> SessionEngine<S, E> {
        let finalizer = Finalizer::new(self.catalog.clone(), self.sink).with_summary_separator(self.summary_separator);
        SessionEngine::from_parts(self.catalog, self.store, self.events, finalizer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{ArtifactRef, UserId};
    use crate::engine::{AdvanceOutcome, ControlAction};

    #[tokio::test]
    async fn shared_store_is_visible_from_outside() {
        let store = Arc::new(InMemorySessionStore::new());
        let engine = SessionEngine::builder(StepCatalog::new(["only"]).expect("catalog")).store(store.clone())
                                                                                      .summary_separator("; ")
                                                                                      .build();
        let user = UserId(9);
        engine.start(&user).await;
        engine.submit_artifact(&user, ArtifactRef::new("x")).await;
        assert_eq!(store.tracked_users(), 1);

        match engine.advance(&user, ControlAction::Confirm).await {
            Some(AdvanceOutcome::Completed(fin)) => assert_eq!(fin.summary_text, "only: 1"),
            other => panic!("expected completion, got {other:?}"),
        }
        assert_eq!(store.tracked_users(), 0, "idle slot released after completion");
    }
}
