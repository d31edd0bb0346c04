use chrono::Utc;
use dashmap::DashMap;

use super::{SessionEvent, SessionEventKind};
use crate::session::UserId;

/// Almacenamiento de eventos append-only, particionado por usuario.
pub trait EventStore: Send + Sync {
    /// Agrega un evento a partir de su kind y devuelve el evento completo (con seq y ts).
    fn append_kind(&self, user: &UserId, kind: SessionEventKind) -> SessionEvent;
    /// Lista eventos de un usuario (orden ascendente por seq).
    fn list(&self, user: &UserId) -> Vec<SessionEvent>;

    /// Variante compacta de eventos (una letra por evento), útil en tests.
    fn event_variants(&self, user: &UserId) -> Vec<&'static str> {
        self.list(user)
            .iter()
            .map(|e| match e.kind {
                SessionEventKind::SessionStarted { .. } => "S",
                SessionEventKind::ArtifactRecorded { .. } => "A",
                SessionEventKind::StepAdvanced { .. } => "N",
                SessionEventKind::SessionCancelled { .. } => "X",
                SessionEventKind::SessionCompleted { .. } => "C",
                SessionEventKind::ArchiveDispatchFailed { .. } => "F",
            })
            .collect()
    }
}

#[derive(Debug, Default)]
struct UserJournal {
    next_seq: u64,
    events: Vec<SessionEvent>,
}

/// Diario en memoria. Cada usuario conserva sólo su última corrida: un
/// `SessionStarted` descarta los eventos previos. `seq` sigue creciendo
/// entre corridas.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    inner: DashMap<UserId, UserJournal>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventStore for InMemoryEventStore {
    fn append_kind(&self, user: &UserId, kind: SessionEventKind) -> SessionEvent {
        let mut journal = self.inner.entry(user.clone()).or_default();
        if matches!(kind, SessionEventKind::SessionStarted { .. }) {
            journal.events.clear();
        }
        let ev = SessionEvent { seq: journal.next_seq,
                                user: user.clone(),
                                kind,
                                ts: Utc::now() };
        journal.next_seq += 1;
        journal.events.push(ev.clone());
        ev
    }

    fn list(&self, user: &UserId) -> Vec<SessionEvent> {
        self.inner.get(user).map(|j| j.events.clone()).unwrap_or_default()
    }
}
