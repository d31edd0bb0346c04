//! Core SessionEngine implementation

use std::sync::Arc;

use log::{debug, info};

use super::{AdvanceOutcome, ControlAction, EngineBuilder, Reply, SessionCommand, SessionStatus};
use crate::catalog::StepCatalog;
use crate::event::{EventStore, InMemoryEventStore, SessionEventKind};
use crate::finalize::{ArchiveSink, Finalizer};
use crate::session::{ArtifactRef, InMemorySessionStore, Session, SessionStore, UserId};

/// Máquina de estados de sesión por usuario.
///
/// Cada operación toma el lock del usuario en el `SessionStore` durante
/// toda la transición, de modo que eventos concurrentes del mismo usuario
/// se serializan y usuarios distintos avanzan en paralelo. Al completar,
/// el log se drena bajo ese mismo lock (junto con el paso a inactiva) y el
/// lock se suelta antes de despachar al archivo.
pub struct SessionEngine<S = InMemorySessionStore, E = InMemoryEventStore>
    where S: SessionStore,
          E: EventStore
{
    catalog: StepCatalog,
    store: Arc<S>,
    events: Arc<E>,
    finalizer: Finalizer,
}

impl SessionEngine<InMemorySessionStore, InMemoryEventStore> {
    /// Engine con stores en memoria y el sink indicado.
    pub fn new(catalog: StepCatalog, sink: Arc<dyn ArchiveSink>) -> Self {
        EngineBuilder::new(catalog).archive_sink(sink).build()
    }

    /// Crea un nuevo builder para configurar el engine
    #[inline]
    pub fn builder(catalog: StepCatalog) -> EngineBuilder<InMemorySessionStore, InMemoryEventStore> {
        EngineBuilder::new(catalog)
    }
}

impl<S, E> SessionEngine<S, E>
    where S: SessionStore,
          E: EventStore
{
    pub(crate) fn from_parts(catalog: StepCatalog, store: Arc<S>, events: Arc<E>, finalizer: Finalizer) -> Self {
        Self { catalog,
               store,
               events,
               finalizer }
    }

    pub fn catalog(&self) -> &StepCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn event_store(&self) -> &E {
        &self.events
    }

    fn step_name(&self, index: usize) -> &str {
        // Los índices provienen de una `SessionPhase::Active` que nunca
        // llega a `count()`; un fallo aquí es un bug del engine.
        self.catalog
            .step_at(index)
            .expect("active step index must be inside the step catalog")
    }

    /// Start: crea/sobrescribe la sesión en el paso 0 y descarta cualquier
    /// log previo no finalizado. Devuelve el prompt del paso 0.
    pub async fn start(&self, user: &UserId) -> Reply {
        let mut slot = self.store.lock(user).await;
        let discarded = slot.drain_artifacts();
        if !discarded.is_empty() {
            info!("user {user}: restart discards {} unfinalized artifacts", discarded.len());
        }
        let session = Session::start();
        let run_id = session.run_id;
        slot.put(session);
        self.events.append_kind(user,
                                SessionEventKind::SessionStarted { run_id,
                                                                   step_count: self.catalog.count() });
        debug!("user {user}: session {run_id} started");
        Reply::Prompt { step_name: self.step_name(0).to_string() }
    }

    /// SubmitArtifact: registra la foto bajo el paso activo. Sin sesión
    /// activa es un no-op silencioso (`None`).
    pub async fn submit_artifact(&self, user: &UserId, artifact: ArtifactRef) -> Option<Reply> {
        let mut slot = self.store.lock(user).await;
        let Some(step_index) = slot.get_or_none()
                                   .and_then(Session::active_step)
                                   .filter(|step| *step < self.catalog.count())
        else {
            debug!("user {user}: ignoring unsolicited artifact {artifact}");
            drop(slot);
            self.store.release_if_idle(user);
            return None;
        };
        let step_name = self.step_name(step_index).to_string();
        slot.append_artifact(&step_name, artifact.clone());
        self.events.append_kind(user,
                                SessionEventKind::ArtifactRecorded { step_index,
                                                                     step_name: step_name.clone(),
                                                                     artifact });
        Some(Reply::Ack { step_name })
    }

    /// Advance: confirm/skip avanzan un paso (completando al llegar a N);
    /// cancel termina la corrida y descarta el log. Sin sesión activa es un
    /// no-op silencioso (`None`).
    pub async fn advance(&self, user: &UserId, action: ControlAction) -> Option<AdvanceOutcome> {
        let mut slot = self.store.lock(user).await;
        let Some(mut session) = slot.get_or_none().filter(|s| s.is_active()).cloned() else {
            debug!("user {user}: ignoring {action} without active session");
            drop(slot);
            self.store.release_if_idle(user);
            return None;
        };
        let from = session.current_step();

        if !action.advances() {
            session.phase = session.phase.cancelled();
            slot.put(session);
            let discarded = slot.drain_artifacts().len();
            self.events.append_kind(user,
                                    SessionEventKind::SessionCancelled { at_step: from,
                                                                         discarded });
            drop(slot);
            self.store.release_if_idle(user);
            info!("user {user}: session cancelled at step {from} ({discarded} artifacts discarded)");
            return Some(AdvanceOutcome::Cancelled { discarded });
        }

        session.phase = session.phase.advanced(self.catalog.count());
        let to = session.current_step();
        let completed = !session.is_active();
        let run_id = session.run_id;
        slot.put(session);
        self.events.append_kind(user, SessionEventKind::StepAdvanced { from, to, action });

        if !completed {
            let step_name = self.step_name(to).to_string();
            debug!("user {user}: {action} moved to step {to} ({step_name})");
            return Some(AdvanceOutcome::Prompt { step_index: to,
                                                 step_name });
        }

        // Drenado atómico con el paso a inactiva: nada enviado después de
        // este punto puede entrar al lote ni quedar atribuido a esta corrida.
        let drained = slot.drain_artifacts();
        self.events.append_kind(user,
                                SessionEventKind::SessionCompleted { artifact_count: drained.len() });
        drop(slot);

        let finalization = self.finalizer.complete(user, drained).await;
        for failure in &finalization.report.failures {
            self.events.append_kind(user,
                                    SessionEventKind::ArchiveDispatchFailed { run_id,
                                                                              step_name: failure.item.step_name.clone(),
                                                                              artifact: failure.item.artifact.clone(),
                                                                              reason: failure.error.to_string() });
        }
        self.store.release_if_idle(user);
        Some(AdvanceOutcome::Completed(finalization))
    }

    /// Nombre del paso activo, `None` sin sesión activa.
    pub async fn active_step(&self, user: &UserId) -> Option<String> {
        let slot = self.store.lock(user).await;
        let step = slot.get_or_none()
                       .and_then(Session::active_step)
                       .map(|step| self.step_name(step).to_string());
        drop(slot);
        if step.is_none() {
            self.store.release_if_idle(user);
        }
        step
    }

    pub async fn status(&self, user: &UserId) -> SessionStatus {
        let slot = self.store.lock(user).await;
        let active = slot.get_or_none().and_then(Session::active_step);
        match active {
            Some(step_index) => {
                let step_name = self.step_name(step_index).to_string();
                let recorded = slot.artifacts().count_for(&step_name);
                SessionStatus::Active { step_index,
                                        step_name,
                                        recorded }
            }
            None => {
                drop(slot);
                self.store.release_if_idle(user);
                SessionStatus::NoSession
            }
        }
    }

    /// Punto de entrada único para el transporte: aplica el comando y
    /// devuelve las respuestas para el usuario (vacío si el evento se
    /// ignora).
    pub async fn handle(&self, user: &UserId, command: SessionCommand) -> Vec<Reply> {
        match command {
            SessionCommand::Start => vec![self.start(user).await],
            SessionCommand::Photo(artifact) => self.submit_artifact(user, artifact).await.into_iter().collect(),
            SessionCommand::Control(action) => self.advance(user, action).await.map(Reply::from).into_iter().collect(),
            SessionCommand::Status => vec![Reply::Status(self.status(user).await)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finalize::NullArchiveSink;

    fn engine() -> SessionEngine {
        SessionEngine::new(StepCatalog::new(["A", "B", "C"]).expect("catalog"), Arc::new(NullArchiveSink))
    }

    #[tokio::test]
    async fn confirm_increments_by_one_until_completion() {
        let engine = engine();
        let user = UserId(1);
        engine.start(&user).await;

        for expected in 1..3 {
            match engine.advance(&user, ControlAction::Confirm).await {
                Some(AdvanceOutcome::Prompt { step_index, .. }) => assert_eq!(step_index, expected),
                other => panic!("expected prompt, got {other:?}"),
            }
            let session = engine.store().get_or_none(&user).await.expect("session");
            assert_eq!(session.current_step(), expected);
        }
        assert!(matches!(engine.advance(&user, ControlAction::Skip).await, Some(AdvanceOutcome::Completed(_))));
        assert_eq!(engine.active_step(&user).await, None);
        // tras completar, advance vuelve a ser no-op
        assert!(engine.advance(&user, ControlAction::Confirm).await.is_none());
    }

    #[tokio::test]
    async fn events_without_session_are_ignored() {
        let engine = engine();
        let user = UserId(2);
        assert!(engine.submit_artifact(&user, ArtifactRef::new("p")).await.is_none());
        assert!(engine.advance(&user, ControlAction::Cancel).await.is_none());
        assert_eq!(engine.store().tracked_users(), 0);
        assert_eq!(engine.status(&user).await, SessionStatus::NoSession);
        assert!(engine.event_store().list(&user).is_empty());
    }

    #[tokio::test]
    async fn queries_without_session_leave_no_slot_behind() {
        let engine = engine();
        for id in 0..100 {
            let user = UserId(id);
            assert_eq!(engine.status(&user).await, SessionStatus::NoSession);
            assert_eq!(engine.active_step(&user).await, None);
            assert_eq!(engine.handle(&user, SessionCommand::Status).await,
                       vec![Reply::Status(SessionStatus::NoSession)]);
        }
        assert_eq!(engine.store().tracked_users(), 0);

        let user = UserId(500);
        engine.start(&user).await;
        assert!(engine.active_step(&user).await.is_some());
        assert_eq!(engine.store().tracked_users(), 1, "active sessions keep their slot");
    }

    #[tokio::test]
    async fn status_reports_recorded_for_current_step() {
        let engine = engine();
        let user = UserId(3);
        engine.start(&user).await;
        engine.submit_artifact(&user, ArtifactRef::new("p1")).await;
        engine.submit_artifact(&user, ArtifactRef::new("p2")).await;
        assert_eq!(engine.status(&user).await,
                   SessionStatus::Active { step_index: 0,
                                           step_name: "A".into(),
                                           recorded: 2 });
        engine.advance(&user, ControlAction::Confirm).await;
        assert_eq!(engine.status(&user).await,
                   SessionStatus::Active { step_index: 1,
                                           step_name: "B".into(),
                                           recorded: 0 });
    }

    #[tokio::test]
    async fn journal_follows_transitions() {
        let engine = engine();
        let user = UserId(4);
        engine.start(&user).await;
        engine.submit_artifact(&user, ArtifactRef::new("p1")).await;
        engine.advance(&user, ControlAction::Confirm).await;
        engine.advance(&user, ControlAction::Cancel).await;
        assert_eq!(engine.event_store().event_variants(&user), vec!["S", "A", "N", "X"]);
    }
}
