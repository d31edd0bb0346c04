use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::{ArtifactLog, ArtifactRef, Session, UserId};

/// Estado de un usuario: sesión + log de artifacts. Ambos viven y se limpian
/// juntos, por eso comparten el mismo mutex.
#[derive(Debug, Default)]
pub struct UserSlot {
    session: Option<Session>,
    artifacts: ArtifactLog,
}

impl UserSlot {
    /// Snapshot de la sesión actual, si existe.
    pub fn get_or_none(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Reemplaza la sesión del usuario.
    pub fn put(&mut self, session: Session) {
        self.session = Some(session);
    }

    pub fn append_artifact(&mut self, step_name: &str, artifact: ArtifactRef) {
        self.artifacts.append(step_name, artifact);
    }

    /// Devuelve todo lo acumulado y deja el log vacío.
    pub fn drain_artifacts(&mut self) -> ArtifactLog {
        self.artifacts.take()
    }

    pub fn artifacts(&self) -> &ArtifactLog {
        &self.artifacts
    }

    /// Sin sesión activa ni artifacts pendientes: el slot puede descartarse.
    pub fn is_idle(&self) -> bool {
        !self.session.as_ref().is_some_and(Session::is_active) && self.artifacts.is_empty()
    }
}

/// Guard de acceso exclusivo al slot de un usuario.
pub type SlotGuard = OwnedMutexGuard<UserSlot>;

/// Contrato del store de sesiones.
///
/// `lock` entrega acceso exclusivo al `UserSlot` de un usuario: mientras el
/// guard viva ninguna otra operación sobre ese usuario puede intercalarse.
/// Usuarios distintos no se bloquean entre sí. Los métodos por defecto
/// (`get_or_none`, `put`, ...) toman y sueltan el lock en una sola operación.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Acceso exclusivo al slot de `user` (se crea vacío si no existe).
    async fn lock(&self, user: &UserId) -> SlotGuard;

    /// Descarta el slot de `user` si está ocioso y nadie más lo referencia.
    /// Devuelve `true` si se eliminó.
    fn release_if_idle(&self, user: &UserId) -> bool;

    /// Cantidad de usuarios con slot presente.
    fn tracked_users(&self) -> usize;

    async fn get_or_none(&self, user: &UserId) -> Option<Session> {
        self.lock(user).await.get_or_none().cloned()
    }

    async fn put(&self, user: &UserId, session: Session) {
        self.lock(user).await.put(session);
    }

    async fn append_artifact(&self, user: &UserId, step_name: &str, artifact: ArtifactRef) {
        self.lock(user).await.append_artifact(step_name, artifact);
    }

    async fn drain_artifacts(&self, user: &UserId) -> ArtifactLog {
        self.lock(user).await.drain_artifacts()
    }
}

/// Store en memoria: tabla de locks por usuario sobre `DashMap`.
#[derive(Debug, Default, Clone)]
pub struct InMemorySessionStore {
    slots: Arc<DashMap<UserId, Arc<Mutex<UserSlot>>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, user: &UserId) -> Arc<Mutex<UserSlot>> {
        self.slots.entry(user.clone()).or_default().clone()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn lock(&self, user: &UserId) -> SlotGuard {
        // El Arc se clona dentro del shard de DashMap y el await ocurre fuera,
        // así un usuario lento no bloquea a otros del mismo shard.
        self.slot(user).lock_owned().await
    }

    fn release_if_idle(&self, user: &UserId) -> bool {
        self.slots
            .remove_if(user, |_, slot| {
                Arc::strong_count(slot) == 1 && slot.try_lock().map(|s| s.is_idle()).unwrap_or(false)
            })
            .is_some()
    }

    fn tracked_users(&self) -> usize {
        self.slots.len()
    }
}
