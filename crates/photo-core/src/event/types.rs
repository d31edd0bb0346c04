//! Tipos de evento de sesión y estructura `SessionEvent`.
//!
//! Rol en el flujo:
//! - Cada transición del `SessionEngine` emite un evento al `EventStore`
//!   append-only del usuario.
//! - El diario sirve para auditoría e inspección; el estado vivo sigue
//!   estando en el `SessionStore`.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::ControlAction;
use crate::session::{ArtifactRef, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEventKind {
    /// Nueva corrida. Invariante: primer evento de cada `run_id`.
    SessionStarted { run_id: Uuid, step_count: usize },
    /// Foto registrada contra el paso activo.
    ArtifactRecorded {
        step_index: usize,
        step_name: String,
        artifact: ArtifactRef,
    },
    /// confirm/skip movió el cursor de `from` a `to` (`to == N` al completar).
    StepAdvanced { from: usize, to: usize, action: ControlAction },
    /// Corrida cancelada; `discarded` = artifacts descartados.
    SessionCancelled { at_step: usize, discarded: usize },
    /// Corrida completada y drenada.
    SessionCompleted { artifact_count: usize },
    /// Un envío al archivo falló (no se reintenta). Se registra después de
    /// soltar el lock del usuario, así que puede quedar detrás del
    /// `SessionStarted` de una corrida nueva; `run_id` identifica la corrida
    /// a la que pertenece.
    ArchiveDispatchFailed {
        run_id: Uuid,
        step_name: String,
        artifact: ArtifactRef,
        reason: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEvent {
    pub seq: u64, // asignado por el store (orden append por usuario)
    pub user: UserId,
    pub kind: SessionEventKind,
    pub ts: DateTime<Utc>,
}
