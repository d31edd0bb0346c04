//! Identidades y estado de sesión.
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identidad del usuario tal como la entrega el transporte.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Handle opaco a una foto subida (por ejemplo un `file_id` del transporte).
/// El core nunca interpreta su contenido.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactRef(pub String);

impl ArtifactRef {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Motivo por el que una corrida dejó de estar activa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminalReason {
    Completed,
    Cancelled,
}

/// Fase de la sesión.
///
/// Las transiciones válidas son:
/// - `Active { step }` -> `Active { step + 1 }` (confirm/skip con pasos restantes)
/// - `Active { step }` -> `Terminal { Completed, at_step: N }` (confirm/skip en el último)
/// - `Active { step }` -> `Terminal { Cancelled, at_step: step }`
///
/// `NoSession` se representa como ausencia de `Session` en el store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Active { step: usize },
    Terminal { reason: TerminalReason, at_step: usize },
}

impl SessionPhase {
    /// Avanza un paso contra un catálogo de `step_count` pasos. Una fase
    /// terminal no cambia.
    pub fn advanced(self, step_count: usize) -> Self {
        match self {
            SessionPhase::Active { step } if step + 1 >= step_count => SessionPhase::Terminal { reason: TerminalReason::Completed,
                                                                                                 at_step: step_count },
            SessionPhase::Active { step } => SessionPhase::Active { step: step + 1 },
            terminal => terminal,
        }
    }

    pub fn cancelled(self) -> Self {
        match self {
            SessionPhase::Active { step } => SessionPhase::Terminal { reason: TerminalReason::Cancelled,
                                                                      at_step: step },
            terminal => terminal,
        }
    }
}

/// Sesión de un usuario: una corrida por el catálogo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Identificador de la corrida; cambia en cada `start`.
    pub run_id: Uuid,
    pub phase: SessionPhase,
    pub started_at: DateTime<Utc>,
}

impl Session {
    /// Nueva corrida activa en el paso 0.
    pub fn start() -> Self {
        Self { run_id: Uuid::new_v4(),
               phase: SessionPhase::Active { step: 0 },
               started_at: Utc::now() }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, SessionPhase::Active { .. })
    }

    /// Índice del paso actual (`0..=N`); en fase terminal es el paso en el
    /// que terminó la corrida.
    pub fn current_step(&self) -> usize {
        match self.phase {
            SessionPhase::Active { step } => step,
            SessionPhase::Terminal { at_step, .. } => at_step,
        }
    }

    /// Paso activo, `None` si la sesión ya es terminal.
    pub fn active_step(&self) -> Option<usize> {
        match self.phase {
            SessionPhase::Active { step } => Some(step),
            SessionPhase::Terminal { .. } => None,
        }
    }
}
