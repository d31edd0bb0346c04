//! Vocabulario cerrado de comandos y respuestas.
//!
//! El motor sólo ramifica sobre tres acciones enumeradas más los eventos
//! implícitos de foto; nada de texto libre.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::finalize::Finalization;
use crate::session::ArtifactRef;

/// Acción de control sobre la sesión activa. `Confirm` y `Skip` avanzan
/// igual: ambos mueven el cursor un paso.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlAction {
    Confirm,
    Skip,
    Cancel,
}

impl ControlAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlAction::Confirm => "confirm",
            ControlAction::Skip => "skip",
            ControlAction::Cancel => "cancel",
        }
    }

    /// confirm/skip avanzan; cancel termina.
    pub fn advances(&self) -> bool {
        !matches!(self, ControlAction::Cancel)
    }
}

impl fmt::Display for ControlAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown control action: {0}")]
pub struct ParseActionError(pub String);

impl FromStr for ControlAction {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "confirm" => Ok(ControlAction::Confirm),
            "skip" => Ok(ControlAction::Skip),
            "cancel" => Ok(ControlAction::Cancel),
            other => Err(ParseActionError(other.to_string())),
        }
    }
}

/// Evento entrante ya decodificado por el transporte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Start,
    Photo(ArtifactRef),
    Control(ControlAction),
    Status,
}

/// Estado visible de la sesión de un usuario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    NoSession,
    Active {
        step_index: usize,
        step_name: String,
        /// Fotos ya registradas para el paso actual.
        recorded: usize,
    },
}

/// Resultado de `advance` cuando hay sesión activa.
#[derive(Debug, Clone)]
pub enum AdvanceOutcome {
    /// Quedan pasos: pedir el siguiente.
    Prompt { step_index: usize, step_name: String },
    /// Corrida cancelada; `discarded` = fotos descartadas.
    Cancelled { discarded: usize },
    /// Último paso confirmado: la corrida se drenó y archivó.
    Completed(Finalization),
}

/// Efecto saliente hacia el usuario. El envío al archivo no aparece aquí:
/// lo hace el `Finalizer` directamente contra el `ArchiveSink`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Prompt { step_name: String },
    Ack { step_name: String },
    CancelAck,
    Summary { text: String },
    Status(SessionStatus),
}

impl From<AdvanceOutcome> for Reply {
    fn from(outcome: AdvanceOutcome) -> Self {
        match outcome {
            AdvanceOutcome::Prompt { step_name, .. } => Reply::Prompt { step_name },
            AdvanceOutcome::Cancelled { .. } => Reply::CancelAck,
            AdvanceOutcome::Completed(fin) => Reply::Summary { text: fin.summary_text },
        }
    }
}
