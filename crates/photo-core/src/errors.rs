//! Errores específicos del core.
//!
//! La taxonomía es deliberadamente delgada: los eventos ignorables no son
//! errores (se modelan como `None`) y los fallos de archivo viven en
//! `finalize::ArchiveError`. Aquí sólo quedan errores de construcción del
//! catálogo y de uso indebido de índices.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum CoreEngineError {
    #[error("step index {index} out of range (catalog has {count} steps)")] StepOutOfRange { index: usize, count: usize },
    #[error("step catalog must contain at least one step")] EmptyCatalog,
    #[error("step name at index {0} is blank")] BlankStepName(usize),
    #[error("duplicate step name: {0}")] DuplicateStepName(String),
    #[error("internal: {0}")] Internal(String),
}
