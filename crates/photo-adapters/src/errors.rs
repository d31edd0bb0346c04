//! Errores de decodificación de entrada.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum AdapterError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("photo marker without artifact reference")]
    MissingArtifactRef,
    #[error("empty update")]
    EmptyUpdate,
}
