use photo_core::CoreEngineError;
use thiserror::Error;

/// Errores que cortan el arranque o el loop de la consola.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Fallo interno del engine de fotos: {0}")]
    Internal(String),
    #[error("No se pudo leer la entrada de la consola: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuración de PhotoFlow inválida: {0}")]
    Config(String),
}

impl From<CoreEngineError> for CoreError {
    fn from(err: CoreEngineError) -> Self {
        match err {
            CoreEngineError::Internal(msg) => CoreError::Internal(msg),
            other => CoreError::Config(other.to_string()),
        }
    }
}
