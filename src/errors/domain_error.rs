use thiserror::Error;

/// Errores de entrada del usuario de consola.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Línea de consola inválida: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_names_the_offending_input() {
        let err = DomainError::Validation("falta la referencia de la foto".into());
        assert_eq!(err.to_string(), "Línea de consola inválida: falta la referencia de la foto");
    }
}
