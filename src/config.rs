//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) una sola vez y expone `AppConfig`:
//! catálogo de pasos, destino de archivo y separador del resumen.
use std::env;

use once_cell::sync::Lazy;
use photo_core::constants::{DEFAULT_STEPS, DEFAULT_SUMMARY_SEPARATOR};
use photo_core::StepCatalog;
use serde::Serialize;

use crate::errors::CoreError;

pub const STEPS_VAR: &str = "PHOTOFLOW_STEPS";
pub const ARCHIVE_DESTINATION_VAR: &str = "PHOTOFLOW_ARCHIVE_DESTINATION";
pub const SUMMARY_SEPARATOR_VAR: &str = "PHOTOFLOW_SUMMARY_SEPARATOR";

const DEFAULT_ARCHIVE_DESTINATION: &str = "archive";

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenvy::dotenv(); // ignora error si no existe .env
});

/// Configuración global de la aplicación.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppConfig {
    /// Nombres de paso en orden.
    pub steps: Vec<String>,
    /// Identificador del destino de archivo (chat, canal, bucket...).
    pub archive_destination: String,
    pub summary_separator: String,
}

impl AppConfig {
    /// Lee la configuración del entorno (tras cargar `.env`).
    pub fn from_env() -> Result<Self, CoreError> {
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero con una fuente de variables arbitraria.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
        where F: Fn(&str) -> Option<String>
    {
        let steps = match lookup(STEPS_VAR) {
            Some(raw) => {
                let steps: Vec<String> = raw.split(',')
                                            .map(str::trim)
                                            .filter(|s| !s.is_empty())
                                            .map(str::to_string)
                                            .collect();
                if steps.is_empty() {
                    return Err(CoreError::Config(format!("{STEPS_VAR} no define ningún paso")));
                }
                steps
            }
            None => {
                log::debug!("{STEPS_VAR} no definido; usando catálogo por defecto");
                DEFAULT_STEPS.iter().map(|s| s.to_string()).collect()
            }
        };
        let archive_destination = lookup(ARCHIVE_DESTINATION_VAR).map(|v| v.trim().to_string())
                                                                 .filter(|v| !v.is_empty())
                                                                 .unwrap_or_else(|| DEFAULT_ARCHIVE_DESTINATION.to_string());
        let summary_separator = lookup(SUMMARY_SEPARATOR_VAR).unwrap_or_else(|| DEFAULT_SUMMARY_SEPARATOR.to_string());
        Ok(Self { steps,
                  archive_destination,
                  summary_separator })
    }

    /// Construye el catálogo validado (sin duplicados).
    pub fn catalog(&self) -> Result<StepCatalog, CoreError> {
        Ok(StepCatalog::new(self.steps.iter().cloned())?)
    }
}
