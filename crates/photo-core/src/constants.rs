//! Constantes del motor de sesiones.

/// Catálogo por defecto: flujo de instalación de medidores. Se usa cuando la
/// configuración no define pasos propios.
pub const DEFAULT_STEPS: &[&str] = &["overview photo", "gauge photo", "serial plate photo", "seal photo"];

/// Separador entre líneas del resumen final ("A: 1, B: 0").
pub const DEFAULT_SUMMARY_SEPARATOR: &str = ", ";
