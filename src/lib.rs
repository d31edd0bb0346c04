//! PhotoFlow Rust Library
//!
//! Este crate actúa como la capa de aplicación de PhotoFlow:
//! - Expone `errors` para manejar errores de núcleo y dominio.
//! - Expone `config` para cargar el catálogo y el destino de archivo del
//!   entorno (.env).
//! - Expone `logging` para inicializar el subscriber de tracing.
//! - Expone `console` para alimentar el gateway desde líneas de texto.
//!
//! Puede usarse desde `main.rs` o por otros crates/clientes.

pub mod config;
pub mod console;
pub mod errors;
pub mod logging;
