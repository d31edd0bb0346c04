//! Catálogo de pasos.
//!
//! Lista ordenada e inmutable de nombres de paso, fijada al arrancar y
//! compartida en modo lectura por todas las sesiones. Los índices `0..N`
//! definen el orden del flujo.

mod definition;

pub use definition::StepCatalog;
