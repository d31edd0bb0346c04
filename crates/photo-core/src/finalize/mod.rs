//! Finalización de una corrida completada.
//!
//! - `archive`: contrato del destino de archivo (`ArchiveSink`) y el reporte
//!   de despacho.
//! - `summary`: resumen por paso en orden de catálogo.
//! - `finalizer`: arma el lote ordenado, lo despacha best-effort y devuelve
//!   el resumen pase lo que pase con el archivo.

mod archive;
mod finalizer;
mod summary;

pub use archive::{ArchiveError, ArchiveItem, ArchiveSink, DispatchFailure, DispatchReport, NullArchiveSink};
pub use finalizer::{Finalization, Finalizer};
pub use summary::{StepCount, Summary};
