//! photo-core: máquina de estados de sesiones de captura de fotos.
//!
//! Un usuario recorre un catálogo fijo de pasos (`StepCatalog`), envía fotos
//! (`ArtifactRef`) que se acumulan por paso y, al confirmar el último paso,
//! el `Finalizer` drena lo acumulado, lo despacha a un `ArchiveSink` y
//! produce un resumen legible.
//!
//! Piezas principales:
//! - `catalog`: catálogo inmutable de pasos.
//! - `session`: tipos de sesión y `SessionStore` con exclusión por usuario.
//! - `engine`: `SessionEngine` (start / submit / advance / cancel).
//! - `finalize`: armado del lote de archivo, resumen y despacho best-effort.
//! - `event`: diario append-only de eventos de sesión.
//!
//! ```rust
//! use photo_core::{SessionEngine, StepCatalog};
//! use photo_core::finalize::NullArchiveSink;
//! use std::sync::Arc;
//! let catalog = StepCatalog::new(["overview photo", "gauge photo"]).unwrap();
//! let engine = SessionEngine::new(catalog, Arc::new(NullArchiveSink));
//! ```
pub mod catalog;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod event;
pub mod finalize;
pub mod session;

pub use catalog::StepCatalog;
pub use engine::{AdvanceOutcome, ControlAction, Reply, SessionCommand, SessionEngine, SessionStatus};
pub use errors::CoreEngineError;
pub use event::{EventStore, InMemoryEventStore, SessionEvent, SessionEventKind};
pub use finalize::{ArchiveError, ArchiveItem, ArchiveSink, DispatchReport, Finalization, Finalizer, Summary};
pub use session::{ArtifactLog, ArtifactRef, InMemorySessionStore, Session, SessionPhase, SessionStore, TerminalReason, UserId, UserSlot};
