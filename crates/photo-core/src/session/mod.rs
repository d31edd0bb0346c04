//! Sesiones por usuario y su almacenamiento.
//!
//! Rol en el flujo:
//! - `Session` guarda la fase (activa en un paso, o terminal) de la corrida
//!   actual de un usuario.
//! - `ArtifactLog` acumula referencias de fotos por nombre de paso.
//! - `SessionStore` es la única frontera de estado mutable compartido y
//!   garantiza exclusión mutua por usuario (`UserSlot` detrás de un mutex).

mod artifact_log;
mod store;
mod types;

pub use artifact_log::ArtifactLog;
pub use store::{InMemorySessionStore, SessionStore, SlotGuard, UserSlot};
pub use types::{ArtifactRef, Session, SessionPhase, TerminalReason, UserId};
