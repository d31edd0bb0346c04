//! photo-adapters: capa de adaptación Transporte ↔ Core
//!
//! Este crate provee:
//! - `inbound`: decodificación de actualizaciones de chat a `SessionCommand`.
//! - `outbound`: render de `Reply` a mensajes de chat con botones.
//! - `sinks`: destinos de archivo (`LoggingArchiveSink`, `MemoryArchiveSink`,
//!   `FlakyArchiveSink`).
//! - `gateway`: enruta una actualización al `SessionEngine` y devuelve los
//!   mensajes salientes.
//!
//! Nota: el core no conoce texto de chat ni botones; sólo el vocabulario
//! cerrado `Start | Photo | Control | Status`.

pub mod errors;
pub mod gateway;
pub mod inbound;
pub mod outbound;
pub mod sinks;

pub use errors::AdapterError;
pub use gateway::Gateway;
pub use inbound::{decode, ChatUpdate};
pub use outbound::{render, OutboundMessage};
pub use sinks::{ArchiveSend, FlakyArchiveSink, LoggingArchiveSink, MemoryArchiveSink};
