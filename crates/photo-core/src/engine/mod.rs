//! Engine module for SessionEngine implementation
//!
//! Provides the per-user state machine, its builder and the command/reply
//! vocabulary exchanged with the transport adapter.

pub mod builder;
pub mod core;
mod vocabulary;

pub use self::core::SessionEngine;
pub use builder::EngineBuilder;
pub use vocabulary::{AdvanceOutcome, ControlAction, ParseActionError, Reply, SessionCommand, SessionStatus};
