//! Enrutado de actualizaciones hacia el engine.
use std::sync::Arc;

use log::debug;
use photo_core::{EventStore, SessionEngine, SessionStore};

use crate::inbound::{decode, ChatUpdate};
use crate::outbound::{render, OutboundMessage};

/// Puente entre el transporte y el `SessionEngine`. Barato de clonar.
pub struct Gateway<S: SessionStore, E: EventStore> {
    engine: Arc<SessionEngine<S, E>>,
}

impl<S: SessionStore, E: EventStore> Clone for Gateway<S, E> {
    fn clone(&self) -> Self {
        Self { engine: self.engine.clone() }
    }
}

impl<S: SessionStore, E: EventStore> Gateway<S, E> {
    pub fn new(engine: Arc<SessionEngine<S, E>>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &SessionEngine<S, E> {
        &self.engine
    }

    /// Procesa una actualización. Texto que no es comando y eventos fuera de
    /// sesión no generan respuesta: el usuario nunca ve un error crudo.
    pub async fn on_update(&self, update: ChatUpdate) -> Vec<OutboundMessage> {
        let command = match decode(&update) {
            Ok(command) => command,
            Err(e) => {
                debug!("user {}: dropping update ({e})", update.user);
                return Vec::new();
            }
        };
        self.engine
            .handle(&update.user, command)
            .await
            .iter()
            .map(|reply| render(&update.user, reply))
            .collect()
    }
}
