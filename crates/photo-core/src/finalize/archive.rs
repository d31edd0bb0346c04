use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::{ArtifactRef, UserId};

/// Un envío al archivo: la foto y el paso que la etiqueta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveItem {
    pub user: UserId,
    pub step_name: String,
    pub artifact: ArtifactRef,
}

impl ArchiveItem {
    /// Texto que acompaña la foto en el destino (el nombre del paso).
    pub fn caption(&self) -> &str {
        &self.step_name
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArchiveError {
    #[error("archive rejected item: {0}")]
    Rejected(String),
    #[error("archive unavailable: {0}")]
    Unavailable(String),
}

/// Destino de archivo. Cada implementación conoce su propio destino
/// (chat, bucket, ...); el core sólo entrega ítems de a uno.
#[async_trait]
pub trait ArchiveSink: Send + Sync {
    async fn send(&self, item: &ArchiveItem) -> Result<(), ArchiveError>;
}

/// Sink que descarta todo. Útil cuando no hay destino configurado.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullArchiveSink;

#[async_trait]
impl ArchiveSink for NullArchiveSink {
    async fn send(&self, _item: &ArchiveItem) -> Result<(), ArchiveError> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchFailure {
    pub item: ArchiveItem,
    pub error: ArchiveError,
}

/// Resultado del despacho: cuántos ítems llegaron y cuáles fallaron.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub delivered: usize,
    pub failures: Vec<DispatchFailure>,
}

impl DispatchReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
