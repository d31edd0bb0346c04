//! Destinos de archivo.
//!
//! Cada envío lleva destino, referencia de la foto y caption (nombre del
//! paso). El envío real por red queda del lado del transporte; aquí hay un
//! sink que sólo registra en log, uno en memoria y un doble de prueba que
//! rechaza referencias puntuales.
use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use log::info;
use photo_core::{ArchiveError, ArchiveItem, ArchiveSink, ArtifactRef};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

/// `ArchiveSend(destination, artifactRef, caption)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveSend {
    pub destination: String,
    pub artifact: ArtifactRef,
    pub caption: String,
}

impl ArchiveSend {
    fn new(destination: &str, item: &ArchiveItem) -> Self {
        Self { destination: destination.to_string(),
               artifact: item.artifact.clone(),
               caption: item.caption().to_string() }
    }
}

/// Sólo deja constancia en el log.
#[derive(Debug, Clone)]
pub struct LoggingArchiveSink {
    destination: String,
}

impl LoggingArchiveSink {
    pub fn new(destination: impl Into<String>) -> Self {
        Self { destination: destination.into() }
    }
}

#[async_trait]
impl ArchiveSink for LoggingArchiveSink {
    async fn send(&self, item: &ArchiveItem) -> Result<(), ArchiveError> {
        info!("archive -> {}: {} [{}] from user {}", self.destination, item.artifact, item.caption(), item.user);
        Ok(())
    }
}

/// Guarda cada envío en memoria, en orden de llegada.
#[derive(Debug, Default)]
pub struct MemoryArchiveSink {
    destination: String,
    sent: Mutex<Vec<ArchiveSend>>,
}

impl MemoryArchiveSink {
    pub fn new(destination: impl Into<String>) -> Self {
        Self { destination: destination.into(),
               sent: Mutex::new(Vec::new()) }
    }

    pub async fn sent(&self) -> Vec<ArchiveSend> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl ArchiveSink for MemoryArchiveSink {
    async fn send(&self, item: &ArchiveItem) -> Result<(), ArchiveError> {
        self.sent.lock().await.push(ArchiveSend::new(&self.destination, item));
        Ok(())
    }
}

/// Envuelve otro sink y rechaza las referencias indicadas.
pub struct FlakyArchiveSink {
    inner: Arc<dyn ArchiveSink>,
    reject: HashSet<String>,
}

impl FlakyArchiveSink {
    pub fn new<I, S>(inner: Arc<dyn ArchiveSink>, reject: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        Self { inner,
               reject: reject.into_iter().map(Into::into).collect() }
    }
}

#[async_trait]
impl ArchiveSink for FlakyArchiveSink {
    async fn send(&self, item: &ArchiveItem) -> Result<(), ArchiveError> {
        if self.reject.contains(item.artifact.as_str()) {
            return Err(ArchiveError::Unavailable(format!("simulated failure for {}", item.artifact)));
        }
        self.inner.send(item).await
    }
}
