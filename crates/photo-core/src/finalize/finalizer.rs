use std::sync::Arc;

use log::{debug, info, warn};

use super::{ArchiveItem, ArchiveSink, DispatchFailure, DispatchReport, StepCount, Summary};
use crate::catalog::StepCatalog;
use crate::constants::DEFAULT_SUMMARY_SEPARATOR;
use crate::session::{ArtifactLog, SessionStore, UserId};

/// Resultado de finalizar una corrida.
#[derive(Debug, Clone)]
pub struct Finalization {
    pub user: UserId,
    /// Lote enviado al archivo: orden de catálogo y, dentro de cada paso,
    /// orden de envío.
    pub batch: Vec<ArchiveItem>,
    pub summary: Summary,
    /// `summary` renderizado con el separador configurado.
    pub summary_text: String,
    pub report: DispatchReport,
}

/// Drena, archiva y resume.
pub struct Finalizer {
    catalog: StepCatalog,
    sink: Arc<dyn ArchiveSink>,
    summary_separator: String,
}

impl Finalizer {
    pub fn new(catalog: StepCatalog, sink: Arc<dyn ArchiveSink>) -> Self {
        Self { catalog,
               sink,
               summary_separator: DEFAULT_SUMMARY_SEPARATOR.to_string() }
    }

    pub fn with_summary_separator(mut self, separator: impl Into<String>) -> Self {
        self.summary_separator = separator.into();
        self
    }

    /// Arma lote + resumen a partir de un log ya drenado. Función pura: no
    /// toca el store ni el sink.
    pub fn assemble(&self, user: &UserId, mut log: ArtifactLog) -> (Vec<ArchiveItem>, Summary) {
        let mut batch = Vec::with_capacity(log.len());
        let mut steps = Vec::with_capacity(self.catalog.count());
        for name in self.catalog.iter() {
            let artifacts = log.remove_step(name);
            steps.push(StepCount { step_name: name.to_string(),
                                   count: artifacts.len() });
            batch.extend(artifacts.into_iter().map(|artifact| ArchiveItem { user: user.clone(),
                                                                              step_name: name.to_string(),
                                                                              artifact }));
        }
        // Sólo se registran artifacts bajo nombres del catálogo; si aparece
        // otro paso se archiva al final en vez de perderlo.
        for (step_name, artifacts) in log.into_entries() {
            warn!("user {user}: artifacts under unknown step '{step_name}' ({} items)", artifacts.len());
            batch.extend(artifacts.into_iter().map(|artifact| ArchiveItem { user: user.clone(),
                                                                              step_name: step_name.clone(),
                                                                              artifact }));
        }
        (batch, Summary { steps })
    }

    /// Envía cada ítem de a uno, en orden. Un fallo se registra y no corta el
    /// resto; no hay reintentos.
    pub async fn dispatch(&self, batch: &[ArchiveItem]) -> DispatchReport {
        let mut report = DispatchReport::default();
        for item in batch {
            match self.sink.send(item).await {
                Ok(()) => {
                    debug!("user {}: archived {} ({})", item.user, item.artifact, item.caption());
                    report.delivered += 1;
                }
                Err(error) => {
                    warn!("user {}: archive send failed for {} ({}): {error}", item.user, item.artifact, item.caption());
                    report.failures.push(DispatchFailure { item: item.clone(),
                                                           error });
                }
            }
        }
        report
    }

    /// Completa una corrida cuyo log ya fue drenado por el caller (el engine
    /// drena bajo el mismo lock que marca la sesión inactiva).
    pub async fn complete(&self, user: &UserId, drained: ArtifactLog) -> Finalization {
        let (batch, summary) = self.assemble(user, drained);
        let report = self.dispatch(&batch).await;
        let summary_text = summary.render(&self.summary_separator);
        if report.is_clean() {
            info!("user {user}: finalized {} artifacts", batch.len());
        } else {
            warn!("user {user}: finalized {} artifacts ({} delivered, {} failed)",
                  batch.len(),
                  report.delivered,
                  report.failures.len());
        }
        Finalization { user: user.clone(),
                       batch,
                       summary,
                       summary_text,
                       report }
    }

    /// `finalize(user)`: drena vía store y completa. El lock del usuario se
    /// suelta antes del primer envío al archivo.
    pub async fn finalize<S>(&self, store: &S, user: &UserId) -> Finalization
        where S: SessionStore + ?Sized
    {
        let drained = store.drain_artifacts(user).await;
        self.complete(user, drained).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finalize::{ArchiveError, NullArchiveSink};
    use crate::session::{ArtifactRef, InMemorySessionStore};
    use async_trait::async_trait;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        sent: Mutex<Vec<ArchiveItem>>,
        reject: Option<&'static str>,
    }

    #[async_trait]
    impl ArchiveSink for RecordingSink {
        async fn send(&self, item: &ArchiveItem) -> Result<(), ArchiveError> {
            if Some(item.artifact.as_str()) == self.reject {
                return Err(ArchiveError::Rejected(item.artifact.to_string()));
            }
            self.sent.lock().await.push(item.clone());
            Ok(())
        }
    }

    fn catalog() -> StepCatalog {
        StepCatalog::new(["A", "B", "C"]).expect("catalog")
    }

    #[test]
    fn assemble_orders_by_catalog_not_arrival() {
        let finalizer = Finalizer::new(catalog(), Arc::new(NullArchiveSink));
        let mut log = ArtifactLog::new();
        log.append("C", ArtifactRef::new("c1"));
        log.append("A", ArtifactRef::new("a1"));
        log.append("C", ArtifactRef::new("c2"));

        let (batch, summary) = finalizer.assemble(&UserId(1), log);
        let order: Vec<(&str, &str)> = batch.iter().map(|i| (i.caption(), i.artifact.as_str())).collect();
        assert_eq!(order, vec![("A", "a1"), ("C", "c1"), ("C", "c2")]);
        assert_eq!(summary.to_string(), "A: 1, B: 0, C: 2");
    }

    #[tokio::test]
    async fn failed_item_does_not_stop_the_rest() {
        let sink = Arc::new(RecordingSink { reject: Some("a1"),
                                            ..Default::default() });
        let finalizer = Finalizer::new(catalog(), sink.clone()).with_summary_separator(" | ");
        let store = InMemorySessionStore::new();
        let user = UserId(7);
        store.append_artifact(&user, "A", ArtifactRef::new("a1")).await;
        store.append_artifact(&user, "B", ArtifactRef::new("b1")).await;

        let fin = finalizer.finalize(&store, &user).await;
        assert_eq!(fin.report.delivered, 1);
        assert_eq!(fin.report.failures.len(), 1);
        assert_eq!(fin.report.failures[0].item.artifact, ArtifactRef::new("a1"));
        assert_eq!(fin.summary_text, "A: 1 | B: 1 | C: 0");
        assert_eq!(sink.sent.lock().await.len(), 1);
        assert!(store.drain_artifacts(&user).await.is_empty(), "log drained by finalize");
    }
}
