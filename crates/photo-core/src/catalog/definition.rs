use std::collections::HashSet;
use std::sync::Arc;

use crate::constants::DEFAULT_STEPS;
use crate::errors::CoreEngineError;

/// Definición inmutable del catálogo de pasos (N >= 1).
///
/// Clonar es barato: los nombres viven detrás de un `Arc` y todas las
/// sesiones comparten la misma lista.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepCatalog {
    steps: Arc<[String]>,
}

impl StepCatalog {
    /// Construye el catálogo validando que no esté vacío y que los nombres
    /// sean únicos y no estén en blanco (el log de artifacts se indexa por
    /// nombre de paso).
    pub fn new<I, S>(steps: I) -> Result<Self, CoreEngineError>
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        let steps: Vec<String> = steps.into_iter().map(|s| s.into().trim().to_string()).collect();
        if steps.is_empty() {
            return Err(CoreEngineError::EmptyCatalog);
        }
        let mut seen = HashSet::with_capacity(steps.len());
        for (i, name) in steps.iter().enumerate() {
            if name.is_empty() {
                return Err(CoreEngineError::BlankStepName(i));
            }
            if !seen.insert(name.as_str()) {
                return Err(CoreEngineError::DuplicateStepName(name.clone()));
            }
        }
        Ok(Self { steps: steps.into() })
    }

    /// Nombre del paso en `index`; `StepOutOfRange` si `index >= N`.
    pub fn step_at(&self, index: usize) -> Result<&str, CoreEngineError> {
        self.steps
            .get(index)
            .map(String::as_str)
            .ok_or(CoreEngineError::StepOutOfRange { index,
                                                     count: self.steps.len() })
    }

    /// Cantidad de pasos (N).
    pub fn count(&self) -> usize {
        self.steps.len()
    }

    /// Itera los nombres en orden de catálogo.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.steps.iter().map(String::as_str)
    }
}

impl Default for StepCatalog {
    fn default() -> Self {
        Self { steps: DEFAULT_STEPS.iter().map(|s| s.to_string()).collect::<Vec<_>>().into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_at_and_count_follow_declaration_order() {
        let catalog = StepCatalog::new(["A", "B", "C"]).expect("catalog");
        assert_eq!(catalog.count(), 3);
        assert_eq!(catalog.step_at(0), Ok("A"));
        assert_eq!(catalog.step_at(2), Ok("C"));
        assert_eq!(catalog.iter().collect::<Vec<_>>(), vec!["A", "B", "C"]);
    }

    #[test]
    fn step_at_past_end_is_out_of_range() {
        let catalog = StepCatalog::new(["A", "B", "C"]).expect("catalog");
        assert_eq!(catalog.step_at(3), Err(CoreEngineError::StepOutOfRange { index: 3, count: 3 }));
    }

    #[test]
    fn rejects_empty_blank_and_duplicate_names() {
        assert_eq!(StepCatalog::new(Vec::<String>::new()), Err(CoreEngineError::EmptyCatalog));
        assert_eq!(StepCatalog::new(["A", "  "]), Err(CoreEngineError::BlankStepName(1)));
        assert_eq!(StepCatalog::new(["A", "B", " A "]), Err(CoreEngineError::DuplicateStepName("A".into())));
    }

    #[test]
    fn default_catalog_is_meter_workflow() {
        let catalog = StepCatalog::default();
        assert_eq!(catalog.count(), DEFAULT_STEPS.len());
        assert_eq!(catalog.step_at(0), Ok("overview photo"));
    }
}
