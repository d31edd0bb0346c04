//! Log de artifacts por paso.
//!
//! Contenedor explícito con semántica "crear al primer uso": la secuencia
//! de un paso sólo existe después del primer `append`. Preserva el orden de
//! inserción de los pasos y, dentro de cada paso, el orden de envío.
use indexmap::IndexMap;

use super::ArtifactRef;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactLog {
    by_step: IndexMap<String, Vec<ArtifactRef>>,
}

impl ArtifactLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Agrega `artifact` al final de la secuencia de `step_name`, creándola si
    /// no existe.
    pub fn append(&mut self, step_name: &str, artifact: ArtifactRef) {
        match self.by_step.get_mut(step_name) {
            Some(seq) => seq.push(artifact),
            None => {
                self.by_step.insert(step_name.to_string(), vec![artifact]);
            }
        }
    }

    /// Artifacts registrados para `step_name` (vacío si nunca se usó).
    pub fn artifacts_for(&self, step_name: &str) -> &[ArtifactRef] {
        self.by_step.get(step_name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count_for(&self, step_name: &str) -> usize {
        self.artifacts_for(step_name).len()
    }

    /// Total de artifacts en todos los pasos.
    pub fn len(&self) -> usize {
        self.by_step.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Nombres de paso con al menos una secuencia creada.
    pub fn steps(&self) -> impl Iterator<Item = &str> + '_ {
        self.by_step.keys().map(String::as_str)
    }

    /// Extrae el contenido dejando el log vacío.
    pub fn take(&mut self) -> ArtifactLog {
        std::mem::take(self)
    }

    /// Consume el log devolviendo `(paso, secuencia)` en orden de inserción.
    pub fn into_entries(self) -> impl Iterator<Item = (String, Vec<ArtifactRef>)> {
        self.by_step.into_iter()
    }

    pub fn remove_step(&mut self, step_name: &str) -> Vec<ArtifactRef> {
        self.by_step.shift_remove(step_name).unwrap_or_default()
    }
}
