use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_SUMMARY_SEPARATOR;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepCount {
    pub step_name: String,
    pub count: usize,
}

/// Resumen de una corrida: todos los pasos del catálogo, en orden, con su
/// cantidad de fotos. Los pasos con 0 se listan igual para que el usuario
/// vea los huecos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub steps: Vec<StepCount>,
}

impl Summary {
    /// Texto con separador configurable: `"A: 1, B: 0, C: 2"`.
    pub fn render(&self, separator: &str) -> String {
        self.steps
            .iter()
            .map(|s| format!("{}: {}", s.step_name, s.count))
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(DEFAULT_SUMMARY_SEPARATOR))
    }
}
