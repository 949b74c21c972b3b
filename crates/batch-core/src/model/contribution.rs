//! Métricas acumuladas por un step durante su ejecución.

use serde::{Deserialize, Serialize};

/// Contribución de un tasklet al step en curso.
///
/// Los contadores de lectura/escritura/filtrado los mueve el tasklet; el
/// engine sólo incrementa `invocations` antes de cada llamada a `execute`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepContribution {
    read_count: u64,
    write_count: u64,
    filter_count: u64,
    invocations: u64,
}

impl StepContribution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_read_count(&mut self, n: u64) {
        self.read_count += n;
    }

    pub fn increment_write_count(&mut self, n: u64) {
        self.write_count += n;
    }

    pub fn increment_filter_count(&mut self, n: u64) {
        self.filter_count += n;
    }

    pub(crate) fn record_invocation(&mut self) -> u64 {
        self.invocations += 1;
        self.invocations
    }

    pub fn read_count(&self) -> u64 {
        self.read_count
    }

    pub fn write_count(&self) -> u64 {
        self.write_count
    }

    pub fn filter_count(&self) -> u64 {
        self.filter_count
    }

    /// Veces que el engine invocó el tasklet en este step.
    pub fn invocations(&self) -> u64 {
        self.invocations
    }
}
