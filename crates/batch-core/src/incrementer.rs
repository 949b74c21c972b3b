//! Estrategias de run id.
//!
//! Un `RunIdIncrementer` debe devolver ids estrictamente crecientes para
//! llamadas repetidas con el mismo nombre de job. El engine verifica el
//! contrato y rechaza una ejecución cuyo id no avance.

use std::fmt::Debug;

use dashmap::DashMap;

use crate::model::RunId;

pub trait RunIdIncrementer: Send + Sync + Debug {
    fn next(&self, job_name: &str) -> RunId;
}

/// Contador en memoria por nombre de job. Seguro para uso concurrente:
/// la entrada de cada nombre se actualiza bajo el lock de su shard.
#[derive(Debug, Default)]
pub struct InMemoryRunIdIncrementer {
    counters: DashMap<String, u64>,
}

impl InMemoryRunIdIncrementer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arranca el contador de `job_name` en `last`: el próximo id será `last + 1`.
    pub fn starting_after(self, job_name: impl Into<String>, last: RunId) -> Self {
        self.counters.insert(job_name.into(), last.value());
        self
    }

    /// Último id entregado para `job_name`, si hubo alguno.
    pub fn last(&self, job_name: &str) -> Option<RunId> {
        self.counters.get(job_name).map(|v| RunId(*v))
    }
}

impl RunIdIncrementer for InMemoryRunIdIncrementer {
    fn next(&self, job_name: &str) -> RunId {
        let mut entry = self.counters.entry(job_name.to_string()).or_insert(0);
        *entry += 1;
        RunId(*entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn ids_are_monotonic_per_job_name() {
        let inc = InMemoryRunIdIncrementer::new();
        assert_eq!(inc.next("a"), RunId(1));
        assert_eq!(inc.next("a"), RunId(2));
        assert_eq!(inc.next("b"), RunId(1));
        assert_eq!(inc.last("a"), Some(RunId(2)));
        assert_eq!(inc.last("c"), None);
    }

    #[test]
    fn starting_after_continues_from_seed() {
        let inc = InMemoryRunIdIncrementer::new().starting_after("a", RunId(41));
        assert_eq!(inc.next("a"), RunId(42));
    }

    #[test]
    fn concurrent_callers_never_share_an_id() {
        let inc = Arc::new(InMemoryRunIdIncrementer::new());
        let handles: Vec<_> = (0..4).map(|_| {
                                        let inc = inc.clone();
                                        thread::spawn(move || (0..250).map(|_| inc.next("job").value()).collect::<Vec<_>>())
                                    })
                                    .collect();
        let mut all: Vec<u64> = handles.into_iter().flat_map(|h| h.join().unwrap()).collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 1000);
        assert_eq!(inc.last("job"), Some(RunId(1000)));
    }
}
