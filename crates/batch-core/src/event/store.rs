use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use super::{JobEvent, JobEventKind};

/// Almacenamiento de eventos append-only.
pub trait EventStore {
    /// Agrega un evento a partir de su kind y devuelve el evento completo (con seq y ts).
    fn append_kind(&mut self, execution_id: Uuid, kind: JobEventKind) -> JobEvent;
    /// Lista eventos de una ejecución (orden ascendente por seq).
    fn list(&self, execution_id: Uuid) -> Vec<JobEvent>;
    /// Retira y devuelve los eventos de una ejecución.
    fn drain(&mut self, execution_id: Uuid) -> Vec<JobEvent>;
}

/// Store en memoria. Conserva los eventos de cada ejecución hasta que se
/// retiran con `drain`; un proceso de larga vida debe drenarlo.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    pub inner: HashMap<Uuid, Vec<JobEvent>>,
}

impl EventStore for InMemoryEventStore {
    fn append_kind(&mut self, execution_id: Uuid, kind: JobEventKind) -> JobEvent {
        let vec = self.inner.entry(execution_id).or_default();
        let seq = vec.len() as u64;
        let ev = JobEvent { seq,
                            execution_id,
                            kind,
                            ts: Utc::now() };
        vec.push(ev.clone());
        ev
    }

    fn list(&self, execution_id: Uuid) -> Vec<JobEvent> {
        self.inner.get(&execution_id).cloned().unwrap_or_default()
    }

    fn drain(&mut self, execution_id: Uuid) -> Vec<JobEvent> {
        self.inner.remove(&execution_id).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ExecutionStatus;

    #[test]
    fn drain_removes_only_the_given_execution() {
        let mut store = InMemoryEventStore::default();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        for id in [a, b] {
            store.append_kind(id,
                              JobEventKind::JobFinished { status: ExecutionStatus::Completed,
                                                          steps_attempted: 0 });
        }

        let drained = store.drain(a);
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].execution_id, a);
        assert!(store.list(a).is_empty());
        assert_eq!(store.list(b).len(), 1);
        assert!(store.drain(a).is_empty());
    }
}
