//! Eventos de ejecución y trait EventStore (hook de observabilidad).

mod store;
mod types;

pub use store::{EventStore, InMemoryEventStore};
pub use types::{JobEvent, JobEventKind};
