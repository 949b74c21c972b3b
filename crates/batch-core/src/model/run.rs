//! Identidad de una ejecución: `RunId` y `JobParameters`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::RUN_ID_KEY;

/// Identificador de ejecución de un job, monotónico por nombre de job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RunId(pub u64);

impl RunId {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parámetros identificadores de un job (ordenados por clave).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobParameters {
    entries: BTreeMap<String, Value>,
}

impl JobParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.put(key, value);
        self
    }

    pub fn put(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Copia de los parámetros con `run.id` fijado a `run_id`.
    pub fn with_run_id(&self, run_id: RunId) -> Self {
        self.clone().with(RUN_ID_KEY, run_id.value())
    }

    pub fn run_id(&self) -> Option<RunId> {
        self.entries.get(RUN_ID_KEY).and_then(Value::as_u64).map(RunId)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_id_is_stored_under_run_id_key() {
        let params = JobParameters::new().with("input", "a.csv");
        let launched = params.with_run_id(RunId(7));
        assert_eq!(launched.run_id(), Some(RunId(7)));
        assert_eq!(launched.get("input"), Some(&Value::from("a.csv")));
        // los parámetros de partida quedan intactos
        assert_eq!(params.run_id(), None);
    }
}
