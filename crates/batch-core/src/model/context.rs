//! Contextos de ejecución.
//!
//! `ExecutionContext` es un mapa clave/valor JSON. `StepContext` lo envuelve
//! junto con la identidad del step y vive sólo mientras dura ese step: el
//! engine lo presta (`&mut`) a los listeners del step y a su tasklet, y lo
//! descarta al terminar. `JobContext` hace lo mismo para los hooks del job.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::{JobParameters, RunId};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExecutionContext {
    entries: Map<String, Value>,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Serializa `value` y lo guarda bajo `key`.
    pub fn put_serialized<T: Serialize>(&mut self, key: impl Into<String>, value: &T) -> Result<(), serde_json::Error> {
        let v = serde_json::to_value(value)?;
        self.entries.insert(key.into(), v);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Decodifica el valor de `key`. `Ok(None)` si la clave no existe.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, serde_json::Error> {
        self.entries
            .get(key)
            .map(|v| serde_json::from_value(v.clone()))
            .transpose()
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = serde_json::to_string(&self.entries).map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

/// Contexto de un step en ejecución.
#[derive(Debug, Clone)]
pub struct StepContext {
    job_name: String,
    step_name: String,
    run_id: RunId,
    execution_id: Uuid,
    execution_context: ExecutionContext,
}

impl StepContext {
    pub fn new(job_name: impl Into<String>, step_name: impl Into<String>, run_id: RunId, execution_id: Uuid) -> Self {
        Self { job_name: job_name.into(),
               step_name: step_name.into(),
               run_id,
               execution_id,
               execution_context: ExecutionContext::new() }
    }

    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    pub fn step_name(&self) -> &str {
        &self.step_name
    }

    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    pub fn execution_id(&self) -> Uuid {
        self.execution_id
    }

    pub fn execution_context(&self) -> &ExecutionContext {
        &self.execution_context
    }

    pub fn execution_context_mut(&mut self) -> &mut ExecutionContext {
        &mut self.execution_context
    }
}

/// Contexto del job en ejecución, visible sólo para los hooks del job.
#[derive(Debug, Clone)]
pub struct JobContext {
    job_name: String,
    run_id: RunId,
    execution_id: Uuid,
    parameters: JobParameters,
    definition_hash: String,
    execution_context: ExecutionContext,
}

impl JobContext {
    pub fn new(job_name: impl Into<String>,
               run_id: RunId,
               execution_id: Uuid,
               parameters: JobParameters,
               definition_hash: impl Into<String>)
               -> Self {
        Self { job_name: job_name.into(),
               run_id,
               execution_id,
               parameters,
               definition_hash: definition_hash.into(),
               execution_context: ExecutionContext::new() }
    }

    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    pub fn execution_id(&self) -> Uuid {
        self.execution_id
    }

    pub fn parameters(&self) -> &JobParameters {
        &self.parameters
    }

    pub fn definition_hash(&self) -> &str {
        &self.definition_hash
    }

    pub fn execution_context(&self) -> &ExecutionContext {
        &self.execution_context
    }

    pub fn execution_context_mut(&mut self) -> &mut ExecutionContext {
        &mut self.execution_context
    }

    /// Crea el contexto de un step de este job (contexto clave/valor vacío).
    pub fn step_context(&self, step_name: &str) -> StepContext {
        StepContext::new(self.job_name.clone(), step_name, self.run_id, self.execution_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn typed_get_roundtrips_and_reports_missing_keys() {
        let mut ctx = ExecutionContext::new();
        ctx.put_serialized("ids", &vec![1u32, 2, 3]).unwrap();
        let ids: Option<Vec<u32>> = ctx.get_as("ids").unwrap();
        assert_eq!(ids, Some(vec![1, 2, 3]));
        let missing: Option<String> = ctx.get_as("nope").unwrap();
        assert!(missing.is_none());
        assert!(ctx.get_as::<String>("ids").is_err());
    }

    #[test]
    fn display_renders_json_object() {
        let mut ctx = ExecutionContext::new();
        ctx.put("sec", "sec value");
        assert_eq!(ctx.to_string(), r#"{"sec":"sec value"}"#);
        assert_eq!(ctx.get("sec"), Some(&json!("sec value")));
    }

    #[test]
    fn step_context_starts_empty_and_inherits_identity() {
        let mut job = JobContext::new("First Job", RunId(3), Uuid::new_v4(), JobParameters::new(), "h");
        job.execution_context_mut().put("jec", "job value");
        let step = job.step_context("First Step");
        assert_eq!(step.job_name(), "First Job");
        assert_eq!(step.step_name(), "First Step");
        assert_eq!(step.run_id(), RunId(3));
        assert_eq!(step.execution_id(), job.execution_id());
        assert!(step.execution_context().is_empty());
    }
}
