use std::sync::Arc;

use serde_json::json;

use crate::hashing::hash_value;
use crate::incrementer::RunIdIncrementer;
use crate::listener::{JobListener, StepListener};
use crate::model::JobParameters;
use crate::tasklet::Tasklet;

use super::builder::{JobBuilderInit, StepBuilder};

/// Step: un nombre, un tasklet y sus listeners (en orden de registro).
#[derive(Debug)]
pub struct Step {
    pub(crate) name: String,
    pub(crate) tasklet: Box<dyn Tasklet>,
    pub(crate) listeners: Vec<Box<dyn StepListener>>,
}

impl Step {
    pub fn builder(name: impl Into<String>) -> StepBuilder {
        StepBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tasklet(&self) -> &dyn Tasklet {
        self.tasklet.as_ref()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

/// Job: secuencia ordenada de steps. Inmutable tras `build()`.
#[derive(Debug)]
pub struct Job {
    pub(crate) name: String,
    pub(crate) steps: Vec<Step>,
    pub(crate) listener: Option<Box<dyn JobListener>>,
    pub(crate) incrementer: Option<Arc<dyn RunIdIncrementer>>,
    pub(crate) parameters: JobParameters,
    pub(crate) definition_hash: String,
}

impl Job {
    pub fn builder(name: impl Into<String>) -> JobBuilderInit {
        JobBuilderInit::new(name)
    }

    pub(crate) fn assemble(name: String,
                           steps: Vec<Step>,
                           listener: Option<Box<dyn JobListener>>,
                           incrementer: Option<Arc<dyn RunIdIncrementer>>,
                           parameters: JobParameters)
                           -> Self {
        let definition_hash = definition_hash(&name, &steps);
        Self { name,
               steps,
               listener,
               incrementer,
               parameters,
               definition_hash }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(Step::name).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn parameters(&self) -> &JobParameters {
        &self.parameters
    }

    /// Hash de la definición: versión del engine, nombre y steps en orden.
    /// No depende del run id, así que es estable entre ejecuciones.
    pub fn definition_hash(&self) -> &str {
        &self.definition_hash
    }
}

fn definition_hash(name: &str, steps: &[Step]) -> String {
    let step_names: Vec<&str> = steps.iter().map(Step::name).collect();
    hash_value(&json!({
        "engine_version": crate::constants::ENGINE_VERSION,
        "job": name,
        "steps": step_names,
    }))
}
