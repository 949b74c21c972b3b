//! Builders de `Step` y `Job`.
//!
//! Ambos son type-state: un step no puede construirse sin tasklet
//! (`StepBuilder` → `TaskletStepBuilder`) y un job no puede construirse sin
//! primer step (`JobBuilderInit` → `JobBuilder`).
//!
//! ```ignore
//! let job = Job::builder("First Job")
//!     .incrementer(Arc::new(InMemoryRunIdIncrementer::new()))
//!     .start(first_step)
//!     .next(second_step)
//!     .listener(FirstJobListener)
//!     .build();
//! ```

use std::sync::Arc;

use serde_json::Value;

use super::definition::{Job, Step};
use crate::incrementer::RunIdIncrementer;
use crate::listener::{JobListener, StepListener};
use crate::model::JobParameters;
use crate::tasklet::Tasklet;

/// Estado inicial del builder de step: sólo el nombre.
#[derive(Debug)]
pub struct StepBuilder {
    name: String,
}

impl StepBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn tasklet<T>(self, tasklet: T) -> TaskletStepBuilder
        where T: Tasklet + 'static
    {
        self.boxed_tasklet(Box::new(tasklet))
    }

    pub fn boxed_tasklet(self, tasklet: Box<dyn Tasklet>) -> TaskletStepBuilder {
        TaskletStepBuilder { name: self.name,
                             tasklet,
                             listeners: Vec::new() }
    }
}

/// Builder de step con tasklet ya asignado.
#[derive(Debug)]
pub struct TaskletStepBuilder {
    name: String,
    tasklet: Box<dyn Tasklet>,
    listeners: Vec<Box<dyn StepListener>>,
}

impl TaskletStepBuilder {
    /// Registra un listener; se invocan en orden de registro.
    pub fn listener<L>(mut self, listener: L) -> Self
        where L: StepListener + 'static
    {
        self.listeners.push(Box::new(listener));
        self
    }

    pub fn build(self) -> Step {
        Step { name: self.name,
               tasklet: self.tasklet,
               listeners: self.listeners }
    }
}

/// Estado inicial del builder de job: falta el primer step.
#[derive(Debug)]
pub struct JobBuilderInit {
    name: String,
    incrementer: Option<Arc<dyn RunIdIncrementer>>,
    parameters: JobParameters,
}

impl JobBuilderInit {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(),
               incrementer: None,
               parameters: JobParameters::new() }
    }

    pub fn incrementer(mut self, incrementer: Arc<dyn RunIdIncrementer>) -> Self {
        self.incrementer = Some(incrementer);
        self
    }

    pub fn parameter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.put(key, value);
        self
    }

    /// Define el primer step y pasa al builder completo.
    pub fn start(self, step: Step) -> JobBuilder {
        JobBuilder { name: self.name,
                     steps: vec![step],
                     listener: None,
                     incrementer: self.incrementer,
                     parameters: self.parameters }
    }
}

#[derive(Debug)]
pub struct JobBuilder {
    name: String,
    steps: Vec<Step>,
    listener: Option<Box<dyn JobListener>>,
    incrementer: Option<Arc<dyn RunIdIncrementer>>,
    parameters: JobParameters,
}

impl JobBuilder {
    /// Añade el siguiente step a la secuencia.
    pub fn next(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Fija el listener del job (reemplaza uno previo). Para varios, usar
    /// `CompositeJobListener`.
    pub fn listener<L>(mut self, listener: L) -> Self
        where L: JobListener + 'static
    {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn incrementer(mut self, incrementer: Arc<dyn RunIdIncrementer>) -> Self {
        self.incrementer = Some(incrementer);
        self
    }

    pub fn parameter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.put(key, value);
        self
    }

    pub fn build(self) -> Job {
        Job::assemble(self.name, self.steps, self.listener, self.incrementer, self.parameters)
    }
}
