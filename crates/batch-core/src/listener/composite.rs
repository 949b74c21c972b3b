//! Composites: aplican una lista de listeners en orden de registro.
//!
//! `before_*` corta en el primer error. `after_*` ejecuta todos los listeners
//! y devuelve el primer error encontrado.

use super::definition::{JobListener, ListenerError, StepListener};
use crate::model::{JobContext, JobOutcome, StepContext, StepOutcome};

#[derive(Debug, Default)]
pub struct CompositeJobListener {
    pub listeners: Vec<Box<dyn JobListener>>,
}

impl CompositeJobListener {
    pub fn new() -> Self {
        Self { listeners: vec![] }
    }

    pub fn with_listeners(listeners: Vec<Box<dyn JobListener>>) -> Self {
        Self { listeners }
    }

    pub fn push(&mut self, listener: Box<dyn JobListener>) {
        self.listeners.push(listener);
    }
}

impl JobListener for CompositeJobListener {
    fn before_job(&self, ctx: &mut JobContext) -> Result<(), ListenerError> {
        for l in self.listeners.iter() {
            l.before_job(ctx)?;
        }
        Ok(())
    }

    fn after_job(&self, ctx: &mut JobContext, outcome: &JobOutcome) -> Result<(), ListenerError> {
        let mut first_err = None;
        for l in self.listeners.iter() {
            if let Err(e) = l.after_job(ctx, outcome) {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}

#[derive(Debug, Default)]
pub struct CompositeStepListener {
    pub listeners: Vec<Box<dyn StepListener>>,
}

impl CompositeStepListener {
    pub fn new() -> Self {
        Self { listeners: vec![] }
    }

    pub fn with_listeners(listeners: Vec<Box<dyn StepListener>>) -> Self {
        Self { listeners }
    }

    pub fn push(&mut self, listener: Box<dyn StepListener>) {
        self.listeners.push(listener);
    }
}

impl StepListener for CompositeStepListener {
    fn before_step(&self, ctx: &mut StepContext) -> Result<(), ListenerError> {
        for l in self.listeners.iter() {
            l.before_step(ctx)?;
        }
        Ok(())
    }

    fn after_step(&self, ctx: &mut StepContext, outcome: &StepOutcome) -> Result<(), ListenerError> {
        let mut first_err = None;
        for l in self.listeners.iter() {
            if let Err(e) = l.after_step(ctx, outcome) {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}
