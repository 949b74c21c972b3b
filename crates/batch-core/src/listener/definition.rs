use std::fmt::Debug;

use thiserror::Error;

use crate::model::{JobContext, JobOutcome, StepContext, StepOutcome};

/// Error devuelto por un hook. Un error en `before_*` es fatal para su ámbito;
/// uno en `after_*` sólo puede degradar un éxito a fallo.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ListenerError {
    message: String,
}

impl ListenerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    pub fn from_cause(cause: impl std::fmt::Display) -> Self {
        Self::new(cause.to_string())
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub trait JobListener: Debug {
    fn before_job(&self, _ctx: &mut JobContext) -> Result<(), ListenerError> {
        Ok(())
    }

    fn after_job(&self, _ctx: &mut JobContext, _outcome: &JobOutcome) -> Result<(), ListenerError> {
        Ok(())
    }
}

pub trait StepListener: Debug {
    fn before_step(&self, _ctx: &mut StepContext) -> Result<(), ListenerError> {
        Ok(())
    }

    fn after_step(&self, _ctx: &mut StepContext, _outcome: &StepOutcome) -> Result<(), ListenerError> {
        Ok(())
    }
}
