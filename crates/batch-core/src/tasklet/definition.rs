use std::fmt::Debug;

use thiserror::Error;

use super::RepeatStatus;
use crate::model::{StepContext, StepContribution};

/// Error de un tasklet. El engine lo envuelve en
/// `BatchError::TaskletExecution` junto con el nombre del step.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TaskletError {
    message: String,
}

impl TaskletError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    /// Construye el error a partir de cualquier causa imprimible.
    pub fn from_cause(cause: impl std::fmt::Display) -> Self {
        Self::new(cause.to_string())
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Cuerpo de un step.
pub trait Tasklet: Debug {
    /// Nombre legible para logs (por defecto, el nombre del tipo).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Ejecuta una iteración de trabajo.
    fn execute(&self, contribution: &mut StepContribution, context: &mut StepContext) -> Result<RepeatStatus, TaskletError>;
}
