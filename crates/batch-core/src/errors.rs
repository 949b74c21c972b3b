//! Errores del motor de jobs.
//!
//! `BatchError` es el único tipo de error que sale del engine y siempre lo
//! hace por valor, dentro de `StepOutcome::cause` / `JobOutcome::cause`.
//! Por eso es `Clone + Serialize`: vive dentro de outcomes y eventos.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ámbito del listener que falló.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListenerScope {
    Job,
    Step,
}

/// Fase del hook que falló.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HookPhase {
    Before,
    After,
}

impl fmt::Display for ListenerScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListenerScope::Job => f.write_str("job"),
            ListenerScope::Step => f.write_str("step"),
        }
    }
}

impl fmt::Display for HookPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookPhase::Before => f.write_str("before"),
            HookPhase::After => f.write_str("after"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum BatchError {
    #[error("tasklet of step '{step}' failed: {message}")]
    TaskletExecution { step: String, message: String },
    #[error("{phase}-{scope} hook of '{owner}' failed: {message}")]
    Listener {
        scope: ListenerScope,
        phase: HookPhase,
        owner: String,
        message: String,
    },
    #[error("execution interrupted at {boundary}")]
    Interrupted { boundary: String },
    #[error("step '{step}' exceeded {limit} tasklet iterations")]
    IterationLimitExceeded { step: String, limit: u64 },
    #[error("run id {got} for job '{job}' is not greater than last run id {last}")]
    NonIncreasingRunId { job: String, last: u64, got: u64 },
    #[error("invalid job state transition {from} -> {to}")]
    InvalidTransition { from: String, to: String },
    #[error("internal: {0}")]
    Internal(String),
}

impl BatchError {
    /// Nombre corto de la variante, usado en logs y eventos.
    pub fn kind_name(&self) -> &'static str {
        match self {
            BatchError::TaskletExecution { .. } => "tasklet_execution",
            BatchError::Listener { .. } => "listener",
            BatchError::Interrupted { .. } => "interrupted",
            BatchError::IterationLimitExceeded { .. } => "iteration_limit_exceeded",
            BatchError::NonIncreasingRunId { .. } => "non_increasing_run_id",
            BatchError::InvalidTransition { .. } => "invalid_transition",
            BatchError::Internal(_) => "internal",
        }
    }
}
