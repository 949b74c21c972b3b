//! Tipos de evento emitidos por el `JobEngine`.
//!
//! Cada ejecución de job (identificada por `execution_id`) produce una
//! secuencia append-only: `JobStarted`, luego por step `StepStarted` seguido
//! de `StepFinished` o `StepFailed`, eventuales `ListenerFailed`, y siempre
//! cierra con `JobFinished`. Una ejecución rechazada antes de arrancar
//! (run id no creciente) sólo emite `JobFinished`.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{BatchError, HookPhase, ListenerScope};
use crate::model::{ExecutionStatus, RunId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JobEventKind {
    JobStarted {
        job_name: String,
        run_id: RunId,
        definition_hash: String,
        step_count: usize,
    },
    StepStarted { step_index: usize, step_name: String },
    StepFinished {
        step_index: usize,
        step_name: String,
        invocations: u64,
    },
    StepFailed {
        step_index: usize,
        step_name: String,
        error: BatchError,
    },
    /// Un hook falló. Se emite también para `after_*`, cuyo error no
    /// siempre cambia el estado final.
    ListenerFailed {
        scope: ListenerScope,
        phase: HookPhase,
        error: BatchError,
    },
    JobFinished { status: ExecutionStatus, steps_attempted: usize },
}

impl JobEventKind {
    /// Código de una letra, útil para comparar secuencias en tests.
    pub fn code(&self) -> &'static str {
        match self {
            JobEventKind::JobStarted { .. } => "J",
            JobEventKind::StepStarted { .. } => "S",
            JobEventKind::StepFinished { .. } => "F",
            JobEventKind::StepFailed { .. } => "X",
            JobEventKind::ListenerFailed { .. } => "L",
            JobEventKind::JobFinished { .. } => "C",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobEvent {
    pub seq: u64,
    pub execution_id: Uuid,
    pub kind: JobEventKind,
    pub ts: DateTime<Utc>,
}
