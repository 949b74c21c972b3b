use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::BatchError;

/// Estado de una ejecución de job.
///
/// Las transiciones válidas son:
/// - `NotStarted` -> `Running`
/// - `NotStarted` -> `Failed` (ejecución rechazada antes de arrancar)
/// - `Running` -> `Completed`
/// - `Running` -> `Failed`
///
/// `Completed` y `Failed` son terminales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobState {
    NotStarted,
    Running,
    Completed,
    Failed,
}

impl JobState {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobState::Completed | JobState::Failed)
    }

    pub fn transition(self, to: JobState) -> Result<JobState, BatchError> {
        use JobState::*;
        match (self, to) {
            (NotStarted, Running) | (NotStarted, Failed) | (Running, Completed) | (Running, Failed) => Ok(to),
            _ => Err(BatchError::InvalidTransition { from: self.to_string(),
                                                     to: to.to_string() }),
        }
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobState::NotStarted => "NOT_STARTED",
            JobState::Running => "RUNNING",
            JobState::Completed => "COMPLETED",
            JobState::Failed => "FAILED",
        };
        f.write_str(s)
    }
}
