//! Resultados inmutables de steps y jobs.
//!
//! Se construyen una sola vez al cerrar su ámbito y no exponen mutadores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{RunId, StepContribution};
use crate::errors::BatchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionStatus {
    Completed,
    Failed,
}

impl ExecutionStatus {
    pub fn is_completed(self) -> bool {
        matches!(self, ExecutionStatus::Completed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    step_name: String,
    status: ExecutionStatus,
    cause: Option<BatchError>,
    contribution: StepContribution,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
}

impl StepOutcome {
    pub(crate) fn new(step_name: String,
                      cause: Option<BatchError>,
                      contribution: StepContribution,
                      started_at: DateTime<Utc>)
                      -> Self {
        let status = if cause.is_some() { ExecutionStatus::Failed } else { ExecutionStatus::Completed };
        Self { step_name,
               status,
               cause,
               contribution,
               started_at,
               finished_at: Utc::now() }
    }

    pub fn step_name(&self) -> &str {
        &self.step_name
    }

    pub fn status(&self) -> ExecutionStatus {
        self.status
    }

    pub fn cause(&self) -> Option<&BatchError> {
        self.cause.as_ref()
    }

    pub fn contribution(&self) -> &StepContribution {
        &self.contribution
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn finished_at(&self) -> DateTime<Utc> {
        self.finished_at
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobOutcome {
    job_name: String,
    run_id: RunId,
    execution_id: Uuid,
    status: ExecutionStatus,
    cause: Option<BatchError>,
    step_outcomes: Vec<StepOutcome>,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
}

impl JobOutcome {
    pub(crate) fn new(job_name: String,
                      run_id: RunId,
                      execution_id: Uuid,
                      cause: Option<BatchError>,
                      step_outcomes: Vec<StepOutcome>,
                      started_at: DateTime<Utc>)
                      -> Self {
        let status = if cause.is_some() { ExecutionStatus::Failed } else { ExecutionStatus::Completed };
        Self { job_name,
               run_id,
               execution_id,
               status,
               cause,
               step_outcomes,
               started_at,
               finished_at: Utc::now() }
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

    pub fn status(&self) -> ExecutionStatus {
        self.status
    }

    pub fn cause(&self) -> Option<&BatchError> {
        self.cause.as_ref()
    }

    pub fn step_outcomes(&self) -> &[StepOutcome] {
        &self.step_outcomes
    }

    /// Estados de los steps intentados, en orden.
    pub fn step_statuses(&self) -> Vec<ExecutionStatus> {
        self.step_outcomes.iter().map(StepOutcome::status).collect()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn finished_at(&self) -> DateTime<Utc> {
        self.finished_at
    }
}
