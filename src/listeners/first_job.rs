use std::sync::Arc;

use batch_core::{JobContext, JobListener, JobOutcome, ListenerError};

use crate::reporting::Reporter;

pub const JOB_CONTEXT_KEY: &str = "jec";

/// Anuncia inicio y fin del job y deja una marca en su contexto.
#[derive(Debug, Clone)]
pub struct FirstJobListener {
    reporter: Arc<dyn Reporter>,
}

impl FirstJobListener {
    pub fn new(reporter: Arc<dyn Reporter>) -> Self {
        Self { reporter }
    }
}

impl JobListener for FirstJobListener {
    fn before_job(&self, ctx: &mut JobContext) -> Result<(), ListenerError> {
        let params = serde_json::to_string(ctx.parameters()).map_err(ListenerError::from_cause)?;
        self.reporter.report(ctx.job_name(), &format!("Before Job, run {}", ctx.run_id()));
        self.reporter.report(ctx.job_name(), &format!("Job Params = {params}"));
        ctx.execution_context_mut().put(JOB_CONTEXT_KEY, "jec value");
        self.reporter
            .report(ctx.job_name(), &format!("Job Exec Context = {}", ctx.execution_context()));
        Ok(())
    }

    fn after_job(&self, ctx: &mut JobContext, outcome: &JobOutcome) -> Result<(), ListenerError> {
        self.reporter.report(ctx.job_name(),
                             &format!("After Job, run {} finished with {:?}", ctx.run_id(), outcome.status()));
        self.reporter
            .report(ctx.job_name(), &format!("Job Exec Context = {}", ctx.execution_context()));
        Ok(())
    }
}
