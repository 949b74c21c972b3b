use std::sync::Arc;

use batch_core::{RepeatStatus, StepContext, StepContribution, Tasklet, TaskletError};

use crate::reporting::Reporter;

/// Tasklet del "Second Step". Se inyecta ya construido en `SampleJob`.
#[derive(Debug, Clone)]
pub struct SecondTasklet {
    reporter: Arc<dyn Reporter>,
}

impl SecondTasklet {
    pub fn new(reporter: Arc<dyn Reporter>) -> Self {
        Self { reporter }
    }
}

impl Tasklet for SecondTasklet {
    fn name(&self) -> &str {
        "second-tasklet"
    }

    fn execute(&self, _contribution: &mut StepContribution, ctx: &mut StepContext) -> Result<RepeatStatus, TaskletError> {
        self.reporter.report(ctx.step_name(), "This is second tasklet step");
        let sec = serde_json::to_string(ctx.execution_context()).map_err(TaskletError::from_cause)?;
        self.reporter.report(ctx.step_name(), &format!("SEC = {sec}"));
        Ok(RepeatStatus::Finished)
    }
}
