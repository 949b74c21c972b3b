use std::sync::Arc;

use batch_core::{RepeatStatus, StepContext, StepContribution, Tasklet, TaskletError};

use crate::reporting::Reporter;

/// Tasklet del "First Step": anuncia su ejecución y muestra el contexto del
/// step (que a esta altura ya trae lo que dejó el listener del step).
#[derive(Debug, Clone)]
pub struct FirstTasklet {
    reporter: Arc<dyn Reporter>,
}

impl FirstTasklet {
    pub fn new(reporter: Arc<dyn Reporter>) -> Self {
        Self { reporter }
    }
}

impl Tasklet for FirstTasklet {
    fn name(&self) -> &str {
        "first-tasklet"
    }

    fn execute(&self, _contribution: &mut StepContribution, ctx: &mut StepContext) -> Result<RepeatStatus, TaskletError> {
        self.reporter.report(ctx.step_name(), "This is first tasklet step");
        let sec = serde_json::to_string(ctx.execution_context()).map_err(TaskletError::from_cause)?;
        self.reporter.report(ctx.step_name(), &format!("SEC = {sec}"));
        Ok(RepeatStatus::Finished)
    }
}
