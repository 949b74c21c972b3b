use std::sync::Arc;

use batch_core::{ListenerError, StepContext, StepListener, StepOutcome};

use crate::reporting::Reporter;

pub const STEP_CONTEXT_KEY: &str = "sec";

/// Anuncia inicio y fin del step y deja una marca en su contexto, visible
/// para el tasklet del mismo step.
#[derive(Debug, Clone)]
pub struct FirstStepListener {
    reporter: Arc<dyn Reporter>,
}

impl FirstStepListener {
    pub fn new(reporter: Arc<dyn Reporter>) -> Self {
        Self { reporter }
    }
}

impl StepListener for FirstStepListener {
    fn before_step(&self, ctx: &mut StepContext) -> Result<(), ListenerError> {
        self.reporter.report(ctx.step_name(), "Before Step");
        ctx.execution_context_mut().put(STEP_CONTEXT_KEY, "sec value");
        Ok(())
    }

    fn after_step(&self, ctx: &mut StepContext, outcome: &StepOutcome) -> Result<(), ListenerError> {
        self.reporter
            .report(ctx.step_name(), &format!("After Step, status {:?}", outcome.status()));
        Ok(())
    }
}
