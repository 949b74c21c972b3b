//! "First Job": dos steps secuenciales con listeners e incrementer.
//!
//! - "First Step": `FirstTasklet` con `FirstStepListener`.
//! - "Second Step": el `SecondTasklet` recibido en el constructor.
//!
//! Todos los colaboradores llegan por parámetro; no hay registro global.

use std::sync::Arc;

use batch_core::{InMemoryRunIdIncrementer, Job, RunIdIncrementer, Step};

use crate::listeners::{FirstJobListener, FirstStepListener};
use crate::reporting::Reporter;
use crate::tasklets::{FirstTasklet, SecondTasklet};

pub const JOB_NAME: &str = "First Job";
pub const FIRST_STEP: &str = "First Step";
pub const SECOND_STEP: &str = "Second Step";

#[derive(Debug)]
pub struct SampleJob {
    reporter: Arc<dyn Reporter>,
    second_tasklet: SecondTasklet,
    first_job_listener: FirstJobListener,
    first_step_listener: FirstStepListener,
    incrementer: Arc<dyn RunIdIncrementer>,
}

impl SampleJob {
    pub fn new(reporter: Arc<dyn Reporter>,
               second_tasklet: SecondTasklet,
               first_job_listener: FirstJobListener,
               first_step_listener: FirstStepListener,
               incrementer: Arc<dyn RunIdIncrementer>)
               -> Self {
        Self { reporter,
               second_tasklet,
               first_job_listener,
               first_step_listener,
               incrementer }
    }

    /// Cableado por defecto: todos los colaboradores reportan a `reporter`
    /// y el run id sale de un contador en memoria.
    pub fn wired(reporter: Arc<dyn Reporter>) -> Self {
        Self::new(reporter.clone(),
                  SecondTasklet::new(reporter.clone()),
                  FirstJobListener::new(reporter.clone()),
                  FirstStepListener::new(reporter.clone()),
                  Arc::new(InMemoryRunIdIncrementer::new()))
    }

    pub fn first_job(self) -> Job {
        let first = self.first_step();
        let second = self.second_step();
        Job::builder(JOB_NAME).incrementer(self.incrementer)
                              .start(first)
                              .next(second)
                              .listener(self.first_job_listener)
                              .build()
    }

    fn first_step(&self) -> Step {
        Step::builder(FIRST_STEP).tasklet(FirstTasklet::new(self.reporter.clone()))
                                 .listener(self.first_step_listener.clone())
                                 .build()
    }

    fn second_step(&self) -> Step {
        Step::builder(SECOND_STEP).tasklet(self.second_tasklet.clone()).build()
    }
}
