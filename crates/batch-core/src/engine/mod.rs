//! Engine module: orquestador de jobs, máquina de estados y señal de parada.

pub mod core;
mod guard;
pub mod state;
pub mod stop;

pub use self::core::JobEngine;
pub use state::JobState;
pub use stop::StopHandle;

pub use crate::event::{EventStore, InMemoryEventStore, JobEvent, JobEventKind};
pub use crate::model::{ExecutionStatus, JobOutcome, StepOutcome};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::errors::BatchError;
    use crate::job::{Job, Step};
    use crate::listener::{ListenerError, StepListener};
    use crate::model::{StepContext, StepContribution};
    use crate::tasklet::{RepeatStatus, Tasklet, TaskletError};
    use std::cell::Cell;
    use std::rc::Rc;

    // Tasklet que pide repetir `rounds` veces y luego termina
    #[derive(Debug)]
    struct Countdown {
        rounds: u64,
    }

    impl Tasklet for Countdown {
        fn execute(&self, contribution: &mut StepContribution, ctx: &mut StepContext) -> Result<RepeatStatus, TaskletError> {
            contribution.increment_read_count(1);
            let seen = ctx.execution_context().get("seen").and_then(|v| v.as_u64()).unwrap_or(0) + 1;
            ctx.execution_context_mut().put("seen", seen);
            Ok(RepeatStatus::continue_if(seen < self.rounds))
        }
    }

    #[derive(Debug)]
    struct Forever;

    impl Tasklet for Forever {
        fn execute(&self, _c: &mut StepContribution, _ctx: &mut StepContext) -> Result<RepeatStatus, TaskletError> {
            Ok(RepeatStatus::Continuable)
        }
    }

    #[derive(Debug)]
    struct Panicking;

    impl Tasklet for Panicking {
        fn execute(&self, _c: &mut StepContribution, _ctx: &mut StepContext) -> Result<RepeatStatus, TaskletError> {
            panic!("tasklet exploded")
        }
    }

    // Listener que falla en el after-hook y cuenta sus invocaciones
    #[derive(Debug)]
    struct FailingAfter {
        calls: Rc<Cell<u32>>,
    }

    impl StepListener for FailingAfter {
        fn after_step(&self, _ctx: &mut StepContext, _outcome: &StepOutcome) -> Result<(), ListenerError> {
            self.calls.set(self.calls.get() + 1);
            Err(ListenerError::new("cleanup failed"))
        }
    }

    #[test]
    fn continuable_tasklet_reuses_the_same_context() {
        let job = Job::builder("countdown").start(Step::builder("count").tasklet(Countdown { rounds: 4 }).build())
                                           .build();
        let mut engine = JobEngine::new();
        let outcome = engine.run_job(&job);

        assert_eq!(outcome.status(), ExecutionStatus::Completed);
        let contribution = outcome.step_outcomes()[0].contribution();
        assert_eq!(contribution.invocations(), 4);
        assert_eq!(contribution.read_count(), 4);
        assert_eq!(engine.event_codes(outcome.execution_id()), vec!["J", "S", "F", "C"]);
    }

    #[test]
    fn iteration_limit_fails_runaway_tasklet() {
        let job = Job::builder("runaway").start(Step::builder("spin").tasklet(Forever).build()).build();
        let mut engine = JobEngine::new().with_config(EngineConfig::default().with_max_tasklet_iterations(10));
        let outcome = engine.run_job(&job);

        assert_eq!(outcome.status(), ExecutionStatus::Failed);
        assert_eq!(outcome.cause(),
                   Some(&BatchError::IterationLimitExceeded { step: "spin".into(),
                                                              limit: 10 }));
        assert_eq!(outcome.step_outcomes()[0].contribution().invocations(), 10);
    }

    #[test]
    fn panicking_tasklet_is_reported_as_tasklet_error() {
        let job = Job::builder("panics").start(Step::builder("boom").tasklet(Panicking).build()).build();
        let mut engine = JobEngine::new();
        let outcome = engine.run_job(&job);

        match outcome.cause() {
            Some(BatchError::TaskletExecution { step, message }) => {
                assert_eq!(step, "boom");
                assert!(message.contains("tasklet exploded"), "got: {message}");
            }
            other => panic!("unexpected cause: {other:?}"),
        }
    }

    #[test]
    fn after_step_failure_demotes_success_and_is_recorded() {
        let calls = Rc::new(Cell::new(0));
        let step = Step::builder("s").tasklet(Countdown { rounds: 1 })
                                     .listener(FailingAfter { calls: calls.clone() })
                                     .build();
        let job = Job::builder("demote").start(step).build();
        let mut engine = JobEngine::new();
        let outcome = engine.run_job(&job);

        assert_eq!(calls.get(), 1);
        assert_eq!(outcome.status(), ExecutionStatus::Failed);
        assert!(matches!(outcome.cause(), Some(BatchError::Listener { message, .. }) if message == "cleanup failed"));
        assert_eq!(engine.event_codes(outcome.execution_id()), vec!["J", "S", "L", "X", "C"]);
    }

    #[test]
    fn after_step_failure_does_not_mask_tasklet_failure() {
        let calls = Rc::new(Cell::new(0));
        let step = Step::builder("s").tasklet(Panicking)
                                     .listener(FailingAfter { calls: calls.clone() })
                                     .build();
        let job = Job::builder("mask").start(step).build();
        let outcome = JobEngine::new().run_job(&job);

        assert_eq!(calls.get(), 1);
        assert!(matches!(outcome.cause(), Some(BatchError::TaskletExecution { .. })));
    }

    #[test]
    fn take_events_empties_the_store_for_that_execution() {
        let job = Job::builder("drain").start(Step::builder("s").tasklet(Countdown { rounds: 1 }).build())
                                       .build();
        let mut engine = JobEngine::new();
        let first = engine.run_job(&job);
        let second = engine.run_job(&job);

        let taken = engine.take_events(first.execution_id());
        assert_eq!(taken.iter().map(|e| e.kind.code()).collect::<Vec<_>>(), vec!["J", "S", "F", "C"]);
        assert!(engine.events_for(first.execution_id()).is_empty());
        assert_eq!(engine.event_codes(second.execution_id()).len(), 4);
    }

    #[test]
    fn run_ids_advance_and_parameters_carry_them() {
        let job = Job::builder("ids").parameter("input", "a.csv")
                                     .start(Step::builder("s").tasklet(Countdown { rounds: 1 }).build())
                                     .build();
        let mut engine = JobEngine::new();
        let first = engine.run_job(&job);
        let second = engine.run_job(&job);
        assert_eq!(first.run_id().value() + 1, second.run_id().value());
        assert_eq!(engine.last_run_id("ids"), Some(second.run_id()));
        assert_ne!(first.execution_id(), second.execution_id());
    }
}
