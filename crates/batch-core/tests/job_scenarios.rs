
use batch_core::{BatchError, ExecutionStatus, HookPhase, JobEngine, ListenerScope, RepeatStatus, Step, TaskletError};
use test_support::*;

#[test]
fn two_finishing_steps_complete_the_job() {
    let log = call_log();
    let job = job_of("First Job",
                     vec![Step::builder("A").tasklet(ScriptedTasklet::finished("A", &log)).build(),
                          Step::builder("B").tasklet(ScriptedTasklet::finished("B", &log)).build()],
                     None);
    let mut engine = JobEngine::new();
    let outcome = engine.run_job(&job);

    assert_eq!(outcome.status(), ExecutionStatus::Completed);
    assert!(outcome.cause().is_none());
    assert_eq!(outcome.step_statuses(), vec![ExecutionStatus::Completed, ExecutionStatus::Completed]);
    assert_eq!(*log.borrow(), vec!["tasklet:A", "tasklet:B"]);
}

#[test]
fn failing_second_step_fails_the_job_with_its_cause() {
    let log = call_log();
    let job = job_of("First Job",
                     vec![Step::builder("A").tasklet(ScriptedTasklet::finished("A", &log)).build(),
                          Step::builder("B").tasklet(ScriptedTasklet::failing("B", "disk full", &log)).build()],
                     None);
    let mut engine = JobEngine::new();
    let outcome = engine.run_job(&job);

    assert_eq!(outcome.status(), ExecutionStatus::Failed);
    assert_eq!(outcome.cause(),
               Some(&BatchError::TaskletExecution { step: "B".into(),
                                                    message: "disk full".into() }));
    assert_eq!(outcome.step_outcomes().len(), 2);
    assert_eq!(outcome.step_statuses(), vec![ExecutionStatus::Completed, ExecutionStatus::Failed]);
    assert_eq!(outcome.step_outcomes()[1].cause(), outcome.cause());
    assert_eq!(engine.event_codes(outcome.execution_id()), vec!["J", "S", "F", "S", "X", "C"]);
}

#[test]
fn before_job_failure_runs_no_step_but_still_calls_after_job() {
    let log = call_log();
    let a = ScriptedTasklet::finished("A", &log);
    let a_calls = a.calls();
    let job = job_of("First Job",
                     vec![Step::builder("A").tasklet(a).build()],
                     Some(RecordingJobListener::new(Failures::BEFORE, &log)));
    let outcome = JobEngine::new().run_job(&job);

    assert_eq!(outcome.status(), ExecutionStatus::Failed);
    assert!(outcome.step_outcomes().is_empty());
    assert_eq!(a_calls.get(), 0);
    assert_eq!(count(&log, "after_job:"), 1);
    assert!(matches!(outcome.cause(),
                     Some(BatchError::Listener { scope: ListenerScope::Job,
                                                 phase: HookPhase::Before,
                                                 .. })));
}

#[test]
fn tasklet_is_never_invoked_after_finished() {
    let log = call_log();
    // el tercer elemento nunca debe consumirse; si lo fuera, el step fallaría
    let tasklet = ScriptedTasklet::new("A",
                                       vec![Ok(RepeatStatus::Continuable),
                                            Ok(RepeatStatus::Continuable),
                                            Ok(RepeatStatus::Finished)],
                                       &log);
    let calls = tasklet.calls();
    let job = job_of("repeat", vec![Step::builder("A").tasklet(tasklet).build()], None);
    let outcome = JobEngine::new().run_job(&job);

    assert_eq!(outcome.status(), ExecutionStatus::Completed);
    assert_eq!(calls.get(), 3);
    assert_eq!(outcome.step_outcomes()[0].contribution().invocations(), 3);
}

#[test]
fn tasklet_error_stops_repetition_immediately() {
    let log = call_log();
    let tasklet = ScriptedTasklet::new("A",
                                       vec![Ok(RepeatStatus::Continuable),
                                            Err(TaskletError::new("bad row")),
                                            Ok(RepeatStatus::Finished)],
                                       &log);
    let calls = tasklet.calls();
    let job = job_of("repeat", vec![Step::builder("A").tasklet(tasklet).build()], None);
    let outcome = JobEngine::new().run_job(&job);

    assert_eq!(outcome.status(), ExecutionStatus::Failed);
    assert_eq!(calls.get(), 2);
}

#[test]
fn runs_with_different_run_ids_produce_identical_step_statuses() {
    let build = |log: &CallLog| {
        job_of("replay",
               vec![Step::builder("A").tasklet(ScriptedTasklet::finished("A", log)).build(),
                    Step::builder("B").tasklet(ScriptedTasklet::new("B",
                                                                    vec![Ok(RepeatStatus::Continuable),
                                                                         Ok(RepeatStatus::Finished)],
                                                                    log))
                                      .build()],
               None)
    };
    let log = call_log();
    let mut engine = JobEngine::new();
    let first = engine.run_job(&build(&log));
    let second = engine.run_job(&build(&log));

    assert_ne!(first.run_id(), second.run_id());
    assert_eq!(first.step_statuses(), second.step_statuses());
    assert_eq!(first.status(), second.status());
    let names = |o: &batch_core::JobOutcome| o.step_outcomes().iter().map(|s| s.step_name().to_string()).collect::<Vec<_>>();
    assert_eq!(names(&first), names(&second));
}
