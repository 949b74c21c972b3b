//! Core JobEngine implementation

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::errors::{BatchError, HookPhase, ListenerScope};
use crate::event::{EventStore, InMemoryEventStore, JobEvent, JobEventKind};
use crate::incrementer::{InMemoryRunIdIncrementer, RunIdIncrementer};
use crate::job::{Job, Step};
use crate::model::{ExecutionStatus, JobContext, JobOutcome, RunId, StepContext, StepContribution, StepOutcome};

use super::guard::guarded;
use super::{JobState, StopHandle};

/// Orquestador de jobs.
///
/// Ejecuta los steps de un `Job` en orden, uno a la vez, invocando los
/// listeners alrededor del job y de cada step. Política fail-fast: el primer
/// step fallido corta la secuencia. Ningún error sale de `run_job` por
/// unwinding; todo vuelve dentro del `JobOutcome`.
#[derive(Debug)]
pub struct JobEngine<E = InMemoryEventStore>
    where E: EventStore
{
    event_store: E,
    incrementer: Arc<dyn RunIdIncrementer>,
    config: EngineConfig,
    last_run_ids: HashMap<String, RunId>,
    stop: StopHandle,
}

impl JobEngine<InMemoryEventStore> {
    /// Engine con store de eventos e incrementer en memoria.
    pub fn new() -> Self {
        Self::new_with_stores(InMemoryEventStore::default(), Arc::new(InMemoryRunIdIncrementer::new()))
    }
}

impl Default for JobEngine<InMemoryEventStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> JobEngine<E> where E: EventStore
{
    /// Crea un engine con los colaboradores dados. `incrementer` es el
    /// default para jobs que no traen uno propio.
    pub fn new_with_stores(event_store: E, incrementer: Arc<dyn RunIdIncrementer>) -> Self {
        Self { event_store,
               incrementer,
               config: EngineConfig::default(),
               last_run_ids: HashMap::new(),
               stop: StopHandle::new() }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Handle para pedir la parada del job en curso desde otro hilo (o
    /// desde un tasklet).
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn event_store(&self) -> &E {
        &self.event_store
    }

    /// Eventos emitidos por una ejecución concreta.
    pub fn events_for(&self, execution_id: Uuid) -> Vec<JobEvent> {
        self.event_store.list(execution_id)
    }

    /// Retira del store los eventos de una ejecución ya terminada.
    pub fn take_events(&mut self, execution_id: Uuid) -> Vec<JobEvent> {
        self.event_store.drain(execution_id)
    }

    /// Códigos compactos de los eventos de una ejecución (ver
    /// `JobEventKind::code`).
    pub fn event_codes(&self, execution_id: Uuid) -> Vec<&'static str> {
        self.events_for(execution_id).iter().map(|e| e.kind.code()).collect()
    }

    /// Último run id ejecutado por este engine para `job_name`.
    pub fn last_run_id(&self, job_name: &str) -> Option<RunId> {
        self.last_run_ids.get(job_name).copied()
    }

    /// Ejecuta el job completo y devuelve su resultado.
    pub fn run_job(&mut self, job: &Job) -> JobOutcome {
        let started_at = Utc::now();
        let execution_id = Uuid::new_v4();
        let incrementer = job.incrementer.clone().unwrap_or_else(|| self.incrementer.clone());
        let mut state = JobState::NotStarted;

        let run_id = match guarded(|| Ok(incrementer.next(&job.name))) {
            Ok(run_id) => run_id,
            Err(message) => {
                let err = BatchError::Internal(format!("run id incrementer for job '{}' {message}", job.name));
                // sin run id válido el outcome lleva RunId(0)
                return self.reject(job, &mut state, RunId(0), execution_id, err, started_at);
            }
        };
        if let Some(last) = self.last_run_ids.get(&job.name).copied() {
            if run_id <= last {
                let err = BatchError::NonIncreasingRunId { job: job.name.clone(),
                                                           last: last.value(),
                                                           got: run_id.value() };
                return self.reject(job, &mut state, run_id, execution_id, err, started_at);
            }
        }
        self.last_run_ids.insert(job.name.clone(), run_id);
        advance(&mut state, JobState::Running);

        let mut job_ctx = JobContext::new(job.name.clone(),
                                          run_id,
                                          execution_id,
                                          job.parameters.with_run_id(run_id),
                                          job.definition_hash.clone());
        self.event_store.append_kind(execution_id,
                                     JobEventKind::JobStarted { job_name: job.name.clone(),
                                                                run_id,
                                                                definition_hash: job.definition_hash.clone(),
                                                                step_count: job.len() });
        info!("run_job:start job={} run_id={run_id} execution_id={execution_id} steps={}",
              job.name,
              job.len());

        let mut cause = self.before_job(job, &mut job_ctx).err();
        let mut step_outcomes: Vec<StepOutcome> = Vec::with_capacity(job.len());
        if cause.is_none() {
            for (index, step) in job.steps.iter().enumerate() {
                let outcome = self.run_step(index, step, &job_ctx);
                let failure = outcome.cause().cloned();
                step_outcomes.push(outcome);
                if let Some(err) = failure {
                    warn!("run_job:fail_fast job={} step={} skipped={}",
                          job.name,
                          step.name,
                          job.len() - index - 1);
                    cause = Some(err);
                    break;
                }
            }
        }

        let outcome = JobOutcome::new(job.name.clone(), run_id, execution_id, cause, step_outcomes, started_at);
        self.after_job(job, &mut job_ctx, &outcome);

        let final_state = if outcome.status().is_completed() { JobState::Completed } else { JobState::Failed };
        advance(&mut state, final_state);
        self.event_store.append_kind(execution_id,
                                     JobEventKind::JobFinished { status: outcome.status(),
                                                                 steps_attempted: outcome.step_outcomes().len() });
        // rearma la señal para la próxima ejecución
        self.stop.reset();
        match outcome.cause() {
            None => info!("run_job:done job={} run_id={run_id} state={state}", job.name),
            Some(err) => warn!("run_job:done job={} run_id={run_id} state={state} kind={} err={err}",
                               job.name,
                               err.kind_name()),
        }
        outcome
    }

    /// Cierra una ejecución que no llegó a arrancar: `NotStarted → Failed`,
    /// sin hooks ni steps y con `JobFinished` como único evento.
    fn reject(&mut self,
              job: &Job,
              state: &mut JobState,
              run_id: RunId,
              execution_id: Uuid,
              err: BatchError,
              started_at: DateTime<Utc>)
              -> JobOutcome {
        error!("run_job:rejected job={} execution_id={execution_id} kind={} err={err}",
               job.name,
               err.kind_name());
        advance(state, JobState::Failed);
        self.event_store.append_kind(execution_id,
                                     JobEventKind::JobFinished { status: ExecutionStatus::Failed,
                                                                 steps_attempted: 0 });
        JobOutcome::new(job.name.clone(), run_id, execution_id, Some(err), vec![], started_at)
    }

    /// Ejecuta un step con un `StepContext` nuevo derivado de `job_ctx`.
    pub fn run_step(&mut self, index: usize, step: &Step, job_ctx: &JobContext) -> StepOutcome {
        let started_at = Utc::now();
        let execution_id = job_ctx.execution_id();
        let mut ctx = job_ctx.step_context(&step.name);
        let mut contribution = StepContribution::new();
        self.event_store.append_kind(execution_id,
                                     JobEventKind::StepStarted { step_index: index,
                                                                 step_name: step.name.clone() });
        debug!("run_step:start step={} index={index} execution_id={execution_id}", step.name);

        let mut cause = self.before_step(step, &mut ctx).err();
        if cause.is_none() {
            cause = self.execute_tasklet(step, &mut contribution, &mut ctx).err();
            let provisional = StepOutcome::new(step.name.clone(), cause.clone(), contribution.clone(), started_at);
            let after_err = self.after_step(step, &mut ctx, &provisional);
            // un after-hook sólo degrada un éxito; nunca tapa un fallo previo
            if cause.is_none() {
                cause = after_err;
            }
        }

        let outcome = StepOutcome::new(step.name.clone(), cause, contribution, started_at);
        let kind = match outcome.cause() {
            None => JobEventKind::StepFinished { step_index: index,
                                                 step_name: step.name.clone(),
                                                 invocations: outcome.contribution().invocations() },
            Some(err) => JobEventKind::StepFailed { step_index: index,
                                                    step_name: step.name.clone(),
                                                    error: err.clone() },
        };
        self.event_store.append_kind(execution_id, kind);
        match outcome.cause() {
            None => debug!("run_step:done step={} invocations={}",
                           step.name,
                           outcome.contribution().invocations()),
            Some(err) => warn!("run_step:failed step={} kind={} err={err}", step.name, err.kind_name()),
        }
        outcome
    }

    fn execute_tasklet(&mut self,
                       step: &Step,
                       contribution: &mut StepContribution,
                       ctx: &mut StepContext)
                       -> Result<(), BatchError> {
        loop {
            self.check_stop(|| format!("tasklet of step '{}'", step.name))?;
            if let Some(limit) = self.config.max_tasklet_iterations {
                if contribution.invocations() >= limit {
                    return Err(BatchError::IterationLimitExceeded { step: step.name.clone(),
                                                                    limit });
                }
            }
            let iteration = contribution.record_invocation();
            let status = guarded(|| step.tasklet.execute(contribution, ctx).map_err(|e| e.to_string()))
                .map_err(|message| BatchError::TaskletExecution { step: step.name.clone(),
                                                                  message })?;
            debug!("tasklet:returned step={} tasklet={} iteration={iteration} status={status:?}",
                   step.name,
                   step.tasklet.name());
            if !status.is_continuable() {
                return Ok(());
            }
        }
    }

    fn before_job(&mut self, job: &Job, ctx: &mut JobContext) -> Result<(), BatchError> {
        let Some(listener) = job.listener.as_ref() else {
            return Ok(());
        };
        self.check_stop(|| format!("before-job hook of '{}'", job.name))?;
        guarded(|| listener.before_job(ctx).map_err(|e| e.to_string()))
            .map_err(|message| self.listener_failed(ctx.execution_id(), ListenerScope::Job, HookPhase::Before, &job.name, message))
    }

    /// El error de `after_job` se registra pero no altera el outcome.
    fn after_job(&mut self, job: &Job, ctx: &mut JobContext, outcome: &JobOutcome) {
        let Some(listener) = job.listener.as_ref() else {
            return;
        };
        if let Err(message) = guarded(|| listener.after_job(ctx, outcome).map_err(|e| e.to_string())) {
            self.listener_failed(ctx.execution_id(), ListenerScope::Job, HookPhase::After, &job.name, message);
        }
    }

    fn before_step(&mut self, step: &Step, ctx: &mut StepContext) -> Result<(), BatchError> {
        for listener in step.listeners.iter() {
            self.check_stop(|| format!("before-step hook of '{}'", step.name))?;
            guarded(|| listener.before_step(ctx).map_err(|e| e.to_string()))
                .map_err(|message| self.listener_failed(ctx.execution_id(), ListenerScope::Step, HookPhase::Before, &step.name, message))?;
        }
        Ok(())
    }

    /// Ejecuta todos los `after_step`, aunque alguno falle; devuelve el
    /// primer error.
    fn after_step(&mut self, step: &Step, ctx: &mut StepContext, outcome: &StepOutcome) -> Option<BatchError> {
        let mut first_err = None;
        for listener in step.listeners.iter() {
            if let Err(message) = guarded(|| listener.after_step(ctx, outcome).map_err(|e| e.to_string())) {
                let err = self.listener_failed(ctx.execution_id(), ListenerScope::Step, HookPhase::After, &step.name, message);
                first_err.get_or_insert(err);
            }
        }
        first_err
    }

    fn listener_failed(&mut self,
                       execution_id: Uuid,
                       scope: ListenerScope,
                       phase: HookPhase,
                       owner: &str,
                       message: String)
                       -> BatchError {
        let err = BatchError::Listener { scope,
                                         phase,
                                         owner: owner.to_string(),
                                         message };
        warn!("listener:failed execution_id={execution_id} err={err}");
        self.event_store.append_kind(execution_id,
                                     JobEventKind::ListenerFailed { scope,
                                                                    phase,
                                                                    error: err.clone() });
        err
    }

    fn check_stop<F>(&self, boundary: F) -> Result<(), BatchError>
        where F: FnOnce() -> String
    {
        if self.stop.is_stop_requested() {
            let boundary = boundary();
            warn!("stop:detected boundary={boundary}");
            return Err(BatchError::Interrupted { boundary });
        }
        Ok(())
    }
}

fn advance(state: &mut JobState, to: JobState) {
    match state.transition(to) {
        Ok(next) => *state = next,
        Err(e) => error!("job_state:{e}"),
    }
}
