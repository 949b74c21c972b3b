//! batch-core: motor secuencial de jobs y steps.
//!
//! Un `Job` es una secuencia ordenada de `Step`; cada step envuelve un
//! `Tasklet`. El `JobEngine` ejecuta los steps en orden, invoca los listeners
//! alrededor del job y de cada step, y devuelve un `JobOutcome` por valor.
pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod event;
pub mod hashing;
pub mod incrementer;
pub mod job;
pub mod listener;
pub mod model;
pub mod tasklet;

pub use config::EngineConfig;
pub use engine::{JobEngine, JobState, StopHandle};
pub use errors::{BatchError, HookPhase, ListenerScope};
pub use event::{EventStore, InMemoryEventStore, JobEvent, JobEventKind};
pub use incrementer::{InMemoryRunIdIncrementer, RunIdIncrementer};
pub use job::{Job, Step};
pub use listener::{CompositeJobListener, CompositeStepListener, JobListener, ListenerError, StepListener};
pub use model::{ExecutionContext, ExecutionStatus, JobContext, JobOutcome, JobParameters, RunId, StepContext,
                StepContribution, StepOutcome};
pub use tasklet::{RepeatStatus, Tasklet, TaskletError};
