//! Modelos neutrales (contextos, contribución, run id, outcomes).

pub mod context;
pub mod contribution;
pub mod outcome;
pub mod run;

pub use context::{ExecutionContext, JobContext, StepContext};
pub use contribution::StepContribution;
pub use outcome::{ExecutionStatus, JobOutcome, StepOutcome};
pub use run::{JobParameters, RunId};
