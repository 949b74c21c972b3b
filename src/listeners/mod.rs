//! Listeners del job de ejemplo.

mod first_job;
mod first_step;

pub use first_job::FirstJobListener;
pub use first_step::FirstStepListener;
