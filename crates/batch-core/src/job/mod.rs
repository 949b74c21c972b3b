//! Definición de jobs y steps.
//!
//! Un `Job` es una secuencia ordenada e inmutable de `Step`. Ambos se arman
//! con builders explícitos: el caller pasa tasklets, listeners e
//! incrementer como parámetros, sin registro global.

mod builder;
mod definition;

pub use builder::{JobBuilder, JobBuilderInit, StepBuilder, TaskletStepBuilder};
pub use definition::{Job, Step};
