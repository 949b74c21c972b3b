//! Listeners de ciclo de vida.
//!
//! Ambos traits traen hooks vacíos por defecto: un listener implementa sólo
//! los que le interesan. Los composites permiten colgar varios listeners donde
//! el job admite uno solo.

mod composite;
mod definition;

pub use composite::{CompositeJobListener, CompositeStepListener};
pub use definition::{JobListener, ListenerError, StepListener};
