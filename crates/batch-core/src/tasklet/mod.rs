//! Tasklets: la unidad de trabajo que ejecuta un step.
//!
//! Un tasklet se invoca en bucle mientras devuelva `RepeatStatus::Continuable`
//! y nunca más después de `RepeatStatus::Finished`. Un `Err` termina el step
//! como fallido sin reintentos.

mod definition;
mod status;

pub use definition::{Tasklet, TaskletError};
pub use status::RepeatStatus;
