//! Tasklets del job de ejemplo.

mod first;
mod second;

pub use first::FirstTasklet;
pub use second::SecondTasklet;
