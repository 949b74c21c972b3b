//! batchflow: aplicación de ejemplo sobre `batch-core`.
//!
//! - `jobs::sample` arma el "First Job" (dos steps, listeners, incrementer).
//! - `config` y `logging` cubren el arranque del proceso.
//! - `errors` define `AppError` para el binario.

pub mod config;
pub mod errors;
pub mod jobs;
pub mod listeners;
pub mod logging;
pub mod reporting;
pub mod tasklets;

pub use config::AppConfig;
pub use errors::AppError;
pub use jobs::SampleJob;
