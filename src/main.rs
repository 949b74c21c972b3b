use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use batch_core::JobEngine;
use batchflow_rust::reporting::LogReporter;
use batchflow_rust::{logging, AppConfig, AppError, SampleJob};
use log::{debug, error, info};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("first-job: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), AppError> {
    let config = AppConfig::from_env()?;
    logging::init(&config.log_filter);
    info!("config runs={} max_tasklet_iterations={:?}",
          config.runs,
          config.engine.max_tasklet_iterations);

    let job = SampleJob::wired(Arc::new(LogReporter)).first_job();
    let mut engine = JobEngine::new().with_config(config.engine.clone());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut failed = 0u32;
    for _ in 0..config.runs {
        let outcome = engine.run_job(&job);
        let events = engine.take_events(outcome.execution_id());
        debug!("run_id={} events={}", outcome.run_id(), events.len());
        writeln!(out, "{}", serde_json::to_string_pretty(&outcome)?)?;
        if !outcome.status().is_completed() {
            failed += 1;
        }
    }

    if failed > 0 {
        return Err(AppError::JobFailed { job: job.name().to_string(),
                                         failed,
                                         runs: config.runs });
    }
    Ok(())
}
