use batch_core::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("job '{job}' failed in {failed} of {runs} run(s)")]
    JobFailed { job: String, failed: u32, runs: u32 },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_is_wrapped() {
        let err: AppError = ConfigError::InvalidValue { key: "BATCH_RUNS".into(),
                                                        value: "x".into() }.into();
        assert_eq!(err.to_string(), "configuration error: invalid value for BATCH_RUNS: 'x'");
    }

    #[test]
    fn io_variant_from() {
        let err: AppError = std::io::Error::other("pipe closed").into();
        assert_eq!(err.to_string(), "io error: pipe closed");
    }

    #[test]
    fn job_failed_format() {
        let err = AppError::JobFailed { job: "First Job".into(),
                                        failed: 1,
                                        runs: 3 };
        assert_eq!(err.to_string(), "job 'First Job' failed in 1 of 3 run(s)");
    }
}
