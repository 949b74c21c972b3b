//! Configuración del engine desde variables de entorno.
//!
//! Convención `BATCH_*`. El archivo `.env` (si existe) se carga una sola vez.

use std::env;
use std::str::FromStr;

use dotenvy::dotenv;
use once_cell::sync::Lazy;
use thiserror::Error;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

pub const MAX_TASKLET_ITERATIONS_VAR: &str = "BATCH_MAX_TASKLET_ITERATIONS";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Tope de invocaciones de un tasklet por step. `None` = sin tope.
    pub max_tasklet_iterations: Option<u64>,
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        init_dotenv();
        Self::from_lookup(|k| env::var(k).ok())
    }

    /// Igual que `from_env` pero con una función de lookup arbitraria.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
        where F: Fn(&str) -> Option<String>
    {
        let max_tasklet_iterations = parse_var(&lookup, MAX_TASKLET_ITERATIONS_VAR)?.filter(|n: &u64| *n > 0);
        Ok(Self { max_tasklet_iterations })
    }

    pub fn with_max_tasklet_iterations(mut self, limit: u64) -> Self {
        self.max_tasklet_iterations = Some(limit);
        self
    }
}

/// Lee y parsea `key`. Variable ausente o vacía → `Ok(None)`.
pub fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
    where T: FromStr,
          F: Fn(&str) -> Option<String>
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw.trim()
                        .parse::<T>()
                        .map(Some)
                        .map_err(|_| ConfigError::InvalidValue { key: key.to_string(),
                                                                 value: raw }),
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn missing_or_zero_limit_means_unbounded() {
        assert_eq!(EngineConfig::from_lookup(lookup(&[])).unwrap().max_tasklet_iterations, None);
        let cfg = EngineConfig::from_lookup(lookup(&[(MAX_TASKLET_ITERATIONS_VAR, "0")])).unwrap();
        assert_eq!(cfg.max_tasklet_iterations, None);
    }

    #[test]
    fn parses_limit() {
        let cfg = EngineConfig::from_lookup(lookup(&[(MAX_TASKLET_ITERATIONS_VAR, " 25 ")])).unwrap();
        assert_eq!(cfg.max_tasklet_iterations, Some(25));
    }

    #[test]
    fn rejects_garbage() {
        let err = EngineConfig::from_lookup(lookup(&[(MAX_TASKLET_ITERATIONS_VAR, "lots")])).unwrap_err();
        assert_eq!(err.to_string(), "invalid value for BATCH_MAX_TASKLET_ITERATIONS: 'lots'");
    }
}
