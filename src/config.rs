//! Configuración de la aplicación.
//! Carga variables de entorno (.env incluido) y expone `AppConfig` con la
//! sección del engine embebida.
use std::env;

use batch_core::config::{init_dotenv, parse_var, ConfigError};
use batch_core::EngineConfig;

pub const RUNS_VAR: &str = "BATCH_RUNS";
pub const LOG_VAR: &str = "BATCH_LOG";

/// Configuración global de la aplicación.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Cuántas veces lanzar el job (cada una con run id nuevo).
    pub runs: u32,
    /// Filtro de logs por defecto cuando `RUST_LOG` no está definido.
    pub log_filter: String,
    pub engine: EngineConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        init_dotenv();
        Self::from_lookup(|k| env::var(k).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
        where F: Fn(&str) -> Option<String>
    {
        let runs = match parse_var::<u32, _>(&lookup, RUNS_VAR)? {
            None => 1,
            Some(0) => {
                return Err(ConfigError::InvalidValue { key: RUNS_VAR.to_string(),
                                                       value: "0".to_string() })
            }
            Some(n) => n,
        };
        let log_filter = lookup(LOG_VAR).filter(|v| !v.trim().is_empty())
                                        .unwrap_or_else(|| "info".to_string());
        let engine = EngineConfig::from_lookup(&lookup)?;
        Ok(Self { runs, log_filter, engine })
    }
}
