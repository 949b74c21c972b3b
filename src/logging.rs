//! Inicialización de logs del proceso.
//!
//! El engine loguea vía `log`; el subscriber de `tracing-subscriber` captura
//! esos registros. Los logs van a stderr para dejar stdout al resumen JSON.

use tracing_subscriber::EnvFilter;

/// Instala el subscriber. `RUST_LOG` tiene prioridad sobre `default_filter`.
/// Llamadas repetidas no tienen efecto.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt().with_env_filter(filter)
                                    .with_writer(std::io::stderr)
                                    .with_target(false)
                                    .try_init();
}
