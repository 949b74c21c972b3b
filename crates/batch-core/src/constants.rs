//! Constantes del motor.
//!
//! `ENGINE_VERSION` participa en el `definition_hash` de un `Job`: un cambio
//! incompatible del engine debe producir hashes distintos aunque la definición
//! del job no cambie.

/// Versión lógica del motor.
pub const ENGINE_VERSION: &str = "B1.0";

/// Clave bajo la que el engine registra el run id en los `JobParameters`.
pub const RUN_ID_KEY: &str = "run.id";
