//! Frontera de pánicos: el código de usuario (tasklets, hooks) no debe
//! desenrollar a través de `run_job`.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Ejecuta `f` convirtiendo un pánico en `Err` con su mensaje.
pub(crate) fn guarded<T, F>(f: F) -> Result<T, String>
    where F: FnOnce() -> Result<T, String>
{
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(res) => res,
        Err(payload) => Err(format!("panicked: {}", panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_becomes_error() {
        let r: Result<(), String> = guarded(|| panic!("kaput"));
        assert_eq!(r.unwrap_err(), "panicked: kaput");
        let ok: Result<u8, String> = guarded(|| Ok(3));
        assert_eq!(ok.unwrap(), 3);
    }
}
