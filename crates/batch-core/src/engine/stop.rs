use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Señal de parada compartible entre hilos.
///
/// El engine la consulta antes de cada hook `before_*` y de cada invocación
/// de tasklet; una parada pendiente termina el ámbito como
/// `BatchError::Interrupted`. Una parada pedida antes de `run_job` se aplica
/// en el primer punto de control de esa ejecución; el engine la rearma al
/// terminar cada ejecución.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    pub(crate) fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
