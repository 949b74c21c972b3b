//! Colaborador de diagnóstico que tasklets y listeners reciben al
//! construirse, en lugar de imprimir directamente.

use std::fmt::Debug;
use std::sync::Mutex;

use log::info;

pub trait Reporter: Debug + Send + Sync {
    fn report(&self, source: &str, message: &str);
}

/// Envía cada línea al log (`info`).
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&self, source: &str, message: &str) {
        info!("[{source}] {message}");
    }
}

/// Acumula las líneas en memoria, en orden.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    lines: Mutex<Vec<String>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, source: &str, message: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(format!("[{source}] {message}"));
        }
    }
}
