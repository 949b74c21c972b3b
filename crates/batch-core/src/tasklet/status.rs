use serde::{Deserialize, Serialize};

/// Señal devuelta por `Tasklet::execute`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepeatStatus {
    /// El engine debe invocar el tasklet otra vez con el mismo contexto.
    Continuable,
    /// El step terminó.
    Finished,
}

impl RepeatStatus {
    /// `Continuable` si `more` es verdadero, `Finished` en otro caso.
    pub fn continue_if(more: bool) -> Self {
        if more {
            RepeatStatus::Continuable
        } else {
            RepeatStatus::Finished
        }
    }

    pub fn is_continuable(self) -> bool {
        matches!(self, RepeatStatus::Continuable)
    }
}
