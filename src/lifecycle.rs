//! Page lifecycle: `Loading -> Ready` or `Loading -> Error`.
//!
//! `Error` is terminal. `Ready` re-enters itself on filter changes without
//! going back through `Loading`.

/// Current page phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
    Error { message: String },
}

/// Which top-level surfaces are shown for a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surfaces {
    pub loading: bool,
    pub content: bool,
    pub error: bool,
}

impl Phase {
    pub fn surfaces(&self) -> Surfaces {
        match self {
            Self::Loading => Surfaces {
                loading: true,
                content: false,
                error: false,
            },
            Self::Ready => Surfaces {
                loading: false,
                content: true,
                error: false,
            },
            Self::Error { .. } => Surfaces {
                loading: false,
                content: false,
                error: true,
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Fetch and first render succeeded. Only valid from `Loading`.
    ///
    /// Returns `false` (and leaves the phase alone) from any other phase.
    pub fn mark_ready(&mut self) -> bool {
        if *self != Self::Loading {
            tracing::debug!(phase = ?self, "Ignoring ready transition");
            return false;
        }
        *self = Self::Ready;
        true
    }

    /// Fetch failed. Only valid from `Loading`.
    pub fn mark_failed(&mut self, message: impl Into<String>) -> bool {
        if *self != Self::Loading {
            tracing::debug!(phase = ?self, "Ignoring failure transition");
            return false;
        }
        *self = Self::Error {
            message: message.into(),
        };
        true
    }
}
