//! UI-facing types shared between the engine and the TUI.

mod animation;

pub use animation::{AnimPhase, EffectTimer, normalized_progress};

/// UI configuration options derived from config/environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiOptions {
    pub ascii_only: bool,
    pub high_contrast: bool,
    pub reduced_motion: bool,
}
