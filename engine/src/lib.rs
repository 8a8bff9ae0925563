//! Core engine for Mindsweep - the application state machine without TUI
//! dependencies.
//!
//! This crate contains everything that changes state:
//!
//! - **Application state**: the [`App`] struct owns all runtime state
//! - **Thought store**: the authoritative, insertion-ordered collection
//! - **Segmentation & hints**: free text to discrete thoughts, keyword hints
//! - **Dragging**: pointer state machine plus per-frame geometry registries
//! - **Ritual**: the confirm → animate → clear sequence as owned timers
//! - **Speech**: an optional recognition capability behind a trait
//!
//! The TUI layer (`mindsweep-tui`) reads state from [`App`], republishes
//! layout geometry each frame, and forwards input back to it. No rendering
//! logic lives in this crate.

mod app;
mod config;
mod drag;
mod hint;
mod input;
mod ritual;
mod segment;
mod speech;
mod store;

pub use app::App;
pub use config::{AppConfig, ConfigError, MindsweepConfig, SpeechConfig};
pub use drag::{BubbleEntry, BubbleRegistry, DragController, DropOutcome, ZoneId, ZoneRegistry};
pub use hint::classify_hint;
pub use input::{DraftInput, InputMode};
pub use ritual::{
    ANIMATION_TOTAL, PARTICLE_COUNT, POP_DURATION, POP_STAGGER, Particle, Ritual, RitualTick,
};
pub use segment::segment;
pub use speech::{
    CommandRecognizer, RecognitionBackend, RecognitionEvent, SpeechCapture, SpeechError,
};
pub use store::ThoughtStore;

// Re-export domain types for downstream crates.
pub use mindsweep_types::ui::{AnimPhase, EffectTimer, UiOptions};
pub use mindsweep_types::{Bounds, Category, Hint, Point, Thought, ThoughtId};
