//! Core domain types for Mindsweep - no IO, no async.

mod geometry;
mod ids;
mod thought;
pub mod ui;

pub use geometry::{Bounds, Point};
pub use ids::ThoughtId;
pub use thought::{Category, Hint, Thought};
