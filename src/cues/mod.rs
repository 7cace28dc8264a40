//! Cue System Module
//!
//! The editable cue list and its change protocol:
//! - Cue data models (Cue, CueCategory, CuePlacement)
//! - Track operations that keep the list sorted and validated
//! - [`CueChange`] events describing each mutation for overlay consumers
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Cue System                               │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  models.rs     - Data structures (Cue, CuePlacement)            │
//! │  track.rs      - Sorted, validated cue list + operations        │
//! │  events.rs     - CueChange protocol for list consumers          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

mod events;
mod models;
mod track;

// Re-export models
pub use models::{Cue, CueCategory, CuePlacement, TextAlignment, WritingDirection};

// Re-export track and events
pub use events::CueChange;
pub use track::CueTrack;
