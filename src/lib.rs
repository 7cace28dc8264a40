//! Cueline Constraint Engine
//!
//! Core engine for caption cue editing: resolves per-project caption
//! specifications into concrete limits, validates cue lists against them,
//! corrects interactive edits before they commit, and propagates committed
//! changes to the waveform overlay.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                     Cueline Constraint Engine                    │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  policy.rs      - Specification -> concrete limits               │
//! │  validation.rs  - Marks cues corrupted, itemizes violations      │
//! │  correction.rs  - Drag/typing corrections before commit          │
//! │  cues/          - Cue models, sorted track, CueChange events     │
//! │  waveform/      - Region overlay kept in step via CueChange      │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Data Flow
//!
//! An interactive edit runs through the corrections, commits into the
//! [`cues::CueTrack`] (which revalidates the edited neighborhood and emits
//! one [`cues::CueChange`]), and the event drives the
//! [`waveform::WaveformView`] overlay.
//!
//! # Example Usage
//!
//! ```rust
//! use cueline::cues::{Cue, CueTrack};
//! use cueline::policy::CaptionSpecification;
//! use cueline::waveform::WaveformView;
//!
//! let spec = CaptionSpecification::new().with_duration_limits(Some(1000), Some(8000));
//! let mut track = CueTrack::create("English", "en");
//! let mut overlay = WaveformView::new(30.0);
//!
//! let (_, change) = track
//!     .add_cue(Cue::create(0.0, 2.5, "Hello World"), Some(&spec))
//!     .unwrap();
//! overlay.apply(&change, &track.cues);
//! assert_eq!(overlay.len(), 1);
//! ```

pub mod correction;
pub mod cues;
pub mod policy;
pub mod validation;
pub mod waveform;

// Re-export common types
mod types;
pub use types::*;

mod error;
pub use error::*;
