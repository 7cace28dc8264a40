//! Waveform Overlay Module
//!
//! Mirrors the cue list as draggable regions over the audio waveform:
//! - [`WaveformRegion`] is the drawable span for one cue
//! - [`WaveformView`] consumes [`crate::cues::CueChange`] events and keeps
//!   the overlay in step, rebuilding whenever an event cannot be trusted

mod models;
mod view;

pub use models::WaveformRegion;
pub use view::WaveformView;
