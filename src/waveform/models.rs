//! Waveform Region Models
//!
//! The overlay's own representation of a cue: just enough to draw a labeled
//! span on the waveform. Regions carry no cue identity; correspondence with
//! the cue list is positional.

use serde::{Deserialize, Serialize};

use crate::cues::Cue;
use crate::TimeSec;

/// A labeled span rendered over the waveform
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaveformRegion {
    /// Text shown on the region (the cue text)
    pub label: String,
    /// Region start in media seconds
    pub start: TimeSec,
    /// Region end in media seconds
    pub end: TimeSec,
    /// Whether the whole region may be dragged along the timeline
    pub drag: bool,
    /// Whether the region edges may be resized
    pub resize: bool,
}

impl WaveformRegion {
    /// Builds the region for a cue.
    ///
    /// Whole-region dragging stays off: moving both edges at once would
    /// bypass the per-edge correction pipeline. Edge resizing is on, that is
    /// the drag gesture the corrections are built for.
    pub fn from_cue(cue: &Cue) -> Self {
        Self {
            label: cue.text.clone(),
            start: cue.start_time,
            end: cue.end_time,
            drag: false,
            resize: true,
        }
    }

    /// Returns the region duration in seconds
    pub fn duration(&self) -> TimeSec {
        self.end - self.start
    }
}
