//! Cue Data Models
//!
//! Defines data structures for editable caption cues.
//!
//! # Overview
//!
//! A cue is the editable unit of captioning:
//! - Timing (`start_time`/`end_time` in seconds)
//! - Text (may contain line breaks)
//! - Editorial category and rendering placement
//! - A `corrupted` marker maintained by the validator
//!
//! Times are kept as they were committed. Conformance problems are recorded
//! on the `corrupted` flag instead of being silently repaired, so nothing a
//! user typed is lost behind their back.

use serde::{Deserialize, Serialize};

use crate::{CueId, TimeSec};

// =============================================================================
// Cue Category
// =============================================================================

/// Editorial classification of a cue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CueCategory {
    /// Spoken dialogue (default)
    #[default]
    Dialogue,
    /// Text visible in the picture (signs, titles)
    OnscreenText,
    /// Description of non-speech audio
    AudioDescription,
    /// Song lyrics
    Lyrics,
}

// =============================================================================
// Cue Placement
// =============================================================================

/// Horizontal alignment of cue text within its box
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TextAlignment {
    /// Aligned to the writing-direction start
    Start,
    /// Centered (default)
    #[default]
    Center,
    /// Aligned to the writing-direction end
    End,
    /// Left-aligned regardless of writing direction
    Left,
    /// Right-aligned regardless of writing direction
    Right,
}

/// Writing direction of cue text
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WritingDirection {
    /// Horizontal lines (default)
    #[default]
    Horizontal,
    /// Vertical lines growing right to left
    #[serde(rename = "rl")]
    RightLeft,
    /// Vertical lines growing left to right
    #[serde(rename = "lr")]
    LeftRight,
}

/// Rendering placement of a cue on screen.
///
/// The engine stores and round-trips placement but never interprets it;
/// rendering is the host's concern.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CuePlacement {
    /// Text alignment within the cue box
    pub align: TextAlignment,
    /// Line offset (None = automatic)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<f64>,
    /// Indent as a percentage of the writing direction axis (None = automatic)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<f64>,
    /// Size of the cue box as a percentage of the video dimension
    pub size: f64,
    /// Writing direction
    pub vertical: WritingDirection,
}

impl Default for CuePlacement {
    fn default() -> Self {
        Self {
            align: TextAlignment::Center,
            line: None,
            position: None,
            size: 100.0,
            vertical: WritingDirection::Horizontal,
        }
    }
}

// =============================================================================
// Cue
// =============================================================================

/// A single editable caption cue
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cue {
    /// Unique identifier
    pub id: CueId,
    /// Start time in seconds
    pub start_time: TimeSec,
    /// End time in seconds
    pub end_time: TimeSec,
    /// Cue text (may contain line breaks)
    pub text: String,
    /// Editorial category
    #[serde(default)]
    pub category: CueCategory,
    /// Whether the cue currently violates the caption specification
    #[serde(default)]
    pub corrupted: bool,
    /// Rendering placement
    #[serde(default)]
    pub placement: CuePlacement,
    /// Whether playback should pause when this cue ends
    #[serde(default)]
    pub pause_on_exit: bool,
}

impl Cue {
    /// Creates a new cue with the given timing and text
    pub fn new(id: &str, start_time: TimeSec, end_time: TimeSec, text: &str) -> Self {
        Self {
            id: id.to_string(),
            start_time,
            end_time,
            text: text.to_string(),
            category: CueCategory::default(),
            corrupted: false,
            placement: CuePlacement::default(),
            pause_on_exit: false,
        }
    }

    /// Creates a cue with auto-generated ID
    pub fn create(start_time: TimeSec, end_time: TimeSec, text: &str) -> Self {
        Self::new(&ulid::Ulid::new().to_string(), start_time, end_time, text)
    }

    /// Returns the duration of this cue in seconds
    pub fn duration(&self) -> TimeSec {
        self.end_time - self.start_time
    }

    /// Returns true if the cue is visible at the given time
    pub fn is_visible_at(&self, time: TimeSec) -> bool {
        time >= self.start_time && time < self.end_time
    }

    /// Returns true if this cue overlaps another in time
    pub fn overlaps(&self, other: &Cue) -> bool {
        self.start_time < other.end_time && self.end_time > other.start_time
    }

    /// Sets the editorial category
    pub fn with_category(mut self, category: CueCategory) -> Self {
        self.category = category;
        self
    }

    /// Sets the rendering placement
    pub fn with_placement(mut self, placement: CuePlacement) -> Self {
        self.placement = placement;
        self
    }

    /// Replaces the text, keeping identity and timing
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }
}

// =============================================================================
// Tests
// =============================================================================
