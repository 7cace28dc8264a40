//! Constraint Policy Resolution
//!
//! Turns an optional, partially-filled caption specification into the
//! concrete limits the rest of the engine works with. Editing never stops
//! because a specification is missing: absent or disabled specifications
//! resolve to permissive defaults, and every limit falls back independently.

use serde::{Deserialize, Serialize};

use crate::{CoreResult, TimeSec};

// =============================================================================
// Constants
// =============================================================================

/// Smallest duration a cue may have when no specification constrains it.
///
/// Keeps `end > start` strictly true even for unconstrained projects.
pub const MIN_DURATION_FLOOR_SECONDS: TimeSec = 0.001;

/// Stand-in for "no maximum duration" (2^53 - 1 seconds).
///
/// Large enough that no real cue ever reaches it, while still exactly
/// representable as an f64 so comparisons against it are deterministic.
pub const MAX_DURATION_UNLIMITED_SECONDS: TimeSec = 9_007_199_254_740_991.0;

// =============================================================================
// Caption Specification
// =============================================================================

/// Per-project caption authoring rules, typically loaded from a settings
/// payload delivered by the host application.
///
/// Every limit is optional and the whole document is gated by `enabled`.
/// Unknown fields in the payload are ignored so older engine builds keep
/// working when the host adds new rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CaptionSpecification {
    /// Whether the specification is enforced at all
    #[serde(default)]
    pub enabled: bool,
    /// Maximum number of text lines per cue
    #[serde(default)]
    pub max_lines_per_caption: Option<u32>,
    /// Maximum number of characters per text line
    #[serde(default)]
    pub max_characters_per_line: Option<u32>,
    /// Minimum cue duration in milliseconds
    #[serde(default)]
    pub min_caption_duration_in_millis: Option<u32>,
    /// Maximum cue duration in milliseconds
    #[serde(default)]
    pub max_caption_duration_in_millis: Option<u32>,
}

impl CaptionSpecification {
    /// Creates an enabled specification with no limits filled in
    pub fn new() -> Self {
        Self {
            enabled: true,
            ..Default::default()
        }
    }

    /// Creates a specification that is present but not enforced
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Parses a specification from a settings JSON payload
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the duration limits in milliseconds
    pub fn with_duration_limits(
        mut self,
        min_millis: Option<u32>,
        max_millis: Option<u32>,
    ) -> Self {
        self.min_caption_duration_in_millis = min_millis;
        self.max_caption_duration_in_millis = max_millis;
        self
    }

    /// Sets the text shape limits
    pub fn with_line_limits(mut self, max_lines: Option<u32>, max_characters: Option<u32>) -> Self {
        self.max_lines_per_caption = max_lines;
        self.max_characters_per_line = max_characters;
        self
    }
}

// =============================================================================
// Time Gap Limits
// =============================================================================

/// Concrete duration bounds in seconds, resolved from a specification.
///
/// This is a working value for the validator and the interactive corrections,
/// not part of any wire format.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGapLimit {
    /// Minimum allowed cue duration in seconds
    pub min_gap: TimeSec,
    /// Maximum allowed cue duration in seconds
    pub max_gap: TimeSec,
}

/// Resolves the duration bounds a cue must satisfy.
///
/// An absent or disabled specification resolves to the permissive defaults.
/// Each bound falls back independently, so a specification that only sets a
/// minimum leaves the maximum unlimited.
pub fn resolve_time_gap_limits(spec: Option<&CaptionSpecification>) -> TimeGapLimit {
    match spec {
        Some(spec) if spec.enabled => TimeGapLimit {
            min_gap: spec
                .min_caption_duration_in_millis
                .map_or(MIN_DURATION_FLOOR_SECONDS, |millis| {
                    millis as TimeSec / 1000.0
                }),
            max_gap: spec
                .max_caption_duration_in_millis
                .map_or(MAX_DURATION_UNLIMITED_SECONDS, |millis| {
                    millis as TimeSec / 1000.0
                }),
        },
        _ => TimeGapLimit {
            min_gap: MIN_DURATION_FLOOR_SECONDS,
            max_gap: MAX_DURATION_UNLIMITED_SECONDS,
        },
    }
}

// =============================================================================
// Text Shape Check
// =============================================================================

/// Checks cue text against the specification's line and character limits.
///
/// Lines are whatever `'\n'` separates; characters are counted as Unicode
/// scalar values, not bytes. Absent or disabled specifications, and absent
/// individual limits, impose nothing and the check passes.
pub fn check_character_limitation(text: &str, spec: Option<&CaptionSpecification>) -> bool {
    let Some(spec) = spec else {
        return true;
    };
    if !spec.enabled {
        return true;
    }

    let lines: Vec<&str> = text.split('\n').collect();

    let lines_ok = spec
        .max_lines_per_caption
        .is_none_or(|max| lines.len() <= max as usize);
    let characters_ok = spec.max_characters_per_line.is_none_or(|max| {
        lines
            .iter()
            .all(|line| line.chars().count() <= max as usize)
    });

    lines_ok && characters_ok
}
