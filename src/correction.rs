//! Interactive Cue Correction
//!
//! Corrections applied while the user edits, so that constraint violations
//! never reach the committed cue list. Each function nudges exactly one
//! field and leaves everything else alone:
//!
//! - Range prevention moves the dragged edge back until the duration fits.
//! - Overlap prevention clamps the dragged edge to the neighbor's edge.
//! - Character limitation rolls the text back rather than truncating it.
//!
//! [`BoundaryDrag`] ties these together for a drag session on a scratch
//! copy: intermediate positions may be invalid, only the commit is
//! corrected and published.

use tracing::debug;

use crate::cues::Cue;
use crate::policy::{
    check_character_limitation, resolve_time_gap_limits, CaptionSpecification, TimeGapLimit,
};
use crate::validation::{max_range_ok, min_range_ok};
use crate::{round_to_millis, TimeSec};

// =============================================================================
// Duration Feedback
// =============================================================================

/// Live feedback predicate for an in-progress drag.
///
/// Only the minimum bound is checked: a drag that makes a cue very long is
/// legal during the gesture (the maximum is enforced on commit), but one
/// that collapses it below the minimum should be signalled immediately.
pub fn verify_cue_duration(cue: &Cue, limit: &TimeGapLimit) -> bool {
    min_range_ok(cue, limit)
}

// =============================================================================
// Range Prevention
// =============================================================================

/// Repairs a duration violation by moving the start edge.
///
/// If the duration falls below the minimum, the start is pulled back to
/// exactly the minimum before the fixed end; if it exceeds the maximum, the
/// start is pulled forward. Repaired values are rounded to millisecond
/// precision so the committed time is presentable.
pub fn apply_invalid_range_prevention_start(cue: &mut Cue, spec: Option<&CaptionSpecification>) {
    let limit = resolve_time_gap_limits(spec);

    if !min_range_ok(cue, &limit) {
        cue.start_time = round_to_millis(cue.end_time - limit.min_gap);
    }
    if !max_range_ok(cue, &limit) {
        cue.start_time = round_to_millis(cue.end_time - limit.max_gap);
    }
}

/// Repairs a duration violation by moving the end edge.
///
/// Mirror of [`apply_invalid_range_prevention_start`] for drags on the end
/// edge, keeping the start fixed.
pub fn apply_invalid_range_prevention_end(cue: &mut Cue, spec: Option<&CaptionSpecification>) {
    let limit = resolve_time_gap_limits(spec);

    if !min_range_ok(cue, &limit) {
        cue.end_time = round_to_millis(cue.start_time + limit.min_gap);
    }
    if !max_range_ok(cue, &limit) {
        cue.end_time = round_to_millis(cue.start_time + limit.max_gap);
    }
}

// =============================================================================
// Overlap Prevention
// =============================================================================

/// Clamps the start edge so the cue cannot reach under its previous neighbor.
///
/// The clamped edge copies the neighbor's end exactly, which the validator
/// treats as touching, not overlapping. No neighbor, no constraint.
pub fn apply_overlap_prevention_start(cue: &mut Cue, previous: Option<&Cue>) {
    if let Some(previous) = previous {
        if cue.start_time < previous.end_time {
            cue.start_time = previous.end_time;
        }
    }
}

/// Clamps the end edge so the cue cannot reach over its following neighbor.
pub fn apply_overlap_prevention_end(cue: &mut Cue, following: Option<&Cue>) {
    if let Some(following) = following {
        if cue.end_time > following.start_time {
            cue.end_time = following.start_time;
        }
    }
}

// =============================================================================
// Character Limitation
// =============================================================================

/// Gate for a committed text edit: rolls the text back to its pre-edit
/// value when the edit would take a conforming cue out of conformance.
///
/// Rollback, not truncation: a rejected edit is discarded whole instead of
/// being trimmed to fit. The rollback only guards against regressions, so a
/// cue whose text already broke the limits stays editable and keeps its new
/// text even when that text is still over the limits.
pub fn apply_character_limitation(
    cue: Cue,
    original: &Cue,
    spec: Option<&CaptionSpecification>,
) -> Cue {
    if check_character_limitation(&cue.text, spec)
        || !check_character_limitation(&original.text, spec)
    {
        return cue;
    }
    cue.with_text(&original.text)
}

// =============================================================================
// Boundary Drag Session
// =============================================================================

/// Which edge of a cue a drag gesture grabbed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CueEdge {
    Start,
    End,
}

/// An in-progress drag of one cue boundary.
///
/// The session works on a scratch copy of the grabbed cue. Nothing is
/// published while the user drags; [`BoundaryDrag::commit`] corrects the
/// dragged edge and returns the cue to store, dropping the session cancels
/// the gesture with no effect.
#[derive(Clone, Debug)]
pub struct BoundaryDrag {
    index: usize,
    edge: CueEdge,
    original: Cue,
    scratch: Cue,
}

impl BoundaryDrag {
    /// Starts a drag session on one edge of the cue at `index`
    pub fn grab(index: usize, cue: &Cue, edge: CueEdge) -> Self {
        Self {
            index,
            edge,
            original: cue.clone(),
            scratch: cue.clone(),
        }
    }

    /// Moves the grabbed edge to a new time.
    ///
    /// No correction happens here: the preview is allowed to be invalid so
    /// the gesture feels direct.
    pub fn move_to(&mut self, time: TimeSec) {
        match self.edge {
            CueEdge::Start => self.scratch.start_time = time,
            CueEdge::End => self.scratch.end_time = time,
        }
    }

    /// Current scratch state, for rendering the drag preview
    pub fn preview(&self) -> &Cue {
        &self.scratch
    }

    /// The cue as it was when the drag started
    pub fn original(&self) -> &Cue {
        &self.original
    }

    /// List index of the cue being dragged
    pub fn index(&self) -> usize {
        self.index
    }

    /// The grabbed edge
    pub fn edge(&self) -> CueEdge {
        self.edge
    }

    /// Live feedback: would the current position survive the minimum
    /// duration check?
    pub fn duration_ok(&self, spec: Option<&CaptionSpecification>) -> bool {
        verify_cue_duration(&self.scratch, &resolve_time_gap_limits(spec))
    }

    /// Ends the drag and returns the corrected cue to commit.
    ///
    /// Only the dragged edge is corrected: first the duration bounds, then
    /// the overlap clamp against the neighbor on that side. The caller
    /// stores the result through the track, which emits the single edit
    /// event for the gesture.
    pub fn commit(
        mut self,
        previous: Option<&Cue>,
        following: Option<&Cue>,
        spec: Option<&CaptionSpecification>,
    ) -> Cue {
        debug!(
            index = self.index,
            edge = ?self.edge,
            "Committing cue boundary drag"
        );
        match self.edge {
            CueEdge::Start => {
                apply_invalid_range_prevention_start(&mut self.scratch, spec);
                apply_overlap_prevention_start(&mut self.scratch, previous);
            }
            CueEdge::End => {
                apply_invalid_range_prevention_end(&mut self.scratch, spec);
                apply_overlap_prevention_end(&mut self.scratch, following);
            }
        }
        self.scratch
    }
}

// =============================================================================
// Tests
// =============================================================================
