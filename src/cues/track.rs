//! Cue Track
//!
//! The committed cue list and every structural operation on it. Each
//! mutating operation keeps two invariants:
//!
//! - cues stay sorted by start time (ties keep insertion order), and
//! - every cue's `corrupted` flag reflects the caption specification.
//!
//! Revalidation after an edit only touches the edited neighborhood, since a
//! cue's conformance depends on nothing beyond its two list neighbors. Each
//! operation returns one [`CueChange`] event for consumers that mirror the
//! list.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, warn};

use super::events::CueChange;
use super::models::Cue;
use crate::policy::{resolve_time_gap_limits, CaptionSpecification};
use crate::validation::{cue_conforms, mark_cues};
use crate::{CoreError, CoreResult, TimeSec, TrackId};

// =============================================================================
// Time Guards
// =============================================================================

/// Validates that a time value is usable (finite and non-negative)
fn is_valid_time_sec(value: TimeSec) -> bool {
    value.is_finite() && value >= 0.0
}

/// Validates a committed cue time range: both edges usable, end after start
fn is_valid_time_range(start: TimeSec, end: TimeSec) -> bool {
    is_valid_time_sec(start) && is_valid_time_sec(end) && end > start
}

// =============================================================================
// Cue Track
// =============================================================================

/// A track of cues for one language, kept sorted and validated
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CueTrack {
    /// Unique identifier
    pub id: TrackId,
    /// Display name
    pub name: String,
    /// Language code (e.g., "en", "ko", "ja")
    pub language: String,
    /// Cues sorted by start time
    pub cues: Vec<Cue>,
    /// Creation timestamp (RFC3339)
    pub created_at: String,
    /// Last modification timestamp (RFC3339)
    pub modified_at: String,
}

impl CueTrack {
    /// Creates a new cue track
    pub fn new(id: &str, name: &str, language: &str) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: id.to_string(),
            name: name.to_string(),
            language: language.to_string(),
            cues: vec![],
            created_at: now.clone(),
            modified_at: now,
        }
    }

    /// Creates a track with auto-generated ID
    pub fn create(name: &str, language: &str) -> Self {
        Self::new(&ulid::Ulid::new().to_string(), name, language)
    }

    fn touch(&mut self) {
        self.modified_at = chrono::Utc::now().to_rfc3339();
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns the number of cues
    pub fn len(&self) -> usize {
        self.cues.len()
    }

    /// Returns true if the track has no cues
    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Gets a cue by list index
    pub fn get_cue(&self, index: usize) -> Option<&Cue> {
        self.cues.get(index)
    }

    /// Finds the list index of a cue by ID
    pub fn index_of(&self, cue_id: &str) -> Option<usize> {
        self.cues.iter().position(|c| c.id == cue_id)
    }

    /// Returns cues visible at the given time
    pub fn cues_at(&self, time: TimeSec) -> Vec<&Cue> {
        self.cues.iter().filter(|c| c.is_visible_at(time)).collect()
    }

    /// Returns the end of the last cue, or 0.0 for an empty track
    pub fn duration(&self) -> TimeSec {
        self.cues.last().map(|c| c.end_time).unwrap_or(0.0)
    }

    // =========================================================================
    // Structural Operations
    // =========================================================================

    /// Inserts a cue at its sorted position and returns where it landed.
    ///
    /// Equal start times keep insertion order: the new cue goes after
    /// existing ones. Rejects unusable times so the committed list always
    /// satisfies `end > start` (interactive corrections repair these before
    /// commit; the error is the backstop for hosts that skip them).
    pub fn add_cue(
        &mut self,
        cue: Cue,
        spec: Option<&CaptionSpecification>,
    ) -> CoreResult<(usize, CueChange)> {
        if !is_valid_time_range(cue.start_time, cue.end_time) {
            return Err(CoreError::InvalidTimeRange(cue.start_time, cue.end_time));
        }

        let index = self
            .cues
            .partition_point(|c| c.start_time <= cue.start_time);
        self.cues.insert(index, cue);
        self.revalidate_around(index, spec);
        self.touch();

        debug!(track_id = %self.id, index, "Cue added");
        let change = CueChange::Add {
            index,
            cue: self.cues[index].clone(),
        };
        Ok((index, change))
    }

    /// Removes the cue at `index` and returns it with the change event
    pub fn remove_cue(
        &mut self,
        index: usize,
        spec: Option<&CaptionSpecification>,
    ) -> CoreResult<(Cue, CueChange)> {
        if index >= self.cues.len() {
            return Err(CoreError::CueNotFound(index));
        }

        let removed = self.cues.remove(index);
        if !self.cues.is_empty() {
            // The two cues around the gap became neighbors of each other
            self.revalidate_around(index.min(self.cues.len() - 1), spec);
        }
        self.touch();

        debug!(track_id = %self.id, index, "Cue removed");
        Ok((removed, CueChange::Remove { index }))
    }

    /// Replaces the cue at `index` in place.
    ///
    /// The replacement must keep the list sorted; a start time that would
    /// jump over a neighbor is rejected rather than silently reordered,
    /// because every index the host and overlay hold would go stale.
    pub fn update_cue(
        &mut self,
        index: usize,
        cue: Cue,
        spec: Option<&CaptionSpecification>,
    ) -> CoreResult<CueChange> {
        if index >= self.cues.len() {
            return Err(CoreError::CueNotFound(index));
        }
        if !is_valid_time_range(cue.start_time, cue.end_time) {
            return Err(CoreError::InvalidTimeRange(cue.start_time, cue.end_time));
        }
        let order_ok = (index == 0 || self.cues[index - 1].start_time <= cue.start_time)
            && (index + 1 >= self.cues.len() || cue.start_time <= self.cues[index + 1].start_time);
        if !order_ok {
            return Err(CoreError::CueOrderViolation { index });
        }

        debug!(
            track_id = %self.id,
            index,
            start_time = cue.start_time,
            end_time = cue.end_time,
            "Updating cue"
        );
        self.cues[index] = cue;
        self.revalidate_around(index, spec);
        self.touch();

        Ok(CueChange::Edit {
            index,
            cue: self.cues[index].clone(),
        })
    }

    /// Splits the cue at `index` into two at time `at`.
    ///
    /// The first half keeps the cue's identity, text and timing up to `at`;
    /// the second half is a fresh cue with empty text covering the rest.
    /// Category and placement carry over to both halves; the pause marker
    /// follows the original exit point. The split time must fall strictly
    /// inside the cue.
    pub fn split_cue(
        &mut self,
        index: usize,
        at: TimeSec,
        spec: Option<&CaptionSpecification>,
    ) -> CoreResult<CueChange> {
        let Some(source) = self.cues.get(index) else {
            return Err(CoreError::CueNotFound(index));
        };
        if !is_valid_time_sec(at) || at <= source.start_time || at >= source.end_time {
            return Err(CoreError::InvalidSplitPoint(at));
        }

        let mut second = Cue::create(at, source.end_time, "")
            .with_category(source.category)
            .with_placement(source.placement.clone());
        second.pause_on_exit = source.pause_on_exit;

        let first = &mut self.cues[index];
        first.end_time = at;
        first.pause_on_exit = false;
        self.cues.insert(index + 1, second);
        self.revalidate_around(index, spec);
        self.touch();

        debug!(track_id = %self.id, index, at, "Cue split");
        Ok(CueChange::Split { index })
    }

    /// Merges `count` consecutive cues starting at `index` into one.
    ///
    /// The survivor keeps the first cue's identity, category and placement,
    /// spans from the first start to the last end, joins the texts with
    /// newlines, and takes the last cue's pause marker.
    pub fn merge_cues(
        &mut self,
        index: usize,
        count: usize,
        spec: Option<&CaptionSpecification>,
    ) -> CoreResult<CueChange> {
        if count < 2 || index + count > self.cues.len() {
            return Err(CoreError::InvalidMergeRange { index, count });
        }

        let merged_text = self.cues[index..index + count]
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let last = &self.cues[index + count - 1];
        let end_time = last.end_time;
        let pause_on_exit = last.pause_on_exit;

        let survivor = &mut self.cues[index];
        survivor.text = merged_text;
        survivor.end_time = end_time;
        survivor.pause_on_exit = pause_on_exit;
        self.cues.drain(index + 1..index + count);
        self.revalidate_around(index, spec);
        self.touch();

        debug!(track_id = %self.id, index, count, "Cues merged");
        Ok(CueChange::Merge { index, count })
    }

    /// Replaces the whole cue list (import, paste, restore).
    ///
    /// Nothing is assumed about the payload: it is sorted by start time and
    /// fully revalidated. Entries with non-finite or negative times are
    /// discarded since they would poison the sort order; inverted ranges are
    /// kept and surface as `corrupted` instead of failing the batch.
    pub fn replace_all(
        &mut self,
        cues: Vec<Cue>,
        spec: Option<&CaptionSpecification>,
    ) -> CueChange {
        let incoming = cues.len();
        let mut cues: Vec<Cue> = cues
            .into_iter()
            .filter(|c| is_valid_time_sec(c.start_time) && is_valid_time_sec(c.end_time))
            .collect();
        let dropped = incoming - cues.len();
        if dropped > 0 {
            warn!(
                track_id = %self.id,
                dropped, "Discarded cues with non-finite or negative times"
            );
        }

        cues.sort_by(|a, b| {
            a.start_time
                .partial_cmp(&b.start_time)
                .unwrap_or(Ordering::Equal)
        });
        self.cues = mark_cues(&cues, spec);
        self.touch();

        debug!(track_id = %self.id, count = self.cues.len(), "Cue list replaced");
        CueChange::UpdateAll
    }

    // =========================================================================
    // Revalidation
    // =========================================================================

    /// Re-marks every cue on the track against the specification
    pub fn revalidate(&mut self, spec: Option<&CaptionSpecification>) {
        self.cues = mark_cues(&self.cues, spec);
    }

    /// Re-marks the cues whose conformance an edit at `index` can change.
    ///
    /// That is the edited cue and its two list neighbors: conformance reads
    /// nothing further away.
    pub fn revalidate_around(&mut self, index: usize, spec: Option<&CaptionSpecification>) {
        if self.cues.is_empty() {
            return;
        }
        let limit = resolve_time_gap_limits(spec);
        let index = index.min(self.cues.len() - 1);
        let from = index.saturating_sub(1);
        let to = (index + 1).min(self.cues.len() - 1);

        for i in from..=to {
            let conforms = {
                let previous = if i == 0 { None } else { self.cues.get(i - 1) };
                let following = self.cues.get(i + 1);
                cue_conforms(previous, &self.cues[i], following, &limit, spec)
            };
            self.cues[i].corrupted = !conforms;
        }
    }
}

impl Default for CueTrack {
    fn default() -> Self {
        Self::create("Subtitles", "en")
    }
}

// =============================================================================
// Tests
// =============================================================================
