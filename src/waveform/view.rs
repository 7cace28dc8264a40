//! Waveform Overlay View
//!
//! Keeps the waveform's region overlay in step with the cue list by
//! interpreting [`CueChange`] events, so routine edits touch one region
//! instead of recreating hundreds of them.
//!
//! Only cues inside the media window get a region. The list-to-overlay
//! correspondence is positional: region `k` is the `k`-th in-window cue.
//! Every transition cross-checks the region count implied by the incoming
//! event against what the overlay actually holds, and any surprise falls
//! back to a full rebuild from the cue list. The overlay may do redundant
//! work, it never stays wrong.

use tracing::warn;

use super::models::WaveformRegion;
use crate::cues::{Cue, CueChange};
use crate::TimeSec;

/// The waveform overlay state for one cue track
#[derive(Clone, Debug)]
pub struct WaveformView {
    media_duration: TimeSec,
    regions: Vec<WaveformRegion>,
}

impl WaveformView {
    /// Creates an empty overlay for media of the given duration
    pub fn new(media_duration: TimeSec) -> Self {
        Self {
            media_duration: Self::sanitize_duration(media_duration),
            regions: Vec::new(),
        }
    }

    /// Creates an overlay and populates it from a cue list
    pub fn with_cues(media_duration: TimeSec, cues: &[Cue]) -> Self {
        let mut view = Self::new(media_duration);
        view.rebuild(cues);
        view
    }

    /// The media duration bounding the visible window
    pub fn media_duration(&self) -> TimeSec {
        self.media_duration
    }

    /// Current regions, ordered by cue list position
    pub fn regions(&self) -> &[WaveformRegion] {
        &self.regions
    }

    /// Returns the number of regions
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns true if no cue is currently in the media window
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Changes the media duration and resynchronizes from the cue list.
    ///
    /// Window membership of every cue can change here, so this is always a
    /// full rebuild.
    pub fn set_media_duration(&mut self, duration: TimeSec, cues: &[Cue]) {
        self.media_duration = Self::sanitize_duration(duration);
        self.rebuild(cues);
    }

    /// Rebuilds the overlay from scratch to mirror the cue list
    pub fn rebuild(&mut self, cues: &[Cue]) {
        let regions = cues
            .iter()
            .filter(|c| self.in_window(c))
            .map(WaveformRegion::from_cue)
            .collect();
        self.regions = regions;
    }

    /// Applies one cue change event, given the post-change cue list.
    ///
    /// When the event can be explained against the overlay's current state,
    /// only the affected regions are touched. When it cannot (stale index,
    /// region count that does not add up), the overlay logs and rebuilds.
    pub fn apply(&mut self, change: &CueChange, cues: &[Cue]) {
        if let Err(reason) = self.try_apply(change, cues) {
            warn!(
                change = change.type_name(),
                reason, "Waveform overlay out of step with the cue list, rebuilding"
            );
            self.rebuild(cues);
        }
    }

    fn try_apply(&mut self, change: &CueChange, cues: &[Cue]) -> Result<(), &'static str> {
        match *change {
            CueChange::UpdateAll => {
                self.rebuild(cues);
                Ok(())
            }

            CueChange::Add { index, ref cue } => {
                if index >= cues.len() {
                    return Err("add index outside the cue list");
                }
                let expected = self.window_count(cues);
                if self.in_window(cue) {
                    let Some(before) = expected.checked_sub(1) else {
                        return Err("region count mismatch");
                    };
                    if self.regions.len() != before {
                        return Err("region count mismatch");
                    }
                    let position = self.region_position(cues, index);
                    if position > self.regions.len() {
                        return Err("region position out of range");
                    }
                    self.regions.insert(position, WaveformRegion::from_cue(cue));
                } else if self.regions.len() != expected {
                    return Err("region count mismatch");
                }
                Ok(())
            }

            CueChange::Edit { index, ref cue } => {
                if index >= cues.len() {
                    return Err("edit index outside the cue list");
                }
                let expected = self.window_count(cues);
                let position = self.region_position(cues, index);
                if self.in_window(cue) {
                    if self.regions.len() == expected {
                        // Region already exists, replace it in place
                        let Some(slot) = self.regions.get_mut(position) else {
                            return Err("region position out of range");
                        };
                        *slot = WaveformRegion::from_cue(cue);
                    } else if self.regions.len() + 1 == expected {
                        // The edit moved the cue into the window
                        if position > self.regions.len() {
                            return Err("region position out of range");
                        }
                        self.regions.insert(position, WaveformRegion::from_cue(cue));
                    } else {
                        return Err("region count mismatch");
                    }
                } else if self.regions.len() == expected + 1 {
                    // The edit moved the cue out of the window
                    if position >= self.regions.len() {
                        return Err("region position out of range");
                    }
                    self.regions.remove(position);
                } else if self.regions.len() != expected {
                    return Err("region count mismatch");
                }
                Ok(())
            }

            CueChange::Remove { index } => {
                if index > cues.len() {
                    return Err("remove index outside the cue list");
                }
                let expected = self.window_count(cues);
                if self.regions.len() == expected + 1 {
                    let position = self.region_position(cues, index);
                    if position >= self.regions.len() {
                        return Err("region position out of range");
                    }
                    self.regions.remove(position);
                } else if self.regions.len() != expected {
                    return Err("region count mismatch");
                }
                Ok(())
            }

            CueChange::Split { index } => {
                let (Some(first), Some(second)) = (cues.get(index), cues.get(index + 1)) else {
                    return Err("split index outside the cue list");
                };
                let halves =
                    usize::from(self.in_window(first)) + usize::from(self.in_window(second));
                let expected = self.window_count(cues);
                if halves == 0 {
                    // Both halves invisible, so the source cue was too
                    if self.regions.len() != expected {
                        return Err("region count mismatch");
                    }
                    return Ok(());
                }
                if self.regions.len() != expected + 1 - halves {
                    return Err("region count mismatch");
                }
                let position = self.region_position(cues, index);
                if position + 1 > self.regions.len() {
                    return Err("region position out of range");
                }
                let mut replacements = Vec::with_capacity(halves);
                if self.in_window(first) {
                    replacements.push(WaveformRegion::from_cue(first));
                }
                if self.in_window(second) {
                    replacements.push(WaveformRegion::from_cue(second));
                }
                self.regions.splice(position..position + 1, replacements);
                Ok(())
            }

            CueChange::Merge { index, count } => {
                if count == 0 {
                    return Err("empty merge range");
                }
                let Some(merged) = cues.get(index) else {
                    return Err("merge index outside the cue list");
                };
                let expected = self.window_count(cues);
                let present = usize::from(self.in_window(merged));
                // How many regions the merged range accounted for before
                let Some(absorbed) = (self.regions.len() + present).checked_sub(expected) else {
                    return Err("region count mismatch");
                };
                if absorbed > count {
                    return Err("region count mismatch");
                }
                let position = self.region_position(cues, index);
                if position + absorbed > self.regions.len() {
                    return Err("region position out of range");
                }
                let replacement = (present == 1).then(|| WaveformRegion::from_cue(merged));
                self.regions.splice(position..position + absorbed, replacement);
                Ok(())
            }
        }
    }

    /// Window membership: the cue intersects the open interval (0, duration).
    ///
    /// A cue straddling either boundary still shows; one entirely before the
    /// media start or at/after the media end does not.
    fn in_window(&self, cue: &Cue) -> bool {
        cue.start_time < self.media_duration && cue.end_time > 0.0
    }

    fn window_count(&self, cues: &[Cue]) -> usize {
        cues.iter().filter(|c| self.in_window(c)).count()
    }

    /// Overlay position for the cue at `index`: the number of in-window
    /// cues before it. Callers keep `index <= cues.len()`.
    fn region_position(&self, cues: &[Cue], index: usize) -> usize {
        cues[..index].iter().filter(|c| self.in_window(c)).count()
    }

    fn sanitize_duration(duration: TimeSec) -> TimeSec {
        if !duration.is_finite() || duration < 0.0 {
            warn!(duration, "Unusable media duration, treating as empty media");
            return 0.0;
        }
        duration
    }
}

// =============================================================================
// Tests
// =============================================================================
