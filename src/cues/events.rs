//! Cue Change Events
//!
//! Defines the change protocol between the cue list and everything that
//! mirrors it (waveform overlay, host UI). Every mutating track operation
//! returns exactly one [`CueChange`] describing what happened and where.
//!
//! Indices always refer to positions in the cue list *after* the change
//! was applied.

use serde::{Deserialize, Serialize};

use super::models::Cue;

/// A single structural change to the cue list.
///
/// Serialized with a `changeType` discriminant so hosts can dispatch on the
/// wire without knowing the full payload shape up front.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "changeType", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CueChange {
    /// A cue was inserted at `index`
    Add { index: usize, cue: Cue },
    /// The cue at `index` was replaced in place
    Edit { index: usize, cue: Cue },
    /// The cue that used to live at `index` was removed
    Remove { index: usize },
    /// The cue at `index` was split; its second half now follows at `index + 1`
    Split { index: usize },
    /// `count` cues starting at `index` were merged into the one at `index`
    Merge { index: usize, count: usize },
    /// The whole list was replaced; consumers must resynchronize
    UpdateAll,
}

impl CueChange {
    /// Returns the wire discriminant for this change
    pub fn type_name(&self) -> &'static str {
        match self {
            CueChange::Add { .. } => "ADD",
            CueChange::Edit { .. } => "EDIT",
            CueChange::Remove { .. } => "REMOVE",
            CueChange::Split { .. } => "SPLIT",
            CueChange::Merge { .. } => "MERGE",
            CueChange::UpdateAll => "UPDATE_ALL",
        }
    }

    /// Returns the list index the change is anchored at, if it has one
    pub fn index(&self) -> Option<usize> {
        match self {
            CueChange::Add { index, .. }
            | CueChange::Edit { index, .. }
            | CueChange::Remove { index }
            | CueChange::Split { index }
            | CueChange::Merge { index, .. } => Some(*index),
            CueChange::UpdateAll => None,
        }
    }
}
