//! Cue Validation
//!
//! Scans cue lists against the caption specification and records the result
//! on each cue's `corrupted` flag. Validation never rejects and never
//! repairs: a cue that breaks the rules is marked and kept exactly as it
//! was, so the user decides what to do about it.
//!
//! Neighbor checks use list positions, not timestamps: `previous` is the
//! cue one index earlier, `following` one index later. On a start-sorted
//! list this is sufficient to catch every overlap.

use serde::{Deserialize, Serialize};

use crate::cues::Cue;
use crate::policy::{
    check_character_limitation, resolve_time_gap_limits, CaptionSpecification, TimeGapLimit,
};
use crate::{round_to_millis, TimeSec};

// =============================================================================
// Violations
// =============================================================================

/// A single way in which a cue breaks the caption specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum CueViolation {
    /// Cue is shorter than the minimum duration
    DurationTooShort {
        duration: TimeSec,
        min_gap: TimeSec,
    },
    /// Cue is longer than the maximum duration
    DurationTooLong {
        duration: TimeSec,
        max_gap: TimeSec,
    },
    /// Cue text has more lines than allowed
    TooManyLines { lines: usize, limit: u32 },
    /// A text line has more characters than allowed (`line` is 1-based)
    LineTooLong {
        line: usize,
        characters: usize,
        limit: u32,
    },
    /// Cue starts before its previous neighbor ends
    OverlapsPrevious {
        previous_end: TimeSec,
        start: TimeSec,
    },
    /// Cue ends after its following neighbor starts
    OverlapsFollowing {
        end: TimeSec,
        following_start: TimeSec,
    },
}

impl std::fmt::Display for CueViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CueViolation::DurationTooShort { duration, min_gap } => {
                write!(
                    f,
                    "Cue lasts {:.3}s, shorter than the {:.3}s minimum",
                    duration, min_gap
                )
            }
            CueViolation::DurationTooLong { duration, max_gap } => {
                write!(
                    f,
                    "Cue lasts {:.3}s, longer than the {:.3}s maximum",
                    duration, max_gap
                )
            }
            CueViolation::TooManyLines { lines, limit } => {
                write!(f, "Cue has {} lines, limit is {}", lines, limit)
            }
            CueViolation::LineTooLong {
                line,
                characters,
                limit,
            } => {
                write!(
                    f,
                    "Line {} has {} characters, limit is {}",
                    line, characters, limit
                )
            }
            CueViolation::OverlapsPrevious {
                previous_end,
                start,
            } => {
                write!(
                    f,
                    "Cue starts at {:.3}s, before the previous cue ends at {:.3}s",
                    start, previous_end
                )
            }
            CueViolation::OverlapsFollowing {
                end,
                following_start,
            } => {
                write!(
                    f,
                    "Cue ends at {:.3}s, after the following cue starts at {:.3}s",
                    end, following_start
                )
            }
        }
    }
}

// =============================================================================
// Conformance Checks
// =============================================================================

/// True when the cue's rounded duration is at least the minimum gap
pub(crate) fn min_range_ok(cue: &Cue, limit: &TimeGapLimit) -> bool {
    round_to_millis(cue.duration()) >= limit.min_gap
}

/// True when the cue's rounded duration is at most the maximum gap
pub(crate) fn max_range_ok(cue: &Cue, limit: &TimeGapLimit) -> bool {
    round_to_millis(cue.duration()) <= limit.max_gap
}

/// Full conformance check for one cue between its list neighbors.
///
/// Boundary tolerance is `<=`: a cue may start exactly where its previous
/// neighbor ends.
pub(crate) fn cue_conforms(
    previous: Option<&Cue>,
    cue: &Cue,
    following: Option<&Cue>,
    limit: &TimeGapLimit,
    spec: Option<&CaptionSpecification>,
) -> bool {
    let duration_ok = min_range_ok(cue, limit) && max_range_ok(cue, limit);
    let overlap_ok = previous.is_none_or(|p| p.end_time <= cue.start_time)
        && following.is_none_or(|n| cue.end_time <= n.start_time);

    duration_ok && overlap_ok && check_character_limitation(&cue.text, spec)
}

// =============================================================================
// Marking
// =============================================================================

/// Validates every cue in the list and returns copies with `corrupted` set.
///
/// The input is left untouched; cue order, identity and all other fields are
/// preserved. This is a full-list scan. The track's incremental revalidation
/// covers the common editing path, this one covers imports and bulk
/// operations.
pub fn mark_cues(cues: &[Cue], spec: Option<&CaptionSpecification>) -> Vec<Cue> {
    let limit = resolve_time_gap_limits(spec);

    let mut marked = Vec::with_capacity(cues.len());
    for (i, cue) in cues.iter().enumerate() {
        let previous = if i == 0 { None } else { cues.get(i - 1) };
        let following = cues.get(i + 1);

        let mut cue = cue.clone();
        cue.corrupted = !cue_conforms(previous, &cue, following, &limit, spec);
        marked.push(cue);
    }
    marked
}

/// Itemizes every violation of one cue between its list neighbors.
///
/// Returns an empty list exactly when [`mark_cues`] would leave the cue
/// unmarked. Useful for tooltips and QC panels that need to say *why* a cue
/// is corrupted, not just that it is.
pub fn cue_violations(
    previous: Option<&Cue>,
    cue: &Cue,
    following: Option<&Cue>,
    spec: Option<&CaptionSpecification>,
) -> Vec<CueViolation> {
    let limit = resolve_time_gap_limits(spec);
    let mut violations = Vec::new();

    let duration = round_to_millis(cue.duration());
    if duration < limit.min_gap {
        violations.push(CueViolation::DurationTooShort {
            duration,
            min_gap: limit.min_gap,
        });
    }
    if duration > limit.max_gap {
        violations.push(CueViolation::DurationTooLong {
            duration,
            max_gap: limit.max_gap,
        });
    }

    if let Some(spec) = spec.filter(|s| s.enabled) {
        let lines: Vec<&str> = cue.text.split('\n').collect();
        if let Some(max) = spec.max_lines_per_caption {
            if lines.len() > max as usize {
                violations.push(CueViolation::TooManyLines {
                    lines: lines.len(),
                    limit: max,
                });
            }
        }
        if let Some(max) = spec.max_characters_per_line {
            for (i, line) in lines.iter().enumerate() {
                let characters = line.chars().count();
                if characters > max as usize {
                    violations.push(CueViolation::LineTooLong {
                        line: i + 1,
                        characters,
                        limit: max,
                    });
                }
            }
        }
    }

    if let Some(previous) = previous {
        if previous.end_time > cue.start_time {
            violations.push(CueViolation::OverlapsPrevious {
                previous_end: previous.end_time,
                start: cue.start_time,
            });
        }
    }
    if let Some(following) = following {
        if cue.end_time > following.start_time {
            violations.push(CueViolation::OverlapsFollowing {
                end: cue.end_time,
                following_start: following.start_time,
            });
        }
    }

    violations
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::CaptionSpecification;

    fn strict_spec() -> CaptionSpecification {
        CaptionSpecification::new()
            .with_line_limits(Some(2), Some(40))
            .with_duration_limits(Some(2000), Some(6000))
    }

    fn cue(start: TimeSec, end: TimeSec, text: &str) -> Cue {
        Cue::create(start, end, text)
    }

    // -------------------------------------------------------------------------
    // Marking Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_mark_cues_preserves_order_and_fields() {
        let spec = strict_spec();
        let cues = vec![cue(0.0, 3.0, "one"), cue(3.0, 6.0, "two")];

        let marked = mark_cues(&cues, Some(&spec));

        assert_eq!(marked.len(), 2);
        assert_eq!(marked[0].id, cues[0].id);
        assert_eq!(marked[0].text, "one");
        assert_eq!(marked[1].start_time, 3.0);
        assert!(!marked[0].corrupted);
        assert!(!marked[1].corrupted);
    }

    #[test]
    fn test_mark_cues_does_not_mutate_input() {
        let spec = strict_spec();
        let cues = vec![cue(0.0, 0.5, "too short")];

        let marked = mark_cues(&cues, Some(&spec));

        assert!(marked[0].corrupted);
        assert!(!cues[0].corrupted);
    }

    #[test]
    fn test_mark_cues_flags_short_and_long_durations() {
        let spec = strict_spec();
        let cues = vec![cue(0.0, 1.0, "short"), cue(1.0, 10.0, "long")];

        let marked = mark_cues(&cues, Some(&spec));

        assert!(marked[0].corrupted);
        assert!(marked[1].corrupted);
    }

    #[test]
    fn test_duration_comparison_rounds_to_millis() {
        let spec = strict_spec();
        // 1.9999999s of float noise counts as the full 2s minimum
        let cues = vec![cue(0.0, 1.9999999, "ok")];

        let marked = mark_cues(&cues, Some(&spec));

        assert!(!marked[0].corrupted);
    }

    #[test]
    fn test_touching_cues_do_not_overlap() {
        let spec = strict_spec();
        let cues = vec![cue(0.0, 2.0, "one"), cue(2.0, 4.0, "two")];

        let marked = mark_cues(&cues, Some(&spec));

        assert!(!marked[0].corrupted);
        assert!(!marked[1].corrupted);

        let marked = mark_cues(&cues, None);
        assert!(!marked[0].corrupted);
        assert!(!marked[1].corrupted);
    }

    #[test]
    fn test_overlapping_neighbors_both_flagged() {
        let spec = strict_spec();
        let cues = vec![cue(0.0, 2.5, "one"), cue(2.0, 4.5, "two")];

        let marked = mark_cues(&cues, Some(&spec));

        assert!(marked[0].corrupted);
        assert!(marked[1].corrupted);
    }

    #[test]
    fn test_neighbors_are_list_positions_not_times() {
        let spec = strict_spec();
        // Out of time order: each cue's neighbor check still uses the list order
        let cues = vec![cue(5.0, 8.0, "later"), cue(0.0, 3.0, "earlier")];

        let marked = mark_cues(&cues, Some(&spec));

        assert!(marked[0].corrupted);
        assert!(marked[1].corrupted);
    }

    #[test]
    fn test_first_and_last_have_one_neighbor_each() {
        let spec = strict_spec();
        let cues = vec![cue(0.0, 3.0, "only")];

        let marked = mark_cues(&cues, Some(&spec));

        assert!(!marked[0].corrupted);
        assert!(mark_cues(&[], Some(&spec)).is_empty());
    }

    #[test]
    fn test_mark_cues_flags_too_many_lines() {
        let spec = strict_spec();
        let cues = vec![cue(0.0, 3.0, "Caption\nLine\n1")];

        let marked = mark_cues(&cues, Some(&spec));

        assert!(marked[0].corrupted);
    }

    #[test]
    fn test_mark_cues_flags_long_line() {
        let spec = strict_spec();
        let cues = vec![cue(0.0, 3.0, &"x".repeat(41))];

        let marked = mark_cues(&cues, Some(&spec));

        assert!(marked[0].corrupted);
    }

    #[test]
    fn test_mark_cues_without_specification_still_checks_timing() {
        // No specification: only the permissive defaults apply
        let cues = vec![
            cue(0.0, 0.0, "zero length"),
            cue(1.0, 3.0, &"x".repeat(500)),
        ];

        let marked = mark_cues(&cues, None);

        assert!(marked[0].corrupted);
        assert!(!marked[1].corrupted);
    }

    #[test]
    fn test_mark_cues_clears_stale_flags() {
        let spec = strict_spec();
        let mut stale = cue(0.0, 3.0, "fine now");
        stale.corrupted = true;

        let marked = mark_cues(&[stale], Some(&spec));

        assert!(!marked[0].corrupted);
    }

    // -------------------------------------------------------------------------
    // Violation Itemization Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_violations_empty_for_conforming_cue() {
        let spec = strict_spec();
        let previous = cue(0.0, 2.0, "before");
        let subject = cue(2.0, 5.0, "fine");
        let following = cue(5.0, 7.0, "after");

        let violations =
            cue_violations(Some(&previous), &subject, Some(&following), Some(&spec));

        assert!(violations.is_empty());
    }

    #[test]
    fn test_violations_itemize_every_problem() {
        let spec = strict_spec();
        let previous = cue(0.0, 2.0, "before");
        // Starts under the previous cue, too short, three over-long lines
        let subject = cue(1.5, 1.6, &format!("{}\n{}\n{}", "x".repeat(41), "y", "z"));

        let violations = cue_violations(Some(&previous), &subject, None, Some(&spec));

        assert!(violations.iter().any(|v| matches!(
            v,
            CueViolation::DurationTooShort { .. }
        )));
        assert!(violations
            .iter()
            .any(|v| matches!(v, CueViolation::TooManyLines { lines: 3, .. })));
        assert!(violations
            .iter()
            .any(|v| matches!(v, CueViolation::LineTooLong { line: 1, .. })));
        assert!(violations.iter().any(|v| matches!(
            v,
            CueViolation::OverlapsPrevious { .. }
        )));
    }

    #[test]
    fn test_violations_agree_with_marking() {
        let spec = strict_spec();
        let cues = vec![
            cue(0.0, 3.0, "fine"),
            cue(2.5, 4.0, "overlapping and short"),
            cue(4.0, 20.0, "far too long"),
        ];

        let marked = mark_cues(&cues, Some(&spec));
        for (i, cue) in cues.iter().enumerate() {
            let previous = if i == 0 { None } else { cues.get(i - 1) };
            let violations = cue_violations(previous, cue, cues.get(i + 1), Some(&spec));
            assert_eq!(violations.is_empty(), !marked[i].corrupted);
        }
    }

    #[test]
    fn test_violation_messages_are_readable() {
        let violation = CueViolation::DurationTooShort {
            duration: 0.5,
            min_gap: 2.0,
        };
        assert_eq!(
            violation.to_string(),
            "Cue lasts 0.500s, shorter than the 2.000s minimum"
        );

        let violation = CueViolation::LineTooLong {
            line: 2,
            characters: 55,
            limit: 40,
        };
        assert_eq!(
            violation.to_string(),
            "Line 2 has 55 characters, limit is 40"
        );
    }

    #[test]
    fn test_violation_serialization() {
        let violation = CueViolation::OverlapsFollowing {
            end: 5.5,
            following_start: 5.0,
        };
        let json = serde_json::to_string(&violation).unwrap();

        assert!(json.contains("\"type\":\"overlapsFollowing\""));
        assert!(json.contains("\"followingStart\":5.0"));

        let back: CueViolation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, violation);
    }
}
