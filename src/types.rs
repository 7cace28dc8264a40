//! Cueline Core Type Definitions
//!
//! Defines fundamental types used throughout the crate.

// =============================================================================
// ID Types
// =============================================================================

/// Cue unique identifier (ULID)
pub type CueId = String;

/// Cue track unique identifier (ULID)
pub type TrackId = String;

// =============================================================================
// Time Types
// =============================================================================

/// Time in seconds (floating point)
pub type TimeSec = f64;

/// Rounds a time to millisecond precision.
///
/// Every duration comparison in the crate goes through this first, so a value
/// like `0.9999999` produced by float subtraction counts as a full second
/// instead of flickering in and out of conformance.
pub fn round_to_millis(seconds: TimeSec) -> TimeSec {
    (seconds * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_millis_keeps_three_decimals() {
        assert_eq!(round_to_millis(1.2344), 1.234);
        assert_eq!(round_to_millis(1.2346), 1.235);
        assert_eq!(round_to_millis(2.0), 2.0);
    }

    #[test]
    fn test_round_to_millis_absorbs_float_noise() {
        // 0.3 - 0.1 is not exactly 0.2 in binary floating point
        let duration = 0.3_f64 - 0.1_f64;
        assert_eq!(round_to_millis(duration), 0.2);
        assert_eq!(round_to_millis(1.9999999), 2.0);
    }

    #[test]
    fn test_round_to_millis_negative_values() {
        assert_eq!(round_to_millis(-0.0004), -0.0);
        assert_eq!(round_to_millis(-0.0006), -0.001);
    }
}
