//! Score → tier classification shared by every score display.
//!
//! Thresholds are inclusive lower bounds. Scores outside 0–100 are not
//! rejected; they fall into `Good` or `Critical` by the same comparisons.

/// Lowest score that classifies as [`Tier::Good`].
pub const GOOD_THRESHOLD: i64 = 80;
/// Lowest score that classifies as [`Tier::Warning`].
pub const WARNING_THRESHOLD: i64 = 60;

/// Three-level severity derived from a numeric score.
///
/// Variant order is the quality order: `Critical < Warning < Good`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Critical,
    Warning,
    Good,
}

impl Tier {
    pub fn label(self) -> &'static str {
        match self {
            Tier::Critical => "critical",
            Tier::Warning => "warning",
            Tier::Good => "good",
        }
    }
}

/// Classifies `score` into a [`Tier`]. Total over all integers.
pub fn classify(score: i64) -> Tier {
    if score >= GOOD_THRESHOLD {
        Tier::Good
    } else if score >= WARNING_THRESHOLD {
        Tier::Warning
    } else {
        Tier::Critical
    }
}
