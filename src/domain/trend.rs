//! Recent-change classification for the dense grid view.
//!
//! The grid colors each value cell by the direction of the latest move and
//! weights it by how large the two-step move is relative to the latest
//! level. Classification needs the three most recent observations; with
//! fewer the cell stays neutral.

/// Direction of the most recent move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    /// Insufficient history to tell.
    Flat,
}

/// Magnitude bucket driving display emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    /// Two-step change exceeds 10% of the latest level.
    High,
    /// Two-step change exceeds 5% of the latest level.
    Medium,
    None,
}

/// Classifier output for one series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trend {
    pub direction: Direction,
    pub emphasis: Emphasis,
}

impl Trend {
    /// Neutral trend used when a series has no usable history.
    pub fn flat() -> Self {
        Trend {
            direction: Direction::Flat,
            emphasis: Emphasis::None,
        }
    }
}

/// Classify the three most recent observations of a series.
///
/// Direction compares `latest` against `previous` (a zero delta counts as
/// up). Emphasis compares `|latest - two_back|` against 10% and 5% of
/// `|latest|`. When `latest` is exactly zero both thresholds collapse to
/// zero, so any nonzero two-step change classifies as High; the comparison
/// involves no division, so this degenerate case needs no special handling
/// beyond being documented here.
pub fn classify(latest: f64, previous: Option<f64>, two_back: Option<f64>) -> Trend {
    let (Some(previous), Some(two_back)) = (previous, two_back) else {
        return Trend::flat();
    };

    let direction = if latest - previous >= 0.0 {
        Direction::Up
    } else {
        Direction::Down
    };

    let magnitude = (latest - two_back).abs();
    let emphasis = if magnitude > 0.10 * latest.abs() {
        Emphasis::High
    } else if magnitude > 0.05 * latest.abs() {
        Emphasis::Medium
    } else {
        Emphasis::None
    };

    Trend { direction, emphasis }
}
