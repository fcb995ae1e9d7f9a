//! Look-back window resolution.
//!
//! Each reporting frequency maps to exactly two selectable windows: a short
//! one for recent movement and a long one for context. The mapping is a pure
//! function of the frequency text so every caller (chart cards, the `show`
//! command, tests) sees the same choices.

use crate::domain::types::TimeWindow;

const TWO_MONTHS: TimeWindow = TimeWindow { label: "2M", months: 2 };
const SIX_MONTHS: TimeWindow = TimeWindow { label: "6M", months: 6 };
const ONE_YEAR: TimeWindow = TimeWindow { label: "1Y", months: 12 };
const TWO_YEARS: TimeWindow = TimeWindow { label: "2Y", months: 24 };
const FIVE_YEARS: TimeWindow = TimeWindow { label: "5Y", months: 60 };
const TEN_YEARS: TimeWindow = TimeWindow { label: "10Y", months: 120 };

/// Look-back windows offered for a reporting frequency.
///
/// The frequency is matched as a case-insensitive substring, first match
/// wins. "7-day" is tested before "daily" so averaged series like
/// "7-Day Average" keep the weekly windows. Anything unrecognized (monthly,
/// annual, blank) gets the default 2Y/5Y pair.
pub fn window_options(frequency: &str) -> [TimeWindow; 2] {
    let freq = frequency.to_lowercase();

    if freq.contains("7-day") {
        [SIX_MONTHS, TWO_YEARS]
    } else if freq.contains("weekly") {
        [SIX_MONTHS, TWO_YEARS]
    } else if freq.contains("quarterly") {
        [TWO_YEARS, TEN_YEARS]
    } else if freq.contains("daily") {
        [TWO_MONTHS, ONE_YEAR]
    } else {
        [TWO_YEARS, FIVE_YEARS]
    }
}
