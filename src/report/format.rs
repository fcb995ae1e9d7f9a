//! Presentation formatting for dates and values.
//!
//! We keep formatting code in one place so:
//! - the selection/fetch code stays clean and testable
//! - output changes are localized (chart tooltips, grid cells, and CLI
//!   tables all format through here)

use chrono::NaiveDate;

/// Format a value for display based on its declared unit.
///
/// - units containing "percent": two fixed fraction digits plus `%`
/// - units containing "dollar" or "billion": `$`-prefixed, thousands
///   grouped, up to two fraction digits (trailing zeros trimmed)
/// - anything else: plain grouped number, up to two fraction digits
pub fn format_value(value: f64, units: Option<&str>) -> String {
    let units = units.map(str::to_lowercase).unwrap_or_default();

    if units.contains("percent") {
        return format!("{value:.2}%");
    }

    let magnitude = decimal_abs(value, 0, 2);
    let sign = if value < 0.0 && has_nonzero_digit(&magnitude) {
        "-"
    } else {
        ""
    };

    if units.contains("dollar") || units.contains("billion") {
        format!("{sign}${magnitude}")
    } else {
        format!("{sign}{magnitude}")
    }
}

/// Format a value for a terminal grid cell: exactly two fraction digits,
/// thousands grouped.
pub fn format_grid_value(value: f64) -> String {
    let magnitude = decimal_abs(value, 2, 2);
    if value < 0.0 && has_nonzero_digit(&magnitude) {
        format!("-{magnitude}")
    } else {
        magnitude
    }
}

/// Chart tooltip date, e.g. "Jan 5, 2025".
pub fn format_date_long(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Terminal grid cell date, e.g. "01/05/25".
pub fn format_date_short(date: NaiveDate) -> String {
    date.format("%m/%d/%y").to_string()
}

/// `|value|` with `max_frac` rounding, trailing zeros trimmed down to
/// `min_frac`, and the integer part grouped with commas.
fn decimal_abs(value: f64, min_frac: usize, max_frac: usize) -> String {
    let rounded = format!("{:.*}", max_frac, value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));

    let mut frac = frac_part.to_string();
    while frac.len() > min_frac && frac.ends_with('0') {
        frac.pop();
    }

    let mut out = group_thousands(int_part);
    if !frac.is_empty() {
        out.push('.');
        out.push_str(&frac);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn has_nonzero_digit(s: &str) -> bool {
    s.bytes().any(|b| b.is_ascii_digit() && b != b'0')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_units_use_two_fixed_digits() {
        assert_eq!(format_value(3.456, Some("percent")), "3.46%");
        assert_eq!(format_value(3.5, Some("Percent of GDP")), "3.50%");
        assert_eq!(format_value(-0.25, Some("PERCENT")), "-0.25%");
    }

    #[test]
    fn dollar_units_format_as_currency() {
        assert_eq!(
            format_value(2_500_000_000.0, Some("Billions of Dollars")),
            "$2,500,000,000"
        );
        assert_eq!(format_value(3.456, Some("Dollars per Gallon")), "$3.46");
        assert_eq!(format_value(1234.5, Some("dollars")), "$1,234.5");
        assert_eq!(format_value(-1234.5, Some("dollars")), "-$1,234.5");
    }

    #[test]
    fn plain_numbers_trim_trailing_zeros() {
        assert_eq!(format_value(42.0, None), "42");
        assert_eq!(format_value(42.0, Some("Index 1982-84=100")), "42");
        assert_eq!(format_value(1234.5, None), "1,234.5");
        assert_eq!(format_value(3.456, None), "3.46");
    }

    #[test]
    fn negative_zero_rounds_without_a_sign() {
        assert_eq!(format_value(-0.001, None), "0");
        assert_eq!(format_grid_value(-0.001), "0.00");
    }

    #[test]
    fn grid_values_always_carry_two_digits() {
        assert_eq!(format_grid_value(4.0), "4.00");
        assert_eq!(format_grid_value(1234.5), "1,234.50");
        assert_eq!(format_grid_value(-17.126), "-17.13");
    }

    #[test]
    fn two_date_contracts() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(format_date_long(date), "Jan 5, 2025");
        assert_eq!(format_date_short(date), "01/05/25");

        let date = NaiveDate::from_ymd_opt(1999, 12, 31).unwrap();
        assert_eq!(format_date_long(date), "Dec 31, 1999");
        assert_eq!(format_date_short(date), "12/31/99");
    }

    #[test]
    fn grouping_covers_long_integers() {
        assert_eq!(format_value(1_000_000.0, None), "1,000,000");
        assert_eq!(format_value(999.0, None), "999");
        assert_eq!(format_value(1000.0, None), "1,000");
    }
}
