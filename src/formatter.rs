//! Display formatting for prices, volumes and changes
//!
//! Every function here is total. Missing or NaN inputs are the caller's
//! business: substitute a default (usually `0.0`) before calling.

use crate::types::{ChangeClass, TrendArrow};
use chrono::{DateTime, TimeZone};

/// Formats a price as a dollar string, choosing precision by magnitude
///
/// - below `0.01`: 8 decimals
/// - below `1`: 6 decimals
/// - otherwise: 2 decimals with thousands separators
pub fn format_price(value: f64) -> String {
    if value < 0.01 {
        format!("${:.8}", value)
    } else if value < 1.0 {
        format!("${:.6}", value)
    } else {
        format!("${}", group_thousands(&format!("{:.2}", value)))
    }
}

/// Formats a volume or market cap with a K/M/B/T suffix and one decimal
///
/// Values below a thousand are rounded to a grouped integer. Each threshold
/// sits where rounding would carry into the next unit, so `999.6` is
/// `$1.0K` rather than `$1,000` and `999_960.0` is `$1.0M` rather than
/// `$1000.0K`.
pub fn format_large_number(value: f64) -> String {
    if value >= 999.95e9 {
        format!("${:.1}T", value / 1e12)
    } else if value >= 999.95e6 {
        format!("${:.1}B", value / 1e9)
    } else if value >= 999.95e3 {
        format!("${:.1}M", value / 1e6)
    } else if value >= 999.5 {
        format!("${:.1}K", value / 1e3)
    } else {
        format!("${}", group_thousands(&format!("{:.0}", value)))
    }
}

/// Formats a percentage change with two decimals, e.g. `-1.00%`
pub fn format_percent_change(delta: f64) -> String {
    format!("{:.2}%", delta)
}

/// Classifies a change as positive, negative or neutral
pub fn change_class(delta: f64) -> ChangeClass {
    if delta > 0.0 {
        ChangeClass::Positive
    } else if delta < 0.0 {
        ChangeClass::Negative
    } else {
        ChangeClass::Neutral
    }
}

/// Arrow for a change: up, down or flat
pub fn trend_arrow(delta: f64) -> TrendArrow {
    match change_class(delta) {
        ChangeClass::Positive => TrendArrow::Up,
        ChangeClass::Negative => TrendArrow::Down,
        ChangeClass::Neutral => TrendArrow::Flat,
    }
}

/// Formats the clock element as `YYYY-MM-DD HH:MM:SS` (24-hour)
pub fn format_clock<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Inserts `,` every three digits in the integer part of a decimal string
fn group_thousands(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}
