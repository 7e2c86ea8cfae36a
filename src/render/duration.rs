//! Human-readable elapsed times.

use std::time::Duration;

const MINUTE: f64 = 60.0;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;
const MONTH: f64 = 30.0 * DAY;
const YEAR: f64 = 365.0 * DAY;

/// Format an elapsed time with one decimal in the largest fitting unit.
///
/// Units: `s`, `m`, `h`, `d`, `mo` (30 days), `y` (365 days).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use peeklog::render::format_elapsed;
///
/// assert_eq!(format_elapsed(Duration::from_millis(1500)), "1.5s");
/// assert_eq!(format_elapsed(Duration::from_secs(90)), "1.5m");
/// ```
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    // Pick the unit after rounding, so 59.96s reads 1.0m rather than 60.0s.
    for pair in UNITS.windows(2) {
        let (size, suffix) = pair[0];
        let (next, _) = pair[1];
        let value = round_tenths(secs / size);
        if value < next / size {
            return format!("{value:.1}{suffix}");
        }
    }
    format!("{:.1}y", secs / YEAR)
}

const UNITS: [(f64, &str); 6] = [
    (1.0, "s"),
    (MINUTE, "m"),
    (HOUR, "h"),
    (DAY, "d"),
    (MONTH, "mo"),
    (YEAR, "y"),
];

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
