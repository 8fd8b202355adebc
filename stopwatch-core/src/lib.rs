//! Pure stopwatch logic with no platform dependencies.
//! Testable on host; rendering and tick delivery are supplied by the caller.

mod accumulator;
mod clock;
mod controls;
mod laps;
mod stopwatch;

pub use accumulator::{ClockAccumulator, Phase};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use controls::{Controls, Trigger};
pub use laps::{LapEntry, LapRecorder, MostRecentFirst};
pub use stopwatch::{Stopwatch, TickSource, View, DEFAULT_TICK_PERIOD};

/// Format milliseconds as "HH:MM:SS.cs" (centiseconds, truncated)
pub fn format_hms_cs(ms: u64) -> String {
    let total_secs = ms / 1000;
    let cs = (ms % 1000) / 10;
    let h = total_secs / 3600;
    let m = (total_secs % 3600) / 60;
    let s = total_secs % 60;
    format!("{:02}:{:02}:{:02}.{:02}", h, m, s, cs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hms_cs_boundaries() {
        assert_eq!(format_hms_cs(0), "00:00:00.00");
        assert_eq!(format_hms_cs(9), "00:00:00.00");
        assert_eq!(format_hms_cs(999), "00:00:00.99");
        assert_eq!(format_hms_cs(1000), "00:00:01.00");
        assert_eq!(format_hms_cs(12_340), "00:00:12.34");
        assert_eq!(format_hms_cs(59_999), "00:00:59.99");
        assert_eq!(format_hms_cs(60_000), "00:01:00.00");
        assert_eq!(format_hms_cs(3_599_999), "00:59:59.99");
        assert_eq!(format_hms_cs(3_600_000), "01:00:00.00");
        assert_eq!(format_hms_cs(3_661_010), "01:01:01.01");
    }

    #[test]
    fn test_format_hms_cs_truncates() {
        // 1.999 s is still 1.99, never rounded up to 2.00.
        assert_eq!(format_hms_cs(1_999), "00:00:01.99");
        assert_eq!(format_hms_cs(3_599_995), "00:59:59.99");
    }

    #[test]
    fn test_format_hms_cs_hours_grow_past_two_digits() {
        assert_eq!(format_hms_cs(99 * 3_600_000), "99:00:00.00");
        assert_eq!(format_hms_cs(100 * 3_600_000), "100:00:00.00");
        assert_eq!(format_hms_cs(1_234 * 3_600_000 + 5_678), "1234:00:05.67");
    }
}
