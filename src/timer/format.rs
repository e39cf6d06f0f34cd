//! Time formatting and progress calculations

use serde::{Deserialize, Serialize};

/// Remaining time broken into its components plus both display strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedTime {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    /// `H:MM:SS` when hours are present, otherwise `MM:SS`
    pub display: String,
    /// Compact form for titles and menu bars, e.g. `1h 2m` or `45s`
    pub short_display: String,
}

impl FormattedTime {
    /// Decompose a number of seconds into hours, minutes and seconds
    pub fn from_seconds(total: u64) -> Self {
        let hours = total / 3600;
        let minutes = (total % 3600) / 60;
        let seconds = total % 60;

        Self {
            hours,
            minutes,
            seconds,
            display: format_display(hours, minutes, seconds),
            short_display: format_short_display(hours, minutes, seconds),
        }
    }
}

/// Format as `H:MM:SS` or `MM:SS`
pub fn format_display(hours: u64, minutes: u64, seconds: u64) -> String {
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

/// Format as `{h}h {m}m`, `{m}m {s}s` or `{s}s`
pub fn format_short_display(hours: u64, minutes: u64, seconds: u64) -> String {
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// Percentage of the duration already elapsed (0 when duration is 0)
pub fn elapsed_percent(duration: u64, remaining: u64) -> f64 {
    if duration == 0 {
        return 0.0;
    }
    (duration.saturating_sub(remaining) as f64 / duration as f64) * 100.0
}

/// Percentage of the duration still left (100 when duration is 0)
pub fn remaining_percent(duration: u64, remaining: u64) -> f64 {
    if duration == 0 {
        return 100.0;
    }
    (remaining as f64 / duration as f64) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats_hours() {
        let time = FormattedTime::from_seconds(3725);
        assert_eq!((time.hours, time.minutes, time.seconds), (1, 2, 5));
        assert_eq!(time.display, "1:02:05");
        assert_eq!(time.short_display, "1h 2m");
    }

    #[test]
    fn test_formats_seconds_only() {
        let time = FormattedTime::from_seconds(45);
        assert_eq!(time.display, "00:45");
        assert_eq!(time.short_display, "45s");
    }

    #[test]
    fn test_formats_minutes() {
        let time = FormattedTime::from_seconds(25 * 60 + 7);
        assert_eq!(time.display, "25:07");
        assert_eq!(time.short_display, "25m 7s");

        assert_eq!(FormattedTime::from_seconds(0).display, "00:00");
        assert_eq!(FormattedTime::from_seconds(0).short_display, "0s");
    }

    #[test]
    fn test_zero_duration_guards() {
        assert_eq!(elapsed_percent(0, 0), 0.0);
        assert_eq!(remaining_percent(0, 0), 100.0);
    }

    #[test]
    fn test_percentages_are_complements() {
        for remaining in [0, 1, 17, 59, 60] {
            let sum = elapsed_percent(60, remaining) + remaining_percent(60, remaining);
            assert!((sum - 100.0).abs() < 1e-9);
        }
        assert_eq!(elapsed_percent(60, 60), 0.0);
        assert_eq!(elapsed_percent(60, 0), 100.0);
    }
}
