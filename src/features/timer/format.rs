//! Time formatting for the timer display and the activity log.

/// Format seconds as `HH:MM:SS`. Hours are not wrapped at 24.
#[must_use]
pub fn format_hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Format seconds as `MM:SS` below an hour and `HH:MM:SS` from an hour up.
#[must_use]
pub fn format_compact(total_seconds: u64) -> String {
    if total_seconds >= 3600 {
        return format_hms(total_seconds);
    }
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Format seconds as a human-readable string, e.g. `1 hour, 5 minutes`.
#[must_use]
pub fn format_human(total_seconds: u64) -> String {
    fn plural(n: u64, unit: &str) -> String {
        format!("{n} {unit}{}", if n == 1 { "" } else { "s" })
    }

    if total_seconds < 60 {
        return plural(total_seconds, "second");
    }

    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;

    match (hours, minutes) {
        (0, m) => plural(m, "minute"),
        (h, 0) => plural(h, "hour"),
        (h, m) => format!("{}, {}", plural(h, "hour"), plural(m, "minute")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hms() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(59), "00:00:59");
        assert_eq!(format_hms(3661), "01:01:01");
        assert_eq!(format_hms(1500), "00:25:00");
    }

    #[test]
    fn test_format_hms_hours_unbounded() {
        assert_eq!(format_hms(25 * 3600), "25:00:00");
        assert_eq!(format_hms(100 * 3600 + 5), "100:00:05");
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_compact(0), "00:00");
        assert_eq!(format_compact(90), "01:30");
        assert_eq!(format_compact(3599), "59:59");
        assert_eq!(format_compact(3600), "01:00:00");
    }

    #[test]
    fn test_format_human() {
        assert_eq!(format_human(1), "1 second");
        assert_eq!(format_human(45), "45 seconds");
        assert_eq!(format_human(60), "1 minute");
        assert_eq!(format_human(25 * 60), "25 minutes");
        assert_eq!(format_human(7200), "2 hours");
        assert_eq!(format_human(5400), "1 hour, 30 minutes");
    }
}
