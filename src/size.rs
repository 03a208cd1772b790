use std::time::Duration;

const UNITS: [&str; 9] = ["B", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Render a byte count as `"<value> <unit>"` using powers of 1024,
/// rounded to two decimals. Zero is rendered as `"0B"`.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return String::from("0B");
    }

    let mut unit = 0;
    let mut divisor = 1.0_f64;
    while unit + 1 < UNITS.len() && (bytes as f64) >= divisor * 1024.0 {
        divisor *= 1024.0;
        unit += 1;
    }

    let value = ((bytes as f64) / divisor * 100.0).round() / 100.0;
    if value.fract() == 0.0 {
        format!("{:.1} {}", value, UNITS[unit])
    } else {
        format!("{} {}", value, UNITS[unit])
    }
}

/// Percentage of the original size that was removed, truncated toward zero.
pub fn reduction_percent(original_size: u64, new_size: u64) -> u64 {
    match original_size {
        0 => 0,
        _ => (original_size.saturating_sub(new_size) as f64 / original_size as f64 * 100.0) as u64,
    }
}

pub fn size_report(original_size: u64, new_size: u64) -> String {
    format!(
        "Original file size: {}\nNew mp4 file size: {}\nSize reduction: {}%",
        format_size(original_size),
        format_size(new_size),
        reduction_percent(original_size, new_size),
    )
}

/// `HH:MM:SS.ss`
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs_f64();
    let hours = (total / 3600.0).floor();
    let minutes = ((total - hours * 3600.0) / 60.0).floor();
    let seconds = total - hours * 3600.0 - minutes * 60.0;
    format!("{:02}:{:02}:{:05.2}", hours as u64, minutes as u64, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0B");
        assert_eq!(format_size(1), "1.0 B");
        assert_eq!(format_size(1023), "1023.0 B");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1048576), "1.0 MB");
        assert_eq!(format_size(1073741824), "1.0 GB");
        assert_eq!(format_size(1000000), "976.56 KB");
        assert_eq!(format_size(500000), "488.28 KB");
    }

    #[test]
    fn test_format_size_does_not_overflow_units() {
        assert_eq!(format_size(u64::MAX), "16.0 EB");
    }

    #[test]
    fn test_reduction_percent() {
        assert_eq!(reduction_percent(1000000, 500000), 50);
        assert_eq!(reduction_percent(1000000, 488556), 51);
        assert_eq!(reduction_percent(100, 100), 0);
        assert_eq!(reduction_percent(0, 0), 0);
    }

    #[test]
    fn test_size_report() {
        assert_eq!(
            size_report(1000000, 500000),
            "Original file size: 976.56 KB\nNew mp4 file size: 488.28 KB\nSize reduction: 50%"
        );
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_secs(10)), "00:00:10.00");
        assert_eq!(format_elapsed(Duration::from_millis(3_723_450)), "01:02:03.45");
        assert_eq!(format_elapsed(Duration::ZERO), "00:00:00.00");
    }
}
