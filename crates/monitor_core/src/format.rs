/// Render seconds as `m:ss`. Minutes are unbounded, so an hour reads `60:00`.
///
/// Negative and non-finite inputs render as `0:00`.
pub fn format_clock(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

pub fn format_duration(seconds: Option<f64>) -> Option<String> {
    seconds.map(format_clock)
}

/// Human readable size for a value given in megabytes.
pub fn format_file_size(mb: f64) -> String {
    if mb < 1.0 {
        format!("{:.0} KB", mb * 1024.0)
    } else if mb > 1024.0 {
        format!("{:.1} GB", mb / 1024.0)
    } else {
        format!("{mb:.1} MB")
    }
}

pub fn format_decimal(value: f64, precision: usize) -> String {
    format!("{value:.precision$}")
}

pub fn format_vram(gb: f64, precision: usize) -> String {
    format!("{gb:.precision$} GB")
}

/// Thousands separated with commas: `1234567` -> `1,234,567`.
pub fn format_number(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_frame_count(count: Option<u64>) -> Option<String> {
    count.map(|count| format!("{}f", format_number(count)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_pads_seconds_and_keeps_minutes_unbounded() {
        assert_eq!(format_clock(0.0), "0:00");
        assert_eq!(format_clock(65.0), "1:05");
        assert_eq!(format_clock(65.99), "1:05");
        assert_eq!(format_clock(3661.0), "61:01");
    }

    #[test]
    fn clock_clamps_bad_input() {
        assert_eq!(format_clock(-12.0), "0:00");
        assert_eq!(format_clock(f64::NAN), "0:00");
    }

    #[test]
    fn duration_passes_missing_through() {
        assert_eq!(format_duration(None), None);
        assert_eq!(format_duration(Some(100.0)).as_deref(), Some("1:40"));
    }

    #[test]
    fn file_size_switches_units() {
        assert_eq!(format_file_size(0.5), "512 KB");
        assert_eq!(format_file_size(12.34), "12.3 MB");
        assert_eq!(format_file_size(2048.0), "2.0 GB");
    }

    #[test]
    fn numbers_get_separators() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
        assert_eq!(format_frame_count(Some(4800)).as_deref(), Some("4,800f"));
        assert_eq!(format_frame_count(None), None);
    }

    #[test]
    fn vram_and_decimal_respect_precision() {
        assert_eq!(format_vram(7.46, 1), "7.5 GB");
        assert_eq!(format_vram(7.4, 2), "7.40 GB");
        assert_eq!(format_decimal(28.549, 1), "28.5");
    }
}
