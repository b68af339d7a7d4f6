const DAY: u64 = 86_400;
const HOUR: u64 = 3_600;
const MINUTE: u64 = 60;

/// Formats seconds as `"1d 2h 3m 4s"`, dropping every zero-valued unit.
///
/// Seconds are always shown when nothing else is, so `0` renders `"0s"`.
/// Fractions are floored and negative values get a leading `-`.
pub fn format_dhms(seconds: f64) -> String {
    if seconds.is_nan() {
        return "n/a".to_string();
    }
    if seconds.is_infinite() {
        return if seconds > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    // saturating float-to-int cast
    let total = seconds.abs().floor() as u64;
    if total == 0 {
        return "0s".to_string();
    }

    let units = [
        (total / DAY, "d"),
        (total % DAY / HOUR, "h"),
        (total % HOUR / MINUTE, "m"),
        (total % MINUTE, "s"),
    ];

    let body = units
        .iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, suffix)| format!("{}{}", value, suffix))
        .collect::<Vec<_>>()
        .join(" ");

    if seconds < 0.0 {
        format!("-{}", body)
    } else {
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert_eq!(format_dhms(0.0), "0s");
        assert_eq!(format_dhms(0.4), "0s");
        assert_eq!(format_dhms(-0.9), "0s");
    }

    #[test]
    fn test_minutes_and_seconds() {
        assert_eq!(format_dhms(90.0), "1m 30s");
        assert_eq!(format_dhms(59.99), "59s");
        assert_eq!(format_dhms(60.0), "1m");
    }

    #[test]
    fn test_zero_units_are_skipped_independently() {
        assert_eq!(format_dhms(86_401.0), "1d 1s");
        assert_eq!(format_dhms(86_400.0), "1d");
        assert_eq!(format_dhms(90_061.0), "1d 1h 1m 1s");
        assert_eq!(format_dhms(3_660.0), "1h 1m");
        assert_eq!(format_dhms(172_800.0 + 120.0), "2d 2m");
    }

    #[test]
    fn test_negative_and_non_finite() {
        assert_eq!(format_dhms(-90.0), "-1m 30s");
        assert_eq!(format_dhms(f64::INFINITY), "∞");
        assert_eq!(format_dhms(f64::NEG_INFINITY), "-∞");
        assert_eq!(format_dhms(f64::NAN), "n/a");
    }
}
