use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

const UNITS: [&str; 6] = ["Bytes", "KB", "MB", "GB", "TB", "PB"];

/// Formats a byte count the way the document cards show it: the largest unit
/// keeping the value at or above one, rounded to two decimals.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    // f64's Display drops trailing zeros, so 1.50 prints as "1.5" and 1.00 as "1".
    let rounded = (size * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit_index])
}

/// Renders an upload timestamp in local time, e.g. "Jan 5, 2024, 03:45 PM".
pub fn format_date(iso: &str) -> String {
    format_date_in(iso, &Local)
}

pub fn format_date_in<Tz>(iso: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match parse_timestamp(iso, tz) {
        Some(date) => date.format("%b %-d, %Y, %I:%M %p").to_string(),
        None => "Invalid Date".to_string(),
    }
}

fn parse_timestamp<Tz: TimeZone>(iso: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let iso = iso.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(iso) {
        return Some(date.with_timezone(tz));
    }

    // A bare date is midnight UTC.
    if let Ok(date) = NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0)?;
        return Some(Utc.from_utc_datetime(&midnight).with_timezone(tz));
    }

    // Timestamps without an offset are wall-clock time in the display zone.
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(iso, fmt).ok())
        .and_then(|naive| tz.from_local_datetime(&naive).earliest())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn file_size_zero() {
        assert_eq!(format_file_size(0), "0 Bytes");
    }

    #[test]
    fn file_size_units() {
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1_048_576), "1 MB");
        assert_eq!(format_file_size(5 * 1024 * 1024 * 1024), "5 GB");
    }

    #[test]
    fn file_size_rounds_to_two_decimals() {
        // 1234567 / 1024^2 = 1.1773...
        assert_eq!(format_file_size(1_234_567), "1.18 MB");
    }

    #[test]
    fn file_size_past_gigabytes_stays_on_table() {
        assert_eq!(format_file_size(1024u64.pow(4)), "1 TB");
        assert_eq!(format_file_size(3 * 1024u64.pow(5)), "3 PB");
        assert!(format_file_size(u64::MAX).ends_with(" PB"));
    }

    #[test]
    fn date_with_offset() {
        assert_eq!(
            format_date_in("2024-01-05T15:45:00Z", &Utc),
            "Jan 5, 2024, 03:45 PM"
        );
        assert_eq!(
            format_date_in("2024-01-05T15:45:12.123456+00:00", &Utc),
            "Jan 5, 2024, 03:45 PM"
        );
    }

    #[test]
    fn date_converted_to_display_zone() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(
            format_date_in("2024-12-31T23:30:00Z", &plus_two),
            "Jan 1, 2025, 01:30 AM"
        );
    }

    #[test]
    fn naive_date_is_local_wall_clock() {
        assert_eq!(
            format_date_in("2024-03-09T08:05:00", &Utc),
            "Mar 9, 2024, 08:05 AM"
        );
    }

    #[test]
    fn bare_date_is_utc_midnight() {
        assert_eq!(format_date_in("2024-01-05", &Utc), "Jan 5, 2024, 12:00 AM");

        let minus_five = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(
            format_date_in("2024-01-05", &minus_five),
            "Jan 4, 2024, 07:00 PM"
        );
    }

    #[test]
    fn invalid_date() {
        assert_eq!(format_date_in("not a date", &Utc), "Invalid Date");
        assert_eq!(format_date_in("", &Utc), "Invalid Date");
    }
}
