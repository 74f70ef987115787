use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Human date label: "Today", "Yesterday", or "Nov 15, 2024".
///
/// Every date shown to the user goes through here so raw ISO strings never
/// leak into views.
pub fn format_date(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        return "Today".to_string();
    }
    if today.pred_opt() == Some(date) {
        return "Yesterday".to_string();
    }
    format_absolute(date)
}

/// "Mon D, YYYY" without any relative wording
pub fn format_absolute(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Clock time as shown on chat messages, e.g. "2:15 PM"
pub fn format_clock(at: NaiveDateTime) -> String {
    at.format("%-I:%M %p").to_string()
}

/// Whole days from `from` to `to` (negative when `to` is earlier)
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{}' (expected YYYY-MM-DD)", s))
}

/// Parse a `YYYY-MM` month into (year, month)
pub fn parse_month(s: &str) -> Result<(i32, u32), String> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map_err(|_| format!("invalid month '{}' (expected YYYY-MM)", s))?;
    Ok((first.year(), first.month()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn relative_labels() {
        let today = d(2024, 11, 15);
        assert_eq!(format_date(today, today), "Today");
        assert_eq!(format_date(d(2024, 11, 14), today), "Yesterday");
        assert_eq!(format_date(d(2024, 11, 13), today), "Nov 13, 2024");
        assert_eq!(format_date(d(2024, 11, 16), today), "Nov 16, 2024");
    }

    #[test]
    fn yesterday_across_year_boundary() {
        assert_eq!(format_date(d(2023, 12, 31), d(2024, 1, 1)), "Yesterday");
    }

    #[test]
    fn absolute_has_no_zero_padding() {
        assert_eq!(format_absolute(d(2024, 12, 1)), "Dec 1, 2024");
    }

    #[test]
    fn clock_is_twelve_hour() {
        let at = d(2024, 11, 15).and_hms_opt(14, 5, 0).unwrap();
        assert_eq!(format_clock(at), "2:05 PM");
        let morning = d(2024, 11, 15).and_hms_opt(9, 30, 0).unwrap();
        assert_eq!(format_clock(morning), "9:30 AM");
    }

    #[test]
    fn parse_helpers() {
        assert_eq!(parse_date("2024-11-15").unwrap(), d(2024, 11, 15));
        assert!(parse_date("11/15/2024").is_err());
        assert_eq!(parse_month("2024-02").unwrap(), (2024, 2));
        assert!(parse_month("2024-13").is_err());
        assert_eq!(days_between(d(2024, 11, 15), d(2024, 11, 20)), 5);
        assert_eq!(days_between(d(2024, 11, 15), d(2024, 11, 14)), -1);
    }
}
