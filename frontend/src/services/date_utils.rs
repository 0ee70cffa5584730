use chrono::{Datelike, NaiveDate};

/// Abbreviated French month names used in the bill list
const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan.", "Fév.", "Mar.", "Avr.", "Mai", "Juin", "Juil.", "Aoû.", "Sep.", "Oct.", "Nov.", "Déc.",
];

/// Parse a store date ("YYYY-MM-DD", or an RFC 3339 timestamp) into a calendar date
pub fn parse_bill_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.trim().split('T').next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Abbreviated month name for a 1-based month number
pub fn month_abbreviation(month: u32) -> Option<&'static str> {
    MONTH_ABBREVIATIONS.get(month.checked_sub(1)? as usize).copied()
}

/// Format a calendar date as "D Mon YY", e.g. "4 Avr. 24"
pub fn format_short_date(date: NaiveDate) -> String {
    let month = month_abbreviation(date.month()).unwrap_or("Jan.");
    format!("{} {} {:02}", date.day(), month, date.year().rem_euclid(100))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_date() {
        assert_eq!(parse_bill_date("2004-04-04"), NaiveDate::from_ymd_opt(2004, 4, 4));
    }

    #[test]
    fn test_parse_rfc3339_timestamp() {
        assert_eq!(
            parse_bill_date("2025-06-13T09:00:00-04:00"),
            NaiveDate::from_ymd_opt(2025, 6, 13)
        );
    }

    #[test]
    fn test_parse_rejects_garbage_and_impossible_dates() {
        assert_eq!(parse_bill_date(""), None);
        assert_eq!(parse_bill_date("not a date"), None);
        assert_eq!(parse_bill_date("2023-02-30"), None);
        assert_eq!(parse_bill_date("04/04/2004"), None);
    }

    #[test]
    fn test_format_short_date() {
        let date = NaiveDate::from_ymd_opt(2024, 4, 4).unwrap();
        assert_eq!(format_short_date(date), "4 Avr. 24");

        let date = NaiveDate::from_ymd_opt(2001, 12, 25).unwrap();
        assert_eq!(format_short_date(date), "25 Déc. 01");
    }

    #[test]
    fn test_month_table_bounds() {
        assert_eq!(month_abbreviation(1), Some("Jan."));
        assert_eq!(month_abbreviation(8), Some("Aoû."));
        assert_eq!(month_abbreviation(12), Some("Déc."));
        assert_eq!(month_abbreviation(0), None);
        assert_eq!(month_abbreviation(13), None);
    }
}
