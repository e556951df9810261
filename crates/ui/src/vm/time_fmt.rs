use chrono::{DateTime, NaiveDate, Utc};

#[must_use]
pub fn format_date(value: NaiveDate) -> String {
    value.format("%d %b %Y").to_string()
}

#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.format("%d %b %Y, %H:%M").to_string()
}

/// `format_datetime`, or a dash when absent.
#[must_use]
pub fn format_optional(value: Option<DateTime<Utc>>) -> String {
    value.map_or_else(|| "—".to_string(), format_datetime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use csr_core::time::fixed_now;

    #[test]
    fn formats_dates_for_tables() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(format_date(date), "07 Mar 2025");
        assert_eq!(format_optional(None), "—");
        assert_eq!(format_optional(Some(fixed_now())), format_datetime(fixed_now()));
    }
}
