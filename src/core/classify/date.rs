//! Calendar parts derived from a file's modification time.

use chrono::{DateTime, Datelike, Local, TimeZone, Timelike};
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Calendar parts of one timestamp plus the composite strings used by
/// the date organize modes and the date rename modes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateParts {
    /// Four-digit year
    pub year: String,
    /// `01`..`12`
    pub month: String,
    pub day: String,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
    /// Capitalized month name (`Junho`)
    pub month_label: String,
    /// `MM-MonthName`
    pub month_key: String,
    /// `YYYYMMDD`
    pub iso_date: String,
    /// `DDMMYYYY`
    pub eu_date: String,
    /// `YYYYMMDD_HHMMSS`
    pub iso_date_time: String,
}

impl DateParts {
    /// Parts for a file's modification time in the local time zone.
    ///
    /// A missing timestamp means "now". Call this per file; files in one
    /// batch can carry different timestamps.
    pub fn from_modified(modified: Option<SystemTime>) -> Self {
        let time = modified.unwrap_or_else(SystemTime::now);
        Self::from_datetime(&DateTime::<Local>::from(time))
    }

    pub fn from_datetime<Tz: TimeZone>(date: &DateTime<Tz>) -> Self {
        let year = format!("{}", date.year());
        let month = format!("{:02}", date.month());
        let day = format!("{:02}", date.day());
        let hours = format!("{:02}", date.hour());
        let minutes = format!("{:02}", date.minute());
        let seconds = format!("{:02}", date.second());
        let month_label = month_name(date.month()).to_string();

        Self {
            month_key: format!("{}-{}", month, month_label),
            iso_date: format!("{}{}{}", year, month, day),
            eu_date: format!("{}{}{}", day, month, year),
            iso_date_time: format!("{}{}{}_{}{}{}", year, month, day, hours, minutes, seconds),
            year,
            month,
            day,
            hours,
            minutes,
            seconds,
            month_label,
        }
    }
}

/// Capitalized month name for `1..=12`
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "Janeiro",
        2 => "Fevereiro",
        3 => "Março",
        4 => "Abril",
        5 => "Maio",
        6 => "Junho",
        7 => "Julho",
        8 => "Agosto",
        9 => "Setembro",
        10 => "Outubro",
        11 => "Novembro",
        12 => "Dezembro",
        _ => "Desconhecido",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn parts(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateParts {
        let naive = NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap();
        DateParts::from_datetime(&naive.and_utc())
    }

    #[test]
    fn composite_strings_are_zero_padded() {
        let p = parts(2023, 6, 5, 7, 8, 9);
        assert_eq!(p.year, "2023");
        assert_eq!(p.iso_date, "20230605");
        assert_eq!(p.eu_date, "05062023");
        assert_eq!(p.iso_date_time, "20230605_070809");
        assert_eq!(p.month_key, "06-Junho");
    }

    #[test]
    fn december_month_key() {
        assert_eq!(parts(2024, 12, 25, 0, 0, 0).month_key, "12-Dezembro");
    }

    #[test]
    fn local_timestamp_round_trips_through_system_time() {
        let local = Local.with_ymd_and_hms(2023, 6, 15, 12, 0, 0).single().unwrap();
        let p = DateParts::from_modified(Some(SystemTime::from(local)));
        assert_eq!(p.iso_date, "20230615");
        assert_eq!(p.hours, "12");
    }

    #[test]
    fn missing_timestamp_uses_current_year() {
        let p = DateParts::from_modified(None);
        assert_eq!(p.year, Local::now().year().to_string());
    }
}
