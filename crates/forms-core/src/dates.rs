//! Meeting date phrasing and record timestamps

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::FormError;

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Date and time a meeting is held, as picked in the form
///
/// The picker submits `DD/MM/YYYY` followed by whitespace and a free-form
/// time, e.g. `"05/03/2024   10:00"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CelebrationDate {
    date: NaiveDate,
    time: String,
}

impl CelebrationDate {
    pub fn parse(raw: &str) -> Result<Self, FormError> {
        let invalid = || FormError::InvalidDate(raw.to_string());

        let trimmed = raw.trim();
        let (date_part, time_part) = trimmed
            .split_once(char::is_whitespace)
            .ok_or_else(invalid)?;
        let time = time_part.trim();
        if time.is_empty() {
            return Err(invalid());
        }

        let date = NaiveDate::parse_from_str(date_part, "%d/%m/%Y").map_err(|_| invalid())?;

        Ok(Self {
            date,
            time: time.to_string(),
        })
    }

    /// `"05 de marzo de 2024"`
    pub fn long_date(&self) -> String {
        format!(
            "{:02} de {} de {}",
            self.date.day(),
            MONTHS[self.date.month0() as usize],
            self.date.year()
        )
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// The fiscal year reviewed at an ordinary meeting
    pub fn previous_year(&self) -> i32 {
        self.date.year() - 1
    }

    pub fn time(&self) -> &str {
        &self.time
    }
}

/// `YYYY-MM-DD HH:MM:SS` wall-clock time of `now` in `zone`
pub fn local_timestamp(now: DateTime<Utc>, zone: Tz) -> String {
    now.with_timezone(&zone).format("%Y-%m-%d %H:%M:%S").to_string()
}
