use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    #[error("'{value}' is not a valid {field}")]
    InvalidComponent { field: &'static str, value: String },
    #[error("{year}-{month}-{day} {hours}:{minutes} is not a valid date and time")]
    OutOfRange {
        year: String,
        month: String,
        day: String,
        hours: String,
        minutes: String,
    },
}

/// Due moment of a task as entered through the picker.
///
/// Components are kept as the padded strings the picker produces, which is also
/// the shape written to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTime {
    pub hours: String,
    pub minutes: String,
    pub year: String,
    pub month: String,
    pub day: String,
}

impl TaskTime {
    pub fn new(year: i32, month: u32, day: u32, hours: u32, minutes: u32) -> Self {
        Self {
            hours: pad2(hours),
            minutes: pad2(minutes),
            year: format!("{:04}", year),
            month: pad2(month),
            day: pad2(day),
        }
    }

    pub fn from_naive(value: NaiveDateTime) -> Self {
        use chrono::{Datelike, Timelike};
        Self::new(
            value.year(),
            value.month(),
            value.day(),
            value.hour(),
            value.minute(),
        )
    }

    /// Interpret the components as a local wall-clock moment.
    pub fn to_naive(&self) -> Result<NaiveDateTime, TimeError> {
        let year: i32 = parse_component("year", &self.year)?;
        let month: u32 = parse_component("month", &self.month)?;
        let day: u32 = parse_component("day", &self.day)?;
        let hours: u32 = parse_component("hours", &self.hours)?;
        let minutes: u32 = parse_component("minutes", &self.minutes)?;

        let date = NaiveDate::from_ymd_opt(year, month, day);
        let time = NaiveTime::from_hms_opt(hours, minutes, 0);
        match (date, time) {
            (Some(date), Some(time)) => Ok(date.and_time(time)),
            _ => Err(TimeError::OutOfRange {
                year: self.year.clone(),
                month: self.month.clone(),
                day: self.day.clone(),
                hours: self.hours.clone(),
                minutes: self.minutes.clone(),
            }),
        }
    }

    /// `HH:MM on DD/MM/YYYY`
    pub fn label(&self) -> String {
        format!(
            "{}:{} on {}/{}/{}",
            self.hours, self.minutes, self.day, self.month, self.year
        )
    }
}

impl fmt::Display for TaskTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub title: String,
    pub time: TaskTime,
    pub description: Option<String>,
}

impl Task {
    pub fn new(title: impl Into<String>, time: TaskTime, description: Option<String>) -> Self {
        Self {
            title: title.into(),
            time,
            description: normalize_description(description),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteResult {
    pub title: String,
    pub deleted: bool,
}

pub(crate) fn normalize_description(value: Option<String>) -> Option<String> {
    value.and_then(|text| {
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    })
}

pub(crate) fn pad2(value: u32) -> String {
    format!("{:02}", value)
}

fn parse_component<T: std::str::FromStr>(field: &'static str, raw: &str) -> Result<T, TimeError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| TimeError::InvalidComponent {
            field,
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_pads_components() {
        let time = TaskTime::new(2025, 3, 7, 9, 5);
        assert_eq!(time.hours, "09");
        assert_eq!(time.minutes, "05");
        assert_eq!(time.year, "2025");
        assert_eq!(time.month, "03");
        assert_eq!(time.day, "07");
    }

    #[test]
    fn label_uses_day_month_year_order() {
        let time = TaskTime::new(2025, 12, 24, 18, 30);
        assert_eq!(time.label(), "18:30 on 24/12/2025");
        assert_eq!(time.to_string(), time.label());
    }

    #[test]
    fn to_naive_rejects_impossible_dates() {
        let time = TaskTime::new(2023, 2, 29, 10, 0);
        assert!(matches!(time.to_naive(), Err(TimeError::OutOfRange { .. })));

        let mut garbled = TaskTime::new(2024, 1, 1, 0, 0);
        garbled.hours = "xx".into();
        assert_eq!(
            garbled.to_naive(),
            Err(TimeError::InvalidComponent {
                field: "hours",
                value: "xx".into()
            })
        );
    }

    #[test]
    fn from_naive_roundtrips_minutes() {
        let moment = NaiveDate::from_ymd_opt(2024, 2, 29)
            .and_then(|d| d.and_hms_opt(23, 59, 0))
            .expect("valid moment");
        let time = TaskTime::from_naive(moment);
        assert_eq!(time.to_naive(), Ok(moment));
    }

    #[test]
    fn empty_description_is_dropped() {
        let time = TaskTime::new(2030, 1, 1, 0, 0);
        assert_eq!(Task::new("A", time.clone(), Some("   ".into())).description, None);
        assert_eq!(
            Task::new("A", time, Some("milk".into())).description.as_deref(),
            Some("milk")
        );
    }
}
