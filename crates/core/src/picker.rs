//! Dependent selection controls for choosing a future date and time.
//!
//! Day options always reflect the currently selected year and month.

use chrono::NaiveDate;

use crate::model::{pad2, TaskTime};

/// Years offered after the current one.
pub const YEAR_SPAN: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerField {
    Hours,
    Minutes,
    Year,
    Month,
    Day,
}

impl PickerField {
    pub const ALL: [PickerField; 5] = [
        PickerField::Hours,
        PickerField::Minutes,
        PickerField::Year,
        PickerField::Month,
        PickerField::Day,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PickerField::Hours => "Hours",
            PickerField::Minutes => "Minutes",
            PickerField::Year => "Year",
            PickerField::Month => "Month",
            PickerField::Day => "Day",
        }
    }
}

pub fn hour_options() -> Vec<String> {
    (0..24).map(pad2).collect()
}

pub fn minute_options() -> Vec<String> {
    (0..60).map(pad2).collect()
}

pub fn month_options() -> Vec<String> {
    (1..=12).map(pad2).collect()
}

pub fn year_options(current_year: i32) -> Vec<String> {
    (current_year..=current_year + YEAR_SPAN)
        .map(|year| year.to_string())
        .collect()
}

/// Number of days in `month` of `year`, leap years included. Out-of-range months yield 0.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0;
    };
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next.map(|n| n.signed_duration_since(first).num_days() as u32)
        .unwrap_or(31)
}

pub fn day_options(year: i32, month: u32) -> Vec<String> {
    (1..=days_in_month(year, month)).map(pad2).collect()
}

/// Selection state of the five picker controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimePicker {
    hours: Vec<String>,
    minutes: Vec<String>,
    years: Vec<String>,
    months: Vec<String>,
    days: Vec<String>,
    selected: [usize; 5],
}

impl DateTimePicker {
    pub fn new(current_year: i32) -> Self {
        let years = year_options(current_year);
        let days = day_options(current_year, 1);
        Self {
            hours: hour_options(),
            minutes: minute_options(),
            years,
            months: month_options(),
            days,
            selected: [0; 5],
        }
    }

    pub fn options(&self, field: PickerField) -> &[String] {
        match field {
            PickerField::Hours => &self.hours,
            PickerField::Minutes => &self.minutes,
            PickerField::Year => &self.years,
            PickerField::Month => &self.months,
            PickerField::Day => &self.days,
        }
    }

    pub fn value(&self, field: PickerField) -> &str {
        let options = self.options(field);
        let idx = self.selected[index(field)].min(options.len().saturating_sub(1));
        options.get(idx).map(String::as_str).unwrap_or_default()
    }

    /// Select `value` in `field`; returns `false` when it is not among the options.
    pub fn select(&mut self, field: PickerField, value: &str) -> bool {
        let Some(pos) = self.options(field).iter().position(|o| o == value) else {
            return false;
        };
        self.selected[index(field)] = pos;
        if matches!(field, PickerField::Year | PickerField::Month) {
            self.update_days();
        }
        true
    }

    pub fn set_year(&mut self, year: i32) -> bool {
        self.select(PickerField::Year, &year.to_string())
    }

    pub fn set_month(&mut self, month: u32) -> bool {
        self.select(PickerField::Month, &pad2(month))
    }

    /// Step the selection of `field` by `delta`, wrapping around its options.
    pub fn cycle(&mut self, field: PickerField, delta: isize) {
        let len = self.options(field).len();
        if len == 0 {
            return;
        }
        let current = self.selected[index(field)] as isize;
        let next = (current + delta).rem_euclid(len as isize) as usize;
        self.selected[index(field)] = next;
        if matches!(field, PickerField::Year | PickerField::Month) {
            self.update_days();
        }
    }

    pub fn selection(&self) -> TaskTime {
        TaskTime {
            hours: self.value(PickerField::Hours).to_string(),
            minutes: self.value(PickerField::Minutes).to_string(),
            year: self.value(PickerField::Year).to_string(),
            month: self.value(PickerField::Month).to_string(),
            day: self.value(PickerField::Day).to_string(),
        }
    }

    /// Back to 00:00 on the 1st of January of `current_year`.
    pub fn reset(&mut self, current_year: i32) {
        *self = Self::new(current_year);
    }

    fn update_days(&mut self) {
        let year = self.value(PickerField::Year).parse::<i32>().unwrap_or(1970);
        let month = self.value(PickerField::Month).parse::<u32>().unwrap_or(1);
        self.days = day_options(year, month);
        let day_idx = index(PickerField::Day);
        self.selected[day_idx] = self.selected[day_idx].min(self.days.len().saturating_sub(1));
    }
}

fn index(field: PickerField) -> usize {
    match field {
        PickerField::Hours => 0,
        PickerField::Minutes => 1,
        PickerField::Year => 2,
        PickerField::Month => 3,
        PickerField::Day => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(2024, 2, 29)]
    #[case(2023, 2, 28)]
    #[case(1900, 2, 28)]
    #[case(2000, 2, 29)]
    #[case(2023, 4, 30)]
    #[case(2023, 1, 31)]
    #[case(2023, 12, 31)]
    fn days_in_month_accounts_for_leap_years(
        #[case] year: i32,
        #[case] month: u32,
        #[case] expected: u32,
    ) {
        assert_eq!(days_in_month(year, month), expected);
        assert_eq!(day_options(year, month).len() as u32, expected);
    }

    #[test]
    fn options_are_padded_and_bounded() {
        let hours = hour_options();
        assert_eq!(hours.len(), 24);
        assert_eq!(hours.first().map(String::as_str), Some("00"));
        assert_eq!(hours.last().map(String::as_str), Some("23"));

        let minutes = minute_options();
        assert_eq!(minutes.len(), 60);
        assert_eq!(minutes.last().map(String::as_str), Some("59"));

        assert_eq!(month_options().first().map(String::as_str), Some("01"));

        let years = year_options(2026);
        assert_eq!(years.len(), 11);
        assert_eq!(years.first().map(String::as_str), Some("2026"));
        assert_eq!(years.last().map(String::as_str), Some("2036"));

        let days = day_options(2024, 2);
        assert_eq!(days.first().map(String::as_str), Some("01"));
        assert_eq!(days.last().map(String::as_str), Some("29"));
    }

    #[test]
    fn new_picker_starts_at_defaults() {
        let picker = DateTimePicker::new(2026);
        assert_eq!(picker.selection(), TaskTime::new(2026, 1, 1, 0, 0));
        assert_eq!(picker.options(PickerField::Day).len(), 31);
    }

    #[test]
    fn switching_month_recomputes_and_clamps_day() {
        let mut picker = DateTimePicker::new(2024);
        assert!(picker.select(PickerField::Day, "31"));
        assert!(picker.set_month(2));

        assert_eq!(picker.options(PickerField::Day).len(), 29);
        assert_eq!(picker.value(PickerField::Day), "29");

        assert!(picker.set_year(2025));
        assert_eq!(picker.options(PickerField::Day).len(), 28);
        assert_eq!(picker.value(PickerField::Day), "28");
    }

    #[test]
    fn cycle_wraps_in_both_directions() {
        let mut picker = DateTimePicker::new(2026);
        picker.cycle(PickerField::Hours, -1);
        assert_eq!(picker.value(PickerField::Hours), "23");
        picker.cycle(PickerField::Hours, 1);
        assert_eq!(picker.value(PickerField::Hours), "00");

        picker.cycle(PickerField::Month, 3);
        assert_eq!(picker.value(PickerField::Month), "04");
        assert_eq!(picker.options(PickerField::Day).len(), 30);
    }

    #[test]
    fn select_rejects_unknown_values() {
        let mut picker = DateTimePicker::new(2026);
        assert!(!picker.select(PickerField::Year, "1999"));
        assert!(!picker.select(PickerField::Minutes, "60"));
        assert_eq!(picker.value(PickerField::Year), "2026");
    }

    #[test]
    fn reset_restores_defaults() {
        let mut picker = DateTimePicker::new(2026);
        picker.select(PickerField::Hours, "17");
        picker.select(PickerField::Month, "09");
        picker.select(PickerField::Day, "12");

        picker.reset(2027);
        assert_eq!(picker.selection(), TaskTime::new(2027, 1, 1, 0, 0));
    }
}
