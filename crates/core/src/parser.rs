use anyhow::{anyhow, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::TaskTime;

static RELATIVE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+(\d+)([mhd])$").expect("valid regex"));

/// Resolve a `--at` specification against `now` (local wall time).
///
/// Accepts `YYYY-MM-DD HH:MM`, `YYYY-MM-DDTHH:MM`, `HH:MM` (today) and relative
/// offsets `+Nm`, `+Nh`, `+Nd`. Relative results keep minute precision.
pub fn parse_when(when: &str, now: NaiveDateTime) -> Result<TaskTime> {
    let trimmed = when.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("Time specification cannot be empty"));
    }

    if let Some(caps) = RELATIVE_RE.captures(&trimmed.to_ascii_lowercase()) {
        let value: i64 = caps[1]
            .parse()
            .map_err(|_| anyhow!("Relative offset '{}' is out of range", trimmed))?;
        let offset = match &caps[2] {
            "m" => Duration::try_minutes(value),
            "h" => Duration::try_hours(value),
            _ => Duration::try_days(value),
        };
        let target = offset
            .and_then(|offset| now.checked_add_signed(offset))
            .ok_or_else(|| anyhow!("Relative offset '{}' is out of range", trimmed))?;
        return Ok(TaskTime::from_naive(target));
    }

    for format in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(TaskTime::from_naive(parsed));
        }
    }

    if let Ok(time) = NaiveTime::parse_from_str(trimmed, "%H:%M") {
        return Ok(TaskTime::from_naive(now.date().and_time(time)));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Err(anyhow!(
            "'{}' has no time of day. Try '{} 09:00'",
            trimmed,
            date.format("%Y-%m-%d")
        ));
    }

    Err(anyhow!(
        "Unrecognized time specification '{}'. Try 'YYYY-MM-DD HH:MM', 'HH:MM', +30m, +2h, +1d",
        when
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2030, 12, 31)
            .and_then(|d| d.and_hms_opt(23, 10, 42))
            .expect("valid moment")
    }

    #[rstest]
    #[case("+5m", TaskTime::new(2030, 12, 31, 23, 15))]
    #[case("+2H", TaskTime::new(2031, 1, 1, 1, 10))]
    #[case("+1d", TaskTime::new(2031, 1, 1, 23, 10))]
    #[case("2031-06-01 07:45", TaskTime::new(2031, 6, 1, 7, 45))]
    #[case("2031-06-01T07:45", TaskTime::new(2031, 6, 1, 7, 45))]
    #[case(" 23:50 ", TaskTime::new(2030, 12, 31, 23, 50))]
    fn parses_supported_forms(#[case] when: &str, #[case] expected: TaskTime) {
        assert_eq!(parse_when(when, now()).expect("parse"), expected);
    }

    #[test]
    fn date_without_time_explains_itself() {
        let err = parse_when("2031-06-01", now()).expect_err("needs time");
        assert!(err.to_string().contains("no time of day"));
    }

    #[rstest]
    #[case("+1000000000000000m")]
    #[case("+999999999999d")]
    #[case("+99999999999999999999h")]
    fn rejects_out_of_range_offset(#[case] when: &str) {
        let err = parse_when(when, now()).expect_err("out of range");
        assert_eq!(
            err.to_string(),
            format!("Relative offset '{}' is out of range", when)
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_when("", now()).is_err());
        assert!(parse_when("tomorrow-ish", now()).is_err());
        assert!(parse_when("+5y", now()).is_err());
    }
}
