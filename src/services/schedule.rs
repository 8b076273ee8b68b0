use chrono::{Datelike, Days, NaiveDate};

use crate::error::AppError;

/// Expand an event definition into its concrete occurrence dates.
///
/// Without a target weekday the event is a one-off on `start`. With one,
/// walk forward from `start` (inclusive) to the first date falling on that
/// weekday, then every seventh day up to and including `end`. Weekdays are
/// numbered 0 = Sunday .. 6 = Saturday.
pub fn expand_dates(
    start: NaiveDate,
    target_weekday: Option<u8>,
    end: Option<NaiveDate>,
) -> Result<Vec<NaiveDate>, AppError> {
    let Some(weekday) = target_weekday else {
        return Ok(vec![start]);
    };

    if weekday > 6 {
        return Err(AppError::Validation(format!(
            "weekday must be 0 (Sunday) through 6 (Saturday), got {}",
            weekday
        )));
    }
    let Some(end) = end else {
        return Err(AppError::Validation(
            "a recurring event needs an end date".to_string(),
        ));
    };
    if end < start {
        return Err(AppError::Validation(
            "recurrence end date is before the start date".to_string(),
        ));
    }

    let mut first = start;
    while first.weekday().num_days_from_sunday() != u32::from(weekday) {
        first = first
            .checked_add_days(Days::new(1))
            .ok_or_else(|| AppError::Validation("date out of range".to_string()))?;
    }

    let mut dates = Vec::new();
    let mut current = first;
    while current <= end {
        dates.push(current);
        current = match current.checked_add_days(Days::new(7)) {
            Some(next) => next,
            None => break,
        };
    }

    if dates.is_empty() {
        return Err(AppError::Validation(format!(
            "no {} falls between {} and {}",
            weekday_name(weekday),
            start,
            end
        )));
    }

    Ok(dates)
}

fn weekday_name(weekday: u8) -> &'static str {
    match weekday {
        0 => "Sunday",
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        _ => "Saturday",
    }
}
