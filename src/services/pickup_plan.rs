use chrono::{Duration, NaiveDateTime, NaiveTime};

use crate::error::AppError;

/// Slack between the planned arrival and the hard deadline.
const SAFETY_BUFFER_MINUTES: i64 = 5;

/// Parse 12-hour clock input such as "9:15 AM".
pub fn parse_clock(input: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(input.trim(), "%I:%M %p").map_err(|_| {
        AppError::Validation(format!(
            "could not parse \"{}\" as a 12-hour clock time (expected e.g. \"9:15 AM\")",
            input
        ))
    })
}

/// When the driver should leave: the arrival deadline minus the route
/// duration minus a fixed safety buffer.
///
/// A departure that would land on the previous day is refused rather than
/// silently wrapped past midnight; an overnight pickup run is a planning
/// mistake the caller has to see.
pub fn suggested_departure(
    arrive_by: NaiveTime,
    total_duration_secs: u32,
) -> Result<NaiveTime, AppError> {
    let lead = Duration::seconds(i64::from(total_duration_secs))
        + Duration::minutes(SAFETY_BUFFER_MINUTES);

    let since_midnight = arrive_by.signed_duration_since(NaiveTime::MIN);
    if lead > since_midnight {
        return Err(AppError::Validation(format!(
            "a {} minute route before an {} arrival would depart before midnight",
            lead.num_minutes(),
            arrive_by.format("%-I:%M %p")
        )));
    }

    Ok(arrive_by - lead)
}

/// One estimated arrival per stop, in visiting order, ending at the
/// destination: a prefix sum of leg durations over the departure instant.
/// Pure, so it can be re-derived from a stored plan at any time.
pub fn stop_etas(departure: NaiveDateTime, leg_duration_secs: &[u32]) -> Vec<NaiveDateTime> {
    leg_duration_secs
        .iter()
        .scan(departure, |at, leg| {
            *at += Duration::seconds(i64::from(*leg));
            Some(*at)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
    }

    #[test]
    fn parses_morning_and_afternoon_clock_input() {
        assert_eq!(parse_clock("9:15 AM").expect("parses"), time(9, 15));
        assert_eq!(parse_clock("12:00 PM").expect("parses"), time(12, 0));
        assert_eq!(parse_clock("12:30 AM").expect("parses"), time(0, 30));
        assert_eq!(parse_clock(" 5:30 PM ").expect("parses"), time(17, 30));
    }

    #[test]
    fn rejects_unparseable_clock_input() {
        for bad in ["25:00", "9:15", "soonish", ""] {
            let err = parse_clock(bad).expect_err("rejected");
            assert!(matches!(err, AppError::Validation(_)), "{bad}");
        }
    }

    #[test]
    fn departure_is_duration_plus_buffer_before_deadline() {
        // 20 minute route + 5 minute buffer before a 9:15 AM deadline.
        let departure = suggested_departure(time(9, 15), 1200).expect("fits in the morning");
        assert_eq!(departure, time(8, 50));
    }

    #[test]
    fn departure_crossing_midnight_is_rejected() {
        let err = suggested_departure(time(0, 10), 1200).expect_err("would wrap");
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn etas_are_prefix_sums_of_the_legs() {
        let departure = NaiveDate::from_ymd_opt(2025, 1, 15)
            .expect("valid date")
            .and_time(time(8, 50));

        let etas = stop_etas(departure, &[300, 420, 480]);

        assert_eq!(
            etas,
            vec![
                departure + Duration::seconds(300),
                departure + Duration::seconds(720),
                departure + Duration::seconds(1200),
            ]
        );
    }

    #[test]
    fn etas_re_derive_identically_from_the_same_plan() {
        let departure = NaiveDate::from_ymd_opt(2025, 1, 15)
            .expect("valid date")
            .and_time(time(8, 50));
        let legs = [180, 240, 600, 300];

        assert_eq!(stop_etas(departure, &legs), stop_etas(departure, &legs));
    }
}
