//! Scalar seconds <-> calendar fields
//!
//! `to_fields` splits elapsed seconds into whole days and a time of day,
//! resolves the day count to a date (through the model's constant-time path
//! when it has one, otherwise through `general_date`), and divides the time
//! of day into hour, minute and second. `to_scalar` is its inverse.

use crate::calendar::CalendarModel;
use crate::number::{floor_div_rem, Decimal};
use dashu_int::IBig;
use serde::{Deserialize, Serialize};

/// Broken-down calendar fields
///
/// In canonical form `month` is in `[1, months_in_year]`, `day` in
/// `[1, days_in_month]`, `hour`, `minute` below their unit sizes and
/// `second` in `[0, seconds_in_minute)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarFields {
    #[serde(with = "ibig_string")]
    pub year: IBig,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: Decimal,
}

impl CalendarFields {
    pub fn new(year: impl Into<IBig>, month: u32, day: u32, hour: u32, minute: u32, second: impl Into<Decimal>) -> Self {
        Self {
            year: year.into(),
            month,
            day,
            hour,
            minute,
            second: second.into(),
        }
    }

    /// Midnight on the given date
    pub fn date(year: impl Into<IBig>, month: u32, day: u32) -> Self {
        Self::new(year, month, day, 0, 0, Decimal::ZERO)
    }
}

mod ibig_string {
    use dashu_int::IBig;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &IBig, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<IBig, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Scalar -> fields
// ============================================================================

/// Whole days since the epoch and the seconds into that day
pub fn split_days(model: &dyn CalendarModel, seconds: &Decimal) -> (IBig, Decimal) {
    seconds.div_rem_floor(&model.seconds_in_day())
}

/// Resolve an instant to calendar fields
pub fn to_fields(model: &dyn CalendarModel, seconds: &Decimal) -> CalendarFields {
    let (days, time_of_day) = split_days(model, seconds);
    let (year, month, day) = model
        .civil_from_days(&days)
        .unwrap_or_else(|| general_date(model, &days));

    let (hour, rest) = time_of_day.div_rem_floor(&model.seconds_in_hour());
    let (minute, second) = rest.div_rem_floor(&IBig::from(model.seconds_in_minute()));

    CalendarFields {
        year,
        month,
        day,
        // Bounded by hours_in_day and minutes_in_hour
        hour: u32::try_from(hour).unwrap_or_default(),
        minute: u32::try_from(minute).unwrap_or_default(),
        second,
    }
}

/// Day count to (year, month, day) for any calendar model
///
/// Locates the year by stepping whole multiples of the longest year length:
/// a step never passes the target, and the remaining distance shrinks by the
/// ratio of leap-year excess to year length every round, so the search takes
/// O(log |year|) evaluations of the closed-form leap count.
pub fn general_date(model: &dyn CalendarModel, days: &IBig) -> (IBig, u32, u32) {
    let leap_len = IBig::from(model.days_in_leap_year());
    let mut year = floor_div_rem(days, &IBig::from(model.days_in_common_year())).0;
    let mut steps = 0u32;

    let (year, mut remaining) = loop {
        steps += 1;
        let start = model.days_before_year(&year);
        if *days < start {
            // Ceiling of the deficit in longest-year units, at least one year
            let deficit = &start - days;
            let back = floor_div_rem(&(deficit + &leap_len - IBig::ONE), &leap_len).0;
            year -= back;
            continue;
        }
        let excess = days - &start;
        let year_len = model.days_in_year(&year);
        match u32::try_from(excess.clone()) {
            Ok(offset) if offset < year_len => break (year, offset),
            _ => {
                let forward = floor_div_rem(&excess, &leap_len).0.max(IBig::ONE);
                year += forward;
            }
        }
    };
    tracing::trace!(steps, year = %year, "general year search converged");

    let mut month = 1;
    loop {
        let len = model.days_in_month(month, &year);
        if remaining < len || month >= model.months_in_year() {
            return (year, month, remaining + 1);
        }
        remaining -= len;
        month += 1;
    }
}

// ============================================================================
// Fields -> scalar
// ============================================================================

/// Day count of a canonical date
pub fn days_from_date(model: &dyn CalendarModel, year: &IBig, month: u32, day: u32) -> IBig {
    model.days_from_civil(year, month, day).unwrap_or_else(|| {
        model.days_before_year(year) + IBig::from(model.day_of_year(year, month, day) - 1)
    })
}

/// Elapsed seconds of canonical fields
pub fn to_scalar(model: &dyn CalendarModel, fields: &CalendarFields) -> Decimal {
    let days = days_from_date(model, &fields.year, fields.month, fields.day);
    let whole = days * model.seconds_in_day()
        + IBig::from(fields.hour) * model.seconds_in_hour()
        + IBig::from(fields.minute) * IBig::from(model.seconds_in_minute());
    Decimal::from(whole).add(&fields.second)
}

/// Weekday of a day count, 0 = first day of the week
pub fn weekday(model: &dyn CalendarModel, days: &IBig) -> u32 {
    let shifted = days + IBig::from(model.epoch_weekday());
    let (_, day) = floor_div_rem(&shifted, &IBig::from(model.days_in_week()));
    u32::try_from(day).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{earth, Calendar, LeapRule};
    use crate::gregorian;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_to_fields_epoch() {
        let fields = to_fields(earth().as_ref(), &Decimal::ZERO);
        assert_eq!(fields, CalendarFields::date(0, 1, 1));
    }

    #[test]
    fn test_to_fields_negative_second() {
        let fields = to_fields(earth().as_ref(), &dec("-0.25"));
        assert_eq!(fields, CalendarFields::new(-1, 12, 31, 23, 59, dec("59.75")));
    }

    #[test]
    fn test_round_trip_fields() {
        let model = earth();
        let samples = [
            CalendarFields::new(2024, 2, 29, 13, 45, dec("7.125")),
            CalendarFields::new(1, 1, 1, 0, 0, 0),
            CalendarFields::new(-1, 12, 31, 23, 59, dec("59.999")),
            CalendarFields::new(60000, 12, 30, 6, 0, 0),
            CalendarFields::new(-4713, 11, 24, 12, 0, 0),
        ];
        for fields in samples {
            let seconds = to_scalar(model.as_ref(), &fields);
            assert_eq!(to_fields(model.as_ref(), &seconds), fields);
        }
    }

    #[test]
    fn test_general_matches_fast_path() {
        let model = earth();
        let big: IBig = "365242500000000000000000000000000".parse().unwrap();
        let mut days: Vec<IBig> = (-3000i64..3000).map(IBig::from).collect();
        days.extend([
            IBig::from(146_097),
            IBig::from(-146_098),
            IBig::from(719_528),
            IBig::from(365_242_199i64),
            IBig::from(-365_242_199i64),
            big.clone(),
            -big,
        ]);
        for d in days {
            assert_eq!(
                general_date(model.as_ref(), &d),
                gregorian::civil_from_days(&d),
                "day {}",
                d
            );
        }
    }

    #[test]
    fn test_general_to_scalar_matches_fast_path() {
        let copy = Calendar::builder("Gregorian copy").build().unwrap();
        let model = earth();
        for (y, m, d) in [(2024, 8, 11), (0, 2, 29), (-1, 1, 1), (1_000_000, 12, 31)] {
            let year = IBig::from(y);
            assert_eq!(
                days_from_date(&copy, &year, m, d),
                days_from_date(model.as_ref(), &year, m, d)
            );
        }
    }

    #[test]
    fn test_seconds_since_common_era_start() {
        // 0001-01-01 to 2024-08-11 01:34:00, as counted by chrono
        let model = earth();
        let start = to_scalar(model.as_ref(), &CalendarFields::date(1, 1, 1));
        let end = to_scalar(model.as_ref(), &CalendarFields::new(2024, 8, 11, 1, 34, 0));
        let native = chrono::NaiveDate::from_ymd_opt(2024, 8, 11)
            .unwrap()
            .and_hms_opt(1, 34, 0)
            .unwrap()
            .signed_duration_since(chrono::NaiveDate::from_ymd_opt(1, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap())
            .num_seconds();
        assert_eq!(end.sub(&start), Decimal::from(native));
    }

    #[test]
    fn test_weekday() {
        let model = earth();
        let thursday = days_from_date(model.as_ref(), &IBig::from(2023), 2, 2);
        assert_eq!(weekday(model.as_ref(), &thursday), 4);
        assert_eq!(weekday(model.as_ref(), &(thursday + IBig::ONE)), 5);
        assert_eq!(weekday(model.as_ref(), &IBig::from(-1)), 5);
    }

    #[test]
    fn test_custom_calendar_round_trip() {
        let cal = Calendar::builder("Decimal")
            .with_time_units(100, 100, 10)
            .with_months([36, 36, 36, 36, 36, 36, 36, 36, 36, 36, 5])
            .with_leap_month(11, 1)
            .with_leap_rules([LeapRule::new(4, true), LeapRule::new(128, false)])
            .with_week(10, 0)
            .build()
            .unwrap();
        for fields in [
            CalendarFields::new(0, 1, 1, 0, 0, 0),
            CalendarFields::new(4, 11, 6, 9, 99, dec("99.5")),
            CalendarFields::new(-129, 3, 17, 4, 5, 6),
            CalendarFields::new(123_456_789, 10, 36, 0, 1, 2),
        ] {
            let seconds = to_scalar(&cal, &fields);
            assert_eq!(to_fields(&cal, &seconds), fields);
        }
    }

    #[test]
    fn test_fields_serde() {
        let fields = CalendarFields::new(-44, 3, 15, 11, 0, dec("30.5"));
        let json = serde_json::to_string(&fields).unwrap();
        assert!(json.contains("\"year\":\"-44\""));
        let back: CalendarFields = serde_json::from_str(&json).unwrap();
        assert_eq!(back, fields);
    }
}
