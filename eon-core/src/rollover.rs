//! Field-level rollover arithmetic
//!
//! Out-of-range field values are never rejected here. Excess months carry
//! into years; excess days, hours, minutes and seconds move along the
//! timeline, which is the same as carrying them through the unit chain one
//! step at a time.

use crate::calendar::CalendarModel;
use crate::convert::{days_from_date, CalendarFields};
use crate::number::{floor_div_rem, Decimal};
use crate::DateTimeError;
use dashu_int::IBig;

/// Elapsed seconds of possibly out-of-range fields
pub fn normalize(
    model: &dyn CalendarModel,
    year: &IBig,
    month: &IBig,
    day: &IBig,
    hour: &IBig,
    minute: &IBig,
    second: &Decimal,
) -> Decimal {
    let (year, month) = carry_months(model, year, &(month - IBig::ONE));
    let first_of_month = days_from_date(model, &year, month, 1);
    let days = first_of_month + day - IBig::ONE;

    let whole = days * model.seconds_in_day()
        + hour * model.seconds_in_hour()
        + minute * IBig::from(model.seconds_in_minute());
    Decimal::from(whole).add(second)
}

/// Fold a 0-based month offset into (year, 1-based month)
fn carry_months(model: &dyn CalendarModel, year: &IBig, month_offset: &IBig) -> (IBig, u32) {
    let (years, month) = floor_div_rem(month_offset, &IBig::from(model.months_in_year()));
    // month is in [0, months_in_year)
    (year + years, u32::try_from(month).unwrap_or_default() + 1)
}

/// Shift by whole months, clamping the day to the target month
///
/// The time of day is preserved.
pub fn add_months(model: &dyn CalendarModel, fields: &CalendarFields, months: &IBig) -> CalendarFields {
    let offset = IBig::from(fields.month) - IBig::ONE + months;
    let (year, month) = carry_months(model, &fields.year, &offset);
    let day = fields.day.min(model.days_in_month(month, &year));
    CalendarFields {
        year,
        month,
        day,
        hour: fields.hour,
        minute: fields.minute,
        second: fields.second.clone(),
    }
}

/// Shift by whole years, as `months_in_year` months each
pub fn add_years(model: &dyn CalendarModel, fields: &CalendarFields, years: &IBig) -> CalendarFields {
    add_months(model, fields, &(years * IBig::from(model.months_in_year())))
}

/// Check that every field is already canonical
pub fn validate(model: &dyn CalendarModel, fields: &CalendarFields) -> Result<(), DateTimeError> {
    let months = model.months_in_year();
    if fields.month < 1 || fields.month > months {
        return Err(DateTimeError::range("month", fields.month, format!("1-{}", months)));
    }
    let days = model.days_in_month(fields.month, &fields.year);
    if fields.day < 1 || fields.day > days {
        return Err(DateTimeError::range(
            "day",
            fields.day,
            format!("1-{} for {}/{}", days, fields.year, fields.month),
        ));
    }
    if fields.hour >= model.hours_in_day() {
        return Err(DateTimeError::range("hour", fields.hour, format!("0-{}", model.hours_in_day() - 1)));
    }
    if fields.minute >= model.minutes_in_hour() {
        return Err(DateTimeError::range("minute", fields.minute, format!("0-{}", model.minutes_in_hour() - 1)));
    }
    if fields.second.is_negative() || fields.second >= Decimal::from(model.seconds_in_minute()) {
        return Err(DateTimeError::range(
            "second",
            &fields.second,
            format!("[0, {})", model.seconds_in_minute()),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::earth;
    use crate::convert::{to_fields, to_scalar};

    fn norm(y: i64, mo: i64, d: i64, h: i64, mi: i64, s: &str) -> CalendarFields {
        let model = earth();
        let seconds = normalize(
            model.as_ref(),
            &IBig::from(y),
            &IBig::from(mo),
            &IBig::from(d),
            &IBig::from(h),
            &IBig::from(mi),
            &s.parse().unwrap(),
        );
        to_fields(model.as_ref(), &seconds)
    }

    #[test]
    fn test_in_range_is_identity() {
        assert_eq!(norm(2023, 5, 17, 8, 30, "12.5"), CalendarFields::new(2023, 5, 17, 8, 30, Decimal::from_parts(IBig::from(125), 1)));
    }

    #[test]
    fn test_month_overflow() {
        assert_eq!(norm(2023, 13, 1, 0, 0, "0"), CalendarFields::date(2024, 1, 1));
        assert_eq!(norm(2023, 0, 1, 0, 0, "0"), CalendarFields::date(2022, 12, 1));
        assert_eq!(norm(2023, -11, 5, 0, 0, "0"), CalendarFields::date(2022, 1, 5));
    }

    #[test]
    fn test_day_overflow() {
        assert_eq!(norm(2023, 1, 32, 0, 0, "0"), CalendarFields::date(2023, 2, 1));
        assert_eq!(norm(2024, 2, 30, 0, 0, "0"), CalendarFields::date(2024, 3, 1));
        assert_eq!(norm(2023, 3, 0, 0, 0, "0"), CalendarFields::date(2023, 2, 28));
        assert_eq!(norm(2023, 1, 366, 0, 0, "0"), CalendarFields::date(2024, 1, 1));
    }

    #[test]
    fn test_time_overflow() {
        assert_eq!(norm(2023, 12, 31, 23, 59, "60"), CalendarFields::date(2024, 1, 1));
        assert_eq!(norm(2023, 1, 1, 0, 0, "-1"), CalendarFields::new(2022, 12, 31, 23, 59, 59));
        assert_eq!(norm(2023, 1, 1, 25, 61, "0"), CalendarFields::new(2023, 1, 2, 2, 1, 0));
        assert_eq!(norm(2023, 1, 1, -1, 0, "0"), CalendarFields::new(2022, 12, 31, 23, 0, 0));
    }

    #[test]
    fn test_add_months_clamps() {
        let model = earth();
        let leap_day = CalendarFields::new(2024, 2, 29, 10, 15, 0);
        let next = add_months(model.as_ref(), &leap_day, &IBig::from(12));
        assert_eq!(next, CalendarFields::new(2025, 2, 28, 10, 15, 0));

        let end_of_jan = CalendarFields::date(2023, 1, 31);
        assert_eq!(add_months(model.as_ref(), &end_of_jan, &IBig::ONE), CalendarFields::date(2023, 2, 28));
        let end_of_jan = CalendarFields::date(2024, 1, 31);
        assert_eq!(add_months(model.as_ref(), &end_of_jan, &IBig::ONE), CalendarFields::date(2024, 2, 29));
        assert_eq!(add_months(model.as_ref(), &end_of_jan, &IBig::from(-2)), CalendarFields::date(2023, 11, 30));
    }

    #[test]
    fn test_add_years() {
        let model = earth();
        let leap_day = CalendarFields::date(2024, 2, 29);
        assert_eq!(add_years(model.as_ref(), &leap_day, &IBig::from(4)), CalendarFields::date(2028, 2, 29));
        assert_eq!(add_years(model.as_ref(), &leap_day, &IBig::from(-1)), CalendarFields::date(2023, 2, 28));
    }

    #[test]
    fn test_add_months_round_trips_through_scalar() {
        let model = earth();
        let fields = add_months(model.as_ref(), &CalendarFields::new(1999, 12, 31, 23, 59, 59), &IBig::from(2));
        assert_eq!(to_fields(model.as_ref(), &to_scalar(model.as_ref(), &fields)), fields);
        assert_eq!(fields, CalendarFields::new(2000, 2, 29, 23, 59, 59));
    }

    #[test]
    fn test_validate() {
        let model = earth();
        assert!(validate(model.as_ref(), &CalendarFields::date(2024, 2, 29)).is_ok());
        assert!(validate(model.as_ref(), &CalendarFields::date(2023, 2, 29)).is_err());
        assert!(validate(model.as_ref(), &CalendarFields::date(2023, 13, 1)).is_err());
        assert!(validate(model.as_ref(), &CalendarFields::new(2023, 1, 1, 24, 0, 0)).is_err());
        assert!(validate(model.as_ref(), &CalendarFields::new(2023, 1, 1, 0, 60, 0)).is_err());
        let err = validate(model.as_ref(), &CalendarFields::new(2023, 1, 1, 0, 0, 60)).unwrap_err();
        assert!(matches!(err, DateTimeError::Range { field: "second", .. }));
    }
}
