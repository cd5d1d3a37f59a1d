//! Host clock and chrono interop
//!
//! chrono counts years astronomically (year 0 exists and is a leap year),
//! the same as the default calendar, so fields map across one to one.
//! Going to chrono can fail: its year range is limited and it stops at
//! nanoseconds, so finer digits are truncated.

use crate::datetime::EonDateTime;
use crate::number::Decimal;
use crate::offset::EonDateTimeOffset;
use crate::DateTimeError;
use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use dashu_int::IBig;

/// Source of the current time
pub trait HostClock: Send + Sync {
    fn now_utc(&self) -> NaiveDateTime;
    /// Local offset from UTC in seconds
    fn local_offset_seconds(&self) -> i32;
}

/// The operating system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl HostClock for SystemClock {
    fn now_utc(&self) -> NaiveDateTime {
        Utc::now().naive_utc()
    }

    fn local_offset_seconds(&self) -> i32 {
        Local::now().offset().local_minus_utc()
    }
}

const SECONDS_PER_HOUR: i32 = 3600;

fn overflow(what: impl Into<String>) -> DateTimeError {
    let err = DateTimeError::ConversionOverflow(what.into());
    tracing::debug!(error = %err, "native conversion failed");
    err
}

fn offset_hours(seconds: i32) -> Decimal {
    Decimal::from(seconds)
        .checked_div(&Decimal::from(SECONDS_PER_HOUR), crate::number::DEFAULT_PRECISION)
        .unwrap_or(Decimal::ZERO)
}

impl EonDateTime {
    /// Field-wise conversion from chrono under the default calendar
    pub fn from_native(native: &NaiveDateTime) -> Self {
        let second = Decimal::from(native.second())
            .add(&Decimal::from_parts(IBig::from(native.nanosecond()), 9));
        Self::from_ymd_hms(
            native.year(),
            native.month(),
            native.day(),
            native.hour(),
            native.minute(),
            second,
        )
    }

    /// Field-wise conversion to chrono; sub-nanosecond digits are truncated
    pub fn to_native(&self) -> Result<NaiveDateTime, DateTimeError> {
        if !self.calendar().is_gregorian() {
            return Err(overflow(format!(
                "calendar '{}' has no native representation",
                self.calendar().name()
            )));
        }
        let year = i32::try_from(self.year().clone())
            .map_err(|_| overflow(format!("year {} outside native range", self.year())))?;
        let date = NaiveDate::from_ymd_opt(year, self.month(), self.day())
            .ok_or_else(|| overflow(format!("year {} outside native range", year)))?;

        let whole = u32::try_from(self.second().floor()).unwrap_or_default();
        let nanos: u32 = self.second().fraction_digits(9).parse().unwrap_or_default();
        date.and_hms_nano_opt(self.hour(), self.minute(), whole, nanos)
            .ok_or_else(|| overflow(format!("time {} outside native range", self)))
    }

    /// Like [`EonDateTime::to_native`], but `None` instead of an error
    pub fn try_to_native(&self) -> Option<NaiveDateTime> {
        self.to_native().ok()
    }

    /// Current UTC time
    pub fn now_utc() -> Self {
        Self::now_utc_with(&SystemClock)
    }

    pub fn now_utc_with(clock: &dyn HostClock) -> Self {
        Self::from_native(&clock.now_utc())
    }
}

impl EonDateTimeOffset {
    /// Base is the UTC instant, offset is the native offset in hours
    pub fn from_native(native: &DateTime<FixedOffset>) -> Self {
        let base = EonDateTime::from_native(&native.naive_utc());
        Self::new(base, offset_hours(native.offset().local_minus_utc()))
    }

    /// Offset is rounded to whole seconds
    pub fn to_native(&self) -> Result<DateTime<FixedOffset>, DateTimeError> {
        let base = self.base().to_native()?;
        let seconds = self.offset_hours().mul_int(&IBig::from(SECONDS_PER_HOUR)).round();
        let offset = i32::try_from(seconds)
            .ok()
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| overflow(format!("offset {} hours outside native range", self.offset_hours())))?;
        Ok(offset.from_utc_datetime(&base))
    }

    pub fn try_to_native(&self) -> Option<DateTime<FixedOffset>> {
        self.to_native().ok()
    }

    /// Current time at `offset_hours` from UTC
    pub fn now(offset_hours: impl Into<Decimal>) -> Self {
        Self::now_with(&SystemClock, offset_hours)
    }

    /// Current time at the host's local offset
    pub fn now_local() -> Self {
        Self::now_local_with(&SystemClock)
    }

    pub fn now_with(clock: &dyn HostClock, offset_hours: impl Into<Decimal>) -> Self {
        Self::new(EonDateTime::now_utc_with(clock), offset_hours)
    }

    pub fn now_local_with(clock: &dyn HostClock) -> Self {
        Self::now_with(clock, offset_hours(clock.local_offset_seconds()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Calendar;
    use std::sync::Arc;

    struct FixedClock {
        now: NaiveDateTime,
        offset: i32,
    }

    impl HostClock for FixedClock {
        fn now_utc(&self) -> NaiveDateTime {
            self.now
        }

        fn local_offset_seconds(&self) -> i32 {
            self.offset
        }
    }

    fn native(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, nano: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d).unwrap().and_hms_nano_opt(h, mi, s, nano).unwrap()
    }

    #[test]
    fn test_round_trip_native() {
        for n in [
            native(2024, 8, 11, 1, 34, 0, 0),
            native(1, 1, 1, 0, 0, 0, 0),
            native(0, 2, 29, 23, 59, 59, 999_999_999),
            native(-44, 3, 15, 12, 0, 0, 500),
        ] {
            let dt = EonDateTime::from_native(&n);
            assert_eq!(dt.to_native().unwrap(), n);
        }
    }

    #[test]
    fn test_fields_match_native() {
        let dt = EonDateTime::from_native(&native(2023, 2, 2, 9, 30, 15, 250_000_000));
        assert_eq!(dt.to_string(), "2023/02/02 09:30:15");
        assert_eq!(dt.second(), &"15.25".parse::<Decimal>().unwrap());
        assert_eq!(dt.weekday(), 4);
    }

    #[test]
    fn test_to_native_truncates_sub_nanoseconds() {
        let dt = EonDateTime::from_ymd_hms(2023, 1, 1, 0, 0, "1.0000000019".parse::<Decimal>().unwrap());
        assert_eq!(dt.to_native().unwrap(), native(2023, 1, 1, 0, 0, 1, 1));
    }

    #[test]
    fn test_to_native_overflow() {
        let dt = EonDateTime::from_ymd(1_000_000_000, 1, 1);
        let err = dt.to_native().unwrap_err();
        assert_eq!(err.code(), crate::codes::CONVERSION_OVERFLOW);
        assert!(dt.try_to_native().is_none());
    }

    #[test]
    fn test_custom_calendar_has_no_native_form() {
        let calendar = Arc::new(Calendar::builder("Copy").build().unwrap());
        let dt = EonDateTime::from_fields_in(calendar, 2023, 1, 1, 0, 0, 0);
        assert!(!dt.calendar().is_gregorian());
        let err = dt.to_native().unwrap_err();
        assert_eq!(err.code(), crate::codes::CONVERSION_OVERFLOW);
    }

    #[test]
    fn test_offset_round_trip() {
        let offset = FixedOffset::east_opt(5 * 3600 + 45 * 60).unwrap();
        let n = offset.from_utc_datetime(&native(2023, 6, 1, 12, 0, 0, 0));
        let dt = EonDateTimeOffset::from_native(&n);
        assert_eq!(dt.offset_hours(), &"5.75".parse::<Decimal>().unwrap());
        assert_eq!(dt.to_string(), "2023/06/01 17:45:00 +05:45");
        assert_eq!(dt.to_native().unwrap(), n);
    }

    #[test]
    fn test_clock_injection() {
        let clock = FixedClock { now: native(2030, 1, 1, 23, 30, 0, 0), offset: -3600 };
        assert_eq!(EonDateTime::now_utc_with(&clock), EonDateTime::from_ymd_hms(2030, 1, 1, 23, 30, 0));

        let local = EonDateTimeOffset::now_local_with(&clock);
        assert_eq!(local.offset_hours(), &Decimal::from(-1));
        assert_eq!(local.hour(), 22);

        let tokyo = EonDateTimeOffset::now_with(&clock, 9);
        assert_eq!(tokyo.format("yyyy/MM/dd HH"), "2030/01/02 08");
    }

    #[test]
    fn test_system_clock_is_near_chrono() {
        let before = EonDateTime::from_native(&Utc::now().naive_utc());
        let now = EonDateTime::now_utc();
        assert!(now >= before);
        assert!(now.subtract(&before) < Decimal::from(60));
    }
}
