//! The arbitrary-precision date/time value
//!
//! An `EonDateTime` is one exact decimal count of seconds since the first
//! instant of year 0 of its calendar. Calendar fields are resolved once at
//! construction; every operation returns a new value.

use crate::calendar::{earth, CalendarModel};
use crate::convert::{self, CalendarFields};
use crate::format::{self, DEFAULT_PATTERN, LONG_PATTERN, SHORT_PATTERN};
use crate::number::Decimal;
use crate::parse::{self, ParseOptions};
use crate::rollover;
use crate::DateTimeError;
use dashu_int::IBig;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

// ============================================================================
// EonDateTime
// ============================================================================

/// A point on an unbounded timeline with exact fractional seconds
#[derive(Clone)]
pub struct EonDateTime {
    seconds: Decimal,
    fields: CalendarFields,
    calendar: Arc<dyn CalendarModel>,
}

impl EonDateTime {
    // ========== Construction ==========

    /// Create from seconds since the start of year 0 of the default calendar
    pub fn from_seconds(seconds: impl Into<Decimal>) -> Self {
        Self::from_seconds_in(earth(), seconds)
    }

    /// Create from seconds since the start of year 0 of `calendar`
    pub fn from_seconds_in(calendar: Arc<dyn CalendarModel>, seconds: impl Into<Decimal>) -> Self {
        let seconds = seconds.into();
        let fields = convert::to_fields(calendar.as_ref(), &seconds);
        Self { seconds, fields, calendar }
    }

    /// Create a date (time = 00:00:00); out-of-range fields roll over
    pub fn from_ymd(year: impl Into<IBig>, month: impl Into<IBig>, day: impl Into<IBig>) -> Self {
        Self::from_ymd_hms(year, month, day, 0, 0, 0)
    }

    /// Create a datetime from components; out-of-range fields roll over
    pub fn from_ymd_hms(
        year: impl Into<IBig>,
        month: impl Into<IBig>,
        day: impl Into<IBig>,
        hour: impl Into<IBig>,
        minute: impl Into<IBig>,
        second: impl Into<Decimal>,
    ) -> Self {
        Self::from_fields_in(earth(), year, month, day, hour, minute, second)
    }

    /// Create from components under `calendar`; out-of-range fields roll over
    pub fn from_fields_in(
        calendar: Arc<dyn CalendarModel>,
        year: impl Into<IBig>,
        month: impl Into<IBig>,
        day: impl Into<IBig>,
        hour: impl Into<IBig>,
        minute: impl Into<IBig>,
        second: impl Into<Decimal>,
    ) -> Self {
        let seconds = rollover::normalize(
            calendar.as_ref(),
            &year.into(),
            &month.into(),
            &day.into(),
            &hour.into(),
            &minute.into(),
            &second.into(),
        );
        Self::from_seconds_in(calendar, seconds)
    }

    /// Create from fields that must already be canonical
    pub fn try_new_strict(calendar: Arc<dyn CalendarModel>, fields: CalendarFields) -> Result<Self, DateTimeError> {
        rollover::validate(calendar.as_ref(), &fields)?;
        let seconds = convert::to_scalar(calendar.as_ref(), &fields);
        Ok(Self { seconds, fields, calendar })
    }

    fn with_seconds(&self, seconds: Decimal) -> Self {
        Self::from_seconds_in(self.calendar.clone(), seconds)
    }

    fn with_fields(&self, fields: CalendarFields) -> Self {
        let seconds = convert::to_scalar(self.calendar.as_ref(), &fields);
        Self { seconds, fields, calendar: self.calendar.clone() }
    }

    // ========== Accessors ==========

    /// Seconds since the start of year 0
    pub fn seconds(&self) -> &Decimal {
        &self.seconds
    }

    pub fn calendar(&self) -> &Arc<dyn CalendarModel> {
        &self.calendar
    }

    pub fn fields(&self) -> &CalendarFields {
        &self.fields
    }

    pub fn year(&self) -> &IBig {
        &self.fields.year
    }

    pub fn month(&self) -> u32 {
        self.fields.month
    }

    pub fn day(&self) -> u32 {
        self.fields.day
    }

    pub fn hour(&self) -> u32 {
        self.fields.hour
    }

    pub fn minute(&self) -> u32 {
        self.fields.minute
    }

    /// Seconds within the minute, including the fraction
    pub fn second(&self) -> &Decimal {
        &self.fields.second
    }

    /// Whole days since the start of year 0
    pub fn days(&self) -> IBig {
        convert::split_days(self.calendar.as_ref(), &self.seconds).0
    }

    /// Day of year (1-based)
    pub fn day_of_year(&self) -> u32 {
        self.calendar.day_of_year(&self.fields.year, self.fields.month, self.fields.day)
    }

    /// Day of week (0 = Sunday for the default calendar)
    pub fn weekday(&self) -> u32 {
        convert::weekday(self.calendar.as_ref(), &self.days())
    }

    /// Daytime segment (0 = AM, 1 = PM for the default calendar)
    pub fn daytime_segment(&self) -> u32 {
        self.fields.hour / self.calendar.hours_in_segment()
    }

    pub fn days_in_month(&self) -> u32 {
        self.calendar.days_in_month(self.fields.month, &self.fields.year)
    }

    pub fn is_leap_year(&self) -> bool {
        self.calendar.is_leap_year(&self.fields.year)
    }

    pub fn month_name(&self) -> Option<&str> {
        self.calendar.names().month_name(self.fields.month)
    }

    pub fn abbreviated_month_name(&self) -> Option<&str> {
        self.calendar.names().abbreviated_month_name(self.fields.month)
    }

    pub fn weekday_name(&self) -> Option<&str> {
        self.calendar.names().weekday_name(self.weekday())
    }

    pub fn abbreviated_weekday_name(&self) -> Option<&str> {
        self.calendar.names().abbreviated_weekday_name(self.weekday())
    }

    pub fn daytime_segment_name(&self) -> Option<&str> {
        self.calendar.names().daytime_segment_name(self.daytime_segment())
    }

    // ========== Arithmetic ==========

    pub fn add_seconds(&self, seconds: impl Into<Decimal>) -> Self {
        self.with_seconds(self.seconds.add(&seconds.into()))
    }

    pub fn add_milliseconds(&self, millis: impl Into<Decimal>) -> Self {
        self.add_seconds(millis.into().mul(&Decimal::from_parts(IBig::ONE, 3)))
    }

    pub fn add_microseconds(&self, micros: impl Into<Decimal>) -> Self {
        self.add_seconds(micros.into().mul(&Decimal::from_parts(IBig::ONE, 6)))
    }

    pub fn add_nanoseconds(&self, nanos: impl Into<Decimal>) -> Self {
        self.add_seconds(nanos.into().mul(&Decimal::from_parts(IBig::ONE, 9)))
    }

    pub fn add_minutes(&self, minutes: impl Into<Decimal>) -> Self {
        let unit = Decimal::from(self.calendar.seconds_in_minute());
        self.add_seconds(minutes.into().mul(&unit))
    }

    pub fn add_hours(&self, hours: impl Into<Decimal>) -> Self {
        self.add_seconds(hours.into().mul_int(&self.calendar.seconds_in_hour()))
    }

    pub fn add_days(&self, days: impl Into<Decimal>) -> Self {
        self.add_seconds(days.into().mul_int(&self.calendar.seconds_in_day()))
    }

    /// Add whole months; the day is clamped to the length of the target month
    pub fn add_months(&self, months: impl Into<IBig>) -> Self {
        self.with_fields(rollover::add_months(self.calendar.as_ref(), &self.fields, &months.into()))
    }

    /// Add whole years; Feb 29 becomes Feb 28 in common years
    pub fn add_years(&self, years: impl Into<IBig>) -> Self {
        self.with_fields(rollover::add_years(self.calendar.as_ref(), &self.fields, &years.into()))
    }

    /// Seconds from `other` to `self`
    pub fn subtract(&self, other: &EonDateTime) -> Decimal {
        self.seconds.sub(&other.seconds)
    }

    // ========== Utilities ==========

    /// Start of the day (00:00:00)
    pub fn date(&self) -> Self {
        self.with_fields(CalendarFields::date(self.fields.year.clone(), self.fields.month, self.fields.day))
    }

    /// Seconds elapsed since the start of the day
    pub fn time_of_day(&self) -> Decimal {
        convert::split_days(self.calendar.as_ref(), &self.seconds).1
    }

    /// First day of the month at 00:00:00
    pub fn start_of_month(&self) -> Self {
        self.with_fields(CalendarFields::date(self.fields.year.clone(), self.fields.month, 1))
    }

    /// First day of the year at 00:00:00
    pub fn start_of_year(&self) -> Self {
        self.with_fields(CalendarFields::date(self.fields.year.clone(), 1, 1))
    }

    // ========== Formatting ==========

    /// Render with a pattern such as `"yyyy/MM/dd HH:mm:ss.fff"`
    pub fn format(&self, pattern: &str) -> String {
        format::format(self, &Decimal::ZERO, pattern)
    }

    /// e.g. `"Thursday 2 February 2023 00:00:00"`
    pub fn to_long_string(&self) -> String {
        self.format(LONG_PATTERN)
    }

    /// e.g. `"Thu 2 Feb 2023 00:00:00"`
    pub fn to_short_string(&self) -> String {
        self.format(SHORT_PATTERN)
    }

    // ========== Parsing ==========

    /// Parse `year[/month[/day[ hour[:minute[:second]]]]]` under the default calendar
    pub fn parse(s: &str) -> Result<Self, DateTimeError> {
        Self::parse_with(earth(), s, &ParseOptions::default())
    }

    /// Like [`EonDateTime::parse`], but `None` instead of an error
    pub fn try_parse(s: &str) -> Option<Self> {
        Self::parse(s).ok()
    }

    /// Like [`EonDateTime::parse_with`], but `None` instead of an error
    pub fn try_parse_with(calendar: Arc<dyn CalendarModel>, s: &str, options: &ParseOptions) -> Option<Self> {
        Self::parse_with(calendar, s, options).ok()
    }

    pub fn parse_with(calendar: Arc<dyn CalendarModel>, s: &str, options: &ParseOptions) -> Result<Self, DateTimeError> {
        let parsed = parse::parse_fields(s, &options.defaults)?;
        Ok(Self::from_fields_in(
            calendar,
            parsed.year,
            parsed.month,
            parsed.day,
            parsed.hour,
            parsed.minute,
            parsed.second,
        ))
    }
}

// ========== Trait Implementations ==========

impl fmt::Display for EonDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(DEFAULT_PATTERN))
    }
}

impl fmt::Debug for EonDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EonDateTime")
            .field("seconds", &self.seconds)
            .field("fields", &self.fields)
            .field("calendar", &self.calendar.name())
            .finish()
    }
}

impl PartialEq for EonDateTime {
    fn eq(&self, other: &Self) -> bool {
        self.seconds == other.seconds
    }
}

impl Eq for EonDateTime {}

impl Hash for EonDateTime {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.seconds.hash(state);
    }
}

impl PartialOrd for EonDateTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EonDateTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.seconds.cmp(&other.seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{Calendar, LeapRule};
    use crate::names::NameTable;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_from_ymd_hms() {
        let dt = EonDateTime::from_ymd_hms(2024, 8, 11, 1, 34, dec("5.5"));
        assert_eq!(dt.year(), &IBig::from(2024));
        assert_eq!(dt.month(), 8);
        assert_eq!(dt.day(), 11);
        assert_eq!(dt.hour(), 1);
        assert_eq!(dt.minute(), 34);
        assert_eq!(dt.second(), &dec("5.5"));
    }

    #[test]
    fn test_far_future_fields() {
        let dt = EonDateTime::from_ymd(60000, 12, 30);
        assert_eq!(dt.year(), &IBig::from(60000));
        assert_eq!((dt.month(), dt.day()), (12, 30));
        assert_eq!(EonDateTime::from_seconds(dt.seconds().clone()), dt);
    }

    #[test]
    fn test_rollover_construction() {
        assert_eq!(EonDateTime::from_ymd(2023, 13, 1), EonDateTime::from_ymd(2024, 1, 1));
        assert_eq!(EonDateTime::from_ymd(2023, 2, 29), EonDateTime::from_ymd(2023, 3, 1));
        assert_eq!(
            EonDateTime::from_ymd_hms(2023, 1, 1, 0, 0, -1),
            EonDateTime::from_ymd_hms(2022, 12, 31, 23, 59, 59)
        );
    }

    #[test]
    fn test_try_new_strict() {
        assert!(EonDateTime::try_new_strict(earth(), CalendarFields::date(2024, 2, 29)).is_ok());
        let err = EonDateTime::try_new_strict(earth(), CalendarFields::date(2023, 2, 29)).unwrap_err();
        assert_eq!(err.code(), crate::codes::RANGE);
    }

    #[test]
    fn test_weekday() {
        assert_eq!(EonDateTime::from_ymd(2023, 2, 2).weekday(), 4);
        assert_eq!(EonDateTime::from_ymd(2023, 2, 2).weekday_name(), Some("Thursday"));
        assert_eq!(EonDateTime::from_ymd(2023, 2, 3).weekday_name(), Some("Friday"));
        assert_eq!(EonDateTime::from_ymd(1, 1, 1).weekday_name(), Some("Monday"));
        assert_eq!(EonDateTime::from_ymd(0, 1, 1).weekday_name(), Some("Saturday"));
    }

    #[test]
    fn test_daytime_segment() {
        let morning = EonDateTime::from_ymd_hms(2023, 1, 1, 11, 59, 59);
        let afternoon = morning.add_seconds(1);
        assert_eq!(morning.daytime_segment_name(), Some("AM"));
        assert_eq!(afternoon.daytime_segment_name(), Some("PM"));
    }

    #[test]
    fn test_add_months_and_years() {
        let leap_day = EonDateTime::from_ymd_hms(2024, 2, 29, 8, 0, 0);
        assert_eq!(leap_day.add_months(12), EonDateTime::from_ymd_hms(2025, 2, 28, 8, 0, 0));
        assert_eq!(leap_day.add_years(1), EonDateTime::from_ymd_hms(2025, 2, 28, 8, 0, 0));
        assert_eq!(EonDateTime::from_ymd(2023, 1, 31).add_months(1), EonDateTime::from_ymd(2023, 2, 28));
        assert_eq!(EonDateTime::from_ymd(2024, 1, 31).add_months(1), EonDateTime::from_ymd(2024, 2, 29));
    }

    #[test]
    fn test_uniform_units() {
        let dt = EonDateTime::from_ymd(2023, 12, 31);
        assert_eq!(dt.add_days(1), EonDateTime::from_ymd(2024, 1, 1));
        assert_eq!(dt.add_hours(dec("1.5")), EonDateTime::from_ymd_hms(2023, 12, 31, 1, 30, 0));
        assert_eq!(dt.add_minutes(-1), EonDateTime::from_ymd_hms(2023, 12, 30, 23, 59, 0));
        assert_eq!(dt.add_milliseconds(1500).second(), &dec("1.5"));
        assert_eq!(dt.add_microseconds(1).second(), &dec("0.000001"));
        assert_eq!(dt.add_nanoseconds(-1).second(), &dec("59.999999999"));
    }

    #[test]
    fn test_subtract() {
        let a = EonDateTime::from_ymd(2024, 3, 1);
        let b = EonDateTime::from_ymd(2024, 2, 28);
        assert_eq!(a.subtract(&b), Decimal::from(2 * 86400));
        assert_eq!(b.subtract(&a), Decimal::from(-2 * 86400));
    }

    #[test]
    fn test_date_utilities() {
        let dt = EonDateTime::from_ymd_hms(2023, 7, 15, 14, 30, dec("0.25"));
        assert_eq!(dt.date(), EonDateTime::from_ymd(2023, 7, 15));
        assert_eq!(dt.time_of_day(), dec("52200.25"));
        assert_eq!(dt.start_of_month(), EonDateTime::from_ymd(2023, 7, 1));
        assert_eq!(dt.start_of_year(), EonDateTime::from_ymd(2023, 1, 1));
        assert_eq!(dt.day_of_year(), 196);
    }

    #[test]
    fn test_ordering() {
        let a = EonDateTime::from_ymd(-10_000, 1, 1);
        let b = EonDateTime::from_ymd(10_000, 1, 1);
        assert!(a < b);
        assert_eq!(a.clone().max(b.clone()), b);
    }

    #[test]
    fn test_custom_calendar() {
        let names = NameTable::new(
            ["Ember", "Gale", "Bloom", "Tide"],
            ["Moonday", "Starday", "Sunday", "Restday", "Fireday"],
            ["Early", "Mid", "Late"],
        );
        let calendar: Arc<dyn CalendarModel> = Arc::new(
            Calendar::builder("Quartered")
                .with_time_units(50, 50, 30)
                .with_months([90, 91, 91, 91])
                .with_leap_month(1, 1)
                .with_leap_rules([LeapRule::new(2, true)])
                .with_week(5, 2)
                .with_daytime_segments(3)
                .with_names(names)
                .build()
                .unwrap(),
        );
        let dt = EonDateTime::from_fields_in(calendar.clone(), 2, 1, 91, 29, 49, 49);
        assert_eq!((dt.month(), dt.day(), dt.hour()), (1, 91, 29));
        assert_eq!(dt.month_name(), Some("Ember"));
        assert_eq!(dt.daytime_segment_name(), Some("Late"));
        assert_eq!(dt.add_seconds(1).month_name(), Some("Gale"));
        // Year 0 is leap (364 days), year 1 common (363)
        assert_eq!(dt.days(), IBig::from(364 + 363 + 90));
        assert_eq!(EonDateTime::from_fields_in(calendar, 0, 1, 1, 0, 0, 0).weekday_name(), Some("Sunday"));
    }

    #[test]
    fn test_try_parse_with_calendar() {
        let calendar: Arc<dyn CalendarModel> = Arc::new(
            Calendar::builder("Ten Hours").with_time_units(100, 100, 10).build().unwrap(),
        );
        let options = ParseOptions::default();
        let dt = EonDateTime::try_parse_with(calendar.clone(), "2023/1/1 12", &options).unwrap();
        assert_eq!((dt.day(), dt.hour()), (2, 2));
        assert_eq!(dt.calendar().name(), "Ten Hours");
        assert!(EonDateTime::try_parse_with(calendar, "2023//1", &options).is_none());
        assert!(EonDateTime::try_parse_with(earth(), "", &options).is_none());
    }
}
