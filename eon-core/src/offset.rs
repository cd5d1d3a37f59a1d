//! Date/time values paired with an hour offset
//!
//! The offset is applied on read: field accessors, names and formatting see
//! `base + offset`, while arithmetic moves `base` and keeps the offset.
//! Changing the offset keeps `base`, so the applied instant moves with it.

use crate::calendar::{earth, CalendarModel};
use crate::convert::CalendarFields;
use crate::datetime::EonDateTime;
use crate::format::{self, LONG_PATTERN, OFFSET_PATTERN, SHORT_PATTERN};
use crate::number::Decimal;
use crate::parse::{self, ParseOptions};
use crate::DateTimeError;
use dashu_int::IBig;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// An `EonDateTime` with an offset in (possibly fractional) hours
#[derive(Debug, Clone)]
pub struct EonDateTimeOffset {
    base: EonDateTime,
    offset_hours: Decimal,
    applied: EonDateTime,
}

impl EonDateTimeOffset {
    // ========== Construction ==========

    pub fn new(base: EonDateTime, offset_hours: impl Into<Decimal>) -> Self {
        let offset_hours = offset_hours.into();
        let applied = base.add_hours(offset_hours.clone());
        Self { base, offset_hours, applied }
    }

    /// Zero offset
    pub fn utc(base: EonDateTime) -> Self {
        Self::new(base, Decimal::ZERO)
    }

    // ========== Accessors ==========

    /// The value before the offset is applied
    pub fn base(&self) -> &EonDateTime {
        &self.base
    }

    pub fn offset_hours(&self) -> &Decimal {
        &self.offset_hours
    }

    /// The value with the offset applied
    pub fn applied(&self) -> &EonDateTime {
        &self.applied
    }

    /// Applied seconds since the start of year 0
    pub fn seconds(&self) -> &Decimal {
        self.applied.seconds()
    }

    pub fn calendar(&self) -> &Arc<dyn CalendarModel> {
        self.base.calendar()
    }

    pub fn fields(&self) -> &CalendarFields {
        self.applied.fields()
    }

    pub fn year(&self) -> &IBig {
        self.applied.year()
    }

    pub fn month(&self) -> u32 {
        self.applied.month()
    }

    pub fn day(&self) -> u32 {
        self.applied.day()
    }

    pub fn hour(&self) -> u32 {
        self.applied.hour()
    }

    pub fn minute(&self) -> u32 {
        self.applied.minute()
    }

    pub fn second(&self) -> &Decimal {
        self.applied.second()
    }

    pub fn day_of_year(&self) -> u32 {
        self.applied.day_of_year()
    }

    pub fn weekday(&self) -> u32 {
        self.applied.weekday()
    }

    pub fn daytime_segment(&self) -> u32 {
        self.applied.daytime_segment()
    }

    pub fn days_in_month(&self) -> u32 {
        self.applied.days_in_month()
    }

    pub fn is_leap_year(&self) -> bool {
        self.applied.is_leap_year()
    }

    /// Seconds elapsed since the start of the applied day
    pub fn time_of_day(&self) -> Decimal {
        self.applied.time_of_day()
    }

    pub fn month_name(&self) -> Option<&str> {
        self.applied.month_name()
    }

    pub fn abbreviated_month_name(&self) -> Option<&str> {
        self.applied.abbreviated_month_name()
    }

    pub fn weekday_name(&self) -> Option<&str> {
        self.applied.weekday_name()
    }

    pub fn abbreviated_weekday_name(&self) -> Option<&str> {
        self.applied.abbreviated_weekday_name()
    }

    pub fn daytime_segment_name(&self) -> Option<&str> {
        self.applied.daytime_segment_name()
    }

    /// Start of the applied day
    pub fn date(&self) -> EonDateTime {
        self.applied.date()
    }

    // ========== Offset ==========

    /// Same base, new offset: the applied instant moves
    pub fn change_offset(&self, offset_hours: impl Into<Decimal>) -> Self {
        Self::new(self.base.clone(), offset_hours)
    }

    /// Same base, offset shifted by `hours`
    pub fn add_offset(&self, hours: impl Into<Decimal>) -> Self {
        self.change_offset(self.offset_hours.add(&hours.into()))
    }

    // ========== Arithmetic ==========

    fn map_base(&self, f: impl FnOnce(&EonDateTime) -> EonDateTime) -> Self {
        Self::new(f(&self.base), self.offset_hours.clone())
    }

    pub fn add_seconds(&self, seconds: impl Into<Decimal>) -> Self {
        self.map_base(|b| b.add_seconds(seconds))
    }

    pub fn add_milliseconds(&self, millis: impl Into<Decimal>) -> Self {
        self.map_base(|b| b.add_milliseconds(millis))
    }

    pub fn add_microseconds(&self, micros: impl Into<Decimal>) -> Self {
        self.map_base(|b| b.add_microseconds(micros))
    }

    pub fn add_nanoseconds(&self, nanos: impl Into<Decimal>) -> Self {
        self.map_base(|b| b.add_nanoseconds(nanos))
    }

    pub fn add_minutes(&self, minutes: impl Into<Decimal>) -> Self {
        self.map_base(|b| b.add_minutes(minutes))
    }

    pub fn add_hours(&self, hours: impl Into<Decimal>) -> Self {
        self.map_base(|b| b.add_hours(hours))
    }

    pub fn add_days(&self, days: impl Into<Decimal>) -> Self {
        self.map_base(|b| b.add_days(days))
    }

    pub fn add_months(&self, months: impl Into<IBig>) -> Self {
        self.map_base(|b| b.add_months(months))
    }

    pub fn add_years(&self, years: impl Into<IBig>) -> Self {
        self.map_base(|b| b.add_years(years))
    }

    /// Seconds between the applied instants
    pub fn subtract(&self, other: &EonDateTimeOffset) -> Decimal {
        self.applied.subtract(&other.applied)
    }

    // ========== Formatting ==========

    /// Render the applied value; `z` tokens show the offset
    pub fn format(&self, pattern: &str) -> String {
        format::format(&self.applied, &self.offset_hours, pattern)
    }

    pub fn to_long_string(&self) -> String {
        self.format(LONG_PATTERN)
    }

    pub fn to_short_string(&self) -> String {
        self.format(SHORT_PATTERN)
    }

    // ========== Parsing ==========

    /// Parse date/time components followed by offset hours, minutes and seconds
    ///
    /// The date/time components are the base value.
    pub fn parse(s: &str) -> Result<Self, DateTimeError> {
        Self::parse_with(earth(), s, &ParseOptions::default())
    }

    pub fn try_parse(s: &str) -> Option<Self> {
        Self::parse(s).ok()
    }

    pub fn try_parse_with(calendar: Arc<dyn CalendarModel>, s: &str, options: &ParseOptions) -> Option<Self> {
        Self::parse_with(calendar, s, options).ok()
    }

    pub fn parse_with(calendar: Arc<dyn CalendarModel>, s: &str, options: &ParseOptions) -> Result<Self, DateTimeError> {
        let (parsed, offset) = parse::parse_offset_fields(s, calendar.as_ref(), options)?;
        let base = EonDateTime::from_fields_in(
            calendar,
            parsed.year,
            parsed.month,
            parsed.day,
            parsed.hour,
            parsed.minute,
            parsed.second,
        );
        Ok(Self::new(base, offset))
    }
}

// ========== Trait Implementations ==========

impl fmt::Display for EonDateTimeOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(OFFSET_PATTERN))
    }
}

impl PartialEq for EonDateTimeOffset {
    fn eq(&self, other: &Self) -> bool {
        self.applied == other.applied
    }
}

impl Eq for EonDateTimeOffset {}

impl Hash for EonDateTimeOffset {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.applied.hash(state);
    }
}

impl PartialOrd for EonDateTimeOffset {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EonDateTimeOffset {
    fn cmp(&self, other: &Self) -> Ordering {
        self.applied.cmp(&other.applied)
    }
}
