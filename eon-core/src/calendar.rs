//! Calendar models
//!
//! A calendar model answers the closed-form geometry questions every
//! conversion needs: how long units are, which years are leap years, how
//! many leap years precede a year, and how long each month is. Models are
//! immutable once built and shared behind `Arc<dyn CalendarModel>`.
//!
//! The timeline starts at the first instant of year 0 of the model.

use crate::gregorian;
use crate::names::{EnglishNames, NameSource, NameTable};
use crate::number::floor_div_rem;
use crate::DateTimeError;
use dashu_int::IBig;
use std::fmt;
use std::sync::{Arc, LazyLock};

// ============================================================================
// CalendarModel
// ============================================================================

/// Geometry of a calendar
///
/// Months are 1-based, weekdays and daytime segments are 0-based.
pub trait CalendarModel: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;
    fn seconds_in_minute(&self) -> u32;
    fn minutes_in_hour(&self) -> u32;
    fn hours_in_day(&self) -> u32;
    fn months_in_year(&self) -> u32;
    fn days_in_week(&self) -> u32;
    fn daytime_segments(&self) -> u32;
    /// Weekday of the first day of year 0
    fn epoch_weekday(&self) -> u32;
    fn days_in_common_year(&self) -> u32;
    fn days_in_leap_year(&self) -> u32;
    fn is_leap_year(&self, year: &IBig) -> bool;
    /// Number of leap years in `[0, year)`, negative for negative years
    fn leap_years_before(&self, year: &IBig) -> IBig;
    /// Days in `month` of `year`, 0 for a month the calendar does not have
    fn days_in_month(&self, month: u32, year: &IBig) -> u32;
    fn names(&self) -> &dyn NameSource;

    /// Whether this is the built-in proleptic Gregorian model
    fn is_gregorian(&self) -> bool {
        false
    }

    /// Constant-time day count to (year, month, day), when the model has one
    fn civil_from_days(&self, _days: &IBig) -> Option<(IBig, u32, u32)> {
        None
    }

    /// Constant-time (year, month, day) to day count, when the model has one
    fn days_from_civil(&self, _year: &IBig, _month: u32, _day: u32) -> Option<IBig> {
        None
    }

    // ========== Derived geometry ==========

    fn seconds_in_hour(&self) -> IBig {
        IBig::from(self.seconds_in_minute()) * IBig::from(self.minutes_in_hour())
    }

    fn seconds_in_day(&self) -> IBig {
        self.seconds_in_hour() * IBig::from(self.hours_in_day())
    }

    fn hours_in_segment(&self) -> u32 {
        (self.hours_in_day() / self.daytime_segments().max(1)).max(1)
    }

    fn days_in_year(&self, year: &IBig) -> u32 {
        if self.is_leap_year(year) {
            self.days_in_leap_year()
        } else {
            self.days_in_common_year()
        }
    }

    /// Days from the epoch to the first day of `year`
    fn days_before_year(&self, year: &IBig) -> IBig {
        let leap = self.leap_years_before(year);
        let common = year - &leap;
        leap * IBig::from(self.days_in_leap_year()) + common * IBig::from(self.days_in_common_year())
    }

    /// Seconds from the epoch to the first instant of `year`
    fn seconds_before_year(&self, year: &IBig) -> IBig {
        self.days_before_year(year) * self.seconds_in_day()
    }

    /// Days in the months of `year` that precede `month`
    fn days_before_month(&self, month: u32, year: &IBig) -> u32 {
        (1..month).map(|m| self.days_in_month(m, year)).sum()
    }

    /// 1-based ordinal of a day within its year
    fn day_of_year(&self, year: &IBig, month: u32, day: u32) -> u32 {
        self.days_before_month(month, year) + day
    }
}

// ============================================================================
// Calendar
// ============================================================================

/// A leap-year rule: years divisible by `divisor` are leap years if `include`
///
/// Rules are checked from the largest divisor down; the first one that
/// divides the year decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeapRule {
    pub divisor: u64,
    pub include: bool,
}

impl LeapRule {
    pub const fn new(divisor: u64, include: bool) -> Self {
        Self { divisor, include }
    }
}

/// Data-driven calendar model
#[derive(Debug)]
pub struct Calendar {
    name: String,
    seconds_in_minute: u32,
    minutes_in_hour: u32,
    hours_in_day: u32,
    month_days: Vec<u32>,
    leap_month: u32,
    leap_day_delta: u32,
    /// Sorted by ascending divisor
    leap_rules: Vec<LeapRule>,
    days_in_week: u32,
    epoch_weekday: u32,
    daytime_segments: u32,
    names: Box<dyn NameSource>,
    /// Only the built-in Gregorian model may use the fixed-point fast path
    fast_path: bool,
}

const GREGORIAN_MONTH_DAYS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
const GREGORIAN_LEAP_RULES: [LeapRule; 3] = [
    LeapRule::new(4, true),
    LeapRule::new(100, false),
    LeapRule::new(400, true),
];

/// 0000-01-01 is a Saturday (0 = Sunday)
const GREGORIAN_EPOCH_WEEKDAY: u32 = 6;

static EARTH: LazyLock<Arc<Calendar>> = LazyLock::new(|| Arc::new(Calendar::gregorian()));

/// The shared default model: proleptic Gregorian, 24 hours, AM/PM
pub fn earth() -> Arc<dyn CalendarModel> {
    EARTH.clone()
}

impl Calendar {
    /// The proleptic Gregorian calendar with the fast conversion path enabled
    fn gregorian() -> Self {
        Self {
            name: "Earth".to_string(),
            seconds_in_minute: 60,
            minutes_in_hour: 60,
            hours_in_day: 24,
            month_days: GREGORIAN_MONTH_DAYS.to_vec(),
            leap_month: 2,
            leap_day_delta: 1,
            leap_rules: GREGORIAN_LEAP_RULES.to_vec(),
            days_in_week: 7,
            epoch_weekday: GREGORIAN_EPOCH_WEEKDAY,
            daytime_segments: 2,
            names: Box::new(EnglishNames),
            fast_path: true,
        }
    }

    pub fn builder(name: impl Into<String>) -> CalendarBuilder {
        CalendarBuilder::new(name)
    }
}

impl CalendarModel for Calendar {
    fn name(&self) -> &str {
        &self.name
    }

    fn seconds_in_minute(&self) -> u32 {
        self.seconds_in_minute
    }

    fn minutes_in_hour(&self) -> u32 {
        self.minutes_in_hour
    }

    fn hours_in_day(&self) -> u32 {
        self.hours_in_day
    }

    fn months_in_year(&self) -> u32 {
        self.month_days.len() as u32
    }

    fn days_in_week(&self) -> u32 {
        self.days_in_week
    }

    fn daytime_segments(&self) -> u32 {
        self.daytime_segments
    }

    fn epoch_weekday(&self) -> u32 {
        self.epoch_weekday
    }

    fn days_in_common_year(&self) -> u32 {
        self.month_days.iter().sum()
    }

    fn days_in_leap_year(&self) -> u32 {
        self.days_in_common_year() + self.leap_day_delta
    }

    fn is_leap_year(&self, year: &IBig) -> bool {
        self.leap_rules
            .iter()
            .rev()
            .find(|rule| floor_div_rem(year, &IBig::from(rule.divisor)).1 == IBig::ZERO)
            .is_some_and(|rule| rule.include)
    }

    fn leap_years_before(&self, year: &IBig) -> IBig {
        // Inclusion/exclusion over the divisor chain: each rule adds or
        // removes the multiples of its divisor in [0, year).
        let last = year - IBig::ONE;
        let mut total = IBig::ZERO;
        let mut included = false;
        for rule in &self.leap_rules {
            if rule.include != included {
                let multiples = floor_div_rem(&last, &IBig::from(rule.divisor)).0 + IBig::ONE;
                if rule.include {
                    total += multiples;
                } else {
                    total -= multiples;
                }
                included = rule.include;
            }
        }
        total
    }

    fn days_in_month(&self, month: u32, year: &IBig) -> u32 {
        let Some(&days) = month.checked_sub(1).and_then(|i| self.month_days.get(i as usize)) else {
            return 0;
        };
        if month == self.leap_month && self.is_leap_year(year) {
            days + self.leap_day_delta
        } else {
            days
        }
    }

    fn names(&self) -> &dyn NameSource {
        self.names.as_ref()
    }

    fn is_gregorian(&self) -> bool {
        self.fast_path
    }

    fn civil_from_days(&self, days: &IBig) -> Option<(IBig, u32, u32)> {
        self.fast_path.then(|| gregorian::civil_from_days(days))
    }

    fn days_from_civil(&self, year: &IBig, month: u32, day: u32) -> Option<IBig> {
        self.fast_path.then(|| gregorian::days_from_civil(year, month, day))
    }
}

// ============================================================================
// CalendarBuilder
// ============================================================================

/// Builder for custom calendar models
///
/// Starts from the Gregorian geometry; every setter replaces one aspect.
/// `build` validates the whole model.
#[derive(Debug, Clone)]
pub struct CalendarBuilder {
    name: String,
    seconds_in_minute: u32,
    minutes_in_hour: u32,
    hours_in_day: u32,
    month_days: Vec<u32>,
    leap_month: u32,
    leap_day_delta: u32,
    leap_rules: Vec<LeapRule>,
    days_in_week: u32,
    epoch_weekday: u32,
    daytime_segments: u32,
    names: Option<NameTable>,
}

impl CalendarBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            seconds_in_minute: 60,
            minutes_in_hour: 60,
            hours_in_day: 24,
            month_days: GREGORIAN_MONTH_DAYS.to_vec(),
            leap_month: 2,
            leap_day_delta: 1,
            leap_rules: GREGORIAN_LEAP_RULES.to_vec(),
            days_in_week: 7,
            epoch_weekday: GREGORIAN_EPOCH_WEEKDAY,
            daytime_segments: 2,
            names: None,
        }
    }

    pub fn with_time_units(mut self, seconds_in_minute: u32, minutes_in_hour: u32, hours_in_day: u32) -> Self {
        self.seconds_in_minute = seconds_in_minute;
        self.minutes_in_hour = minutes_in_hour;
        self.hours_in_day = hours_in_day;
        self
    }

    /// Day counts of each month in a common year
    pub fn with_months(mut self, month_days: impl Into<Vec<u32>>) -> Self {
        self.month_days = month_days.into();
        self
    }

    /// The month that grows by `delta` days in leap years
    pub fn with_leap_month(mut self, month: u32, delta: u32) -> Self {
        self.leap_month = month;
        self.leap_day_delta = delta;
        self
    }

    pub fn with_leap_rules(mut self, rules: impl Into<Vec<LeapRule>>) -> Self {
        self.leap_rules = rules.into();
        self
    }

    pub fn with_week(mut self, days_in_week: u32, epoch_weekday: u32) -> Self {
        self.days_in_week = days_in_week;
        self.epoch_weekday = epoch_weekday;
        self
    }

    pub fn with_daytime_segments(mut self, segments: u32) -> Self {
        self.daytime_segments = segments;
        self
    }

    pub fn with_names(mut self, names: NameTable) -> Self {
        self.names = Some(names);
        self
    }

    fn invalid(&self, details: impl fmt::Display) -> DateTimeError {
        DateTimeError::InvalidCalendar(format!("{}: {}", self.name, details))
    }

    pub fn build(mut self) -> Result<Calendar, DateTimeError> {
        if self.seconds_in_minute == 0 || self.minutes_in_hour == 0 || self.hours_in_day == 0 {
            return Err(self.invalid("time units must be positive"));
        }
        if self.month_days.is_empty() || self.month_days.contains(&0) {
            return Err(self.invalid("every month needs at least one day"));
        }
        if self.leap_day_delta > 0
            && (self.leap_month == 0 || self.leap_month as usize > self.month_days.len())
        {
            return Err(self.invalid(format!("leap month {} does not exist", self.leap_month)));
        }

        self.leap_rules.sort_by_key(|rule| rule.divisor);
        for pair in self.leap_rules.windows(2) {
            if pair[0].divisor == 0 || pair[1].divisor % pair[0].divisor != 0 || pair[0].divisor == pair[1].divisor {
                return Err(self.invalid(format!(
                    "leap divisors must form a chain, {} does not divide {}",
                    pair[0].divisor, pair[1].divisor
                )));
            }
        }
        if self.leap_rules.first().is_some_and(|rule| rule.divisor == 0) {
            return Err(self.invalid("leap divisor must be positive"));
        }

        if self.days_in_week == 0 || self.epoch_weekday >= self.days_in_week {
            return Err(self.invalid(format!(
                "epoch weekday {} outside a {}-day week",
                self.epoch_weekday, self.days_in_week
            )));
        }
        if self.daytime_segments == 0 || self.hours_in_day % self.daytime_segments != 0 {
            return Err(self.invalid(format!(
                "{} daytime segments do not split a {}-hour day",
                self.daytime_segments, self.hours_in_day
            )));
        }

        if let Some(names) = &self.names {
            if names.month_count() != self.month_days.len()
                || names.weekday_count() != self.days_in_week as usize
                || names.segment_count() != self.daytime_segments as usize
            {
                return Err(self.invalid("name table does not match calendar shape"));
            }
        }

        tracing::debug!(
            calendar = %self.name,
            months = self.month_days.len(),
            leap_rules = self.leap_rules.len(),
            "calendar model built"
        );

        let names: Box<dyn NameSource> = match self.names {
            Some(table) => Box::new(table),
            None => Box::new(EnglishNames),
        };
        Ok(Calendar {
            name: self.name,
            seconds_in_minute: self.seconds_in_minute,
            minutes_in_hour: self.minutes_in_hour,
            hours_in_day: self.hours_in_day,
            month_days: self.month_days,
            leap_month: self.leap_month,
            leap_day_delta: self.leap_day_delta,
            leap_rules: self.leap_rules,
            days_in_week: self.days_in_week,
            epoch_weekday: self.epoch_weekday,
            daytime_segments: self.daytime_segments,
            names,
            fast_path: false,
        })
    }
}
