//! Month, weekday and daytime-segment names
//!
//! Names are looked up through [`NameSource`] so that a calendar can carry
//! its own vocabulary. Indices are 1-based for months and 0-based for
//! weekdays (0 = first day of the week) and daytime segments.

use std::fmt;

/// Supplies display names for a calendar
pub trait NameSource: Send + Sync + fmt::Debug {
    fn month_name(&self, month: u32) -> Option<&str>;
    fn abbreviated_month_name(&self, month: u32) -> Option<&str>;
    fn weekday_name(&self, weekday: u32) -> Option<&str>;
    fn abbreviated_weekday_name(&self, weekday: u32) -> Option<&str>;
    fn daytime_segment_name(&self, segment: u32) -> Option<&str>;
}

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

const WEEKDAYS: [&str; 7] = [
    "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
];

const SEGMENTS: [&str; 2] = ["AM", "PM"];

fn lookup<'a>(table: &[&'a str], index: Option<u32>) -> Option<&'a str> {
    index.and_then(|i| table.get(i as usize).copied())
}

/// English names for the default calendar
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishNames;

impl NameSource for EnglishNames {
    fn month_name(&self, month: u32) -> Option<&str> {
        lookup(&MONTHS, month.checked_sub(1))
    }

    fn abbreviated_month_name(&self, month: u32) -> Option<&str> {
        self.month_name(month).map(|n| &n[..3])
    }

    fn weekday_name(&self, weekday: u32) -> Option<&str> {
        lookup(&WEEKDAYS, Some(weekday))
    }

    fn abbreviated_weekday_name(&self, weekday: u32) -> Option<&str> {
        self.weekday_name(weekday).map(|n| &n[..3])
    }

    fn daytime_segment_name(&self, segment: u32) -> Option<&str> {
        lookup(&SEGMENTS, Some(segment))
    }
}

/// Owned name table for custom calendars
///
/// Abbreviations default to the first three characters of each name.
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    months: Vec<String>,
    short_months: Vec<String>,
    weekdays: Vec<String>,
    short_weekdays: Vec<String>,
    segments: Vec<String>,
}

fn abbreviate(names: &[String]) -> Vec<String> {
    names.iter().map(|n| n.chars().take(3).collect()).collect()
}

impl NameTable {
    pub fn new<S: Into<String>>(
        months: impl IntoIterator<Item = S>,
        weekdays: impl IntoIterator<Item = S>,
        segments: impl IntoIterator<Item = S>,
    ) -> Self {
        let months: Vec<String> = months.into_iter().map(Into::into).collect();
        let weekdays: Vec<String> = weekdays.into_iter().map(Into::into).collect();
        Self {
            short_months: abbreviate(&months),
            short_weekdays: abbreviate(&weekdays),
            months,
            weekdays,
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Builder: replace the abbreviated month names
    pub fn with_short_months<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.short_months = names.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: replace the abbreviated weekday names
    pub fn with_short_weekdays<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.short_weekdays = names.into_iter().map(Into::into).collect();
        self
    }

    pub(crate) fn month_count(&self) -> usize {
        self.months.len()
    }

    pub(crate) fn weekday_count(&self) -> usize {
        self.weekdays.len()
    }

    pub(crate) fn segment_count(&self) -> usize {
        self.segments.len()
    }
}

fn get(names: &[String], index: Option<u32>) -> Option<&str> {
    index.and_then(|i| names.get(i as usize)).map(String::as_str)
}

impl NameSource for NameTable {
    fn month_name(&self, month: u32) -> Option<&str> {
        get(&self.months, month.checked_sub(1))
    }

    fn abbreviated_month_name(&self, month: u32) -> Option<&str> {
        get(&self.short_months, month.checked_sub(1))
    }

    fn weekday_name(&self, weekday: u32) -> Option<&str> {
        get(&self.weekdays, Some(weekday))
    }

    fn abbreviated_weekday_name(&self, weekday: u32) -> Option<&str> {
        get(&self.short_weekdays, Some(weekday))
    }

    fn daytime_segment_name(&self, segment: u32) -> Option<&str> {
        get(&self.segments, Some(segment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_names() {
        let names = EnglishNames;
        assert_eq!(names.month_name(1), Some("January"));
        assert_eq!(names.abbreviated_month_name(9), Some("Sep"));
        assert_eq!(names.month_name(0), None);
        assert_eq!(names.month_name(13), None);
        assert_eq!(names.weekday_name(4), Some("Thursday"));
        assert_eq!(names.abbreviated_weekday_name(6), Some("Sat"));
        assert_eq!(names.daytime_segment_name(1), Some("PM"));
    }

    #[test]
    fn test_name_table_abbreviations() {
        let table = NameTable::new(["Frost", "Thaw"], ["Oneday", "Twoday", "Threeday"], ["Light", "Dark"])
            .with_short_weekdays(["1d", "2d", "3d"]);
        assert_eq!(table.abbreviated_month_name(2), Some("Tha"));
        assert_eq!(table.abbreviated_weekday_name(1), Some("2d"));
        assert_eq!(table.weekday_name(2), Some("Threeday"));
        assert_eq!(table.daytime_segment_name(2), None);
        assert_eq!(table.month_count(), 2);
    }
}
