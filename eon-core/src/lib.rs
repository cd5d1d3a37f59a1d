//! Eon Core - Unbounded date/time values
//!
//! This crate provides date/time types with no range limit:
//! - `EonDateTime`: An instant held as exact seconds since the start of year 0
//! - `EonDateTimeOffset`: An `EonDateTime` viewed at an hour offset
//! - `CalendarModel`: Pluggable calendar rules (Gregorian by default)
//! - `Decimal`: Exact base-10 numbers backing the seconds count
//!
//! Years are arbitrary-size integers and seconds keep every fraction digit
//! they are given. Conversion between seconds and fields takes a closed-form
//! path for the Gregorian calendar and a leap-counting search otherwise.

mod number;
mod error;
mod names;
mod calendar;
mod datetime;
mod offset;
mod host;

pub mod gregorian;
pub mod convert;
pub mod rollover;
pub mod format;
pub mod parse;

pub use number::{Decimal, NumberError, DEFAULT_PRECISION};
pub use error::{DateTimeError, codes};
pub use names::{NameSource, EnglishNames, NameTable};
pub use calendar::{CalendarModel, Calendar, CalendarBuilder, LeapRule, earth};
pub use convert::CalendarFields;
pub use datetime::EonDateTime;
pub use offset::EonDateTimeOffset;
pub use parse::{ParseOptions, ParseDefaults};
pub use host::{HostClock, SystemClock};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Decimal, DateTimeError, EonDateTime, EonDateTimeOffset, CalendarModel, Calendar};
    pub use crate::error::codes;
}
