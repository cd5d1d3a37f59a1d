//! Tokenizing date/time parser
//!
//! Input is a sequence of digit runs split by separators. Components are
//! taken in a fixed order (year, month, day, hour, minute, second, then the
//! offset's hours, minutes and seconds); any that are missing at the end of
//! the input take their default. `-` is a separator, so signed years and
//! offsets cannot be written in text.

use crate::calendar::CalendarModel;
use crate::number::{Decimal, DEFAULT_PRECISION};
use crate::DateTimeError;
use dashu_int::IBig;

/// ASCII space, slash, colon and hyphen, plus their CJK full-width forms
const SEPARATORS: [char; 8] = [' ', '/', ':', '-', '\u{3000}', '\u{FF0F}', '\u{FF1A}', '\u{30FC}'];

// ============================================================================
// Options
// ============================================================================

/// Values used for components absent from the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDefaults {
    /// `None` makes the year mandatory
    pub year: Option<IBig>,
    pub month: IBig,
    pub day: IBig,
    pub hour: IBig,
    pub minute: IBig,
    pub second: Decimal,
    pub offset_hours: Decimal,
    pub offset_minutes: Decimal,
    pub offset_seconds: Decimal,
}

impl Default for ParseDefaults {
    fn default() -> Self {
        Self {
            year: None,
            month: IBig::ONE,
            day: IBig::ONE,
            hour: IBig::ZERO,
            minute: IBig::ZERO,
            second: Decimal::ZERO,
            offset_hours: Decimal::ZERO,
            offset_minutes: Decimal::ZERO,
            offset_seconds: Decimal::ZERO,
        }
    }
}

/// Parser configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    pub defaults: ParseDefaults,
    /// Fraction digits kept when offset minutes/seconds are folded into hours
    pub precision: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            defaults: ParseDefaults::default(),
            precision: DEFAULT_PRECISION,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set division precision
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder: replace all defaults
    pub fn with_defaults(mut self, defaults: ParseDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Builder: make the year optional
    pub fn with_default_year(mut self, year: impl Into<IBig>) -> Self {
        self.defaults.year = Some(year.into());
        self
    }
}

// ============================================================================
// Parser
// ============================================================================

/// Date/time fields as written, before rollover
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFields {
    pub year: IBig,
    pub month: IBig,
    pub day: IBig,
    pub hour: IBig,
    pub minute: IBig,
    pub second: Decimal,
}

/// Cursor over separator-delimited components
#[derive(Debug)]
pub struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input: input.trim(), pos: 0 }
    }

    /// Next component, or `None` once the input is exhausted
    fn eat_component(&mut self) -> Result<Option<&'a str>, DateTimeError> {
        let rest = &self.input[self.pos..];
        if rest.is_empty() {
            return Ok(None);
        }
        match rest.char_indices().find(|(_, c)| SEPARATORS.contains(c)) {
            Some((0, sep)) => Err(DateTimeError::Parse(format!(
                "digit run expected before separator '{}' at position {}",
                sep, self.pos
            ))),
            Some((idx, sep)) => {
                self.pos += idx + sep.len_utf8();
                Ok(Some(&rest[..idx]))
            }
            None => {
                self.pos = self.input.len();
                Ok(Some(rest))
            }
        }
    }

    /// Integer component, or `default` when absent
    pub fn eat_integer(&mut self, field: &str, default: Option<&IBig>) -> Result<IBig, DateTimeError> {
        match self.eat_component()? {
            Some(text) if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) => text
                .parse()
                .map_err(|_| DateTimeError::Parse(format!("{} '{}' is not an integer", field, text))),
            Some(text) => Err(DateTimeError::Parse(format!("{} '{}' is not an integer", field, text))),
            None => default
                .cloned()
                .ok_or_else(|| DateTimeError::Parse(format!("{} is required", field))),
        }
    }

    /// Decimal component (`digits[.digits]`), or `default` when absent
    pub fn eat_decimal(&mut self, field: &str, default: &Decimal) -> Result<Decimal, DateTimeError> {
        match self.eat_component()? {
            Some(text) if is_decimal(text) => Ok(text.parse()?),
            Some(text) => Err(DateTimeError::Parse(format!("{} '{}' is not a number", field, text))),
            None => Ok(default.clone()),
        }
    }

    /// Year through second
    pub fn eat_fields(&mut self, defaults: &ParseDefaults) -> Result<ParsedFields, DateTimeError> {
        Ok(ParsedFields {
            year: self.eat_integer("year", defaults.year.as_ref())?,
            month: self.eat_integer("month", Some(&defaults.month))?,
            day: self.eat_integer("day", Some(&defaults.day))?,
            hour: self.eat_integer("hour", Some(&defaults.hour))?,
            minute: self.eat_integer("minute", Some(&defaults.minute))?,
            second: self.eat_decimal("second", &defaults.second)?,
        })
    }

    /// Offset hours, minutes and seconds folded into fractional hours
    pub fn eat_offset(
        &mut self,
        calendar: &dyn CalendarModel,
        defaults: &ParseDefaults,
        precision: usize,
    ) -> Result<Decimal, DateTimeError> {
        let hours = self.eat_decimal("offset hours", &defaults.offset_hours)?;
        let minutes = self.eat_decimal("offset minutes", &defaults.offset_minutes)?;
        let seconds = self.eat_decimal("offset seconds", &defaults.offset_seconds)?;

        let minute_hours = minutes.checked_div(&Decimal::from(calendar.minutes_in_hour()), precision)?;
        let second_hours = seconds.checked_div(&Decimal::from(calendar.seconds_in_hour()), precision)?;
        Ok(hours.add(&minute_hours).add(&second_hours))
    }

    /// Fail if anything is left over
    pub fn finish(&self) -> Result<(), DateTimeError> {
        if self.pos < self.input.len() {
            return Err(DateTimeError::Parse(format!(
                "unexpected trailing input '{}'",
                &self.input[self.pos..]
            )));
        }
        Ok(())
    }
}

fn is_decimal(text: &str) -> bool {
    let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
    !whole.is_empty()
        && whole.bytes().all(|b| b.is_ascii_digit())
        && fraction.bytes().all(|b| b.is_ascii_digit())
}

fn eat_offset_fields(
    parser: &mut Parser<'_>,
    calendar: &dyn CalendarModel,
    options: &ParseOptions,
) -> Result<(ParsedFields, Decimal), DateTimeError> {
    let fields = parser.eat_fields(&options.defaults)?;
    let offset = parser.eat_offset(calendar, &options.defaults, options.precision)?;
    parser.finish()?;
    Ok((fields, offset))
}

fn log_failure(input: &str, err: &DateTimeError) {
    tracing::debug!(input, error = %err, "datetime parse failed");
}

/// Parse a complete date/time with no offset
pub fn parse_fields(input: &str, defaults: &ParseDefaults) -> Result<ParsedFields, DateTimeError> {
    let mut parser = Parser::new(input);
    let fields = parser.eat_fields(defaults).and_then(|fields| {
        parser.finish()?;
        Ok(fields)
    });
    fields.inspect_err(|err| log_failure(input, err))
}

/// Parse a complete date/time followed by an offset
pub fn parse_offset_fields(
    input: &str,
    calendar: &dyn CalendarModel,
    options: &ParseOptions,
) -> Result<(ParsedFields, Decimal), DateTimeError> {
    let mut parser = Parser::new(input);
    let parsed = eat_offset_fields(&mut parser, calendar, options);
    parsed.inspect_err(|err| log_failure(input, err))
}
