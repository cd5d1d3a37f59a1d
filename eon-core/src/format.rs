//! Pattern-based formatting
//!
//! The pattern is scanned left to right. At each position the longest
//! matching token from [`TOKENS`] is replaced by its rendering; everything
//! else is copied. Rendered text goes to a separate buffer, so it is never
//! scanned again. A backslash copies the next character literally, and text
//! between single or double quotes is copied without interpretation.
//!
//! | Token | Meaning |
//! |-------|---------|
//! | `y` `yy` `yyy` | last 1-2, 2 or 3 digits of the year (padded for `yy`, `yyy`) |
//! | `yyyy` `yyyyy` `yyyyyy` | full year, zero-padded to at least 4, 5 or 6 digits |
//! | `M` `MM` `MMM` `MMMM` | month, padded month, abbreviated name, full name |
//! | `d` `dd` `ddd` `dddd` | day, padded day, abbreviated weekday, full weekday |
//! | `H` `HH` / `h` `hh` | hour of day / hour of daytime segment |
//! | `m` `mm` `s` `ss` | minute and whole second |
//! | `f`…`ffffffff` | second fraction, exactly n digits |
//! | `F`…`FFFFFFFF` | as `f`…`ffffffff`, but empty when the second is whole |
//! | `t` `tt` | first letter / full name of the daytime segment |
//! | `z` `zz` `zzz` | offset hours, padded offset hours, `±hh:mm` |

use crate::datetime::EonDateTime;
use crate::number::{floor_div_rem, is_negative, Decimal};
use dashu_int::IBig;
use std::fmt::Display;

/// `Display` for date/time values
pub const DEFAULT_PATTERN: &str = "yyyy/MM/dd HH:mm:ss";
/// `Display` for offset values
pub const OFFSET_PATTERN: &str = "yyyy/MM/dd HH:mm:ss zzz";
pub const LONG_PATTERN: &str = "dddd d MMMM yyyy HH:mm:ss";
pub const SHORT_PATTERN: &str = "ddd d MMM yyyy HH:mm:ss";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Year(usize),
    Month(usize),
    Day(usize),
    Hour(usize),
    SegmentHour(usize),
    Minute(usize),
    Second(usize),
    Fraction(usize),
    TrimmedFraction(usize),
    Segment(usize),
    Offset(usize),
}

/// Longest tokens first
const TOKENS: &[(&str, Token)] = &[
    ("ffffffff", Token::Fraction(8)),
    ("FFFFFFFF", Token::TrimmedFraction(8)),
    ("fffffff", Token::Fraction(7)),
    ("FFFFFFF", Token::TrimmedFraction(7)),
    ("yyyyyy", Token::Year(6)),
    ("ffffff", Token::Fraction(6)),
    ("FFFFFF", Token::TrimmedFraction(6)),
    ("yyyyy", Token::Year(5)),
    ("fffff", Token::Fraction(5)),
    ("FFFFF", Token::TrimmedFraction(5)),
    ("yyyy", Token::Year(4)),
    ("MMMM", Token::Month(4)),
    ("dddd", Token::Day(4)),
    ("ffff", Token::Fraction(4)),
    ("FFFF", Token::TrimmedFraction(4)),
    ("yyy", Token::Year(3)),
    ("MMM", Token::Month(3)),
    ("ddd", Token::Day(3)),
    ("fff", Token::Fraction(3)),
    ("FFF", Token::TrimmedFraction(3)),
    ("zzz", Token::Offset(3)),
    ("yy", Token::Year(2)),
    ("MM", Token::Month(2)),
    ("dd", Token::Day(2)),
    ("HH", Token::Hour(2)),
    ("hh", Token::SegmentHour(2)),
    ("mm", Token::Minute(2)),
    ("ss", Token::Second(2)),
    ("ff", Token::Fraction(2)),
    ("FF", Token::TrimmedFraction(2)),
    ("tt", Token::Segment(2)),
    ("zz", Token::Offset(2)),
    ("y", Token::Year(1)),
    ("M", Token::Month(1)),
    ("d", Token::Day(1)),
    ("H", Token::Hour(1)),
    ("h", Token::SegmentHour(1)),
    ("m", Token::Minute(1)),
    ("s", Token::Second(1)),
    ("f", Token::Fraction(1)),
    ("F", Token::TrimmedFraction(1)),
    ("t", Token::Segment(1)),
    ("z", Token::Offset(1)),
];

fn pad(value: impl Display, width: usize) -> String {
    format!("{:0>width$}", value.to_string(), width = width)
}

/// Numeric fields print padded to 2 for the doubled token
fn number(value: u32, len: usize) -> String {
    if len >= 2 { pad(value, 2) } else { value.to_string() }
}

fn render_year(year: &IBig, len: usize) -> String {
    let sign = if is_negative(year) { "-" } else { "" };
    let abs = if is_negative(year) { -year } else { year.clone() };
    let digits = match len {
        1 => floor_div_rem(&abs, &IBig::from(100)).1.to_string(),
        2 => pad(floor_div_rem(&abs, &IBig::from(100)).1, 2),
        3 => pad(floor_div_rem(&abs, &IBig::from(1000)).1, 3),
        n => pad(abs, n),
    };
    format!("{}{}", sign, digits)
}

fn render_offset(offset_hours: &Decimal, minutes_in_hour: u32, len: usize) -> String {
    let sign = if offset_hours.is_negative() { '-' } else { '+' };
    let abs = offset_hours.abs();
    match len {
        1 => format!("{}{}", sign, abs.trunc()),
        2 => format!("{}{}", sign, pad(abs.trunc(), 2)),
        _ => {
            let unit = IBig::from(minutes_in_hour);
            let total = abs.mul_int(&unit).round();
            let (hours, minutes) = floor_div_rem(&total, &unit);
            format!("{}{}:{}", sign, pad(hours, 2), pad(minutes, 2))
        }
    }
}

fn render(token: Token, dt: &EonDateTime, offset_hours: &Decimal) -> String {
    let names = dt.calendar().names();
    match token {
        Token::Year(len) => render_year(dt.year(), len),
        Token::Month(len @ (1 | 2)) => number(dt.month(), len),
        Token::Month(3) => names
            .abbreviated_month_name(dt.month())
            .map_or_else(|| dt.month().to_string(), str::to_string),
        Token::Month(_) => names
            .month_name(dt.month())
            .map_or_else(|| dt.month().to_string(), str::to_string),
        Token::Day(len @ (1 | 2)) => number(dt.day(), len),
        Token::Day(3) => names
            .abbreviated_weekday_name(dt.weekday())
            .map_or_else(|| dt.weekday().to_string(), str::to_string),
        Token::Day(_) => names
            .weekday_name(dt.weekday())
            .map_or_else(|| dt.weekday().to_string(), str::to_string),
        Token::Hour(len) => number(dt.hour(), len),
        Token::SegmentHour(len) => {
            let per_segment = dt.calendar().hours_in_segment();
            match dt.hour() % per_segment {
                0 => number(per_segment, len),
                h => number(h, len),
            }
        }
        Token::Minute(len) => number(dt.minute(), len),
        Token::Second(len) => {
            let whole = dt.second().floor();
            if len >= 2 { pad(whole, 2) } else { whole.to_string() }
        }
        Token::Fraction(len) => dt.second().fraction_digits(len),
        Token::TrimmedFraction(len) => {
            if dt.second().fract().is_zero() {
                String::new()
            } else {
                dt.second().fraction_digits(len)
            }
        }
        Token::Segment(len) => {
            let segment = dt.daytime_segment();
            let name = names
                .daytime_segment_name(segment)
                .map_or_else(|| segment.to_string(), str::to_string);
            if len >= 2 { name } else { name.chars().take(1).collect() }
        }
        Token::Offset(len) => render_offset(offset_hours, dt.calendar().minutes_in_hour(), len),
    }
}

/// Render `dt` with `pattern`; `offset_hours` feeds the `z` tokens
pub fn format(dt: &EonDateTime, offset_hours: &Decimal, pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut pos = 0;
    while pos < pattern.len() {
        let rest = &pattern[pos..];
        let mut chars = rest.chars();
        let Some(c) = chars.next() else { break };

        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
                pos += c.len_utf8() + escaped.len_utf8();
            } else {
                out.push(c);
                pos += c.len_utf8();
            }
            continue;
        }

        if c == '\'' || c == '"' {
            let quoted = &rest[1..];
            match quoted.find(c) {
                Some(end) => {
                    out.push_str(&quoted[..end]);
                    pos += end + 2;
                }
                None => {
                    out.push_str(quoted);
                    pos = pattern.len();
                }
            }
            continue;
        }

        match TOKENS.iter().find(|(text, _)| rest.starts_with(text)) {
            Some((text, token)) => {
                out.push_str(&render(*token, dt, offset_hours));
                pos += text.len();
            }
            None => {
                out.push(c);
                pos += c.len_utf8();
            }
        }
    }
    out
}
