//! Exact decimal numbers on top of dashu
//!
//! `Decimal` is a fixed-point value `digits × 10^-scale` with an unbounded
//! integer part. Addition, subtraction, multiplication and decimal shifts are
//! exact. Division is the only lossy operation and always takes an explicit
//! number of fraction digits.

use dashu_base::Sign;
use dashu_float::DBig;
use dashu_int::IBig;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for number operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberError {
    #[error("Invalid number format: {0}")]
    ParseError(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Scale overflow: {0}")]
    ScaleOverflow(String),
}

/// Default number of fraction digits kept by lossy divisions
pub const DEFAULT_PRECISION: usize = 50;

/// Arbitrary precision exact decimal
///
/// Always stored normalized (no trailing fractional zeros, zero has scale 0),
/// so the derived equality and hash agree with numeric equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decimal {
    digits: IBig,
    scale: u32,
}

// ========== IBig helpers ==========

/// `10^exp` as an integer
pub(crate) fn pow10(exp: u32) -> IBig {
    IBig::from(10u8).pow(exp as usize)
}

/// Floor division with a remainder that carries the sign of the divisor
///
/// `a == q * b + r` with `0 <= r < b` for positive `b`.
pub(crate) fn floor_div_rem(a: &IBig, b: &IBig) -> (IBig, IBig) {
    let mut q = a / b;
    let mut r = a % b;
    if r != IBig::ZERO && ((r < IBig::ZERO) != (*b < IBig::ZERO)) {
        q -= IBig::ONE;
        r += b;
    }
    (q, r)
}

pub(crate) fn is_negative(n: &IBig) -> bool {
    n.sign() == Sign::Negative && *n != IBig::ZERO
}

impl Decimal {
    // ========== Construction ==========

    pub const ZERO: Decimal = Decimal { digits: IBig::ZERO, scale: 0 };

    fn normalized(mut digits: IBig, mut scale: u32) -> Self {
        if digits == IBig::ZERO {
            return Self::ZERO;
        }
        let ten = IBig::from(10u8);
        while scale > 0 && (&digits % &ten) == IBig::ZERO {
            digits /= &ten;
            scale -= 1;
        }
        Self { digits, scale }
    }

    /// Build from raw parts: `digits × 10^-scale`
    pub fn from_parts(digits: IBig, scale: u32) -> Self {
        Self::normalized(digits, scale)
    }

    /// Convert from a dashu float (exact: DBig is already base 10)
    ///
    /// Fails when the exponent does not fit a `u32` scale.
    pub fn from_dbig(value: DBig) -> Result<Self, NumberError> {
        let (significand, exponent) = value.into_repr().into_parts();
        let magnitude = u32::try_from(exponent.unsigned_abs())
            .map_err(|_| NumberError::ScaleOverflow(format!("exponent {}", exponent)))?;
        if exponent >= 0 {
            Ok(Self::normalized(significand * pow10(magnitude), 0))
        } else {
            Ok(Self::normalized(significand, magnitude))
        }
    }

    /// Convert to a dashu float with exactly the digits of this value
    pub fn to_dbig(&self) -> DBig {
        DBig::from_parts(self.digits.clone(), -(self.scale as isize))
    }

    // ========== Predicates ==========

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.digits == IBig::ZERO
    }

    /// Check if negative
    pub fn is_negative(&self) -> bool {
        is_negative(&self.digits)
    }

    // ========== Basic Arithmetic ==========

    /// Bring both operands to a common scale
    fn aligned(&self, other: &Self) -> (IBig, IBig, u32) {
        let scale = self.scale.max(other.scale);
        let a = &self.digits * pow10(scale - self.scale);
        let b = &other.digits * pow10(scale - other.scale);
        (a, b, scale)
    }

    /// Addition
    pub fn add(&self, other: &Self) -> Self {
        let (a, b, scale) = self.aligned(other);
        Self::normalized(a + b, scale)
    }

    /// Subtraction
    pub fn sub(&self, other: &Self) -> Self {
        let (a, b, scale) = self.aligned(other);
        Self::normalized(a - b, scale)
    }

    /// Multiplication
    pub fn mul(&self, other: &Self) -> Self {
        Self::normalized(&self.digits * &other.digits, self.scale + other.scale)
    }

    /// Multiplication by an integer
    pub fn mul_int(&self, n: &IBig) -> Self {
        Self::normalized(&self.digits * n, self.scale)
    }

    /// Negation
    pub fn neg(&self) -> Self {
        Self { digits: -&self.digits, scale: self.scale }
    }

    /// Absolute value
    pub fn abs(&self) -> Self {
        if self.is_negative() { self.neg() } else { self.clone() }
    }

    /// Multiply by `10^exp` (exact for either sign of `exp`)
    ///
    /// Fails when the resulting scale does not fit a `u32`.
    pub fn checked_shift(&self, exp: i32) -> Result<Self, NumberError> {
        if exp >= 0 {
            return Ok(Self::normalized(&self.digits * pow10(exp.unsigned_abs()), self.scale));
        }
        let scale = self.scale.checked_add(exp.unsigned_abs()).ok_or_else(|| {
            NumberError::ScaleOverflow(format!("{} fraction digits + {}", self.scale, exp.unsigned_abs()))
        })?;
        Ok(Self::normalized(self.digits.clone(), scale))
    }

    /// Division truncated toward zero after `precision` fraction digits
    pub fn checked_div(&self, other: &Self, precision: usize) -> Result<Self, NumberError> {
        if other.is_zero() {
            return Err(NumberError::DivisionByZero);
        }
        let precision = u32::try_from(precision).map_err(|_| {
            NumberError::ParseError(format!("precision {} too large", precision))
        })?;
        let numerator = &self.digits * pow10(precision + other.scale);
        let denominator = &other.digits * pow10(self.scale);
        Ok(Self::normalized(numerator / denominator, precision))
    }

    // ========== Rounding ==========

    /// Floor - largest integer <= x
    pub fn floor(&self) -> IBig {
        floor_div_rem(&self.digits, &pow10(self.scale)).0
    }

    /// Integer part, rounding toward zero
    pub fn trunc(&self) -> IBig {
        &self.digits / pow10(self.scale)
    }

    /// Nearest integer, halves rounded away from zero
    pub fn round(&self) -> IBig {
        let doubled = self.abs().mul_int(&IBig::from(2u8)).add(&Decimal::from(1u8));
        let half_up = floor_div_rem(&doubled.floor(), &IBig::from(2u8)).0;
        if self.is_negative() { -half_up } else { half_up }
    }

    /// `self - floor(self)`, always in `[0, 1)`
    pub fn fract(&self) -> Self {
        self.sub(&Decimal::from(self.floor()))
    }

    /// Floor division by a positive integer: `self == q * n + r` with `0 <= r < n`
    pub fn div_rem_floor(&self, n: &IBig) -> (IBig, Decimal) {
        let (q, _) = floor_div_rem(&self.digits, &(n * pow10(self.scale)));
        let r = self.sub(&Decimal::from(&q * n));
        (q, r)
    }

    /// The first `width` digits of the fractional part of `|self|`, zero padded
    pub fn fraction_digits(&self, width: usize) -> String {
        let fract = self.abs().fract();
        let width_exp = u32::try_from(width).unwrap_or(u32::MAX);
        let digits = (&fract.digits * pow10(width_exp)) / pow10(fract.scale);
        format!("{:0>width$}", digits.to_string(), width = width)
    }
}

// ========== Conversions ==========

impl From<IBig> for Decimal {
    fn from(digits: IBig) -> Self {
        Self { digits, scale: 0 }
    }
}

impl From<&IBig> for Decimal {
    fn from(digits: &IBig) -> Self {
        Self { digits: digits.clone(), scale: 0 }
    }
}

macro_rules! decimal_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Decimal {
            fn from(n: $t) -> Self {
                Self { digits: IBig::from(n), scale: 0 }
            }
        })*
    };
}

decimal_from_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);

impl FromStr for Decimal {
    type Err = NumberError;

    /// Supports: "123", "-3.14", "1.5e10", "602214076e-15"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        // Integer mantissa with exponent: build the parts directly
        if (s.contains('e') || s.contains('E')) && !s.contains('.') {
            let lower = s.to_lowercase();
            if let Some((mantissa, exp)) = lower.split_once('e') {
                let mantissa: IBig = mantissa.parse()
                    .map_err(|_| NumberError::ParseError(s.to_string()))?;
                let exp: isize = exp.parse()
                    .map_err(|_| NumberError::ParseError(s.to_string()))?;
                return Self::from_dbig(DBig::from_parts(mantissa, exp));
            }
        }

        let inner: DBig = s.parse()
            .map_err(|_| NumberError::ParseError(s.to_string()))?;
        Self::from_dbig(inner)
    }
}

// ========== Trait Implementations ==========

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scale == 0 {
            return write!(f, "{}", self.digits);
        }
        let abs = if self.is_negative() { -&self.digits } else { self.digits.clone() };
        let (int_part, frac_part) = floor_div_rem(&abs, &pow10(self.scale));
        let sign = if self.is_negative() { "-" } else { "" };
        write!(
            f,
            "{}{}.{:0>width$}",
            sign,
            int_part,
            frac_part.to_string(),
            width = self.scale as usize
        )
    }
}

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b, _) = self.aligned(other);
        a.cmp(&b)
    }
}
