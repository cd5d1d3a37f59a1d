//! Constant-time civil date conversions for the proleptic Gregorian calendar
//!
//! Day counts are measured from 0000-01-01 (day 0) and may be any size.
//! Only the 400-year era count is arbitrary precision; everything inside an
//! era fits in machine integers.

use crate::number::floor_div_rem;
use dashu_int::IBig;

/// Length of year 0, which is a leap year
const DAYS_IN_YEAR_ZERO: i64 = 366;

/// Days from 0000-03-01 to 0001-01-01
const MARCH_SHIFT: i64 = 306;

const DAYS_IN_ERA: i64 = 146_097;

/// ceil(2^32 / 1461): fixed-point reciprocal of the 4-year cycle length
const EAF_MULTIPLIER: u64 = 2_939_745;
const EAF_DIVIDER: u64 = 4 * EAF_MULTIPLIER;

/// Day count to (year, month, day)
///
/// Euclidean affine transforms (Neri & Schneider, "Euclidean affine functions
/// and their application to calendar algorithms") over a March-based year.
pub fn civil_from_days(days: &IBig) -> (IBig, u32, u32) {
    // Step from the year-0 timeline into the common-era day count, then
    // re-index from 0000-03-01 so the leap day ends the computational year.
    let ce_days = days - IBig::from(DAYS_IN_YEAR_ZERO);
    let n = ce_days + IBig::from(MARCH_SHIFT);

    // Century
    let n_1 = IBig::from(4) * n + IBig::from(3);
    let (century, rem) = floor_div_rem(&n_1, &IBig::from(DAYS_IN_ERA));
    // rem is in [0, 146097), so the rest runs in u64
    let n_c = u64::try_from(rem).unwrap_or_default() / 4;

    // Year
    let n_2 = 4 * n_c + 3;
    let p_2 = EAF_MULTIPLIER * n_2;
    let year_of_century = p_2 >> 32;
    let march_day = (p_2 & 0xFFFF_FFFF) / EAF_DIVIDER;
    let year = IBig::from(100) * century + IBig::from(year_of_century);

    // Month and day
    let n_3 = 2141 * march_day + 197_913;
    let month = (n_3 >> 16) as u32;
    let day = ((n_3 & 0xFFFF) / 2141) as u32 + 1;

    // January and February belong to the next civil year
    if march_day >= 306 {
        (year + IBig::ONE, month - 12, day)
    } else {
        (year, month, day)
    }
}

/// (year, month, day) to day count
///
/// Algorithm from Howard Hinnant: http://howardhinnant.github.io/date_algorithms.html
pub fn days_from_civil(year: &IBig, month: u32, day: u32) -> IBig {
    let y = if month <= 2 { year - IBig::ONE } else { year.clone() };
    let (era, yoe) = floor_div_rem(&y, &IBig::from(400));
    let yoe = u64::try_from(yoe).unwrap_or_default(); // [0, 399]
    let m = month as u64;
    let doy = (153 * (if m > 2 { m - 3 } else { m + 9 }) + 2) / 5 + day as u64 - 1; // [0, 365]
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy; // [0, 146096]
    // Hinnant counts from 0000-03-01, which is day 60 of year 0
    era * IBig::from(DAYS_IN_ERA) + IBig::from(doe) + IBig::from(60)
}
