//! Proleptic Gregorian calendar calculations.
//!
//! The epoch day conversions shift the calendar so that years begin on
//! March 1st, which moves the leap day to the end of the year and lets
//! month lengths follow a linear pattern. Years are grouped into 400 year
//! eras of exactly 146 097 days.

/// Days between 0000-03-01 and 1970-01-01.
const EPOCH_SHIFT: i64 = 719_468;

const DAYS_IN_ERA: i64 = 146_097;

const DAYS_IN_MONTH: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Returns whether `year` is a leap year.
#[inline]
pub const fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Returns the number of days in `month` of `year`.
///
/// `month` is one based. Months outside of `1..=12` have zero days.
#[inline]
pub const fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        1..=12 => DAYS_IN_MONTH[month as usize - 1],
        _ => 0,
    }
}

/// Returns the days since 1970-01-01 for a valid Gregorian date.
pub const fn epoch_days_from_ymd(year: i32, month: u8, day: u8) -> i64 {
    let year = year as i64 - (month <= 2) as i64;
    let era = year.div_euclid(400);
    let year_of_era = year - era * 400;
    let month = month as i64;
    let shifted_month = if month > 2 { month - 3 } else { month + 9 };
    let day_of_year = (153 * shifted_month + 2) / 5 + day as i64 - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * DAYS_IN_ERA + day_of_era - EPOCH_SHIFT
}

/// Returns the Gregorian `(year, month, day)` for days since 1970-01-01.
///
/// The year is returned as an `i64` since epoch days far from the epoch
/// yield years outside of `i32`. `epoch_days` must not exceed
/// `i64::MAX - 719_468`.
pub const fn ymd_from_epoch_days(epoch_days: i64) -> (i64, u8, u8) {
    let shifted = epoch_days + EPOCH_SHIFT;
    let era = shifted.div_euclid(DAYS_IN_ERA);
    let day_of_era = shifted - era * DAYS_IN_ERA;
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let shifted_month = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * shifted_month + 2) / 5 + 1;
    let month = if shifted_month < 10 {
        shifted_month + 3
    } else {
        shifted_month - 9
    };
    let year = year_of_era + era * 400 + (month <= 2) as i64;
    (year, month as u8, day as u8)
}

/// Returns the day of the week for days since 1970-01-01, where Sunday is 0.
#[inline]
pub const fn day_of_week(epoch_days: i64) -> u8 {
    // 1970-01-01 was a Thursday.
    (epoch_days + 4).rem_euclid(7) as u8
}
