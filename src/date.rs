//! This module implements `PlainDate`, a calendar date without a time or time zone.

use core::{fmt, str::FromStr};

use crate::{
    error::AnniversaryError, iso::IsoDate, options::Overflow, parsers, AnniversaryResult,
};

/// A calendar date in the proleptic Gregorian calendar.
///
/// `PlainDate` is used both for the current date read from a host and for
/// the dates the calculations compare against it, such as a birth date.
///
/// ```rust
/// use anniversary::PlainDate;
/// use core::str::FromStr;
///
/// let birth = PlainDate::try_new(1982, 1, 21).unwrap();
/// let today = PlainDate::from_str("2024-06-15").unwrap();
///
/// assert_eq!(birth.completed_years_until(&today), Ok(42));
/// assert_eq!(today.to_string(), "2024-06-15");
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlainDate {
    pub(crate) iso: IsoDate,
}

impl PlainDate {
    /// Creates a new `PlainDate` without validating the fields.
    #[inline]
    #[must_use]
    pub(crate) const fn new_unchecked(iso: IsoDate) -> Self {
        Self { iso }
    }

    /// Creates a new `PlainDate`, rejecting any invalid field.
    #[inline]
    pub fn try_new(year: i32, month: u8, day: u8) -> AnniversaryResult<Self> {
        Self::new_with_overflow(year, month, day, Overflow::Reject)
    }

    /// Creates a new `PlainDate`, constraining any invalid field.
    #[inline]
    pub fn new(year: i32, month: u8, day: u8) -> AnniversaryResult<Self> {
        Self::new_with_overflow(year, month, day, Overflow::Constrain)
    }

    /// Creates a new `PlainDate`, regulating the fields with the provided [`Overflow`].
    pub fn new_with_overflow(
        year: i32,
        month: u8,
        day: u8,
        overflow: Overflow,
    ) -> AnniversaryResult<Self> {
        let iso = IsoDate::new_with_overflow(year, month.into(), day.into(), overflow)?;
        Ok(Self::new_unchecked(iso))
    }

    /// Creates a `PlainDate` from days since 1970-01-01.
    pub fn from_epoch_days(epoch_days: i64) -> AnniversaryResult<Self> {
        IsoDate::from_epoch_days(epoch_days).map(Self::new_unchecked)
    }

    /// Returns the days since 1970-01-01 for this date.
    #[inline]
    #[must_use]
    pub fn to_epoch_days(&self) -> i64 {
        self.iso.to_epoch_days()
    }

    /// Returns the calendar year.
    #[inline]
    #[must_use]
    pub fn year(&self) -> i32 {
        self.iso.year
    }

    /// Returns the calendar month, starting at 1.
    #[inline]
    #[must_use]
    pub fn month(&self) -> u8 {
        self.iso.month
    }

    /// Returns the day of the month, starting at 1.
    #[inline]
    #[must_use]
    pub fn day(&self) -> u8 {
        self.iso.day
    }

    /// Returns whether this date falls in a leap year.
    #[inline]
    #[must_use]
    pub fn in_leap_year(&self) -> bool {
        date_equations::gregorian::is_leap_year(self.iso.year)
    }

    /// Returns the number of whole years completed between this date and `later`.
    ///
    /// The count is the difference in years, less one when the month and day
    /// of `later` fall before the month and day of `self`. Reaching the exact
    /// month and day completes the year. A February 29th is compared as is,
    /// so in a common year its anniversary is completed on March 1st.
    ///
    /// When `later` precedes `self` the result is zero or negative.
    pub fn completed_years_until(&self, later: &Self) -> AnniversaryResult<i32> {
        let years = later
            .iso
            .year
            .checked_sub(self.iso.year)
            .ok_or(AnniversaryError::range().with_message("year difference overflowed."))?;
        if later.iso.month_day_precedes(&self.iso) {
            return Ok(years - 1);
        }
        Ok(years)
    }
}

impl From<IsoDate> for PlainDate {
    fn from(iso: IsoDate) -> Self {
        Self::new_unchecked(iso)
    }
}

impl fmt::Display for PlainDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year = self.iso.year;
        if (0..=9999).contains(&year) {
            write!(f, "{year:04}")?;
        } else {
            let sign = if year < 0 { '-' } else { '+' };
            write!(f, "{sign}{:06}", year.unsigned_abs())?;
        }
        write!(f, "-{:02}-{:02}", self.iso.month, self.iso.day)
    }
}

impl FromStr for PlainDate {
    type Err = AnniversaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parsers::parse_date(s.as_bytes()).map(Self::new_unchecked)
    }
}
