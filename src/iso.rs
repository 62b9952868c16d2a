//! This module implements the internal ISO date slots.
//!
//! An `IsoDate` represents a year, month, and day in the proleptic
//! Gregorian calendar. Construction either trusts the caller
//! (`new_unchecked`) or validates according to an [`Overflow`] option.

use date_equations::gregorian;

use crate::{error::AnniversaryError, options::Overflow, AnniversaryResult};

/// The earliest supported year.
pub(crate) const MIN_ISO_YEAR: i32 = -271_821;
/// The latest supported year.
pub(crate) const MAX_ISO_YEAR: i32 = 275_760;

const MIN_EPOCH_DAYS: i64 = gregorian::epoch_days_from_ymd(MIN_ISO_YEAR, 1, 1);
const MAX_EPOCH_DAYS: i64 = gregorian::epoch_days_from_ymd(MAX_ISO_YEAR, 12, 31);

/// `IsoDate` serves as a record for a year, month, and day.
///
/// Ordering is lexicographic over `(year, month, day)`.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl IsoDate {
    /// Creates a new `IsoDate` without determining the validity.
    pub(crate) const fn new_unchecked(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Creates a new `IsoDate`, regulating the fields with `overflow`.
    pub(crate) fn new_with_overflow(
        year: i32,
        month: i32,
        day: i32,
        overflow: Overflow,
    ) -> AnniversaryResult<Self> {
        if !(MIN_ISO_YEAR..=MAX_ISO_YEAR).contains(&year) {
            return Err(AnniversaryError::range().with_message("year is not within a valid range."));
        }

        match overflow {
            Overflow::Constrain => {
                let month = month.clamp(1, 12);
                let day = constrain_iso_day(year, month, day);
                // NOTE: Values are clamped in a u8 range.
                Ok(Self::new_unchecked(year, month as u8, day))
            }
            Overflow::Reject => {
                if !is_valid_date(year, month, day) {
                    return Err(AnniversaryError::range().with_message("not a valid ISO date."));
                }
                // NOTE: Values have been verified to be in a u8 range.
                Ok(Self::new_unchecked(year, month as u8, day as u8))
            }
        }
    }

    /// Creates an `IsoDate` from days since 1970-01-01.
    pub(crate) fn from_epoch_days(epoch_days: i64) -> AnniversaryResult<Self> {
        let out_of_range =
            || AnniversaryError::range().with_message("epoch days are not within a valid range.");
        if !(MIN_EPOCH_DAYS..=MAX_EPOCH_DAYS).contains(&epoch_days) {
            return Err(out_of_range());
        }
        let (year, month, day) = gregorian::ymd_from_epoch_days(epoch_days);
        let year = i32::try_from(year).map_err(|_| out_of_range())?;
        Ok(Self::new_unchecked(year, month, day))
    }

    /// Returns the days since 1970-01-01 for this date.
    pub(crate) fn to_epoch_days(self) -> i64 {
        gregorian::epoch_days_from_ymd(self.year, self.month, self.day)
    }

    /// Returns whether `(self.month, self.day)` comes before
    /// `(other.month, other.day)` within a year, ignoring the year.
    #[inline]
    pub(crate) fn month_day_precedes(&self, other: &Self) -> bool {
        (self.month, self.day) < (other.month, other.day)
    }
}

#[inline]
// Determines if the month and day are valid for the given year.
fn is_valid_date(year: i32, month: i32, day: i32) -> bool {
    if !(1..=12).contains(&month) {
        return false;
    }
    is_valid_iso_day(year, month, day)
}

#[inline]
pub(crate) fn constrain_iso_day(year: i32, month: i32, day: i32) -> u8 {
    let days_in_month = i32::from(gregorian::days_in_month(year, month as u8));
    day.clamp(1, days_in_month) as u8
}

#[inline]
pub(crate) fn is_valid_iso_day(year: i32, month: i32, day: i32) -> bool {
    let days_in_month = i32::from(gregorian::days_in_month(year, month as u8));
    (1..=days_in_month).contains(&day)
}
