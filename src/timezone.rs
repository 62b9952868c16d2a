//! This module implements `TimeZone` and `UtcOffset`.

use alloc::string::{String, ToString};
use core::{fmt, iter::Peekable, str::Chars};

use crate::{
    date::PlainDate,
    error::AnniversaryError,
    provider::TimeZoneProvider,
    time::{EpochNanoseconds, SECONDS_PER_DAY},
    AnniversaryResult,
};

const SECONDS_PER_HOUR: i32 = 3_600;

/// A fixed offset from UTC, in seconds east of Greenwich.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcOffset(i32);

impl UtcOffset {
    /// Creates a `UtcOffset` from seconds, which must be less than a day in magnitude.
    pub fn from_seconds(seconds: i32) -> AnniversaryResult<Self> {
        if seconds.unsigned_abs() >= 86_400 {
            return Err(AnniversaryError::range().with_message("UTC offset is out of range."));
        }
        Ok(Self(seconds))
    }

    #[inline]
    #[must_use]
    pub fn seconds(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { '-' } else { '+' };
        let total = self.0.unsigned_abs();
        let hour = total / 3_600;
        let minute = (total % 3_600) / 60;
        let second = total % 60;
        write!(f, "{sign}{hour:02}:{minute:02}")?;
        if second != 0 {
            write!(f, ":{second:02}")?;
        }
        Ok(())
    }
}

/// The time zone used to turn an instant into a local calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TimeZone {
    IanaIdentifier(String),
    UtcOffset(UtcOffset),
}

impl Default for TimeZone {
    fn default() -> Self {
        Self::UtcOffset(UtcOffset::default())
    }
}

impl From<UtcOffset> for TimeZone {
    fn from(value: UtcOffset) -> Self {
        Self::UtcOffset(value)
    }
}

impl TimeZone {
    /// Returns the UTC time zone.
    #[inline]
    #[must_use]
    pub fn utc() -> Self {
        Self::default()
    }

    /// Parses a `TimeZone` from `Z`, `UTC`, a `±HH[:MM[:SS]]` offset, or a
    /// named identifier known to `provider`.
    pub fn try_from_identifier_str_with_provider(
        source: &str,
        provider: &(impl TimeZoneProvider + ?Sized),
    ) -> AnniversaryResult<Self> {
        if source == "Z" || source.eq_ignore_ascii_case("UTC") {
            return Ok(Self::utc());
        }
        let mut cursor = source.chars().peekable();
        if cursor.peek().is_some_and(is_ascii_sign) {
            return parse_offset(&mut cursor).map(Self::UtcOffset);
        } else if provider.check_identifier(source) {
            return Ok(Self::IanaIdentifier(source.to_string()));
        }
        Err(AnniversaryError::range().with_message("Valid time zone was not provided."))
    }

    /// Returns this time zone's identifier.
    #[must_use]
    pub fn identifier(&self) -> String {
        match self {
            Self::IanaIdentifier(id) => id.clone(),
            Self::UtcOffset(offset) => offset.to_string(),
        }
    }

    /// Returns the UTC offset in seconds this time zone observes at `epoch`.
    pub fn offset_seconds_for(
        &self,
        epoch: EpochNanoseconds,
        provider: &(impl TimeZoneProvider + ?Sized),
    ) -> AnniversaryResult<i64> {
        match self {
            Self::UtcOffset(offset) => Ok(i64::from(offset.seconds())),
            Self::IanaIdentifier(identifier) => {
                provider.get_named_tz_offset_seconds(identifier, epoch.as_seconds()?)
            }
        }
    }

    /// Returns the local calendar date at `epoch` in this time zone.
    pub fn get_plain_date_for(
        &self,
        epoch: EpochNanoseconds,
        provider: &(impl TimeZoneProvider + ?Sized),
    ) -> AnniversaryResult<PlainDate> {
        let offset = self.offset_seconds_for(epoch, provider)?;
        let local_seconds = epoch
            .as_seconds()?
            .checked_add(offset)
            .ok_or(AnniversaryError::range().with_message("local time is out of range."))?;
        PlainDate::from_epoch_days(local_seconds.div_euclid(SECONDS_PER_DAY))
    }
}

#[inline]
fn is_ascii_sign(ch: &char) -> bool {
    *ch == '+' || *ch == '-'
}

fn parse_offset(chars: &mut Peekable<Chars<'_>>) -> AnniversaryResult<UtcOffset> {
    let sign = chars.next().map_or(1, |c| if c == '+' { 1 } else { -1 });

    let hour = parse_two_digits(chars)?;
    if hour > 23 {
        return Err(AnniversaryError::range().with_message("Offset hour is out of range."));
    }

    let mut seconds = hour * SECONDS_PER_HOUR;
    let extended = chars.peek() == Some(&':');
    for unit in [60, 1] {
        if chars.peek().is_none() {
            break;
        }
        if extended && chars.next() != Some(':') {
            return Err(AnniversaryError::range().with_message("Invalid offset separator."));
        }
        let value = parse_two_digits(chars)?;
        if value > 59 {
            return Err(AnniversaryError::range().with_message("Offset field is out of range."));
        }
        seconds += value * unit;
    }

    if chars.next().is_some() {
        return Err(AnniversaryError::range().with_message("Unexpected characters in offset."));
    }

    UtcOffset::from_seconds(sign * seconds)
}

fn parse_two_digits(chars: &mut Peekable<Chars<'_>>) -> AnniversaryResult<i32> {
    let mut value = 0;
    for _ in 0..2 {
        let digit = chars
            .next()
            .and_then(|c| c.to_digit(10))
            .ok_or(AnniversaryError::range().with_message("Offset must contain two digits."))?;
        value = value * 10 + digit as i32;
    }
    Ok(value)
}
