//! Instants as reported by a host clock.

use crate::{error::AnniversaryError, AnniversaryResult};

pub(crate) const NS_PER_SECOND: i128 = 1_000_000_000;
pub(crate) const SECONDS_PER_DAY: i64 = 86_400;

/// Nanoseconds since the Unix epoch, `1970-01-01T00:00:00Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct EpochNanoseconds(pub(crate) i128);

impl From<i128> for EpochNanoseconds {
    fn from(value: i128) -> Self {
        Self(value)
    }
}

impl EpochNanoseconds {
    /// Creates an `EpochNanoseconds` from whole seconds since the epoch.
    #[inline]
    #[must_use]
    pub fn from_seconds(seconds: i64) -> Self {
        Self(i128::from(seconds) * NS_PER_SECOND)
    }

    /// Returns the nanoseconds since the epoch.
    #[inline]
    #[must_use]
    pub fn as_i128(&self) -> i128 {
        self.0
    }

    /// Returns the whole seconds since the epoch, rounded towards negative infinity.
    pub fn as_seconds(&self) -> AnniversaryResult<i64> {
        i64::try_from(self.0.div_euclid(NS_PER_SECOND)).map_err(|_| {
            AnniversaryError::range()
                .with_message("epoch nanoseconds are not within a valid range.")
        })
    }
}
