//! Years of experience: the current year minus a fixed start year.

use crate::{
    date::PlainDate, error::AnniversaryError, host::HostHooks, now::Now,
    provider::TimeZoneProvider, AnniversaryResult,
};

/// Returns `today`'s year minus `start_year`.
///
/// `start_year` is not validated; a start year after `today` yields a
/// negative count.
///
/// ```rust
/// use anniversary::{years_since_on, PlainDate};
///
/// let today = PlainDate::try_new(2024, 6, 15).unwrap();
/// assert_eq!(years_since_on(today, 2018), Ok(6));
/// assert_eq!(years_since_on(today, 2024), Ok(0));
/// ```
pub fn years_since_on(today: PlainDate, start_year: i32) -> AnniversaryResult<i32> {
    today
        .year()
        .checked_sub(start_year)
        .ok_or(AnniversaryError::range().with_message("year difference overflowed."))
}

impl<H: HostHooks> Now<H> {
    /// Returns the current year minus `start_year`, reading the host once.
    pub fn years_since_with_provider(
        &self,
        start_year: i32,
        provider: &(impl TimeZoneProvider + ?Sized),
    ) -> AnniversaryResult<i32> {
        let today = self.plain_date_iso_with_provider(None, provider)?;
        years_since_on(today, start_year)
    }
}

#[cfg(feature = "tzdb")]
impl<H: HostHooks> Now<H> {
    /// Returns the current year minus `start_year`, reading the host once.
    ///
    /// Enable with the `tzdb` feature flag.
    pub fn years_since(&self, start_year: i32) -> AnniversaryResult<i32> {
        let today = self.plain_date_iso(None)?;
        years_since_on(today, start_year)
    }
}
