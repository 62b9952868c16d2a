//! Age in whole completed years since a birth date.

use crate::{
    date::PlainDate, host::HostHooks, now::Now, options::Overflow, provider::TimeZoneProvider,
    AnniversaryResult,
};

/// Returns the age in whole years of someone born on `birth` as of `today`.
///
/// The age is the difference in years, less one while the birthday has not
/// yet been reached in `today`'s year. On the birthday itself the year counts
/// as completed.
///
/// ```rust
/// use anniversary::{age_on, PlainDate};
///
/// let today = PlainDate::try_new(2024, 6, 15).unwrap();
///
/// let passed = PlainDate::try_new(1982, 1, 21).unwrap();
/// assert_eq!(age_on(passed, today), Ok(42));
///
/// let upcoming = PlainDate::try_new(1982, 12, 25).unwrap();
/// assert_eq!(age_on(upcoming, today), Ok(41));
/// ```
#[inline]
pub fn age_on(birth: PlainDate, today: PlainDate) -> AnniversaryResult<i32> {
    birth.completed_years_until(&today)
}

impl<H: HostHooks> Now<H> {
    /// Returns the current age of someone born on `birth`.
    pub fn age_with_provider(
        &self,
        birth: &PlainDate,
        provider: &(impl TimeZoneProvider + ?Sized),
    ) -> AnniversaryResult<i32> {
        let today = self.plain_date_iso_with_provider(None, provider)?;
        age_on(*birth, today)
    }

    /// Returns the current age for a birth date given as fields.
    ///
    /// Fields that do not form a valid date are a `RangeError`.
    pub fn age_from_birth_date_with_provider(
        &self,
        birth_year: i32,
        birth_month: u8,
        birth_day: u8,
        provider: &(impl TimeZoneProvider + ?Sized),
    ) -> AnniversaryResult<i32> {
        self.age_from_birth_date_with_overflow_and_provider(
            birth_year,
            birth_month,
            birth_day,
            Overflow::Reject,
            provider,
        )
    }

    /// Returns the current age for a birth date given as fields, regulating
    /// invalid fields with `overflow`.
    pub fn age_from_birth_date_with_overflow_and_provider(
        &self,
        birth_year: i32,
        birth_month: u8,
        birth_day: u8,
        overflow: Overflow,
        provider: &(impl TimeZoneProvider + ?Sized),
    ) -> AnniversaryResult<i32> {
        let birth = PlainDate::new_with_overflow(birth_year, birth_month, birth_day, overflow)?;
        self.age_with_provider(&birth, provider)
    }
}

#[cfg(feature = "tzdb")]
impl<H: HostHooks> Now<H> {
    /// Returns the current age of someone born on `birth`.
    ///
    /// Enable with the `tzdb` feature flag.
    pub fn age(&self, birth: &PlainDate) -> AnniversaryResult<i32> {
        let today = self.plain_date_iso(None)?;
        age_on(*birth, today)
    }

    /// Returns the current age for a birth date given as fields.
    ///
    /// Fields that do not form a valid date are a `RangeError`.
    ///
    /// Enable with the `tzdb` feature flag.
    pub fn age_from_birth_date(
        &self,
        birth_year: i32,
        birth_month: u8,
        birth_day: u8,
    ) -> AnniversaryResult<i32> {
        self.age_from_birth_date_with_overflow(birth_year, birth_month, birth_day, Overflow::Reject)
    }

    /// Returns the current age for a birth date given as fields, regulating
    /// invalid fields with `overflow`.
    ///
    /// Enable with the `tzdb` feature flag.
    pub fn age_from_birth_date_with_overflow(
        &self,
        birth_year: i32,
        birth_month: u8,
        birth_day: u8,
        overflow: Overflow,
    ) -> AnniversaryResult<i32> {
        let birth = PlainDate::new_with_overflow(birth_year, birth_month, birth_day, overflow)?;
        self.age(&birth)
    }
}

#[cfg(test)]
mod tests {
    use super::age_on;
    use crate::{
        date::PlainDate, error::ErrorKind, host::FixedHostSystem, now::Now, options::Overflow,
        provider::NeverProvider,
    };

    fn date(year: i32, month: u8, day: u8) -> PlainDate {
        PlainDate::try_new(year, month, day).unwrap()
    }

    fn june_15_2024() -> Now<FixedHostSystem> {
        Now::new(FixedHostSystem::from_date(date(2024, 6, 15)))
    }

    #[test]
    fn birthday_already_passed() {
        assert_eq!(age_on(date(1982, 1, 21), date(2024, 6, 15)), Ok(42));
    }

    #[test]
    fn birthday_not_yet_reached() {
        assert_eq!(age_on(date(1982, 12, 25), date(2024, 6, 15)), Ok(41));
    }

    #[test]
    fn exact_birthday_does_not_decrement() {
        assert_eq!(age_on(date(2000, 6, 15), date(2024, 6, 15)), Ok(24));
    }

    #[test]
    fn later_day_in_the_same_month_decrements() {
        assert_eq!(age_on(date(2000, 6, 16), date(2024, 6, 15)), Ok(23));
        assert_eq!(age_on(date(2000, 6, 14), date(2024, 6, 15)), Ok(24));
    }

    #[test]
    fn later_month_always_decrements() {
        // The day of the birth is earlier than today's day, the month is not.
        assert_eq!(age_on(date(2000, 7, 1), date(2024, 6, 15)), Ok(23));
        assert_eq!(age_on(date(2000, 12, 1), date(2024, 6, 30)), Ok(23));
    }

    #[test]
    fn born_today() {
        assert_eq!(age_on(date(2024, 6, 15), date(2024, 6, 15)), Ok(0));
    }

    #[test]
    fn leap_day_birth_turns_over_on_march_first() {
        let birth = date(2004, 2, 29);
        assert_eq!(age_on(birth, date(2023, 2, 28)), Ok(18));
        assert_eq!(age_on(birth, date(2023, 3, 1)), Ok(19));
        assert_eq!(age_on(birth, date(2024, 2, 28)), Ok(19));
        assert_eq!(age_on(birth, date(2024, 2, 29)), Ok(20));
    }

    #[test]
    fn age_from_fields_on_host() {
        let now = june_15_2024();
        assert_eq!(
            now.age_from_birth_date_with_provider(1982, 1, 21, &NeverProvider),
            Ok(42)
        );
        assert_eq!(
            now.age_from_birth_date_with_provider(1982, 12, 25, &NeverProvider),
            Ok(41)
        );
        assert_eq!(
            now.age_from_birth_date_with_provider(2000, 6, 15, &NeverProvider),
            Ok(24)
        );
        assert_eq!(
            now.age_with_provider(&date(1990, 6, 16), &NeverProvider),
            Ok(33)
        );
    }

    #[test]
    fn invalid_fields_are_rejected() {
        let now = june_15_2024();
        let feb_30 = now.age_from_birth_date_with_provider(1990, 2, 30, &NeverProvider);
        assert_eq!(feb_30.map_err(|e| e.kind()), Err(ErrorKind::Range));

        let month_13 = now.age_from_birth_date_with_provider(1990, 13, 1, &NeverProvider);
        assert!(month_13.is_err());
    }

    #[test]
    fn invalid_fields_can_be_constrained() {
        let now = june_15_2024();
        // 1990-02-30 becomes 1990-02-28.
        let feb_30 = now.age_from_birth_date_with_overflow_and_provider(
            1990,
            2,
            30,
            Overflow::Constrain,
            &NeverProvider,
        );
        assert_eq!(feb_30, Ok(34));

        // 1990-13-01 becomes 1990-12-01, not yet reached in June.
        let month_13 = now.age_from_birth_date_with_overflow_and_provider(
            1990,
            13,
            1,
            Overflow::Constrain,
            &NeverProvider,
        );
        assert_eq!(month_13, Ok(33));
    }

    #[cfg(feature = "tzdb")]
    #[test]
    fn age_with_bundled_data() {
        let now = june_15_2024();
        assert_eq!(now.age_from_birth_date(1982, 1, 21), Ok(42));
        assert_eq!(now.age(&date(1982, 12, 25)), Ok(41));
        assert!(now.age_from_birth_date(1982, 2, 30).is_err());
        assert_eq!(
            now.age_from_birth_date_with_overflow(1982, 2, 30, Overflow::Constrain),
            Ok(42)
        );
    }
}
