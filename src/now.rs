//! The `Now` component, the crate's view of the current date.

use crate::{
    date::PlainDate, host::HostHooks, provider::TimeZoneProvider, AnniversaryResult, TimeZone,
};

/// The current date as seen by a host.
///
/// Every read asks the host again; nothing is cached between calls.
pub struct Now<H: HostHooks> {
    host_hooks: H,
}

impl<H: HostHooks> Now<H> {
    /// Creates a `Now` that reads the current date from `host_hooks`.
    pub fn new(host_hooks: H) -> Self {
        Self { host_hooks }
    }

    /// Returns a reference to the host hooks.
    pub fn host(&self) -> &H {
        &self.host_hooks
    }

    /// Returns the current date in `time_zone`, or in the host's time zone when
    /// `None`.
    ///
    /// ## Order of operations
    ///
    /// The time zone is resolved before the host clock is read:
    ///
    ///   1. Resolve user input `TimeZone` with the host time zone.
    ///   2. Get the host epoch nanoseconds.
    ///   3. Convert the instant into a local date.
    pub fn plain_date_iso_with_provider(
        &self,
        time_zone: Option<TimeZone>,
        provider: &(impl TimeZoneProvider + ?Sized),
    ) -> AnniversaryResult<PlainDate> {
        let time_zone = match time_zone {
            Some(time_zone) => time_zone,
            None => self.host_hooks.get_system_time_zone(provider)?,
        };
        let epoch = self.host_hooks.get_system_epoch_nanoseconds()?;
        time_zone.get_plain_date_for(epoch, provider)
    }
}

#[cfg(feature = "tzdb")]
impl<H: HostHooks> Now<H> {
    /// Returns the current date in `time_zone`, or in the host's time zone when
    /// `None`, resolving named zones with the bundled time zone data.
    ///
    /// Enable with the `tzdb` feature flag.
    pub fn plain_date_iso(&self, time_zone: Option<TimeZone>) -> AnniversaryResult<PlainDate> {
        let provider = crate::tzdb::CompiledTzdbProvider::default();
        self.plain_date_iso_with_provider(time_zone, &provider)
    }
}

#[cfg(test)]
mod tests {
    use super::Now;
    use crate::{
        date::PlainDate,
        host::{FixedHostSystem, HostClock, HostHooks, HostTimeZone},
        provider::{NeverProvider, TimeZoneProvider},
        time::EpochNanoseconds,
        AnniversaryResult, TimeZone, UtcOffset,
    };
    use core::cell::Cell;

    #[test]
    fn unit_host_is_the_epoch() {
        let now = Now::new(());
        let date = now.plain_date_iso_with_provider(None, &NeverProvider);
        assert_eq!(date, PlainDate::try_new(1970, 1, 1));
    }

    #[test]
    fn fixed_host_date() {
        let today = PlainDate::try_new(2024, 6, 15).unwrap();
        let now = Now::new(FixedHostSystem::from_date(today));
        assert_eq!(
            now.plain_date_iso_with_provider(None, &NeverProvider),
            Ok(today)
        );

        // Noon UTC is already the next day at +13:00.
        let tonga = TimeZone::from(UtcOffset::from_seconds(13 * 3_600).unwrap());
        assert_eq!(
            now.plain_date_iso_with_provider(Some(tonga), &NeverProvider),
            PlainDate::try_new(2024, 6, 16)
        );
    }

    #[derive(Default)]
    struct RecordingHost {
        step: Cell<u8>,
        time_zone_step: Cell<u8>,
        clock_step: Cell<u8>,
    }

    impl RecordingHost {
        fn tick(&self) -> u8 {
            self.step.set(self.step.get() + 1);
            self.step.get()
        }
    }

    impl HostClock for RecordingHost {
        fn get_host_epoch_nanoseconds(&self) -> AnniversaryResult<EpochNanoseconds> {
            self.clock_step.set(self.tick());
            Ok(EpochNanoseconds::from_seconds(1_718_452_800))
        }
    }

    impl HostTimeZone for RecordingHost {
        fn get_host_time_zone(
            &self,
            _: &(impl TimeZoneProvider + ?Sized),
        ) -> AnniversaryResult<TimeZone> {
            self.time_zone_step.set(self.tick());
            Ok(TimeZone::utc())
        }
    }

    impl HostHooks for RecordingHost {}

    #[test]
    fn time_zone_is_resolved_before_the_clock() {
        let now = Now::new(RecordingHost::default());
        let date = now.plain_date_iso_with_provider(None, &NeverProvider);
        assert_eq!(date, PlainDate::try_new(2024, 6, 15));
        assert_eq!(now.host().time_zone_step.get(), 1);
        assert_eq!(now.host().clock_step.get(), 2);

        // A second read asks the host again.
        let _ = now.plain_date_iso_with_provider(None, &NeverProvider);
        assert_eq!(now.host().clock_step.get(), 4);
    }

    #[test]
    fn explicit_time_zone_skips_host_time_zone() {
        let now = Now::new(RecordingHost::default());
        let _ = now.plain_date_iso_with_provider(Some(TimeZone::utc()), &NeverProvider);
        assert_eq!(now.host().time_zone_step.get(), 0);
        assert_eq!(now.host().clock_step.get(), 1);
    }
}
