//! Trait definitions for accessing values from the host environment.
//!
//! NOTE: This is a power user API. Most callers want either the `sys`
//! implementations or [`FixedHostSystem`].

use crate::{
    date::PlainDate, provider::TimeZoneProvider, time::EpochNanoseconds, time::SECONDS_PER_DAY,
    AnniversaryResult, TimeZone,
};

/// The `HostClock` trait defines an accessor to the host's clock.
pub trait HostClock {
    fn get_host_epoch_nanoseconds(&self) -> AnniversaryResult<EpochNanoseconds>;
}

/// The `HostTimeZone` trait defines the host's time zone.
pub trait HostTimeZone {
    fn get_host_time_zone(
        &self,
        provider: &(impl TimeZoneProvider + ?Sized),
    ) -> AnniversaryResult<TimeZone>;
}

/// `HostHooks` marks whether a trait implements the required host hooks with some
/// system methods.
pub trait HostHooks: HostClock + HostTimeZone {
    fn get_system_epoch_nanoseconds(&self) -> AnniversaryResult<EpochNanoseconds> {
        self.get_host_epoch_nanoseconds()
    }

    fn get_system_time_zone(
        &self,
        provider: &(impl TimeZoneProvider + ?Sized),
    ) -> AnniversaryResult<TimeZone> {
        self.get_host_time_zone(provider)
    }
}

// Implement empty providers

impl HostClock for () {
    fn get_host_epoch_nanoseconds(&self) -> AnniversaryResult<EpochNanoseconds> {
        Ok(EpochNanoseconds::from_seconds(0))
    }
}

impl HostTimeZone for () {
    fn get_host_time_zone(
        &self,
        _: &(impl TimeZoneProvider + ?Sized),
    ) -> AnniversaryResult<TimeZone> {
        Ok(TimeZone::utc())
    }
}

impl HostHooks for () {}

/// A host whose clock is stopped at a fixed instant in a fixed time zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedHostSystem {
    epoch_nanoseconds: EpochNanoseconds,
    time_zone: TimeZone,
}

impl FixedHostSystem {
    /// Creates a host that reports `epoch_nanoseconds` in `time_zone`.
    #[must_use]
    pub fn new(epoch_nanoseconds: EpochNanoseconds, time_zone: TimeZone) -> Self {
        Self {
            epoch_nanoseconds,
            time_zone,
        }
    }

    /// Creates a host that reports noon UTC on `date`.
    #[must_use]
    pub fn from_date(date: PlainDate) -> Self {
        let seconds = date.to_epoch_days() * SECONDS_PER_DAY + SECONDS_PER_DAY / 2;
        Self::new(EpochNanoseconds::from_seconds(seconds), TimeZone::utc())
    }
}

impl HostClock for FixedHostSystem {
    fn get_host_epoch_nanoseconds(&self) -> AnniversaryResult<EpochNanoseconds> {
        Ok(self.epoch_nanoseconds)
    }
}

impl HostTimeZone for FixedHostSystem {
    fn get_host_time_zone(
        &self,
        _: &(impl TimeZoneProvider + ?Sized),
    ) -> AnniversaryResult<TimeZone> {
        Ok(self.time_zone.clone())
    }
}

impl HostHooks for FixedHostSystem {}
