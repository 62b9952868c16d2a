use alloc::string::String;

use crate::host::{HostClock, HostHooks, HostTimeZone};
use crate::now::Now;
use crate::provider::TimeZoneProvider;
use crate::time::EpochNanoseconds;
use crate::{AnniversaryError, AnniversaryResult, TimeZone};

use web_time::{SystemTime, UNIX_EPOCH};

/// The entry point for reading the current date from the host system.
pub struct Anniversary;

impl Anniversary {
    /// Get a `Now` object with a [`LocalHostSystem`], which
    /// will use the host system's time zone.
    pub fn local_now() -> Now<LocalHostSystem> {
        Now::new(LocalHostSystem)
    }

    /// Get a `Now` object with a [`UtcHostSystem`], which
    /// will use a UTC time zone.
    pub fn utc_now() -> Now<UtcHostSystem> {
        Now::new(UtcHostSystem)
    }
}

/// A UTC host system implementation that will return the current time
/// in UTC.
///
/// This implementation is backed by [`std::time::SystemTime`].
#[derive(Debug, Default, Clone, Copy)]
pub struct UtcHostSystem;

impl HostHooks for UtcHostSystem {}

impl HostClock for UtcHostSystem {
    fn get_host_epoch_nanoseconds(&self) -> AnniversaryResult<EpochNanoseconds> {
        get_system_nanoseconds()
    }
}

impl HostTimeZone for UtcHostSystem {
    fn get_host_time_zone(
        &self,
        _: &(impl TimeZoneProvider + ?Sized),
    ) -> AnniversaryResult<TimeZone> {
        Ok(TimeZone::utc())
    }
}

/// A local host system implementation that will return the current time
/// in the system time zone.
///
/// This implementation is backed by [`std::time::SystemTime`] and [`iana_time_zone`].
/// When the system time zone cannot be determined or is unknown to the
/// provider, UTC is used instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalHostSystem;

impl HostHooks for LocalHostSystem {}

impl HostClock for LocalHostSystem {
    fn get_host_epoch_nanoseconds(&self) -> AnniversaryResult<EpochNanoseconds> {
        get_system_nanoseconds()
    }
}

impl HostTimeZone for LocalHostSystem {
    fn get_host_time_zone(
        &self,
        provider: &(impl TimeZoneProvider + ?Sized),
    ) -> AnniversaryResult<TimeZone> {
        let identifier = match get_system_timezone() {
            Ok(identifier) => identifier,
            Err(_e) => {
                #[cfg(feature = "log")]
                log::warn!("falling back to UTC: {_e}");
                return Ok(TimeZone::utc());
            }
        };
        match TimeZone::try_from_identifier_str_with_provider(&identifier, provider) {
            Ok(time_zone) => Ok(time_zone),
            Err(_) => {
                #[cfg(feature = "log")]
                log::warn!("system time zone {identifier} is unknown, falling back to UTC");
                Ok(TimeZone::utc())
            }
        }
    }
}

/// Returns the system time zone identifier.
#[inline]
pub(crate) fn get_system_timezone() -> AnniversaryResult<String> {
    iana_time_zone::get_timezone()
        .map_err(|_| AnniversaryError::general("Error fetching system time zone"))
}

/// Returns the system time in nanoseconds.
pub(crate) fn get_system_nanoseconds() -> AnniversaryResult<EpochNanoseconds> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AnniversaryError::general("Error fetching system time"))
        .map(|d| EpochNanoseconds::from(d.as_nanos() as i128))
}
