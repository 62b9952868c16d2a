//! The `TimeZoneProvider` trait and its trivial implementation.

use crate::{error::AnniversaryError, AnniversaryResult};

/// The `TimeZoneProvider` trait provides methods required for a provider
/// to implement in order to source named time zone data from that provider.
pub trait TimeZoneProvider {
    /// Returns whether the provider has data for `identifier`.
    fn check_identifier(&self, identifier: &str) -> bool;

    /// Returns the UTC offset in seconds that `identifier` observes at
    /// `epoch_seconds`.
    fn get_named_tz_offset_seconds(
        &self,
        identifier: &str,
        epoch_seconds: i64,
    ) -> AnniversaryResult<i64>;
}

/// A provider without any named time zone data.
///
/// Useful when only fixed offsets are in play.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverProvider;

impl TimeZoneProvider for NeverProvider {
    fn check_identifier(&self, _: &str) -> bool {
        false
    }

    fn get_named_tz_offset_seconds(&self, _: &str, _: i64) -> AnniversaryResult<i64> {
        Err(AnniversaryError::general(
            "Named time zones are not supported by this provider.",
        ))
    }
}
