//! Time zone providers backed by TZif data.
//!
//! `TZif` stands for Time zone information format and is laid out by
//! [RFC 8536][rfc8536] and the [tzfile manual][tzif-manual]. Parsing is done by
//! the `tzif` [crate][tzif-crate]; this module answers a single question with
//! the parsed data: what UTC offset is in effect at a given instant.
//!
//! Lookups binary search the transition table. Instants past the final
//! transition are resolved with the POSIX TZ string in the file's footer.
//!
//! [rfc8536]: https://datatracker.ietf.org/doc/html/rfc8536
//! [tzif-manual]: https://man7.org/linux/man-pages/man5/tzfile.5.html
//! [tzif-crate]: https://docs.rs/tzif/latest/tzif/

use std::path::Path;
#[cfg(not(target_os = "windows"))]
use std::path::PathBuf;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use core::cell::RefCell;

use combine::Parser;
use date_equations::gregorian;
use tzif::data::{
    posix::{PosixTzString, TransitionDay, TimeZoneVariantInfo},
    time::Seconds,
    tzif::{DataBlock, LocalTimeTypeRecord, TzifData},
};

use crate::{
    error::AnniversaryError, provider::TimeZoneProvider, time::SECONDS_PER_DAY,
    AnniversaryResult,
};

#[cfg(not(target_os = "windows"))]
const ZONEINFO_DIR: &str = "/usr/share/zoneinfo/";

/// `LocalTimeRecord` represents a local time offset record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalTimeRecord {
    /// Whether the local time record is a Daylight Savings Time.
    pub is_dst: bool,
    /// The time zone offset in seconds.
    pub offset: i64,
}

impl LocalTimeRecord {
    // POSIX TZ strings store offsets as seconds west of UTC.
    fn from_daylight_savings_time(info: &TimeZoneVariantInfo) -> Self {
        Self {
            is_dst: true,
            offset: -info.offset.0,
        }
    }

    fn from_standard_time(info: &TimeZoneVariantInfo) -> Self {
        Self {
            is_dst: false,
            offset: -info.offset.0,
        }
    }
}

impl From<LocalTimeTypeRecord> for LocalTimeRecord {
    fn from(value: LocalTimeTypeRecord) -> Self {
        Self {
            is_dst: value.is_dst,
            offset: value.utoff.0,
        }
    }
}

/// A parsed TZif file.
#[derive(Debug, Clone)]
pub struct Tzif {
    data_block1: DataBlock,
    data_block2: Option<DataBlock>,
    footer: Option<PosixTzString>,
}

impl From<TzifData> for Tzif {
    fn from(value: TzifData) -> Self {
        let TzifData {
            data_block1,
            data_block2,
            footer,
            ..
        } = value;

        Self {
            data_block1,
            data_block2,
            footer,
        }
    }
}

impl Tzif {
    pub fn from_bytes(data: &[u8]) -> AnniversaryResult<Self> {
        let Ok((parse_result, _)) = tzif::parse::tzif::tzif().parse(data) else {
            return Err(AnniversaryError::general("Illformed Tzif data."));
        };
        Ok(Self::from(parse_result))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> AnniversaryResult<Self> {
        tzif::parse_tzif_file(path.as_ref())
            .map(Into::into)
            .map_err(|e| AnniversaryError::general(e.to_string()))
    }

    pub fn posix_tz_string(&self) -> Option<&PosixTzString> {
        self.footer.as_ref()
    }

    /// Returns the 64-bit data block when present, otherwise the version 1 block.
    fn data_block(&self) -> &DataBlock {
        self.data_block2.as_ref().unwrap_or(&self.data_block1)
    }

    /// Returns the local time record in effect at `epoch_seconds`.
    pub fn get(&self, epoch_seconds: i64) -> AnniversaryResult<LocalTimeRecord> {
        let db = self.data_block();

        match db.transition_times.binary_search(&Seconds(epoch_seconds)) {
            // A transition takes effect at its own instant.
            Ok(idx) => get_local_record(db, idx),
            // <https://datatracker.ietf.org/doc/html/rfc8536#section-3.2>
            // If there are no transitions, local time for all timestamps is specified by the TZ
            // string in the footer if present and nonempty; otherwise, it is
            // specified by time type 0.
            Err(_) if db.transition_times.is_empty() => match self.posix_tz_string() {
                Some(posix_tz_string) => {
                    resolve_posix_tz_string_for_epoch_seconds(posix_tz_string, epoch_seconds)
                }
                None => first_local_record(db),
            },
            // Timestamps before the first transition use time type 0.
            Err(0) => first_local_record(db),
            Err(idx) if idx == db.transition_times.len() => match self.posix_tz_string() {
                Some(posix_tz_string) => {
                    resolve_posix_tz_string_for_epoch_seconds(posix_tz_string, epoch_seconds)
                }
                None => get_local_record(db, idx - 1),
            },
            Err(idx) => get_local_record(db, idx - 1),
        }
    }
}

#[inline]
fn first_local_record(db: &DataBlock) -> AnniversaryResult<LocalTimeRecord> {
    db.local_time_type_records
        .first()
        .copied()
        .map(Into::into)
        .ok_or(AnniversaryError::general("Tzif data has no local time types."))
}

#[inline]
fn get_local_record(db: &DataBlock, idx: usize) -> AnniversaryResult<LocalTimeRecord> {
    // NOTE: Transition type can be empty. If no transition_type exists,
    // then use 0 as the default index of local_time_type_records.
    let type_idx = db.transition_types.get(idx).copied().unwrap_or(0);
    db.local_time_type_records
        .get(type_idx)
        .copied()
        .map(Into::into)
        .ok_or(AnniversaryError::general("Tzif transition type is out of range."))
}

/// Resolves a footer for an instant past the transition table.
fn resolve_posix_tz_string_for_epoch_seconds(
    posix_tz_string: &PosixTzString,
    seconds: i64,
) -> AnniversaryResult<LocalTimeRecord> {
    let std = LocalTimeRecord::from_standard_time(&posix_tz_string.std_info);
    let Some(dst_variant) = &posix_tz_string.dst_info else {
        // Regardless of the time, there is one variant and we can return it.
        return Ok(std);
    };
    let dst = LocalTimeRecord::from_daylight_savings_time(&dst_variant.variant_info);

    #[cfg(feature = "log")]
    log::trace!("resolving POSIX TZ string for epoch seconds {seconds}");

    let out_of_range = || AnniversaryError::range().with_message("instant is out of range.");
    let local_seconds = seconds.checked_add(std.offset).ok_or_else(out_of_range)?;
    let (year, _, _) = gregorian::ymd_from_epoch_days(local_seconds.div_euclid(SECONDS_PER_DAY));
    let year = i32::try_from(year).map_err(|_| out_of_range())?;

    // The start of DST is expressed in standard time, the end in DST.
    let start = transition_epoch_seconds(
        year,
        &dst_variant.start_date.day,
        dst_variant.start_date.time.0,
        std.offset,
    )?;
    let end = transition_epoch_seconds(
        year,
        &dst_variant.end_date.day,
        dst_variant.end_date.time.0,
        dst.offset,
    )?;

    // Southern hemisphere zones observe DST across the new year.
    let is_dst = if start <= end {
        start <= seconds && seconds < end
    } else {
        seconds < end || start <= seconds
    };

    Ok(if is_dst { dst } else { std })
}

/// Returns the UTC epoch seconds of a POSIX rule transition in `year`.
///
/// `time` is the local wall clock time of the transition and `offset` is the
/// offset in effect just before it.
fn transition_epoch_seconds(
    year: i32,
    day: &TransitionDay,
    time: i64,
    offset: i64,
) -> AnniversaryResult<i64> {
    let year_start = gregorian::epoch_days_from_ymd(year, 1, 1);
    let epoch_days = match *day {
        // `Jn`: 1 based, February 29th is never counted.
        TransitionDay::NoLeap(day) => {
            let leap_day = u16::from(gregorian::is_leap_year(year) && day > 59);
            year_start + i64::from(day) - 1 + i64::from(leap_day)
        }
        // `n`: 0 based, February 29th is counted.
        TransitionDay::WithLeap(day) => year_start + i64::from(day),
        // `Mm.w.d`: day `d` of week `w` of month `m`, week 5 being the last.
        TransitionDay::Mwd(month, week, weekday) => {
            let month = u8::try_from(month)
                .ok()
                .filter(|m| (1..=12).contains(m))
                .ok_or(AnniversaryError::general("Invalid POSIX TZ string month."))?;
            let first = gregorian::epoch_days_from_ymd(year, month, 1);
            let first_weekday = i64::from(gregorian::day_of_week(first));
            let mut day_of_month =
                (i64::from(weekday) - first_weekday).rem_euclid(7) + (i64::from(week) - 1) * 7;
            let days_in_month = i64::from(gregorian::days_in_month(year, month));
            while day_of_month >= days_in_month {
                day_of_month -= 7;
            }
            first + day_of_month
        }
    };
    epoch_days
        .checked_mul(SECONDS_PER_DAY)
        .and_then(|seconds| seconds.checked_add(time))
        .and_then(|seconds| seconds.checked_sub(offset))
        .ok_or_else(|| AnniversaryError::range().with_message("transition is out of range."))
}

/// Rejects identifiers that could escape the zoneinfo directory.
#[cfg(not(target_os = "windows"))]
fn is_plausible_identifier(identifier: &str) -> bool {
    !identifier.is_empty()
        && !identifier.starts_with('/')
        && identifier
            .split('/')
            .all(|part| !part.is_empty() && part != "." && part != "..")
}

/// A provider for the time zone data bundled with the crate through `jiff-tzdb`.
#[derive(Debug, Default)]
pub struct CompiledTzdbProvider {
    cache: RefCell<BTreeMap<String, Tzif>>,
}

impl CompiledTzdbProvider {
    fn with_tzif<T>(
        &self,
        identifier: &str,
        f: impl FnOnce(&Tzif) -> AnniversaryResult<T>,
    ) -> AnniversaryResult<T> {
        if let Some(tzif) = self.cache.borrow().get(identifier) {
            return f(tzif);
        }

        #[cfg(feature = "log")]
        log::debug!("loading bundled time zone data for {identifier}");

        let Some((_, data)) = jiff_tzdb::get(identifier) else {
            return Err(
                AnniversaryError::range().with_message("Time zone identifier does not exist.")
            );
        };
        let tzif = Tzif::from_bytes(data)?;
        let result = f(&tzif);
        self.cache.borrow_mut().insert(identifier.into(), tzif);
        result
    }
}

impl TimeZoneProvider for CompiledTzdbProvider {
    fn check_identifier(&self, identifier: &str) -> bool {
        jiff_tzdb::get(identifier).is_some()
    }

    fn get_named_tz_offset_seconds(
        &self,
        identifier: &str,
        epoch_seconds: i64,
    ) -> AnniversaryResult<i64> {
        self.with_tzif(identifier, |tzif| tzif.get(epoch_seconds))
            .map(|record| record.offset)
    }
}

/// A provider that reads the host's zoneinfo directory, falling back to the
/// bundled data for identifiers the host does not have.
#[derive(Debug, Default)]
pub struct FsTzdbProvider {
    cache: RefCell<BTreeMap<String, Tzif>>,
}

impl FsTzdbProvider {
    #[cfg(not(target_os = "windows"))]
    fn load_from_zoneinfo(identifier: &str) -> Option<AnniversaryResult<Tzif>> {
        if !is_plausible_identifier(identifier) {
            return None;
        }
        let mut path = PathBuf::from(ZONEINFO_DIR);
        path.push(identifier);
        path.is_file().then(|| Tzif::from_path(&path))
    }

    #[cfg(target_os = "windows")]
    fn load_from_zoneinfo(_: &str) -> Option<AnniversaryResult<Tzif>> {
        None
    }

    fn load(identifier: &str) -> AnniversaryResult<Tzif> {
        if let Some(tzif) = Self::load_from_zoneinfo(identifier) {
            return tzif;
        }

        #[cfg(feature = "log")]
        log::debug!("{identifier} not found on the host, using bundled time zone data");

        let Some((_, data)) = jiff_tzdb::get(identifier) else {
            return Err(
                AnniversaryError::range().with_message("Time zone identifier does not exist.")
            );
        };
        Tzif::from_bytes(data)
    }

    fn with_tzif<T>(
        &self,
        identifier: &str,
        f: impl FnOnce(&Tzif) -> AnniversaryResult<T>,
    ) -> AnniversaryResult<T> {
        if let Some(tzif) = self.cache.borrow().get(identifier) {
            return f(tzif);
        }
        let tzif = Self::load(identifier)?;
        let result = f(&tzif);
        self.cache.borrow_mut().insert(identifier.into(), tzif);
        result
    }
}

impl TimeZoneProvider for FsTzdbProvider {
    fn check_identifier(&self, identifier: &str) -> bool {
        self.with_tzif(identifier, |_| Ok(())).is_ok()
    }

    fn get_named_tz_offset_seconds(
        &self,
        identifier: &str,
        epoch_seconds: i64,
    ) -> AnniversaryResult<i64> {
        self.with_tzif(identifier, |tzif| tzif.get(epoch_seconds))
            .map(|record| record.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::{CompiledTzdbProvider, FsTzdbProvider, LocalTimeRecord, Tzif};
    use crate::{
        date::PlainDate,
        error::ErrorKind,
        host::FixedHostSystem,
        now::Now,
        provider::TimeZoneProvider,
        time::{EpochNanoseconds, SECONDS_PER_DAY},
        TimeZone,
    };
    use date_equations::gregorian;

    fn date_time_to_seconds(date: (i32, u8, u8), time: (u8, u8, u8)) -> i64 {
        let time_in_seconds = i64::from(time.0) * 3600 + i64::from(time.1) * 60 + i64::from(time.2);
        let epoch_days = gregorian::epoch_days_from_ymd(date.0, date.1, date.2);
        time_in_seconds + epoch_days * SECONDS_PER_DAY
    }

    fn bundled(identifier: &str) -> Tzif {
        let (_, data) = jiff_tzdb::get(identifier).unwrap();
        Tzif::from_bytes(data).unwrap()
    }

    #[test]
    fn new_york_standard_and_daylight_time() {
        let new_york = bundled("America/New_York");

        let winter = date_time_to_seconds((2024, 1, 15), (12, 0, 0));
        assert_eq!(
            new_york.get(winter).unwrap(),
            LocalTimeRecord {
                is_dst: false,
                offset: -18_000
            }
        );

        let summer = date_time_to_seconds((2024, 7, 4), (12, 0, 0));
        assert_eq!(
            new_york.get(summer).unwrap(),
            LocalTimeRecord {
                is_dst: true,
                offset: -14_400
            }
        );
    }

    #[test]
    fn new_york_transition_instant() {
        let new_york = bundled("America/New_York");

        // 2017-03-12T02:00:00-05:00
        let transition = date_time_to_seconds((2017, 3, 12), (7, 0, 0));
        assert_eq!(new_york.get(transition - 1).unwrap().offset, -18_000);
        assert_eq!(new_york.get(transition).unwrap().offset, -14_400);

        // 2017-11-05T02:00:00-04:00
        let transition = date_time_to_seconds((2017, 11, 5), (6, 0, 0));
        assert_eq!(new_york.get(transition - 1).unwrap().offset, -14_400);
        assert_eq!(new_york.get(transition).unwrap().offset, -18_000);
    }

    #[test]
    fn new_york_past_transition_table() {
        let new_york = bundled("America/New_York");

        let winter = date_time_to_seconds((2060, 1, 1), (12, 0, 0));
        assert_eq!(new_york.get(winter).unwrap().offset, -18_000);

        let summer = date_time_to_seconds((2060, 7, 1), (12, 0, 0));
        assert_eq!(new_york.get(summer).unwrap().offset, -14_400);

        // Second Sunday of March 2060 is the 14th.
        let transition = date_time_to_seconds((2060, 3, 14), (7, 0, 0));
        assert_eq!(new_york.get(transition - 1).unwrap().offset, -18_000);
        assert_eq!(new_york.get(transition).unwrap().offset, -14_400);

        // First Sunday of November 2060 is the 7th.
        let transition = date_time_to_seconds((2060, 11, 7), (6, 0, 0));
        assert_eq!(new_york.get(transition - 1).unwrap().offset, -14_400);
        assert_eq!(new_york.get(transition).unwrap().offset, -18_000);
    }

    #[test]
    fn sydney_daylight_time_spans_new_year() {
        let sydney = bundled("Australia/Sydney");

        let january = date_time_to_seconds((2060, 1, 1), (12, 0, 0));
        assert_eq!(
            sydney.get(january).unwrap(),
            LocalTimeRecord {
                is_dst: true,
                offset: 39_600
            }
        );

        let july = date_time_to_seconds((2060, 7, 1), (12, 0, 0));
        assert_eq!(
            sydney.get(july).unwrap(),
            LocalTimeRecord {
                is_dst: false,
                offset: 36_000
            }
        );
    }

    #[test]
    fn fixed_zones() {
        let tokyo = bundled("Asia/Tokyo");
        let seconds = date_time_to_seconds((2060, 7, 1), (12, 0, 0));
        assert_eq!(tokyo.get(seconds).unwrap().offset, 32_400);

        let utc = bundled("UTC");
        assert_eq!(utc.get(seconds).unwrap().offset, 0);
        assert!(!utc.get(seconds).unwrap().is_dst);
    }

    #[test]
    fn extreme_instants_are_range_errors() {
        let berlin = bundled("Europe/Berlin");
        assert_eq!(berlin.get(i64::MAX).map_err(|e| e.kind()), Err(ErrorKind::Range));
        // The footer year no longer fits in an `i32`.
        assert_eq!(berlin.get(1 << 60).map_err(|e| e.kind()), Err(ErrorKind::Range));
        // Before the first transition the first local time type applies.
        assert!(berlin.get(i64::MIN).is_ok());

        let provider = CompiledTzdbProvider::default();
        let zone =
            TimeZone::try_from_identifier_str_with_provider("Europe/Berlin", &provider).unwrap();
        for seconds in [i64::MAX, i64::MIN] {
            let host = FixedHostSystem::new(EpochNanoseconds::from_seconds(seconds), zone.clone());
            let years = Now::new(host).years_since(2018);
            assert_eq!(years.map_err(|e| e.kind()), Err(ErrorKind::Range));
        }
    }

    #[test]
    fn compiled_provider() {
        let provider = CompiledTzdbProvider::default();
        assert!(provider.check_identifier("America/New_York"));
        assert!(provider.check_identifier("Europe/Berlin"));
        assert!(!provider.check_identifier("Mars/Olympus_Mons"));

        let summer = date_time_to_seconds((2024, 7, 4), (12, 0, 0));
        assert_eq!(
            provider.get_named_tz_offset_seconds("Europe/Berlin", summer),
            Ok(7_200)
        );
        // Served from the cache the second time.
        assert_eq!(
            provider.get_named_tz_offset_seconds("Europe/Berlin", summer),
            Ok(7_200)
        );
        assert!(provider
            .get_named_tz_offset_seconds("Mars/Olympus_Mons", summer)
            .is_err());
    }

    #[test]
    fn fs_provider_falls_back_to_bundled_data() {
        let provider = FsTzdbProvider::default();
        assert!(provider.check_identifier("America/Chicago"));
        assert!(!provider.check_identifier("../../etc/passwd"));
        assert!(!provider.check_identifier("Mars/Olympus_Mons"));

        let winter = date_time_to_seconds((2024, 1, 15), (12, 0, 0));
        assert_eq!(
            provider.get_named_tz_offset_seconds("America/Chicago", winter),
            Ok(-21_600)
        );
    }

    #[test]
    fn local_date_follows_named_zone() {
        let provider = CompiledTzdbProvider::default();
        let new_york =
            TimeZone::try_from_identifier_str_with_provider("America/New_York", &provider)
                .unwrap();

        // 2024-06-15T02:00:00Z is still June 14th in New York.
        let epoch = EpochNanoseconds::from_seconds(date_time_to_seconds((2024, 6, 15), (2, 0, 0)));
        assert_eq!(
            new_york.get_plain_date_for(epoch, &provider),
            PlainDate::try_new(2024, 6, 14)
        );

        let now = Now::new(FixedHostSystem::new(epoch, new_york));
        assert_eq!(now.age_from_birth_date(2000, 6, 15), Ok(23));
        assert_eq!(now.plain_date_iso(Some(TimeZone::utc())), PlainDate::try_new(2024, 6, 15));
    }
}
