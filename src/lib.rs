//! The `anniversary` crate counts completed years against the current
//! calendar date: years of experience since a start year, and age since a
//! birth date.
//!
//! ```rust
//! use anniversary::{FixedHostSystem, Now, PlainDate};
//!
//! // Any host can stand in for the system clock.
//! let today = PlainDate::try_new(2024, 6, 15).unwrap();
//! let now = Now::new(FixedHostSystem::from_date(today));
//!
//! assert_eq!(now.years_since(2018), Ok(6));
//! assert_eq!(now.age_from_birth_date(1982, 1, 21), Ok(42));
//! assert_eq!(now.age_from_birth_date(1982, 12, 25), Ok(41));
//!
//! // Fields that do not form a date are rejected.
//! assert!(now.age_from_birth_date(1982, 2, 30).is_err());
//! ```
//!
//! With the default `sys` feature, [`Anniversary::local_now`] reads the host's
//! clock and time zone:
//!
//! ```rust,no_run
//! use anniversary::Anniversary;
//!
//! let years_of_experience = Anniversary::local_now().years_since(2018).unwrap();
//! let age = Anniversary::local_now().age_from_birth_date(1982, 1, 21).unwrap();
//! ```
//!
//! The current date is never cached: every call asks the host again.
#![no_std]
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
)]

extern crate alloc;
extern crate core;

#[cfg(feature = "std")]
extern crate std;

pub mod error;
pub mod host;
pub mod iso;
pub mod options;
pub mod provider;
pub mod time;

mod age;
mod date;
mod experience;
mod now;
mod parsers;
mod timezone;

#[cfg(feature = "sys")]
mod sys;

#[cfg(feature = "tzdb")]
pub mod tzdb;

#[doc(inline)]
pub use error::AnniversaryError;

/// The `anniversary` result type
pub type AnniversaryResult<T> = Result<T, AnniversaryError>;

pub use crate::{
    age::age_on,
    date::PlainDate,
    experience::years_since_on,
    host::FixedHostSystem,
    now::Now,
    options::Overflow,
    timezone::{TimeZone, UtcOffset},
};

#[cfg(feature = "sys")]
pub use crate::sys::{Anniversary, LocalHostSystem, UtcHostSystem};
