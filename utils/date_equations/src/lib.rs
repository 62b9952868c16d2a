//! # Date Equations
//!
//! Small, `const` friendly calendar equations used to move between
//! Gregorian year-month-day triples and days since the Unix epoch.
//!
//! ``` rust
//! use date_equations::gregorian;
//!
//! let date = gregorian::ymd_from_epoch_days(0);
//! assert_eq!(date, (1970, 1, 1));
//!
//! let days = gregorian::epoch_days_from_ymd(2024, 6, 15);
//! assert_eq!(gregorian::ymd_from_epoch_days(days), (2024, 6, 15));
//! ```
#![no_std]

pub mod gregorian;
