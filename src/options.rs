//! Native implementation of the `anniversary` options.

use core::{fmt, str::FromStr};

/// `Overflow` decides what happens to year, month, and day values that do
/// not form a valid calendar date, and consists of the "constrain"
/// and "reject" options.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Overflow {
    /// Clamp the month into `1..=12` and the day into the month's length.
    Constrain,
    /// Return a `RangeError` for any invalid field.
    #[default]
    Reject,
}

/// A parsing error for `Overflow`
#[derive(Debug, Clone, Copy)]
pub struct ParseOverflowError;

impl fmt::Display for ParseOverflowError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("provided string was not a valid overflow value")
    }
}

impl FromStr for Overflow {
    type Err = ParseOverflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "constrain" => Ok(Self::Constrain),
            "reject" => Ok(Self::Reject),
            _ => Err(ParseOverflowError),
        }
    }
}

impl fmt::Display for Overflow {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Constrain => "constrain",
            Self::Reject => "reject",
        }
        .fmt(f)
    }
}
