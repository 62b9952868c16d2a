//! This module implements date string parsing functionality.
//!
//! Date strings follow RFC 9557 / ISO 8601 as implemented by `ixdtf`. Only
//! the date record is used; any time, offset, or annotation is ignored.

use alloc::{format, string::ToString};

use ixdtf::{parsers::IxdtfParser, ParseError};

use crate::{error::AnniversaryError, iso::IsoDate, options::Overflow, AnniversaryResult};

/// Maps an `ixdtf` error onto a `SyntaxError`.
fn map_parse_error(err: ParseError) -> AnniversaryError {
    let message = match err {
        ParseError::InvalidMonthRange => "Month is outside valid range (1-12)".to_string(),
        ParseError::InvalidDayRange => {
            "Day is outside valid range for the given month/year".to_string()
        }
        ParseError::InvalidEnd => "Unexpected character at end of input".to_string(),
        _ => format!("Parse error: {err:?}"),
    };
    AnniversaryError::syntax().with_message(message)
}

/// Parses the date record out of a date or date-time string.
pub(crate) fn parse_date(source: &[u8]) -> AnniversaryResult<IsoDate> {
    let record = IxdtfParser::from_utf8(source)
        .parse()
        .map_err(map_parse_error)?;

    let Some(date) = record.date else {
        return Err(
            AnniversaryError::range().with_message("Date strings must contain a Date value.")
        );
    };

    IsoDate::new_with_overflow(
        date.year,
        date.month.into(),
        date.day.into(),
        Overflow::Reject,
    )
}
