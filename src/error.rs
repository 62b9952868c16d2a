//! This module implements `AnniversaryError`.

use alloc::borrow::Cow;
use core::fmt;

/// `AnniversaryError`'s error type.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Error.
    #[default]
    Generic,
    /// RangeError
    Range,
    /// SyntaxError
    Syntax,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic => "Error",
            Self::Range => "RangeError",
            Self::Syntax => "SyntaxError",
        }
        .fmt(f)
    }
}

/// The error returned by fallible `anniversary` operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnniversaryError {
    kind: ErrorKind,
    msg: Cow<'static, str>,
}

impl AnniversaryError {
    fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            msg: Cow::Borrowed(""),
        }
    }

    /// Create a generic error
    #[must_use]
    pub fn general<S>(msg: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        Self::new(ErrorKind::Generic).with_message(msg)
    }

    /// Create a range error.
    #[must_use]
    pub fn range() -> Self {
        Self::new(ErrorKind::Range)
    }

    /// Create a syntax error.
    #[must_use]
    pub fn syntax() -> Self {
        Self::new(ErrorKind::Syntax)
    }

    /// Add a message to the error.
    #[must_use]
    pub fn with_message<S>(mut self, msg: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        self.msg = msg.into();
        self
    }

    /// Returns this error's kind.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.msg
    }

    /// Extracts the error message.
    #[inline]
    #[must_use]
    pub fn into_message(self) -> Cow<'static, str> {
        self.msg
    }
}

impl fmt::Display for AnniversaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        let msg = self.msg.trim();
        if !msg.is_empty() {
            write!(f, ": {msg}")?;
        }

        Ok(())
    }
}

impl core::error::Error for AnniversaryError {}

#[cfg(test)]
mod tests {
    use super::{AnniversaryError, ErrorKind};
    use alloc::string::ToString;

    #[test]
    fn display_with_and_without_message() {
        let err = AnniversaryError::range().with_message("not a valid ISO date.");
        assert_eq!(err.kind(), ErrorKind::Range);
        assert_eq!(err.to_string(), "RangeError: not a valid ISO date.");

        let bare = AnniversaryError::syntax();
        assert_eq!(bare.to_string(), "SyntaxError");
        assert_eq!(bare.message(), "");
    }

    #[test]
    fn general_errors_carry_owned_messages() {
        let id = "Mars/Olympus_Mons";
        let err = AnniversaryError::general(alloc::format!("unknown time zone {id}"));
        assert_eq!(err.kind(), ErrorKind::Generic);
        assert_eq!(err.into_message(), "unknown time zone Mars/Olympus_Mons");
    }
}
