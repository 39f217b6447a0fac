//! Error types used to report failure in decoding
//!
//! This module defines the primary type [`ParseError`] and the alias
//! [`ParseResult<T>`]. Any variant aborts the entire decode operation
//! immediately: there is no partial result and no retry, and the caller
//! must not trust any value produced before the failure. These are
//! programming or schema errors, not transient conditions.

use std::array::TryFromSliceError;
use std::convert::Infallible;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::string::FromUtf8Error;

use crate::error::LengthError;
use crate::schema::Fingerprint;

/// Enumeration type over all errors that may be encountered when decoding a
/// message, whether by [`Parser`](crate::parse::Parser) methods or by the
/// decoding orchestrator itself.
#[derive(Debug)]
pub enum ParseError {
    /// The message is shorter than the fingerprint that every message must
    /// begin with.
    ShortMessage { len: usize, need: usize },
    /// The fingerprint at the message head differs from the one computed
    /// over the destination type list: the message was encoded under a
    /// different schema than the caller is decoding into.
    TypeMismatch {
        expected: Fingerprint,
        actual: Fingerprint,
    },
    /// A consume operation requested more bytes than remain in the buffer.
    Underflow {
        offset: usize,
        requested: usize,
        remaining: usize,
    },
    /// A length-prefix field claims more payload bytes than remain in the
    /// buffer after the prefix itself.
    LengthOverflow { claimed: usize, remaining: usize },
    /// The count field of a fixed-count array differs from the element
    /// count of the destination type.
    WrongCount(LengthError),
    /// A length-prefixed payload decoded into a `String` was not valid
    /// UTF-8.
    InvalidUtf8(FromUtf8Error),
    /// Violation of an internal invariant; reaching this indicates an
    /// implementation bug rather than malformed input.
    Internal(InternalError),
    /// Failure reported by a composite type's own reconstruction
    /// capability.
    External(Box<dyn Error + Send + Sync>),
    /// Unconsumed bytes remained after the final field was decoded.
    ///
    /// Only produced when the `deny_trailing` feature is enabled; the
    /// default policy ignores trailing bytes.
    Trailing { residual: usize },
}

impl ParseError {
    /// Constructs a [`ParseError`] from a generic, abstract error value, as
    /// when a composite type's capability fails for reasons of its own.
    ///
    /// Error types defined in this crate should be converted through their
    /// dedicated `From` impls instead.
    pub fn reify<E: 'static + Error + Send + Sync>(err: E) -> Self {
        Self::External(err.into())
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::ShortMessage { len, need } => {
                write!(
                    f,
                    "message of {len} bytes is too short to hold a {need}-byte fingerprint"
                )
            }
            ParseError::TypeMismatch { expected, actual } => {
                write!(
                    f,
                    "message fingerprint {actual} does not match destination fingerprint {expected}"
                )
            }
            ParseError::Underflow {
                offset,
                requested,
                remaining,
            } => {
                write!(
                    f,
                    "cannot consume {requested} bytes at offset {offset}: only {remaining} bytes remain"
                )
            }
            ParseError::LengthOverflow { claimed, remaining } => {
                write!(
                    f,
                    "length prefix claims {claimed} bytes but only {remaining} remain"
                )
            }
            ParseError::WrongCount(err) => Display::fmt(err, f),
            ParseError::InvalidUtf8(err) => {
                write!(f, "parsed payload could not be coerced to String: {err}")
            }
            ParseError::Internal(err) => Display::fmt(err, f),
            ParseError::External(err) => {
                write!(f, "composite reconstruction failed: {err}")
            }
            ParseError::Trailing { residual } => {
                write!(f, "{residual} unconsumed bytes after final field")
            }
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseError::WrongCount(err) => Some(err),
            ParseError::InvalidUtf8(err) => Some(err),
            ParseError::Internal(err) => Some(err),
            ParseError::External(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<Infallible> for ParseError {
    fn from(_: Infallible) -> Self {
        unreachable!()
    }
}

impl From<LengthError> for ParseError {
    fn from(err: LengthError) -> Self {
        Self::WrongCount(err)
    }
}

impl From<FromUtf8Error> for ParseError {
    fn from(err: FromUtf8Error) -> Self {
        Self::InvalidUtf8(err)
    }
}

impl From<InternalError> for ParseError {
    fn from(err: InternalError) -> Self {
        Self::Internal(err)
    }
}

impl From<Box<dyn Error + Send + Sync>> for ParseError {
    fn from(err: Box<dyn Error + Send + Sync>) -> Self {
        Self::External(err)
    }
}

/// Type alias for `Result` with an error type of [`ParseError`].
///
/// Most `Parser` methods and all [`Decode`](crate::conv::Decode)
/// implementations have a return type of `ParseResult<T>` for various `T`.
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Implementation-internal errors
///
/// This error class represents certain 'impossible' cases which signify an
/// implementation bug in a [`Parser`](crate::parse::Parser) type, rather
/// than any property of the input.
#[derive(Debug, Clone, Copy)]
pub enum InternalError {
    /// A slice returned by a consume operation had the wrong length for the
    /// fixed-size array it was to be coerced into.
    SliceCoerceFailure(TryFromSliceError),
}

impl From<TryFromSliceError> for InternalError {
    fn from(err: TryFromSliceError) -> Self {
        Self::SliceCoerceFailure(err)
    }
}

impl Display for InternalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InternalError::SliceCoerceFailure(_) => {
                write!(f, "failed to coerce from byte-slice to fixed-length array")
            }
        }
    }
}

impl Error for InternalError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            InternalError::SliceCoerceFailure(err) => Some(err),
        }
    }
}

/// Converts a borrowed byte-slice into an owned byte-array.
///
/// Returns a [`ParseError::Internal`] if the slice length differs from `N`,
/// which can only happen through a `Parser` implementation bug.
pub(crate) fn coerce_slice<const N: usize>(bytes: &'_ [u8]) -> ParseResult<[u8; N]> {
    match <[u8; N] as std::convert::TryFrom<&'_ [u8]>>::try_from(bytes) {
        Ok(array) => Ok(array),
        Err(err) => Err(ParseError::from(InternalError::from(err))),
    }
}
