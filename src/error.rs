//! General error types
//!
//! This module contains the error types that are not specific to the decode
//! path: [`EncodeError`] for failures of the encoding orchestrator, and
//! [`LengthError`] for violations of element-count requirements, which both
//! the array codec and fallible conversions report.
//!
//! Decode-path errors live in [`parse::error`](crate::parse::error).

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Enumerated error type for failures encountered while encoding.
///
/// Encoding is infallible at the level of individual field writes (see
/// [`Encode`](crate::conv::Encode)); the only runtime failure mode is the
/// orchestrator discovering that the finished message would not fit in the
/// configured capacity.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EncodeError {
    /// The serialized form of the supplied values, fingerprint included,
    /// would exceed the maximum message capacity.
    BufferOverflow { capacity: usize, required: usize },
}

impl Display for EncodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            EncodeError::BufferOverflow { capacity, required } => {
                write!(
                    f,
                    "encoded message requires {required} bytes but capacity is {capacity} bytes"
                )
            }
        }
    }
}

impl Error for EncodeError {}

/// Enumerated error type for failures related to constructs that impose a
/// check on the element-count of their prospective values, such as the
/// fixed-count array codec.
#[derive(Clone, PartialEq, PartialOrd, Eq, Ord, Debug)]
pub enum LengthError {
    /// Restriction on maximum element-count exceeded
    TooLong { limit: usize, actual: usize },
    /// Requirement of precise element-count not satisfied
    WrongLength { exact: usize, actual: usize },
}

impl Display for LengthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LengthError::TooLong { limit, actual } => {
                write!(
                    f,
                    "{actual}-element value exceeded limit of {limit} elements"
                )
            }
            LengthError::WrongLength { exact, actual } => {
                write!(
                    f,
                    "{actual}-element value violated requirement of {exact} elements"
                )
            }
        }
    }
}

impl Error for LengthError {}
