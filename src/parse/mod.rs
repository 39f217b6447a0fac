//! Cursor-based consumption of message bytes
//!
//! This module defines the [`Parser`] trait, an abstraction over stateful
//! parse-objects with byte-level precision, together with its slice-backed
//! implementation [`SliceParser`].
//!
//! # Model
//!
//! * A `Parser` is constructed over an immutable byte buffer.
//! * All parsing is non-backtracking and zero-lookahead: a byte can only be
//!   viewed by consuming it, only after all preceding bytes have been
//!   consumed, and never twice. The sole exception is
//!   [`remaining_bytes`](Parser::remaining_bytes), which exposes the
//!   unconsumed tail as a read-only view for delegation to a composite
//!   type's own reconstruction capability.
//! * The buffer and cursor are owned exclusively by the single in-flight
//!   decode call. Implementations must not share mutable parse state across
//!   calls or threads; a fresh parser is created per call and dropped with
//!   it, which is what makes the engine safe to use concurrently without
//!   locks.
//!
//! For type-aware parsing, see the [`Decode`](crate::conv::Decode) trait,
//! which is built entirely around the definitions in this module.

pub mod error;

pub use error::ParseResult;

use crate::composite::Composite;
use error::ParseError;

/// Stateful parse-object over an immutable byte buffer.
///
/// The required methods are the primitive cursor operations; everything else
/// is provided in terms of them. The following properties must hold for any
/// implementation:
///
/// * A fresh parser has `offset() == 0` and `view_len()` equal to the
///   buffer length.
/// * `remainder() == view_len() - offset()` is the largest `n` for which
///   `consume(n)` returns `Ok(_)`; greater values fail without consuming.
/// * A successful `consume(n)` decreases `remainder()` by exactly `n`; a
///   failed one leaves it unchanged.
pub trait Parser {
    /// Returns the total length of the underlying buffer.
    fn view_len(&self) -> usize;

    /// Returns the number of bytes consumed so far.
    fn offset(&self) -> usize;

    /// Attempts to consume and return a slice of length `nbytes`, starting
    /// from the first unconsumed byte in the buffer.
    ///
    /// # Errors
    ///
    /// Fails with [`ParseError::Underflow`] when fewer than `nbytes` bytes
    /// remain, in which case nothing is consumed.
    fn consume(&mut self, nbytes: usize) -> ParseResult<&[u8]>;

    /// Returns the unconsumed tail of the buffer without consuming it.
    ///
    /// This is the view handed to a composite type's reconstruction
    /// capability; pair it with [`advance`](Parser::advance) to account for
    /// the bytes the capability reports having consumed.
    fn remaining_bytes(&self) -> &[u8];

    /// Computes the remaining number of bytes that can be consumed.
    #[inline]
    fn remainder(&self) -> usize {
        self.view_len() - self.offset()
    }

    /// Consumes `nbytes` bytes, discarding them.
    ///
    /// # Errors
    ///
    /// Fails with [`ParseError::Underflow`] under the same conditions as
    /// [`consume`](Parser::consume).
    #[inline]
    fn advance(&mut self, nbytes: usize) -> ParseResult<()> {
        self.consume(nbytes).map(|_| ())
    }

    /// Consumes and returns a single byte.
    #[inline]
    fn consume_byte(&mut self) -> ParseResult<u8> {
        Ok(self.consume(1)?[0])
    }

    /// Consumes `N` bytes and returns them in array form.
    #[inline]
    fn consume_arr<const N: usize>(&mut self) -> ParseResult<[u8; N]> {
        error::coerce_slice(self.consume(N)?)
    }

    /// Consumes two bytes and returns the corresponding `u16` value.
    ///
    /// As with all multi-byte reads in this crate, the conversion is
    /// host-native-order.
    #[inline]
    fn take_u16(&mut self) -> ParseResult<u16> {
        self.consume_arr::<2>().map(u16::from_ne_bytes)
    }

    /// Consumes eight bytes and returns the corresponding `u64` value, in
    /// host-native order.
    #[inline]
    fn take_u64(&mut self) -> ParseResult<u64> {
        self.consume_arr::<8>().map(u64::from_ne_bytes)
    }

    /// Consumes and returns an array of the constant length `N`.
    #[inline]
    fn take_fixed<const N: usize>(&mut self) -> ParseResult<[u8; N]> {
        self.consume_arr::<N>()
    }

    /// Consumes a 2-byte length prefix and validates the claim it makes
    /// against the bytes actually remaining.
    ///
    /// # Errors
    ///
    /// Fails with [`ParseError::LengthOverflow`] when the prefix claims
    /// more bytes than remain after the prefix itself; the prefix is
    /// consumed regardless, but a failed decode has no partial result to
    /// misuse.
    fn take_length_prefix(&mut self) -> ParseResult<usize> {
        let claimed = self.take_u16()? as usize;
        let remaining = self.remainder();
        if claimed > remaining {
            Err(ParseError::LengthOverflow { claimed, remaining })
        } else {
            Ok(claimed)
        }
    }

    /// Delegates to a composite type's own reconstruction capability.
    ///
    /// The capability is handed a view of exactly the unconsumed remainder
    /// of the buffer; the cursor then advances by the number of bytes the
    /// capability reports having consumed, never by any property of the
    /// reconstructed value itself.
    fn take_composite<T: Composite>(&mut self) -> ParseResult<T>
    where
        Self: Sized,
    {
        let (value, consumed) = T::reconstruct(self.remaining_bytes())?;
        self.advance(consumed)?;
        Ok(value)
    }
}

/// [`Parser`] implementation borrowing the message bytes it consumes.
///
/// A `SliceParser` is created for, and owned by, a single decode call; it
/// holds a shared borrow of the message and a cursor, and is dropped when
/// the call returns.
#[derive(Debug)]
pub struct SliceParser<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> SliceParser<'a> {
    /// Constructs a parser over `buf` with the cursor at offset 0.
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }
}

impl<'a> From<&'a [u8]> for SliceParser<'a> {
    fn from(buf: &'a [u8]) -> Self {
        Self::new(buf)
    }
}

impl Parser for SliceParser<'_> {
    #[inline]
    fn view_len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    fn offset(&self) -> usize {
        self.offset
    }

    fn consume(&mut self, nbytes: usize) -> ParseResult<&[u8]> {
        let remaining = self.remainder();
        if nbytes > remaining {
            return Err(ParseError::Underflow {
                offset: self.offset,
                requested: nbytes,
                remaining,
            });
        }
        let ret = &self.buf[self.offset..self.offset + nbytes];
        self.offset += nbytes;
        Ok(ret)
    }

    #[inline]
    fn remaining_bytes(&self) -> &[u8] {
        &self.buf[self.offset..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consume_tracks_offset() {
        let mut p = SliceParser::new(b"abcdef");
        assert_eq!(p.consume(2).unwrap(), b"ab");
        assert_eq!(p.offset(), 2);
        assert_eq!(p.remainder(), 4);
        assert_eq!(p.remaining_bytes(), b"cdef");
        assert_eq!(p.consume_byte().unwrap(), b'c');
    }

    #[test]
    fn underflow_consumes_nothing() {
        let mut p = SliceParser::new(b"ab");
        let err = p.consume(3).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Underflow {
                offset: 0,
                requested: 3,
                remaining: 2
            }
        ));
        assert_eq!(p.remainder(), 2);
    }

    #[test]
    fn length_prefix_rejects_overlong_claim() {
        let mut raw: Vec<u8> = 10u16.to_ne_bytes().to_vec();
        raw.extend_from_slice(b"abc");
        let mut p = SliceParser::new(&raw);
        assert!(matches!(
            p.take_length_prefix().unwrap_err(),
            ParseError::LengthOverflow {
                claimed: 10,
                remaining: 3
            }
        ));
    }

    #[test]
    fn length_prefix_accepts_exact_claim() {
        let mut raw: Vec<u8> = 3u16.to_ne_bytes().to_vec();
        raw.extend_from_slice(b"abc");
        let mut p = SliceParser::new(&raw);
        assert_eq!(p.take_length_prefix().unwrap(), 3);
        assert_eq!(p.consume(3).unwrap(), b"abc");
    }

    #[test]
    fn native_order_reads() {
        let raw = 0x1234u16.to_ne_bytes();
        let mut p = SliceParser::new(&raw);
        assert_eq!(p.take_u16().unwrap(), 0x1234);
    }
}
