//! Length-prefixed codec for variable-length byte payloads
//!
//! [`String`] and `Vec<u8>` own their contents and carry no compile-time
//! length, so they are written behind a 2-byte unsigned length field (byte
//! count of the payload, host-native order) followed by the raw bytes. An
//! empty payload is a length field of 0 and nothing else.
//!
//! Payloads over `u16::MAX` bytes are a contract violation of the wire
//! format. The message capacity is statically asserted to fit the 16-bit
//! prefix domain (see [`message`](crate::message)), so an over-long payload
//! is rejected as a capacity overflow before the prefix could ever wrap;
//! the `debug_assert!` here guards the invariant locally.
//!
//! Decoding reads the prefix through
//! [`take_length_prefix`](crate::parse::Parser::take_length_prefix), which
//! fails with [`LengthOverflow`](crate::parse::error::ParseError::LengthOverflow)
//! when the claim exceeds the bytes remaining, then takes exactly the
//! claimed number of bytes. `String` additionally requires the payload to
//! be valid UTF-8.

use crate::conv::target::Target;
use crate::conv::{Decode, Encode};
use crate::parse::{ParseResult, Parser};
use crate::schema::{tag_of, TypeTag};

/// Width of the length field preceding every variable-length payload.
pub const LENGTH_PREFIX_WIDTH: usize = std::mem::size_of::<u16>();

#[inline]
fn write_prefixed<U: Target>(payload: &[u8], buf: &mut U) -> usize {
    debug_assert!(payload.len() <= u16::MAX as usize);
    buf.push_many((payload.len() as u16).to_ne_bytes()) + buf.push_all(payload)
}

impl TypeTag for String {
    const TAG: u64 = tag_of("str");
}

impl Encode for String {
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        write_prefixed(self.as_bytes(), buf)
    }
}

impl Decode for String {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        let len = p.take_length_prefix()?;
        Ok(String::from_utf8(p.consume(len)?.to_vec())?)
    }
}

impl TypeTag for Vec<u8> {
    const TAG: u64 = tag_of("bytes");
}

impl Encode for Vec<u8> {
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        write_prefixed(self, buf)
    }

    fn write_to_vec(&self, buf: &mut Vec<u8>) {
        debug_assert!(self.len() <= u16::MAX as usize);
        buf.extend_from_slice(&(self.len() as u16).to_ne_bytes());
        buf.extend_from_slice(self);
    }
}

impl Decode for Vec<u8> {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        let len = p.take_length_prefix()?;
        Ok(p.consume(len)?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::error::ParseError;
    use crate::parse::SliceParser;

    #[test]
    fn string_roundtrip() {
        let text = String::from("hello world");
        let bytes = text.to_bytes();
        assert_eq!(bytes.len(), LENGTH_PREFIX_WIDTH + 11);
        let mut p = SliceParser::new(&bytes);
        assert_eq!(String::parse(&mut p).unwrap(), text);
        assert_eq!(p.remainder(), 0);
    }

    #[test]
    fn empty_string_is_bare_zero_prefix() {
        let bytes = String::new().to_bytes();
        assert_eq!(bytes, 0u16.to_ne_bytes());
        let mut p = SliceParser::new(&bytes);
        assert_eq!(String::parse(&mut p).unwrap(), "");
    }

    #[test]
    fn bytes_roundtrip() {
        let payload = vec![0u8, 1, 2, 0xff];
        let bytes = payload.to_bytes();
        let mut p = SliceParser::new(&bytes);
        assert_eq!(Vec::<u8>::parse(&mut p).unwrap(), payload);
    }

    #[test]
    fn overlong_claim_is_rejected() {
        let mut raw: Vec<u8> = 100u16.to_ne_bytes().to_vec();
        raw.extend_from_slice(b"short");
        let mut p = SliceParser::new(&raw);
        assert!(matches!(
            String::parse(&mut p).unwrap_err(),
            ParseError::LengthOverflow {
                claimed: 100,
                remaining: 5
            }
        ));
    }

    #[test]
    fn non_utf8_payload_is_rejected() {
        let mut raw: Vec<u8> = 2u16.to_ne_bytes().to_vec();
        raw.extend_from_slice(&[0xc3, 0x28]);
        let mut p = SliceParser::new(&raw);
        assert!(matches!(
            String::parse(&mut p).unwrap_err(),
            ParseError::InvalidUtf8(_)
        ));
    }
}
