//! Entry points for whole-message transcoding
//!
//! An encode request is an ordered, heterogeneous tuple of values; a decode
//! request names the same tuple type and is handed back owned values. The
//! [`Pack`] trait connects a tuple type to its schema fingerprint and to the
//! per-field [`Encode`]/[`Decode`] machinery, and [`encode`]/[`decode`] are
//! the two operations callers actually invoke.

use crate::conv::target::{ByteCounter, Target};
use crate::conv::{Decode, Encode};
use crate::error::EncodeError;
use crate::message::{Message, MAX_MESSAGE_SIZE};
use crate::parse::error::{ParseError, ParseResult};
use crate::parse::{Parser, SliceParser};
use crate::schema::{Fingerprint, TypeTag};

/// Tuple types that can travel as a self-identifying message.
///
/// Implemented for tuples of arity `0..=12` whose every element type
/// carries [`TypeTag`], [`Encode`] and [`Decode`]. The fingerprint is a
/// compile-time constant of the tuple type, so agreement between an encode
/// site and a decode site is checked per message without either side
/// exchanging schema descriptions.
pub trait Pack: Sized {
    /// Fingerprint of this tuple's element types, in order.
    const FINGERPRINT: Fingerprint;

    /// Appends every field encoding to `buf` in tuple order, returning the
    /// number of bytes written.
    fn write_fields<U: Target>(&self, buf: &mut U) -> usize;

    /// Parses every field from `p` in tuple order.
    fn parse_fields<P: Parser>(p: &mut P) -> ParseResult<Self>;

    /// Serialized length of the fields alone, fingerprint excluded.
    fn fields_len(&self) -> usize {
        self.write_fields(&mut ByteCounter::create())
    }
}

impl Pack for () {
    const FINGERPRINT: Fingerprint = Fingerprint::from_tags(&[]);

    fn write_fields<U: Target>(&self, _buf: &mut U) -> usize {
        0
    }

    fn parse_fields<P: Parser>(_p: &mut P) -> ParseResult<Self> {
        Ok(())
    }
}

macro_rules! impl_pack_tuple {
    ( $( $t:ident . $i:tt ),+ ) => {
        impl<$($t),+> Pack for ($($t,)+)
        where
            $($t: TypeTag + Encode + Decode),+
        {
            const FINGERPRINT: Fingerprint = Fingerprint::from_tags(&[$($t::TAG),+]);

            fn write_fields<U: Target>(&self, buf: &mut U) -> usize {
                0 $(+ self.$i.write_to(buf))+
            }

            fn parse_fields<P: Parser>(p: &mut P) -> ParseResult<Self> {
                Ok(($($t::parse(p)?,)+))
            }
        }
    };
}

impl_pack_tuple!(A.0);
impl_pack_tuple!(A.0, B.1);
impl_pack_tuple!(A.0, B.1, C.2);
impl_pack_tuple!(A.0, B.1, C.2, D.3);
impl_pack_tuple!(A.0, B.1, C.2, D.3, E.4);
impl_pack_tuple!(A.0, B.1, C.2, D.3, E.4, F.5);
impl_pack_tuple!(A.0, B.1, C.2, D.3, E.4, F.5, G.6);
impl_pack_tuple!(A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7);
impl_pack_tuple!(A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7, I.8);
impl_pack_tuple!(A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7, I.8, J.9);
impl_pack_tuple!(A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7, I.8, J.9, K.10);
impl_pack_tuple!(A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7, I.8, J.9, K.10, L.11);

/// Encodes `values` into a fresh [`Message`]: the tuple fingerprint
/// followed by every field encoding in order.
///
/// The total length is computed up front; when it would exceed
/// [`MAX_MESSAGE_SIZE`] the call fails with
/// [`EncodeError::BufferOverflow`] and nothing is allocated.
pub fn encode<T: Pack>(values: &T) -> Result<Message, EncodeError> {
    let required = Fingerprint::WIDTH + values.fields_len();
    if required > MAX_MESSAGE_SIZE {
        return Err(EncodeError::BufferOverflow {
            capacity: MAX_MESSAGE_SIZE,
            required,
        });
    }
    let mut msg = Message::with_capacity(required);
    T::FINGERPRINT.write_to(&mut msg);
    values.write_fields(&mut msg);
    debug_assert_eq!(msg.len(), required);
    Ok(msg)
}

/// Decodes a message produced by [`encode`] back into an owned tuple.
///
/// The embedded fingerprint must equal `T::FINGERPRINT` exactly; a
/// mismatch aborts with [`ParseError::TypeMismatch`] before any field is
/// parsed. Field parsing stops at the first failure, leaving no partially
/// observable state behind. Bytes past the final field are ignored unless
/// the `deny_trailing` feature is enabled.
pub fn decode<T: Pack>(input: impl AsRef<[u8]>) -> ParseResult<T> {
    let bytes = input.as_ref();
    if bytes.len() < Fingerprint::WIDTH {
        return Err(ParseError::ShortMessage {
            len: bytes.len(),
            need: Fingerprint::WIDTH,
        });
    }
    let mut p = SliceParser::new(bytes);
    let actual = Fingerprint::parse(&mut p)?;
    if actual != T::FINGERPRINT {
        return Err(ParseError::TypeMismatch {
            expected: T::FINGERPRINT,
            actual,
        });
    }
    let values = T::parse_fields(&mut p)?;
    cfg_if::cfg_if! {
        if #[cfg(feature = "deny_trailing")] {
            let residual = p.remainder();
            if residual != 0 {
                return Err(ParseError::Trailing { residual });
            }
        }
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_tuple_roundtrip() {
        let orig = (42u32, String::from("meta"), -1i8, [5u64, 6, 7]);
        let msg = encode(&orig).unwrap();
        let back: (u32, String, i8, [u64; 3]) = decode(&msg).unwrap();
        assert_eq!(back, orig);
    }

    #[test]
    fn fingerprint_heads_the_message() {
        let msg = encode(&(1u8,)).unwrap();
        assert_eq!(msg.fingerprint(), Some(<(u8,)>::FINGERPRINT));
        assert_eq!(msg.len(), Fingerprint::WIDTH + 1);
    }

    #[test]
    fn type_mismatch_rejected_before_fields() {
        let msg = encode(&(42u64, 7u64)).unwrap();
        match decode::<(u64, String)>(&msg) {
            Err(ParseError::TypeMismatch { expected, actual }) => {
                assert_eq!(expected, <(u64, String)>::FINGERPRINT);
                assert_eq!(actual, <(u64, u64)>::FINGERPRINT);
            }
            other => panic!("expected TypeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn capacity_boundary_is_exact() {
        // fingerprint (8) + length prefix (2) + payload
        let fits = "x".repeat(MAX_MESSAGE_SIZE - Fingerprint::WIDTH - 2);
        let msg = encode(&(fits.clone(),)).unwrap();
        assert_eq!(msg.len(), MAX_MESSAGE_SIZE);

        let over = format!("{}x", fits);
        match encode(&(over,)) {
            Err(EncodeError::BufferOverflow { capacity, required }) => {
                assert_eq!(capacity, MAX_MESSAGE_SIZE);
                assert_eq!(required, MAX_MESSAGE_SIZE + 1);
            }
            other => panic!("expected BufferOverflow, got {:?}", other),
        }
    }

    #[test]
    fn empty_string_field_roundtrip() {
        let msg = encode(&(String::new(), 9u16)).unwrap();
        let (s, n): (String, u16) = decode(&msg).unwrap();
        assert!(s.is_empty());
        assert_eq!(n, 9);
    }

    #[test]
    fn truncated_head_is_short_message() {
        match decode::<(u8,)>(&[0u8; 3]) {
            Err(ParseError::ShortMessage { len, need }) => {
                assert_eq!(len, 3);
                assert_eq!(need, Fingerprint::WIDTH);
            }
            other => panic!("expected ShortMessage, got {:?}", other),
        }
    }

    #[test]
    fn empty_tuple_is_bare_fingerprint() {
        let msg = encode(&()).unwrap();
        assert_eq!(msg.len(), Fingerprint::WIDTH);
        decode::<()>(&msg).unwrap();
    }

    #[cfg(not(feature = "deny_trailing"))]
    #[test]
    fn trailing_bytes_ignored_by_default() {
        let mut buf = encode(&(3u16,)).unwrap().into_vec();
        buf.extend_from_slice(&[0xde, 0xad]);
        let (n,): (u16,) = decode(&buf).unwrap();
        assert_eq!(n, 3);
    }

    #[cfg(feature = "deny_trailing")]
    #[test]
    fn trailing_bytes_rejected_when_denied() {
        let mut buf = encode(&(3u16,)).unwrap().into_vec();
        buf.extend_from_slice(&[0xde, 0xad]);
        match decode::<(u16,)>(&buf) {
            Err(ParseError::Trailing { residual }) => assert_eq!(residual, 2),
            other => panic!("expected Trailing, got {:?}", other),
        }
    }
}
