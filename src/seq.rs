//! Fixed-count array codec
//!
//! `[T; N]` is written as a 2-byte count field (the actual `N`, host-native
//! order) followed by the `N` elements in order, each through the element
//! type's own strategy. For a fixed-width element type the element loop
//! emits exactly the `N * WIDTH` contiguous raw bytes a bulk copy would.
//!
//! Decoding mirrors this: the count field is read and must equal `N`
//! ([`WrongCount`](crate::parse::error::ParseError::WrongCount) otherwise),
//! then `N` elements are decoded with every consume bounds-checked against
//! the remaining buffer. Any detected violation terminates the decode with
//! a reported error; elements beyond the encoded count are never touched.
//!
//! The array tag folds the element tag with the count (see
//! [`seq_tag`](crate::schema::seq_tag)), so `[u8; 3]` and `[u8; 4]` occupy
//! distinct schema positions.

use crate::conv::target::Target;
use crate::conv::{Decode, Encode};
use crate::error::LengthError;
use crate::parse::{ParseResult, Parser};
use crate::schema::{seq_tag, TypeTag};

impl<T: TypeTag, const N: usize> TypeTag for [T; N] {
    const TAG: u64 = seq_tag(T::TAG, N);
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        debug_assert!(N <= u16::MAX as usize);
        buf.push_many((N as u16).to_ne_bytes())
            + self.iter().map(|item| item.write_to(buf)).sum::<usize>()
    }
}

impl<T: Decode, const N: usize> Decode for [T; N] {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        let count = p.take_u16()? as usize;
        if count != N {
            return Err(LengthError::WrongLength {
                exact: N,
                actual: count,
            }
            .into());
        }
        let mut elems = Vec::with_capacity(N);
        for _ in 0..N {
            elems.push(T::parse(p)?);
        }
        match <[T; N]>::try_from(elems) {
            Ok(arr) => Ok(arr),
            // Length was checked by the loop above.
            Err(_) => unreachable!(),
        }
    }
}
