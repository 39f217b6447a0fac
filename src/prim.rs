//! Fixed-width copy codec for trivial primitive types
//!
//! Every type here is bitwise-copyable with no internal ownership or
//! indirection, so its encoded form is exactly its raw in-memory
//! representation: `WIDTH` bytes copied verbatim in host-native order.
//! Decoding reads exactly `WIDTH` bytes back, failing with
//! [`Underflow`](crate::parse::error::ParseError::Underflow) when fewer
//! remain.

use crate::conv::len::FixedWidth;
use crate::conv::target::Target;
use crate::conv::{Decode, Encode};
use crate::parse::{ParseResult, Parser};
use crate::schema::{tag_of, TypeTag};

macro_rules! fixed_width_codec {
    ($($t:ty),+ $(,)?) => {
        $(
            impl FixedWidth for $t {
                const WIDTH: usize = std::mem::size_of::<$t>();
            }

            impl TypeTag for $t {
                const TAG: u64 = tag_of(stringify!($t));
            }

            impl Encode for $t {
                #[inline]
                fn write_to<U: Target>(&self, buf: &mut U) -> usize {
                    buf.push_many(self.to_ne_bytes())
                }
            }

            impl Decode for $t {
                #[inline]
                fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
                    Ok(<$t>::from_ne_bytes(p.consume_arr()?))
                }
            }
        )+
    };
}

fixed_width_codec!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

impl FixedWidth for bool {
    const WIDTH: usize = 1;
}

impl TypeTag for bool {
    const TAG: u64 = tag_of("bool");
}

impl Encode for bool {
    #[inline]
    fn write_to<U: Target>(&self, buf: &mut U) -> usize {
        buf.push_one(*self as u8)
    }
}

impl Decode for bool {
    /// Raw-representation semantics: any nonzero byte decodes as `true`.
    #[inline]
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        Ok(p.consume_byte()? != 0)
    }
}
