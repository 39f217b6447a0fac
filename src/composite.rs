//! Delegated codec for user-defined composite types
//!
//! A composite type manages its own binary layout instead of being copied
//! bitwise or length-prefixed by the engine. It opts in by implementing the
//! [`Composite`] capability: a byte-producing operation and a
//! byte-consuming one. The capability is an explicit, closed contract that
//! types implement deliberately; there is no signature probing, and a type
//! without the capability simply cannot be routed to this strategy (the
//! failure is a missing-impl compile error, never a runtime condition).
//!
//! A capability alone does not make a type a message field: the
//! [`composite_codec!`](crate::composite_codec) macro bridges a hand-written
//! `Composite` impl into [`Encode`], [`Decode`], and
//! [`TypeTag`](crate::schema::TypeTag), and `#[derive(Composite)]`
//! additionally generates a structural field-by-field capability for
//! ordinary structs.

use crate::parse::ParseResult;

/// Capability contract for types that produce and consume their own encoded
/// byte form.
///
/// The engine copies [`produce`](Composite::produce) output into the message
/// verbatim and does not validate it; on decode it hands
/// [`reconstruct`](Composite::reconstruct) a view of the unconsumed message
/// tail and advances the cursor by exactly the consumed count the
/// capability reports. That count must describe the input bytes actually
/// read, never any property of the reconstructed value, or nested and
/// array use of the type becomes ambiguous.
pub trait Composite: Sized {
    /// Returns the complete encoded byte form of `self`.
    fn produce(&self) -> Vec<u8>;

    /// Reconstructs a value from the head of `input`, returning it together
    /// with the exact number of input bytes consumed.
    ///
    /// # Errors
    ///
    /// Implementations should propagate [`Parser`](crate::parse::Parser)
    /// errors where they parse their fields through one, and may mint
    /// domain-specific failures through
    /// [`ParseError::reify`](crate::parse::error::ParseError::reify).
    fn reconstruct(input: &[u8]) -> ParseResult<(Self, usize)>;
}

/// Bridges one or more [`Composite`] implementations into the field traits
/// [`Encode`](crate::conv::Encode), [`Decode`](crate::conv::Decode), and
/// [`TypeTag`](crate::schema::TypeTag).
///
/// The generated `TypeTag` hashes the type's name as written, so the same
/// spelling must be used on the encode and decode sides.
///
/// ```
/// use tuplewire::{composite_codec, Composite, ParseResult};
///
/// struct Point { x: i32, y: i32 }
///
/// impl Composite for Point {
///     fn produce(&self) -> Vec<u8> {
///         let mut raw = self.x.to_ne_bytes().to_vec();
///         raw.extend_from_slice(&self.y.to_ne_bytes());
///         raw
///     }
///
///     fn reconstruct(input: &[u8]) -> ParseResult<(Self, usize)> {
///         use tuplewire::{Decode, Parser, SliceParser};
///         let mut p = SliceParser::new(input);
///         let x = i32::parse(&mut p)?;
///         let y = i32::parse(&mut p)?;
///         Ok((Point { x, y }, p.offset()))
///     }
/// }
///
/// composite_codec!(Point);
/// ```
#[macro_export]
macro_rules! composite_codec {
    ($($t:ty),+ $(,)?) => {
        $(
            impl $crate::schema::TypeTag for $t {
                const TAG: u64 = $crate::schema::tag_of(stringify!($t));
            }

            impl $crate::conv::Encode for $t {
                fn write_to<U: $crate::conv::target::Target>(&self, buf: &mut U) -> usize {
                    let raw = <$t as $crate::composite::Composite>::produce(self);
                    $crate::conv::target::Target::push_all(buf, &raw)
                }
            }

            impl $crate::conv::Decode for $t {
                fn parse<P: $crate::parse::Parser>(
                    p: &mut P,
                ) -> $crate::parse::ParseResult<Self> {
                    $crate::parse::Parser::take_composite::<$t>(p)
                }
            }
        )+
    };
}
