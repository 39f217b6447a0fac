//! Per-type identifiers and the schema fingerprint
//!
//! Every type that can appear as a field of a message carries a stable
//! 64-bit identifier, assigned by hashing the type's declared name (and, for
//! shape-parametric types such as arrays, its shape) with FNV-1a at compile
//! time. The identifiers are folded, left to right, into a [`Fingerprint`]
//! over the ordered type list of a message; the fold multiplies the
//! accumulator by the FNV prime before mixing in each tag, so both the order
//! and the multiplicity of the type list perturb the result. A plain XOR
//! fold would be commutative and would let repeated types cancel out; the
//! multiply step rules that out.
//!
//! Nothing here depends on any runtime reflection facility: tags are
//! `const`-evaluated from declared names and are identical across builds.

use crate::conv::target::Target;
use crate::parse::{ParseResult, Parser};

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Computes the stable identifier for a type from its declared name.
///
/// This is FNV-1a over the UTF-8 bytes of `name`, evaluable in `const`
/// context so that every [`TypeTag::TAG`] is a compile-time constant.
#[must_use]
pub const fn tag_of(name: &str) -> u64 {
    let bytes = name.as_bytes();
    let mut acc = FNV_OFFSET_BASIS;
    let mut i = 0;
    while i < bytes.len() {
        acc ^= bytes[i] as u64;
        acc = acc.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    acc
}

/// Computes the identifier of a fixed-count sequence type from the
/// identifier of its element type and its element count.
///
/// `[u8; 3]` and `[u8; 4]` must not share a tag, nor may `[u16; N]` and
/// `[u32; N]`, so both inputs are folded.
#[must_use]
pub const fn seq_tag(elem: u64, count: usize) -> u64 {
    let mut acc = tag_of("[T; N]");
    acc = acc.wrapping_mul(FNV_PRIME) ^ elem;
    acc = acc.wrapping_mul(FNV_PRIME) ^ (count as u64);
    acc
}

/// Stable per-type identifier for every type that can appear as a field of
/// a message.
///
/// Implementations exist for the fixed-width primitives, [`String`],
/// `Vec<u8>`, and `[T; N]` for any tagged `T`; user-defined composite types
/// receive one from [`composite_codec!`](crate::composite_codec) or
/// `#[derive(Composite)]`.
///
/// The tag takes part in the message [`Fingerprint`] and nothing else; it is
/// never written to the wire on its own.
pub trait TypeTag {
    /// Identifier of this type, stable across builds.
    const TAG: u64;
}

/// Order-sensitive digest over an ordered type list, embedded at the head of
/// every message.
///
/// A `Fingerprint` is a pure function of the type list: equal ordered lists
/// produce equal fingerprints, and differing lists (by type, order, or
/// multiplicity) produce differing fingerprints except by hash accident.
/// It is written to and read from the wire as a host-native-order `u64`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[repr(transparent)]
pub struct Fingerprint(u64);

impl Fingerprint {
    /// Number of bytes a `Fingerprint` occupies at the head of a message.
    pub const WIDTH: usize = std::mem::size_of::<u64>();

    /// Folds an ordered list of per-type identifiers into a `Fingerprint`.
    ///
    /// The fold is `acc = acc * FNV_PRIME ^ tag` starting from the FNV
    /// offset basis, evaluable in `const` context so that the fingerprint of
    /// a tuple type is a compile-time constant.
    #[must_use]
    pub const fn from_tags(tags: &[u64]) -> Self {
        let mut acc = FNV_OFFSET_BASIS;
        let mut i = 0;
        while i < tags.len() {
            acc = acc.wrapping_mul(FNV_PRIME) ^ tags[i];
            i += 1;
        }
        Self(acc)
    }

    /// Reinterprets a raw `u64` as a `Fingerprint`, as when reading one back
    /// from a message head.
    #[inline(always)]
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Unwraps the `u64` stored within a `Fingerprint` value.
    #[inline(always)]
    #[must_use]
    pub const fn to_raw(self) -> u64 {
        self.0
    }

    /// Appends the host-native-order bytes of this fingerprint to a buffer,
    /// returning the number of bytes written (always [`WIDTH`](Self::WIDTH)).
    pub fn write_to<U: Target>(self, buf: &mut U) -> usize {
        buf.push_many(self.0.to_ne_bytes())
    }

    /// Consumes [`WIDTH`](Self::WIDTH) bytes from a parser and interprets
    /// them as a fingerprint.
    pub fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        Ok(Self(p.take_u64()?))
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl std::fmt::LowerHex for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <u64 as std::fmt::LowerHex>::fmt(&self.0, f)
    }
}
