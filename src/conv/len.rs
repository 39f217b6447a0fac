//! Oracles for the byte-length of the serialized form of a value
//!
//! Two traits live here. [`FixedWidth`] marks the trivial types: those whose
//! serialized form is their raw in-memory representation, with no internal
//! ownership or indirection, and therefore a width that is a compile-time
//! constant. It doubles as the classifier predicate that routes a type to
//! the fixed-width copy strategy.
//!
//! [`EncodeLength`] is the general oracle: it computes the exact number of
//! bytes [`Encode::write_to`] would produce for a given value, without
//! allocating, by writing into the zero-cost [`ByteCounter`] target. The
//! encoding orchestrator uses it to reject over-capacity messages before a
//! single byte is written.

use super::target::ByteCounter;
use super::{Encode, Target};

/// Marker trait for trivial types: bitwise-copyable values with no internal
/// ownership or indirection, serialized verbatim as exactly `WIDTH` bytes.
///
/// Only the primitive impls in [`prim`](crate::prim) should exist; a type
/// with interior structure belongs to one of the other field strategies.
pub trait FixedWidth: Copy {
    /// Invariant byte-width of the serialized form of all values of `Self`.
    const WIDTH: usize;
}

/// Extension trait for [`Encode`] that predicts serialized length.
pub trait EncodeLength: Encode {
    /// Computes, without allocation, the number of bytes in the serialized
    /// form of `self`, based on the implementation of [`Encode::write_to`].
    ///
    /// The default implementation invokes `write_to` over the
    /// zero-allocation target [`ByteCounter`], whose return value is the
    /// number of bytes that were 'written'.
    #[must_use]
    #[inline]
    fn enc_len(&self) -> usize {
        self.write_to(&mut ByteCounter::create())
    }

    /// Pre-determines the exact number of bytes required to serialize
    /// `self`, and returns a `Vec<u8>` initialized to that capacity which
    /// contains the serialized bytes of `self`.
    ///
    /// Performs zero reallocations while populating the novel vector.
    #[must_use]
    fn to_bytes_full(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.enc_len());
        self.write_to_vec(&mut buf);
        buf
    }
}

impl<T: Encode + ?Sized> EncodeLength for T {}
