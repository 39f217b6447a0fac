//! Core of the binary-conversion API
//!
//! This module contains definitions for the transcoding traits [`Encode`]
//! and [`Decode`], which every type that can appear as a field of a message
//! implements. They are deliberately narrow: `Encode` appends bytes to a
//! generic [`Target`], `Decode` consumes bytes from a generic
//! [`Parser`](crate::parse::Parser), and everything else in the crate is
//! built on top of those two methods.
//!
//! Implementations for the four field strategies live elsewhere: fixed-width
//! primitives in [`prim`](crate::prim), length-prefixed payloads in
//! [`dynamic`](crate::dynamic), fixed-count arrays in [`seq`](crate::seq),
//! and capability-delegated composites in [`composite`](crate::composite).
//!
//! The sub-module [`len`] defines the byte-length oracles used by the
//! encoding orchestrator's capacity pre-check, and [`target`] defines the
//! append-only buffer abstraction that serialization writes into.

use crate::parse::{ParseResult, Parser};

use self::target::Target;

pub mod len;
pub mod target;

/// Trait for types that support serialization into the message wire format.
///
/// Implementing [`Encode`] can be as simple as providing a definition of the
/// required method [`write_to`](Encode::write_to); types with an efficient
/// monomorphic path may also override [`write_to_vec`](Encode::write_to_vec)
/// provided the bytes produced are identical.
///
/// Field writes are infallible: any size constraint is enforced
/// once by the encoding orchestrator (see [`encode`](crate::pack::encode)),
/// not per field.
pub trait Encode {
    /// Appends the serialized bytes of this value to a generic buffer,
    /// returning the exact number of bytes written.
    ///
    /// The natural definition of this method is structurally inductive on
    /// the fields of the type in question.
    fn write_to<U: Target>(&self, buf: &mut U) -> usize;

    /// Appends the serialized bytes of this value to a monomorphized
    /// [`Vec<u8>`] buffer.
    ///
    /// This is a specialized variant of [`write_to`](Encode::write_to) that
    /// may be overridden when there is an efficient implementation for that
    /// specific case.
    #[inline]
    fn write_to_vec(&self, buf: &mut Vec<u8>) {
        let _ = self.write_to(buf);
    }

    /// Creates a [`Vec<u8>`] and fills it with the serialized bytes of this
    /// value.
    #[must_use]
    #[inline]
    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.write_to_vec(&mut buf);
        buf
    }
}

/// Trait providing the method for deserializing binary data into values of a
/// certain type.
///
/// Implementations are defined by one required method, [`parse`](Decode::parse),
/// which attempts to consume the contextually appropriate number of bytes
/// from a [`Parser`], either returning a valid value of the implementing
/// type or an error if parsing failed or yielded an invalid value.
///
/// It is expected that a type implementing `Decode` also implements
/// [`Encode`]; the [`Pack`](crate::pack::Pack) bounds require both.
pub trait Decode {
    /// Attempts to consume and interpret a value of type `Self` from an
    /// existing `Parser` over a binary buffer.
    ///
    /// # Errors
    ///
    /// In most cases, the errors returned by this method are propagated from
    /// calls made to [`Parser`] methods in the implementation logic. In rare
    /// cases it may be necessary to return newly minted
    /// [`ParseError`](crate::parse::error::ParseError) values based on
    /// invariants of the type being parsed.
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self>
    where
        Self: Sized;
}
