//! Schema-fingerprinted binary transcoding of ordered value tuples
//!
//! # Overview
//!
//! This library converts an ordered, heterogeneous tuple of values into a
//! single contiguous byte buffer, and reconstructs the same tuple from such a
//! buffer, detecting mismatches between the type list that was encoded and the
//! type list the caller attempts to decode into.
//!
//! Every message carries a fixed-width [`Fingerprint`] at its head: an
//! order-sensitive digest folded over a stable per-type identifier for each
//! field, in order. Decoding recomputes the fingerprint over the destination
//! type list and refuses to proceed when it differs from the one embedded in
//! the message, so a schema drift between producer and consumer surfaces as a
//! single [`TypeMismatch`](parse::error::ParseError::TypeMismatch) error
//! rather than silently misinterpreted bytes.
//!
//! Behind the fingerprint, each field is encoded by exactly one of four
//! strategies, selected at compile time by the trait impls a type carries:
//!
//! * **fixed-width copy**: primitives with no internal ownership or
//!   indirection ([`prim`]), written as their raw in-memory representation;
//! * **length-prefixed bytes**: variable-length payloads such as [`String`]
//!   and `Vec<u8>` ([`dynamic`]), written behind a 2-byte length field;
//! * **fixed-count arrays**: `[T; N]` ([`seq`]), a 2-byte count field
//!   followed by the `N` elements via the element type's own strategy;
//! * **delegated**: user-defined composite types that manage their own
//!   layout through the [`Composite`] capability ([`composite`]).
//!
//! A type that fits none of the four simply has no [`Encode`]/[`Decode`]
//! impl, and the misconfiguration is a compile error rather than anything
//! observable at runtime.
//!
//! The high-level entry points are [`encode`] and [`decode`], defined over
//! the [`Pack`] trait which is implemented for tuples up to arity 12. Both
//! operate in one bounded synchronous pass: the engine performs no I/O, and
//! the buffer and cursor of a call are owned exclusively by that call.
//! Transport of the finished [`Message`] is the caller's concern.
//!
//! # Wire format
//!
//! ```text
//! Message     := Fingerprint Field*
//! Fingerprint := u64, host-native byte order
//! Field       := raw bytes (fixed-width, length implied by type)
//!              | u16 length, then `length` raw bytes
//!              | u16 count, then `count` element encodings
//!              | opaque bytes produced by the field type's own capability
//! ```
//!
//! All multi-byte integers are host-native; cross-machine endianness
//! normalization is out of scope.
//!
//! # Capacity
//!
//! The single tunable is [`MAX_MESSAGE_SIZE`]: an encode whose output would
//! exceed it fails with [`EncodeError::BufferOverflow`] and produces nothing.
//!
//! # Example
//!
//! ```
//! use tuplewire::{decode, encode};
//!
//! let msg = encode(&(42u32, String::from("hello"), [1u8, 2, 3])).unwrap();
//! let (n, text, bytes): (u32, String, [u8; 3]) = decode(&msg).unwrap();
//! assert_eq!((n, text.as_str(), bytes), (42, "hello", [1, 2, 3]));
//! ```

extern crate composite_derive;

pub mod composite;
pub mod conv;
pub mod dynamic;
pub mod error;
pub mod message;
pub mod pack;
pub mod parse;
pub mod prim;
pub mod schema;
pub mod seq;

pub use crate::composite::Composite;
pub use crate::conv::{
    len::{EncodeLength, FixedWidth},
    target::Target,
    Decode, Encode,
};
pub use crate::error::{EncodeError, LengthError};
pub use crate::message::{Message, MAX_MESSAGE_SIZE};
pub use crate::pack::{decode, encode, Pack};
pub use crate::parse::{error::ParseError, ParseResult, Parser, SliceParser};
pub use crate::schema::{Fingerprint, TypeTag};

pub use ::composite_derive::Composite;
