//! Finished-message buffer and the capacity configuration
//!
//! A [`Message`] is the contiguous byte sequence an encode call produces:
//! the schema fingerprint followed by every field encoding in supply order.
//! While being built it is owned exclusively by the one in-flight encode
//! call, which writes into it through the [`Target`] impl; once returned it
//! is an inert byte buffer that transport can carry however it likes.

use std::borrow::Borrow;

use crate::conv::target::Target;
use crate::schema::Fingerprint;

/// Maximum byte length of an encoded message, fingerprint included.
///
/// This is the engine's only tunable: an encode whose output would exceed
/// it fails with [`BufferOverflow`](crate::error::EncodeError::BufferOverflow),
/// and well-formed messages are never longer, so decode-side length claims
/// beyond it are always rejected too.
pub const MAX_MESSAGE_SIZE: usize = 8192;

// Length-prefix fields are u16; a capacity beyond their domain would let
// payloads exist that the prefix cannot describe.
const _: () = assert!(MAX_MESSAGE_SIZE <= u16::MAX as usize);

/// Newtype around `Vec<u8>` holding one finished (or in-progress) message.
///
/// Most of the methods on `Message` are implemented directly on the
/// underlying `Vec<u8>`.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Debug)]
#[repr(transparent)]
pub struct Message(Vec<u8>);

impl Message {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// Returns the message contents as a byte-slice.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the number of bytes in the message.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the message holds no bytes.
    ///
    /// A message produced by [`encode`](crate::pack::encode) is never
    /// empty; this exists for buffers constructed from raw bytes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Destructs the message into its backing vector.
    #[inline]
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    /// Reads the fingerprint embedded at the message head, or `None` when
    /// the message is too short to hold one.
    #[must_use]
    pub fn fingerprint(&self) -> Option<Fingerprint> {
        let head: [u8; Fingerprint::WIDTH] = self.0.get(..Fingerprint::WIDTH)?.try_into().ok()?;
        Some(Fingerprint::from_raw(u64::from_ne_bytes(head)))
    }
}

impl AsRef<[u8]> for Message {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Borrow<[u8]> for Message {
    fn borrow(&self) -> &[u8] {
        self.0.borrow()
    }
}

impl From<Message> for Vec<u8> {
    fn from(msg: Message) -> Self {
        msg.0
    }
}

impl From<Vec<u8>> for Message {
    fn from(buf: Vec<u8>) -> Message {
        Message(buf)
    }
}

impl From<&[u8]> for Message {
    fn from(buf: &[u8]) -> Message {
        Message(buf.into())
    }
}

impl Target for Message {
    /// Calls `<Vec<u8> as Target>::anticipate` on the inner vector.
    fn anticipate(&mut self, extra: usize) {
        self.0.anticipate(extra)
    }

    /// Constructs a `Message` via `<Vec<u8> as Target>::create`.
    fn create() -> Self {
        Self(Vec::create())
    }

    /// Calls `<Vec<u8> as Target>::push_one` on the inner vector.
    fn push_one(&mut self, b: u8) -> usize {
        self.0.push_one(b)
    }

    /// Calls `<Vec<u8> as Target>::push_many` on the inner vector.
    fn push_many<const N: usize>(&mut self, arr: [u8; N]) -> usize {
        self.0.push_many(arr)
    }

    /// Calls `<Vec<u8> as Target>::push_all` on the inner vector.
    fn push_all(&mut self, buf: &[u8]) -> usize {
        self.0.push_all(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_accessor_reads_head() {
        let fp = Fingerprint::from_tags(&[crate::schema::tag_of("u8")]);
        let mut msg = Message::create();
        fp.write_to(&mut msg);
        assert_eq!(msg.fingerprint(), Some(fp));
        assert_eq!(msg.len(), Fingerprint::WIDTH);
    }

    #[test]
    fn short_buffer_has_no_fingerprint() {
        let msg = Message::from(vec![1u8, 2, 3]);
        assert_eq!(msg.fingerprint(), None);
    }

    #[test]
    fn conversions_preserve_bytes() {
        let msg = Message::from(b"abc".as_slice());
        assert_eq!(msg.as_bytes(), b"abc");
        assert_eq!(msg.clone().into_vec(), b"abc".to_vec());
        assert_eq!(Vec::<u8>::from(msg), b"abc".to_vec());
    }
}
