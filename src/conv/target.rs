/// Marker trait for byte-oriented buffers with incremental append operations
///
/// In most ways, it is convenient to think of `Target` as an analogue of
/// [`std::io::Write`]. The principal difference is that the `push_XXX`
/// methods on `Target` are infallible and total; while they return
/// a `usize` value representing the number of bytes written, this is used
/// only for summary book-keeping on the caller side, never as a feedback
/// mechanism indicating failure or partial success.
///
/// All implementors of `Target` must define these methods as infallible and
/// total.
pub trait Target {
    /// Performs any necessary operations that amortize the cost incurred by
    /// writing a certain number of additional bytes to the end of the
    /// `Target`, over the course of an unknown number of push operations.
    ///
    /// For underlying structures with a notion of capacity, such as
    /// `Vec<u8>`, this performs the appropriate reservation; for others it
    /// may be a no-op. It may be called with only partial information as to
    /// how many bytes will ultimately be written.
    fn anticipate(&mut self, extra: usize);

    /// Returns a fresh object of the `Self` type with an initially empty
    /// buffer.
    fn create() -> Self;

    /// Appends a single byte.
    ///
    /// The return value must be `1`.
    fn push_one(&mut self, b: u8) -> usize;

    /// Appends the bytes in a known-length array.
    ///
    /// The operational semantics must be indistinguishable from repeated
    /// calls to [`push_one`](Target::push_one) over every element of the
    /// array in order; the return value must be `N`.
    fn push_many<const N: usize>(&mut self, arr: [u8; N]) -> usize;

    /// Appends the bytes in an arbitrary-length byte-slice.
    ///
    /// The operational semantics must be indistinguishable from repeated
    /// calls to [`push_one`](Target::push_one) over every element of the
    /// slice in order; the return value must be the length of the slice.
    fn push_all(&mut self, buf: &[u8]) -> usize;
}

/// Useful alias for `std::io::Sink` that is used to count the number of
/// bytes required to serialize an arbitrary-typed object, without performing
/// any memory operations.
pub type ByteCounter = std::io::Sink;

impl Target for ByteCounter {
    #[inline(always)]
    fn anticipate(&mut self, _: usize) {}

    #[inline]
    fn create() -> Self {
        std::io::sink()
    }

    #[inline(always)]
    fn push_one(&mut self, _: u8) -> usize {
        1
    }

    #[inline(always)]
    fn push_many<const N: usize>(&mut self, _: [u8; N]) -> usize {
        N
    }

    #[inline(always)]
    fn push_all(&mut self, buf: &[u8]) -> usize {
        buf.len()
    }
}

impl Target for Vec<u8> {
    #[inline]
    fn anticipate(&mut self, extra: usize) {
        self.reserve(extra)
    }

    #[inline]
    fn create() -> Self {
        Self::new()
    }

    #[inline]
    fn push_one(&mut self, b: u8) -> usize {
        self.push(b);
        1
    }

    #[inline]
    fn push_many<const N: usize>(&mut self, arr: [u8; N]) -> usize {
        self.extend(&arr);
        N
    }

    #[inline]
    fn push_all(&mut self, buf: &[u8]) -> usize {
        self.extend_from_slice(buf);
        buf.len()
    }
}
