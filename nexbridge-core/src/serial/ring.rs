//! Fixed-capacity circular byte buffer
//!
//! Capacity must be a power of two so indices wrap with a mask. The buffer
//! itself is not synchronized; [`super::SharedPort`] wraps it in a critical
//! section for use across interrupt and main-loop context.

/// Circular byte buffer with FIFO semantics
#[derive(Debug, Clone)]
pub struct RingBuffer<const N: usize> {
    buf: [u8; N],
    /// Next slot to write
    head: usize,
    /// Next slot to read
    tail: usize,
    /// Bytes currently held, never more than `N`
    len: usize,
}

impl<const N: usize> Default for RingBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RingBuffer<N> {
    const MASK: usize = {
        assert!(N.is_power_of_two(), "ring buffer capacity must be a power of two");
        N - 1
    };

    /// Create an empty buffer
    pub const fn new() -> Self {
        let _ = Self::MASK;
        Self {
            buf: [0; N],
            head: 0,
            tail: 0,
            len: 0,
        }
    }

    /// Number of bytes held
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if no bytes are held
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True if no more bytes fit
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// Append a byte
    ///
    /// Returns the byte back if the buffer is full.
    pub fn push(&mut self, byte: u8) -> Result<(), u8> {
        if self.is_full() {
            return Err(byte);
        }
        self.buf[self.head] = byte;
        self.head = (self.head + 1) & Self::MASK;
        self.len += 1;
        Ok(())
    }

    /// Remove the oldest byte
    pub fn pop(&mut self) -> Option<u8> {
        if self.is_empty() {
            return None;
        }
        let byte = self.buf[self.tail];
        self.tail = (self.tail + 1) & Self::MASK;
        self.len -= 1;
        Some(byte)
    }

    /// Drop all held bytes
    pub fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.len = 0;
    }
}
