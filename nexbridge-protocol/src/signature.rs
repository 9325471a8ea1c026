//! Display identification signature
//!
//! The display answers a discovery frame with
//! `comok <model and firmware details>` followed by three `0xFF` bytes.
//! The captured signature is the response from the start of `comok `
//! through the first terminator byte, inclusive. That is exactly what is
//! replayed to the authoring tool during the handshake.

use heapless::Vec;

use crate::tokens::{SIGNATURE_PREFIX, TERMINATOR, TERMINATOR_LEN};

/// Maximum stored signature length in bytes
pub const SIGNATURE_CAPACITY: usize = 128;

/// Errors from locating or storing a signature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SignatureError {
    /// No complete `comok ... FF FF FF` response in the buffer
    NotFound,
    /// A complete response was found but does not fit [`SIGNATURE_CAPACITY`]
    TooLong {
        /// Length the signature would have had
        len: usize,
    },
}

/// Captured display signature
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    bytes: Vec<u8, SIGNATURE_CAPACITY>,
}

impl Signature {
    /// Create an empty signature
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Forget any held signature
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// True if no signature is held
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Signature length in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Signature bytes, prefix and trailing terminator byte included
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Replace the held signature with the one found in `response`
    ///
    /// On error the signature is left untouched.
    pub fn capture(&mut self, response: &[u8]) -> Result<(), SignatureError> {
        let span = locate(response)?;
        let found = &response[span];
        if found.len() > SIGNATURE_CAPACITY {
            return Err(SignatureError::TooLong { len: found.len() });
        }
        self.bytes.clear();
        // Length checked above
        let _ = self.bytes.extend_from_slice(found);
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Signature {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Signature[{=[u8]:a}]", self.as_bytes());
    }
}

/// Find the signature span inside `response`
///
/// Scans each occurrence of the `comok ` prefix in turn and returns the
/// range from the prefix through the first byte of the first following run
/// of three terminators. Never looks past the end of `response`.
pub fn locate(response: &[u8]) -> Result<core::ops::Range<usize>, SignatureError> {
    let prefix_len = SIGNATURE_PREFIX.len();
    if response.len() < prefix_len {
        return Err(SignatureError::NotFound);
    }

    for start in 0..=response.len() - prefix_len {
        if &response[start..start + prefix_len] != SIGNATURE_PREFIX {
            continue;
        }
        let body = &response[start + prefix_len..];
        if let Some(pos) = body
            .windows(TERMINATOR_LEN)
            .position(|w| w.iter().all(|&b| b == TERMINATOR))
        {
            let end = start + prefix_len + pos + 1;
            return Ok(start..end);
        }
    }

    Err(SignatureError::NotFound)
}
