//! Upload command header parsing
//!
//! The authoring tool starts a firmware transfer with
//!
//! ```text
//! whmi-wri <file size>,<baud>,<reserved> FF FF FF
//! ```
//!
//! The parser is fed the raw byte stream from the tool. It first waits for
//! the `whmi-wri ` token, then folds the decimal digits of the second
//! comma-delimited field into the requested baud rate and reports it once
//! the frame terminator arrives.

use crate::matcher::TokenMatcher;
use crate::tokens::{FIELD_SEPARATOR, TERMINATOR, TERMINATOR_LEN, UPLOAD_TOKEN};

/// Parser for the upload command header
#[derive(Debug, Clone)]
pub struct UploadParser {
    state: ParseState,
    matcher: TokenMatcher<'static>,
    separators: u8,
    rate: u32,
    terminators: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Looking for the command token
    WaitingForToken,
    /// Token seen, reading parameters up to the terminator
    ReadingParams,
}

impl Default for UploadParser {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadParser {
    /// Create a new upload parser
    pub const fn new() -> Self {
        Self {
            state: ParseState::WaitingForToken,
            matcher: TokenMatcher::new(UPLOAD_TOKEN),
            separators: 0,
            rate: 0,
            terminators: 0,
        }
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.state = ParseState::WaitingForToken;
        self.matcher.reset();
        self.separators = 0;
        self.rate = 0;
        self.terminators = 0;
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Some(rate)` when the header terminator completes the command.
    /// The parser resets itself afterwards.
    pub fn feed(&mut self, byte: u8) -> Option<u32> {
        match self.state {
            ParseState::WaitingForToken => {
                if self.matcher.feed(byte) {
                    self.state = ParseState::ReadingParams;
                }
                None
            }
            ParseState::ReadingParams => {
                if byte == TERMINATOR {
                    self.terminators += 1;
                    if self.terminators == TERMINATOR_LEN {
                        let rate = self.rate;
                        self.reset();
                        return Some(rate);
                    }
                    return None;
                }

                self.terminators = 0;
                if byte == FIELD_SEPARATOR {
                    self.separators = self.separators.saturating_add(1);
                } else if byte.is_ascii_digit() && self.separators == 1 {
                    // No overflow guard: the field is a small baud rate
                    self.rate = self
                        .rate
                        .wrapping_mul(10)
                        .wrapping_add(u32::from(byte - b'0'));
                }
                None
            }
        }
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first completed rate along with the number of bytes
    /// consumed. Bytes after the terminator are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Option<(u32, usize)> {
        for (idx, &byte) in bytes.iter().enumerate() {
            if let Some(rate) = self.feed(byte) {
                return Some((rate, idx + 1));
            }
        }
        None
    }
}
