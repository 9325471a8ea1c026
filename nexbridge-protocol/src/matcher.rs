//! Rolling-cursor token matching
//!
//! A single cursor walks the token as bytes arrive. On a mismatch the cursor
//! goes back to zero and the offending byte is dropped. There is no
//! backtracking, so a token that directly follows a stray copy of its own
//! first byte (`"cconnect"`) is not seen.

/// Matcher for a fixed token fed one byte at a time
#[derive(Debug, Clone)]
pub struct TokenMatcher<'t> {
    token: &'t [u8],
    cursor: usize,
}

impl<'t> TokenMatcher<'t> {
    /// Create a matcher for `token`
    ///
    /// An empty token never matches.
    pub const fn new(token: &'t [u8]) -> Self {
        Self { token, cursor: 0 }
    }

    /// Reset the cursor to the start of the token
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Feed a byte
    ///
    /// Returns `true` when this byte completes the token. The cursor is
    /// reset afterwards so the matcher can be reused.
    pub fn feed(&mut self, byte: u8) -> bool {
        if self.token.is_empty() {
            return false;
        }

        if self.token[self.cursor] != byte {
            self.cursor = 0;
            return false;
        }

        self.cursor += 1;

        if self.cursor == self.token.len() {
            self.cursor = 0;
            true
        } else {
            false
        }
    }

    /// Feed bytes until the token completes
    ///
    /// Returns the number of bytes consumed including the final token byte,
    /// or `None` if the token did not complete within `bytes`.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Option<usize> {
        bytes
            .iter()
            .position(|&b| self.feed(b))
            .map(|idx| idx + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{CONNECT_TOKEN, UPLOAD_TOKEN};

    #[test]
    fn test_exact_token() {
        let mut m = TokenMatcher::new(CONNECT_TOKEN);
        assert_eq!(m.feed_bytes(b"connect\xff\xff\xff"), Some(10));
    }

    #[test]
    fn test_leading_noise() {
        let mut m = TokenMatcher::new(UPLOAD_TOKEN);
        assert_eq!(m.feed_bytes(b"xx\xffwhmi-wri "), Some(12));
    }

    #[test]
    fn test_interrupted_token_resets() {
        let mut m = TokenMatcher::new(CONNECT_TOKEN);
        assert_eq!(m.feed_bytes(b"connXect\xff\xff\xff"), None);
        assert_eq!(m.cursor, 0);
    }

    #[test]
    fn test_mismatch_byte_is_dropped() {
        let mut m = TokenMatcher::new(CONNECT_TOKEN);
        assert_eq!(m.feed_bytes(b"cconnect\xff\xff\xff"), None);
        assert_eq!(m.cursor, 0);

        // The next clean token still matches
        assert_eq!(m.feed_bytes(b"connect\xff\xff\xff"), Some(10));
    }

    #[test]
    fn test_doubled_first_byte_misses_upload_token() {
        let mut m = TokenMatcher::new(UPLOAD_TOKEN);
        assert_eq!(m.feed_bytes(b"wwhmi-wri "), None);
        assert_eq!(m.feed_bytes(b" whmi-wri "), Some(10));
    }

    #[test]
    fn test_partial_progress() {
        let mut m = TokenMatcher::new(CONNECT_TOKEN);
        assert_eq!(m.feed_bytes(b"conn"), None);
        assert_eq!(m.cursor, 4);
        m.reset();
        assert_eq!(m.cursor, 0);
    }

    #[test]
    fn test_reusable_after_match() {
        let mut m = TokenMatcher::new(b"ok");
        assert!(!m.feed(b'o'));
        assert!(m.feed(b'k'));
        assert!(!m.feed(b'o'));
        assert!(m.feed(b'k'));
    }

    #[test]
    fn test_empty_token_never_matches() {
        let mut m = TokenMatcher::new(b"");
        assert_eq!(m.feed_bytes(b"anything"), None);
    }
}
