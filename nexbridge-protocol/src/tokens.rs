//! Fixed byte sequences exchanged with the display and the authoring tool
//!
//! Every Nextion instruction and response ends with three `0xFF` bytes.

/// Instruction/response terminator byte
pub const TERMINATOR: u8 = 0xFF;

/// Number of consecutive terminator bytes ending a frame
pub const TERMINATOR_LEN: usize = 3;

/// Complete three-byte frame terminator
pub const FRAME_END: [u8; TERMINATOR_LEN] = [TERMINATOR; TERMINATOR_LEN];

/// Frame sent to the display to provoke an identification response
///
/// A NUL plus terminator flushes whatever partial instruction the display
/// may be holding, then `connect` asks it to identify itself.
pub const DISCOVERY_FRAME: &[u8] = b"\x00\xff\xff\xffconnect\xff\xff\xff";

/// Leading bytes of the display's identification response
pub const SIGNATURE_PREFIX: &[u8] = b"comok ";

/// Handshake sent by the authoring tool
pub const CONNECT_TOKEN: &[u8] = b"connect\xff\xff\xff";

/// Reply sent to the authoring tool ahead of the signature
pub const CONNECT_ACK: [u8; 4] = [0x1A, TERMINATOR, TERMINATOR, TERMINATOR];

/// Upload command prefix sent by the authoring tool
///
/// Followed by `name,size,baud` and a frame terminator.
pub const UPLOAD_TOKEN: &[u8] = b"whmi-wri ";

/// Upload parameter separator
pub const FIELD_SEPARATOR: u8 = b',';

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discovery_frame_layout() {
        assert_eq!(DISCOVERY_FRAME.len(), 14);
        assert_eq!(DISCOVERY_FRAME[0], 0x00);
        assert_eq!(&DISCOVERY_FRAME[1..4], &FRAME_END);
        assert_eq!(&DISCOVERY_FRAME[4..11], b"connect");
        assert_eq!(&DISCOVERY_FRAME[11..], &FRAME_END);
    }

    #[test]
    fn test_connect_token_is_discovery_tail() {
        assert!(DISCOVERY_FRAME.ends_with(CONNECT_TOKEN));
    }
}
