//! Nextion Upload Link Protocol
//!
//! This crate defines the byte-level vocabulary the bridge sniffs on the two
//! serial links: the display link (bridge ↔ Nextion LCD) and the host link
//! (authoring tool ↔ bridge).
//!
//! # Protocol Overview
//!
//! Every instruction and response is plain ASCII closed by three `0xFF`
//! bytes:
//!
//! ```text
//! ┌──────────────────────────┬────┬────┬────┐
//! │ ASCII instruction/reply  │ FF │ FF │ FF │
//! └──────────────────────────┴────┴────┴────┘
//! ```
//!
//! The bridge only recognizes three exchanges:
//!
//! - discovery: `00 FF FF FF connect FF FF FF` → `comok … FF FF FF`
//! - handshake: tool sends `connect FF FF FF`, bridge answers
//!   `1A FF FF FF` plus the captured `comok …` signature
//! - upload: tool sends `whmi-wri <size>,<baud>,<x> FF FF FF`, after which
//!   both links move to `<baud>` and bytes are passed through untouched

#![no_std]
#![deny(unsafe_code)]

pub mod matcher;
pub mod signature;
pub mod tokens;
pub mod upload;

pub use matcher::TokenMatcher;
pub use signature::{Signature, SignatureError, SIGNATURE_CAPACITY};
pub use tokens::{
    CONNECT_ACK, CONNECT_TOKEN, DISCOVERY_FRAME, FRAME_END, SIGNATURE_PREFIX, TERMINATOR,
    UPLOAD_TOKEN,
};
pub use upload::UploadParser;
