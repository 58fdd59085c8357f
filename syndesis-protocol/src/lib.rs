//! Syndesis Wire Format
//!
//! This crate defines the textual key/value protocol spoken between a
//! controller and a peripheral over a byte-oriented serial link. The protocol
//! is designed for simplicity, low overhead, and hand-debuggability: every
//! frame is printable text ended by a single terminator byte.
//!
//! # Protocol Overview
//!
//! One frame per terminator-delimited unit:
//!
//! ```text
//! <key><SEP><QUERY>        -- get request        e.g. "temp=?"
//! <key><SEP><digits>       -- set request        e.g. "temp=72"
//! <key><MARKER><base64>    -- byte-stream set    e.g. "blob@AQID"
//! OK                       -- positive acknowledgment
//! INVALID                  -- negative acknowledgment
//! ```
//!
//! Default delimiters are `=` (separator), `?` (query), `@` (base64 marker)
//! and `\n` (terminator), all reconfigurable through [`LinkConfig`].
//!
//! This crate is the pure half of the protocol: framing bytes in and out of a
//! transport, handler dispatch and acknowledgment timing live in
//! `syndesis-core`.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod codec;
pub mod config;
pub mod frame;
pub mod message;

pub use config::{ConfigError, GetAckPolicy, LinkConfig, MAX_PREFIX_LEN};
pub use frame::{FrameBuf, FrameError, ACK_INVALID, ACK_OK, MAX_CONTENT_LEN, MAX_FRAME_SIZE};
pub use message::{Message, Operation, ParseError, MAX_PAYLOAD_SIZE};
