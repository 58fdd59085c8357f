//! Inbound message parsing
//!
//! Splits a received frame into its key and a classified operation. The
//! split point is the first byte matching either the separator or the base64
//! marker; everything before it is the key, everything after it the operator
//! argument.
//!
//! Set values are accumulated as unsigned decimal digits. There is no sign
//! handling on the wire, so negative values cannot be represented;
//! accumulation stops at the first non-digit byte and wraps on overflow, so
//! it is deterministic and bounded for arbitrary input.

use heapless::Vec;

use crate::codec;
use crate::config::LinkConfig;
use crate::frame::MAX_FRAME_SIZE;

/// Maximum decoded byte-stream payload size
///
/// A full frame of base64 never decodes to more than this.
pub const MAX_PAYLOAD_SIZE: usize = (MAX_FRAME_SIZE * 3) / 4;

/// Errors that reject a frame during parsing
///
/// The link discards rejected frames silently; the error only reports why.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Frame does not start with the configured prefix
    PrefixMismatch,
    /// No separator or base64 marker anywhere in the frame
    MissingOperator,
    /// Nothing after the separator or marker
    MissingArgument,
    /// Key bytes are not valid UTF-8
    BadKey,
    /// Base64 payload failed to decode
    BadPayload,
}

/// A classified operation carried by a frame
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Operation {
    /// Read the value for a key
    Get,
    /// Write an unsigned integer value
    Set(u32),
    /// Write a decoded binary payload
    SetByteStream(Vec<u8, MAX_PAYLOAD_SIZE>),
}

/// A parsed frame: key plus operation
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Message<'a> {
    /// Key portion of the frame, before the operator byte
    pub key: &'a str,
    /// Classified operation and decoded argument
    pub operation: Operation,
}

/// Parse a frame (terminator already stripped) into a [`Message`]
pub fn parse<'a>(config: &LinkConfig, frame: &'a [u8]) -> Result<Message<'a>, ParseError> {
    if let Some(prefix) = &config.prefix {
        if !frame.starts_with(prefix) {
            return Err(ParseError::PrefixMismatch);
        }
    }

    let split = frame
        .iter()
        .position(|&b| b == config.separator || b == config.base64_marker)
        .ok_or(ParseError::MissingOperator)?;
    if split + 1 >= frame.len() {
        return Err(ParseError::MissingArgument);
    }

    let key = core::str::from_utf8(&frame[..split]).map_err(|_| ParseError::BadKey)?;

    let operation = if frame[split] == config.separator {
        if frame[split + 1] == config.query {
            Operation::Get
        } else {
            Operation::Set(accumulate_digits(&frame[split + 1..]))
        }
    } else {
        let mut decoded = [0u8; MAX_PAYLOAD_SIZE];
        let len = codec::decode(&frame[split + 1..], &mut decoded)
            .map_err(|_| ParseError::BadPayload)?;
        let mut payload = Vec::new();
        payload
            .extend_from_slice(&decoded[..len])
            .map_err(|_| ParseError::BadPayload)?;
        Operation::SetByteStream(payload)
    };

    Ok(Message { key, operation })
}

/// Accumulate unsigned decimal digits, stopping at the first non-digit
fn accumulate_digits(bytes: &[u8]) -> u32 {
    let mut value: u32 = 0;
    for &b in bytes {
        if !b.is_ascii_digit() {
            break;
        }
        value = value.wrapping_mul(10).wrapping_add(u32::from(b - b'0'));
    }
    value
}
