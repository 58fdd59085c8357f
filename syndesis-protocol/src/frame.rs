//! Outbound frame encoding
//!
//! Builds the wire representation of get/set/byte-stream requests into
//! bounded buffers. A frame here is the content only - the link appends the
//! terminator byte when writing to the transport.
//!
//! Construction fails with [`FrameError::Overflow`] instead of truncating
//! when key, value and payload together would not fit a frame.

use core::fmt::Write;

use heapless::{String, Vec};

use crate::codec;
use crate::config::LinkConfig;

/// Maximum frame size in bytes, including the terminator allowance
pub const MAX_FRAME_SIZE: usize = 100;

/// Maximum frame content length (the terminator still has to fit)
pub const MAX_CONTENT_LEN: usize = MAX_FRAME_SIZE - 1;

/// Positive acknowledgment frame content
pub const ACK_OK: &[u8] = b"OK";

/// Negative acknowledgment frame content
pub const ACK_INVALID: &[u8] = b"INVALID";

/// A single frame's content, excluding the terminator
pub type FrameBuf = Vec<u8, MAX_FRAME_SIZE>;

/// Errors that can occur while building a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Key, value and payload do not fit in [`MAX_FRAME_SIZE`]
    Overflow,
}

/// Encode a set request: `key` + separator + decimal value
pub fn encode_set(config: &LinkConfig, key: &str, value: u32) -> Result<FrameBuf, FrameError> {
    let mut digits: String<10> = String::new();
    write!(digits, "{}", value).map_err(|_| FrameError::Overflow)?;

    let mut buf = FrameBuf::new();
    push_key(&mut buf, key, config.separator)?;
    push_content(&mut buf, digits.as_bytes())?;
    Ok(buf)
}

/// Encode a get request: `key` + separator + query marker
pub fn encode_query(config: &LinkConfig, key: &str) -> Result<FrameBuf, FrameError> {
    let mut buf = FrameBuf::new();
    push_key(&mut buf, key, config.separator)?;
    push_content(&mut buf, &[config.query])?;
    Ok(buf)
}

/// Encode a byte-stream set request: `key` + marker + base64 payload
pub fn encode_byte_stream(
    config: &LinkConfig,
    key: &str,
    payload: &[u8],
) -> Result<FrameBuf, FrameError> {
    let mut buf = FrameBuf::new();
    push_key(&mut buf, key, config.base64_marker)?;

    let encoded_len = codec::encoded_len(payload.len()).ok_or(FrameError::Overflow)?;
    let start = buf.len();
    if start + encoded_len > MAX_CONTENT_LEN {
        return Err(FrameError::Overflow);
    }
    buf.resize(start + encoded_len, 0)
        .map_err(|_| FrameError::Overflow)?;
    codec::encode(payload, &mut buf[start..]).map_err(|_| FrameError::Overflow)?;
    Ok(buf)
}

fn push_key(buf: &mut FrameBuf, key: &str, delimiter: u8) -> Result<(), FrameError> {
    buf.extend_from_slice(key.as_bytes())
        .map_err(|_| FrameError::Overflow)?;
    buf.push(delimiter).map_err(|_| FrameError::Overflow)?;
    if buf.len() > MAX_CONTENT_LEN {
        return Err(FrameError::Overflow);
    }
    Ok(())
}

fn push_content(buf: &mut FrameBuf, content: &[u8]) -> Result<(), FrameError> {
    buf.extend_from_slice(content)
        .map_err(|_| FrameError::Overflow)?;
    if buf.len() > MAX_CONTENT_LEN {
        return Err(FrameError::Overflow);
    }
    Ok(())
}
