//! Link orchestration
//!
//! [`Link`] owns the serial port and the handler registry and drives one
//! protocol engine over them. The host loop calls [`Link::handle`] once per
//! tick; outbound requests go through [`Link::send`], [`Link::query`] and
//! [`Link::send_byte_stream`].
//!
//! Inbound path per tick: frame read (bounded by size and timeout) → parse →
//! dispatch → optional `OK`/`INVALID` reply. Every local failure discards the
//! current frame and returns control to the caller; the worst outcome is a
//! dropped message.

use heapless::Vec;

use syndesis_protocol::config::{ConfigError, GetAckPolicy, LinkConfig};
use syndesis_protocol::frame::{
    self, FrameBuf, FrameError, ACK_INVALID, ACK_OK, MAX_CONTENT_LEN,
};
use syndesis_protocol::message::{self, Operation};

use crate::dispatch::{ByteStreamHandler, GetHandler, HandlerRegistry, SetHandler, MAX_HANDLERS};
use crate::traits::SerialPort;

/// Errors surfaced by link operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError<E> {
    /// Transport I/O failure
    Io(E),
    /// Outbound frame would exceed the maximum frame size
    Frame(FrameError),
    /// No acknowledgment, or a reply other than `OK`, within the timeout
    AckFailed,
}

impl<E> From<FrameError> for LinkError<E> {
    fn from(e: FrameError) -> Self {
        LinkError::Frame(e)
    }
}

/// One end of a Syndesis link
///
/// Owns the serial port exclusively for its lifetime; callers that need to
/// share the transport must serialize access themselves. `CAP` bounds the
/// handler list per operation kind.
pub struct Link<'a, S: SerialPort, const CAP: usize = MAX_HANDLERS> {
    serial: S,
    config: LinkConfig,
    handlers: HandlerRegistry<'a, CAP>,
}

impl<'a, S: SerialPort, const CAP: usize> Link<'a, S, CAP> {
    /// Create a link over `serial`, validating the configuration
    pub fn new(serial: S, config: LinkConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            serial,
            config,
            handlers: HandlerRegistry::new(),
        })
    }

    /// The active configuration
    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Direct access to the underlying serial port
    pub fn serial_mut(&mut self) -> &mut S {
        &mut self.serial
    }

    /// Register a get handler, returns false once capacity is reached
    pub fn on_get(&mut self, handler: GetHandler<'a>) -> bool {
        self.handlers.on_get(handler)
    }

    /// Register a set handler, returns false once capacity is reached
    pub fn on_set(&mut self, handler: SetHandler<'a>) -> bool {
        self.handlers.on_set(handler)
    }

    /// Register a byte-stream handler, returns false once capacity is reached
    pub fn on_byte_stream(&mut self, handler: ByteStreamHandler<'a>) -> bool {
        self.handlers.on_byte_stream(handler)
    }

    /// One inbound processing step
    ///
    /// Reads at most one frame, routes it to the registered handlers and
    /// replies per the acknowledgment configuration. Returns without doing
    /// anything when no complete frame is pending. Malformed frames are
    /// discarded silently; only transport errors propagate.
    pub fn handle(&mut self) -> Result<(), LinkError<S::Error>> {
        let Some(buf) = self.read_frame()? else {
            return Ok(());
        };
        let Ok(msg) = message::parse(&self.config, &buf) else {
            return Ok(());
        };

        match msg.operation {
            Operation::Get => {
                let handled = self.handlers.dispatch_get(msg.key);
                if self.config.ack {
                    match self.config.get_ack {
                        GetAckPolicy::Never => {}
                        GetAckPolicy::OnFailure => {
                            if !handled {
                                self.send_invalid()?;
                            }
                        }
                        GetAckPolicy::Always => self.ack_result(handled)?,
                    }
                }
            }
            Operation::Set(value) => {
                let handled = self.handlers.dispatch_set(msg.key, value);
                if self.config.ack {
                    self.ack_result(handled)?;
                }
            }
            Operation::SetByteStream(payload) => {
                let handled = self.handlers.dispatch_byte_stream(msg.key, &payload);
                if self.config.ack {
                    self.ack_result(handled)?;
                }
            }
        }
        Ok(())
    }

    /// Send a set request, waiting for an acknowledgment per the configuration
    pub fn send(&mut self, key: &str, value: u32) -> Result<(), LinkError<S::Error>> {
        self.send_with_ack(key, value, self.config.ack)
    }

    /// Send a set request with an explicit acknowledgment requirement
    pub fn send_with_ack(
        &mut self,
        key: &str,
        value: u32,
        require_ack: bool,
    ) -> Result<(), LinkError<S::Error>> {
        let buf = frame::encode_set(&self.config, key, value)?;
        self.send_raw(&buf)?;
        if require_ack {
            self.wait_ack()?;
        }
        Ok(())
    }

    /// Send a get request; the peer answers with a set frame of its own
    pub fn query(&mut self, key: &str) -> Result<(), LinkError<S::Error>> {
        let buf = frame::encode_query(&self.config, key)?;
        self.send_raw(&buf)
    }

    /// Send a binary payload as a base64 byte-stream frame
    pub fn send_byte_stream(
        &mut self,
        key: &str,
        payload: &[u8],
        require_ack: bool,
    ) -> Result<(), LinkError<S::Error>> {
        let buf = frame::encode_byte_stream(&self.config, key, payload)?;
        self.send_raw(&buf)?;
        if require_ack {
            self.wait_ack()?;
        }
        Ok(())
    }

    /// Write an arbitrary frame content followed by the terminator
    pub fn send_raw(&mut self, content: &[u8]) -> Result<(), LinkError<S::Error>> {
        self.serial.write_all(content).map_err(LinkError::Io)?;
        self.serial
            .write_all(&[self.config.terminator])
            .map_err(LinkError::Io)
    }

    /// Emit a positive acknowledgment frame
    pub fn send_ok(&mut self) -> Result<(), LinkError<S::Error>> {
        self.send_raw(ACK_OK)
    }

    /// Emit a negative acknowledgment frame
    pub fn send_invalid(&mut self) -> Result<(), LinkError<S::Error>> {
        self.send_raw(ACK_INVALID)
    }

    /// Write a lone terminator and flush, letting a half-written frame settle
    pub fn clear(&mut self) -> Result<(), LinkError<S::Error>> {
        self.serial
            .write_all(&[self.config.terminator])
            .map_err(LinkError::Io)?;
        self.serial.flush().map_err(LinkError::Io)
    }

    /// Pull one terminator-delimited frame out of the transport
    ///
    /// Skips without consuming anything when fewer than 2 bytes are pending.
    /// Reads to the terminator or to the content bound, each byte wait
    /// limited by the configured timeout; a timeout before the terminator
    /// discards what was read. Frames shorter than 2 bytes are dropped.
    fn read_frame(&mut self) -> Result<Option<FrameBuf>, LinkError<S::Error>> {
        if self.serial.available() < 2 {
            return Ok(None);
        }
        let mut buf = FrameBuf::new();
        while buf.len() < MAX_CONTENT_LEN {
            match self
                .serial
                .read_byte(self.config.timeout_ms)
                .map_err(LinkError::Io)?
            {
                Some(byte) if byte == self.config.terminator => {
                    return Ok(Self::accept(buf));
                }
                Some(byte) => {
                    // Cannot fail, the loop bound keeps len under capacity
                    let _ = buf.push(byte);
                }
                // Timed out before the terminator arrived
                None => return Ok(None),
            }
        }
        Ok(Self::accept(buf))
    }

    fn accept(buf: FrameBuf) -> Option<FrameBuf> {
        if buf.len() < 2 {
            None
        } else {
            Some(buf)
        }
    }

    /// Reply `OK` or `INVALID` for a dispatch outcome
    fn ack_result(&mut self, handled: bool) -> Result<(), LinkError<S::Error>> {
        if handled {
            self.send_ok()
        } else {
            self.send_invalid()
        }
    }

    /// Block for the peer's acknowledgment after an outbound frame
    ///
    /// Reads up to 3 bytes or until the terminator, each wait bounded by the
    /// configured timeout. Exactly `OK` is success; anything else - silence,
    /// a short read, or the start of a longer reply - is [`LinkError::AckFailed`].
    fn wait_ack(&mut self) -> Result<(), LinkError<S::Error>> {
        let mut reply = Vec::<u8, 3>::new();
        loop {
            match self
                .serial
                .read_byte(self.config.timeout_ms)
                .map_err(LinkError::Io)?
            {
                Some(byte) if byte == self.config.terminator => break,
                Some(byte) => {
                    if reply.push(byte).is_err() {
                        break;
                    }
                    if reply.len() == 3 {
                        break;
                    }
                }
                None => break,
            }
        }
        if &reply[..] == ACK_OK {
            Ok(())
        } else {
            Err(LinkError::AckFailed)
        }
    }
}
