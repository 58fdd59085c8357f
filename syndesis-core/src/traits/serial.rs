//! Serial port abstraction
//!
//! A blocking byte-pipe with a bounded per-byte read wait. The link assumes
//! the pipe is already reliable (no retransmission or checksumming happens
//! above it) and that it is the only reader and writer.

/// Byte-oriented serial transport
///
/// Implementations decide how time is measured; the link only passes the
/// configured timeout through. `read_byte` must return `Ok(None)` once the
/// timeout elapses without a byte, never block indefinitely.
pub trait SerialPort {
    /// Error type for transport operations
    type Error;

    /// Number of bytes ready to read without waiting
    fn available(&mut self) -> usize;

    /// Read a single byte, waiting up to `timeout_ms` for it
    ///
    /// Returns `Ok(None)` if no byte arrived within the timeout.
    fn read_byte(&mut self, timeout_ms: u32) -> Result<Option<u8>, Self::Error>;

    /// Write all bytes to the transport
    ///
    /// Blocks until everything has been accepted or an error occurs.
    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered output
    fn flush(&mut self) -> Result<(), Self::Error>;
}
