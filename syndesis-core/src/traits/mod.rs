//! Transport abstraction traits
//!
//! The link engine reaches its byte transport only through these traits,
//! so the same engine runs against a hardware UART, a PTY in tests, or a
//! socket bridge.

pub mod serial;

pub use serial::SerialPort;
